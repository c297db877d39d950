//! tunnelstack: synthesize a Tailscale + OpenVPN EC2 appliance stack from
//! templates and environment configuration.

pub mod app;
pub mod domain;
pub mod services;

use std::path::Path;

use app::commands::{doctor, init, synth, user_data};

pub use app::commands::doctor::DoctorReport;
pub use app::commands::synth::SynthOutcome;
pub use domain::{AppError, EnvConfig, StackConfig, SubstitutionContext, SubstitutionPlan};

/// Run the full pipeline and write the Terraform JSON stack document.
///
/// Environment validation happens first and is batched: every missing
/// variable is reported before any file is read.
pub fn synth(
    base_dir: &Path,
    out_dir: &Path,
    relay_override: Option<bool>,
) -> Result<SynthOutcome, AppError> {
    let env = EnvConfig::from_env()?;
    synth::execute(&env, base_dir, out_dir, relay_override)
}

/// Generate the first-boot bootstrap script without synthesizing the stack.
pub fn user_data(base_dir: &Path, relay_override: Option<bool>) -> Result<String, AppError> {
    let env = EnvConfig::from_env()?;
    user_data::execute(&env, base_dir, relay_override)
}

/// Deploy the default template tree into `base_dir`.
///
/// Returns the relative paths of every file written.
pub fn init(base_dir: &Path) -> Result<Vec<String>, AppError> {
    init::execute(base_dir)
}

/// Validate environment variables, template files, and substitution output.
pub fn doctor(base_dir: &Path) -> Result<DoctorReport, AppError> {
    doctor::execute(base_dir)
}
