//! Synth command - writes the Terraform JSON stack document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, EnvConfig, stack};

/// Name of the synthesized stack document.
pub const STACK_DOCUMENT_FILE: &str = "cdk.tf.json";

/// Result of a successful synthesis.
#[derive(Debug)]
pub struct SynthOutcome {
    /// Where the stack document was written.
    pub output_path: PathBuf,
    /// Whether the relay stack is included.
    pub with_relay: bool,
    /// Instance type declared in the document.
    pub instance_type: String,
}

/// Execute the synth command.
///
/// Runs the full pipeline: template load, substitution, bootstrap script
/// generation, Terraform JSON synthesis, and writes the document under
/// `out_dir`.
pub fn execute(
    env: &EnvConfig,
    base_dir: &Path,
    out_dir: &Path,
    relay_override: Option<bool>,
) -> Result<SynthOutcome, AppError> {
    let stack_config = super::load_stack_config(base_dir)?;
    let with_relay = relay_override.unwrap_or(stack_config.relay);

    let script = super::user_data::execute(env, base_dir, Some(with_relay))?;
    let document = stack::synthesize(env, &stack_config, &script);

    fs::create_dir_all(out_dir)?;
    let output_path = out_dir.join(STACK_DOCUMENT_FILE);
    let rendered = serde_json::to_string_pretty(&document)?;
    fs::write(&output_path, rendered)?;

    Ok(SynthOutcome { output_path, with_relay, instance_type: stack_config.instance_type })
}
