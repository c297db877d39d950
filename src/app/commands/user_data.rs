//! User-data command - generates the first-boot bootstrap script.

use std::path::Path;

use crate::domain::{AppError, EnvConfig, SubstitutionPlan, user_data};
use crate::services::FilesystemTemplateStore;

/// Execute the user-data command.
///
/// Loads templates under `base_dir`, substitutes placeholders, and returns the
/// bootstrap script. `relay_override` takes precedence over the stack
/// configuration's `relay` setting.
pub fn execute(
    env: &EnvConfig,
    base_dir: &Path,
    relay_override: Option<bool>,
) -> Result<String, AppError> {
    let stack = super::load_stack_config(base_dir)?;
    let with_relay = relay_override.unwrap_or(stack.relay);

    let store = FilesystemTemplateStore::new(base_dir);
    let templates = store.load(env, with_relay)?;

    let plan = SubstitutionPlan::build(env);
    let substituted = plan.apply(templates);

    user_data::generate(&substituted, with_relay)
}
