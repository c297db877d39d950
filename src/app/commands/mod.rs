//! Command orchestration.

pub mod doctor;
pub mod init;
pub mod synth;
pub mod user_data;

use std::path::Path;

use crate::domain::{AppError, StackConfig, stack};

/// Stack configuration file name, looked up under the base directory.
pub const STACK_CONFIG_FILE: &str = "tunnelstack.toml";

/// Load `tunnelstack.toml` from the base directory, falling back to defaults
/// when the file is absent.
pub(crate) fn load_stack_config(base_dir: &Path) -> Result<StackConfig, AppError> {
    let path = base_dir.join(STACK_CONFIG_FILE);
    if !path.exists() {
        return Ok(StackConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    stack::parse_stack_config_content(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_config_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let config = load_stack_config(temp.path()).unwrap();
        assert_eq!(config.instance_type, "t4g.nano");
    }

    #[test]
    fn config_file_overrides_defaults() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(STACK_CONFIG_FILE), "instance_type = \"t4g.small\"\n")
            .unwrap();

        let config = load_stack_config(temp.path()).unwrap();
        assert_eq!(config.instance_type, "t4g.small");
    }
}
