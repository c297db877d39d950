//! Filesystem template loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, EnvConfig, TemplateSet, TemplateSlot};

/// Read-only template store rooted at a base directory.
///
/// Resolves each slot's relative path under the base directory and reads it
/// exactly once. Loading fails on the first missing or empty file, naming the
/// slot and the exact path.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateStore {
    base_dir: PathBuf,
}

impl FilesystemTemplateStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Absolute path for a slot's template file.
    pub fn path_for(&self, slot: TemplateSlot, env: &EnvConfig) -> PathBuf {
        self.base_dir.join(slot.relative_path(&env.openvpn_config_env))
    }

    /// Load every required slot into a template set.
    ///
    /// Relay-only slots are skipped when the relay stack is excluded.
    pub fn load(&self, env: &EnvConfig, with_relay: bool) -> Result<TemplateSet, AppError> {
        let mut set = TemplateSet::new();

        for slot in TemplateSlot::ALL {
            if slot.relay_only() && !with_relay {
                continue;
            }
            let path = self.path_for(slot, env);
            let content = read_template(slot, &path)?;
            set.insert(slot, content, &path.to_string_lossy())?;
        }

        Ok(set)
    }
}

fn read_template(slot: TemplateSlot, path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::TemplateNotFound {
            slot: slot.name().to_string(),
            path: path.to_string_lossy().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}
