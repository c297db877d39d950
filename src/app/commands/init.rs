//! Init command - deploys the default template tree.

use std::fs;
use std::path::Path;

use crate::domain::AppError;
use crate::services::scaffold_assets;

/// Execute the init command.
///
/// Writes the embedded default templates (compose files, env templates,
/// entrypoint, Dockerfile, example VPN profile) under `base_dir`. Refuses to
/// run when a template tree is already present.
pub fn execute(base_dir: &Path) -> Result<Vec<String>, AppError> {
    if base_dir.join("config").exists() || base_dir.join("docker").exists() {
        return Err(AppError::ScaffoldExists);
    }

    let files = scaffold_assets::scaffold_files()?;
    let mut written = Vec::with_capacity(files.len());

    for (relative_path, content) in files {
        let target = base_dir.join(&relative_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
        written.push(relative_path);
    }

    Ok(written)
}
