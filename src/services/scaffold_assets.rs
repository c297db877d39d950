//! Embedded default template tree for `tunnelstack init`.

use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::AppError;

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// Every scaffold file as (relative path, content), sorted by path.
pub fn scaffold_files() -> Result<Vec<(String, String)>, AppError> {
    let mut files = Vec::new();
    collect_files(SCAFFOLD_DIR.entries(), &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(
    entries: &[DirEntry<'_>],
    files: &mut Vec<(String, String)>,
) -> Result<(), AppError> {
    for entry in entries {
        match entry {
            DirEntry::File(file) => {
                let path = file.path().to_string_lossy().to_string();
                let content = file
                    .contents_utf8()
                    .ok_or_else(|| AppError::ScaffoldAssetMissing(path.clone()))?;
                files.push((path, content.to_string()));
            }
            DirEntry::Dir(dir) => collect_files(dir.entries(), files)?,
        }
    }
    Ok(())
}
