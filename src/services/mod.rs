//! Adapters over the filesystem and embedded assets.

pub mod scaffold_assets;
pub mod template_loader;

pub use template_loader::FilesystemTemplateStore;
