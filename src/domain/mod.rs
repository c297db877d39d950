//! Pure domain logic: configuration, templates, substitution, and generation.

pub mod env_config;
pub mod error;
pub mod stack;
pub mod substitution;
pub mod template;
pub mod user_data;

pub use env_config::{EnvConfig, REQUIRED_VARS};
pub use error::AppError;
pub use stack::StackConfig;
pub use substitution::{SubstitutionContext, SubstitutionPlan};
pub use template::{TemplateSet, TemplateSlot};
