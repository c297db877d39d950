//! Doctor command - validates environment, templates, and substitution output.

use std::path::Path;

use crate::domain::template::TemplateSlot;
use crate::domain::{AppError, EnvConfig, SubstitutionPlan};
use crate::services::FilesystemTemplateStore;

/// Outcome of a doctor run.
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Human-readable findings, empty when everything checks out.
    pub issues: Vec<String>,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }
}

/// Execute the doctor command against the process environment.
pub fn execute(base_dir: &Path) -> Result<DoctorReport, AppError> {
    run_checks(EnvConfig::from_env(), base_dir)
}

/// Run all checks with an already-resolved environment result.
///
/// Missing environment variables become findings rather than a hard failure,
/// so one run reports everything the operator has to fix.
pub(crate) fn run_checks(
    env: Result<EnvConfig, AppError>,
    base_dir: &Path,
) -> Result<DoctorReport, AppError> {
    let mut report = DoctorReport::default();

    let env = match env {
        Ok(env) => env,
        Err(AppError::MissingEnvVars(names)) => {
            for name in names {
                report.issue(format!("missing environment variable: {}", name));
            }
            return Ok(report);
        }
        Err(other) => return Err(other),
    };

    let stack = match super::load_stack_config(base_dir) {
        Ok(stack) => stack,
        Err(err) => {
            report.issue(format!("stack config: {}", err));
            return Ok(report);
        }
    };

    let store = FilesystemTemplateStore::new(base_dir);
    let mut templates = crate::domain::TemplateSet::new();

    for slot in TemplateSlot::ALL {
        if slot.relay_only() && !stack.relay {
            continue;
        }
        let path = store.path_for(slot, &env);
        if !path.exists() {
            report.issue(format!("template {} missing: {}", slot.name(), path.display()));
            continue;
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            report.issue(format!("template {} is empty: {}", slot.name(), path.display()));
            continue;
        }
        if matches!(slot, TemplateSlot::TailscaleCompose | TemplateSlot::OvpnCompose) {
            if let Err(err) = serde_yaml::from_str::<serde_yaml::Value>(&content) {
                report.issue(format!("template {} is not valid YAML: {}", slot.name(), err));
            }
        }
        // Ignoring the insert error here: emptiness was checked above.
        let _ = templates.insert(slot, content, &path.to_string_lossy());
    }

    let substituted = SubstitutionPlan::build(&env).apply(templates);
    for (slot, content) in substituted.iter() {
        for token in find_unresolved_tokens(content) {
            report.issue(format!("template {} has unresolved placeholder: {}", slot.name(), token));
        }
    }

    Ok(report)
}

/// Scan content for placeholder tokens that survived substitution.
///
/// Matches the two literal forms, `${NAME}` and `$$NAME`, where NAME is an
/// uppercase identifier. Shell constructs like `$(uname -s)` or `$HOME` do
/// not match.
pub(crate) fn find_unresolved_tokens(content: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && i + 1 < bytes.len() {
            match bytes[i + 1] {
                b'{' => {
                    let start = i + 2;
                    if let Some(end) = find_ident_end(bytes, start) {
                        if end > start && bytes.get(end) == Some(&b'}') {
                            tokens.push(format!("${{{}}}", &content[start..end]));
                            i = end + 1;
                            continue;
                        }
                    }
                }
                b'$' => {
                    let start = i + 2;
                    if let Some(end) = find_ident_end(bytes, start) {
                        if end > start {
                            tokens.push(format!("$${}", &content[start..end]));
                            i = end;
                            continue;
                        }
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    tokens.sort();
    tokens.dedup();
    tokens
}

fn find_ident_end(bytes: &[u8], start: usize) -> Option<usize> {
    if start >= bytes.len() || !bytes[start].is_ascii_uppercase() {
        return None;
    }
    let mut end = start;
    while end < bytes.len() && (bytes[end].is_ascii_uppercase() || bytes[end].is_ascii_digit() || bytes[end] == b'_')
    {
        end += 1;
    }
    Some(end)
}
