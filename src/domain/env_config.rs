//! Deployment environment configuration with batch validation.

use std::collections::HashMap;
use std::env;

use crate::domain::AppError;

/// Names of every required environment variable, in reporting order.
pub const REQUIRED_VARS: [&str; 10] = [
    "TS_AUTH_KEY",
    "TS_AUTH_KEY_2",
    "OPENVPN_CONFIG_ENV",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "AWS_REGION",
    "SHORT_REGION",
    "TERRAFORM_ORGANIZATION",
    "TERRAFORM_WORKSPACE",
];

/// Resolved deployment configuration, constructed once at startup.
///
/// Built from the process environment (or any key lookup in tests) and passed
/// explicitly to loaders and generators, so nothing downstream reads ambient
/// process state.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Auth key for the primary tunnel node.
    pub ts_auth_key: String,
    /// Auth key for the OpenVPN relay node.
    pub ts_auth_key_2: String,
    /// Environment selector for the OpenVPN profile (config/environments/<env>/).
    pub openvpn_config_env: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_session_token: String,
    pub aws_region: String,
    /// Short region label, e.g. "me". Lowercased for hostnames.
    pub short_region: String,
    pub terraform_organization: String,
    pub terraform_workspace: String,
}

impl EnvConfig {
    /// Build configuration from an arbitrary key lookup.
    ///
    /// Validation is batched: every missing or empty required variable is
    /// collected and reported in a single [`AppError::MissingEnvVars`], before
    /// any file I/O happens.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = HashMap::new();
        let mut missing = Vec::new();

        for name in REQUIRED_VARS {
            match lookup(name) {
                Some(value) if !value.is_empty() => {
                    values.insert(name, value);
                }
                _ => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::MissingEnvVars(missing));
        }

        let mut take = |name: &str| values.remove(name).unwrap_or_default();

        Ok(EnvConfig {
            ts_auth_key: take("TS_AUTH_KEY"),
            ts_auth_key_2: take("TS_AUTH_KEY_2"),
            openvpn_config_env: take("OPENVPN_CONFIG_ENV"),
            aws_access_key_id: take("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: take("AWS_SECRET_ACCESS_KEY"),
            aws_session_token: take("AWS_SESSION_TOKEN"),
            aws_region: take("AWS_REGION"),
            short_region: take("SHORT_REGION"),
            terraform_organization: take("TERRAFORM_ORGANIZATION"),
            terraform_workspace: take("TERRAFORM_WORKSPACE"),
        })
    }

    /// Build configuration from the process environment.
    ///
    /// Loads a `.env` file first when one is present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Short region label lowercased for Tailscale hostnames.
    pub fn short_region_lower(&self) -> String {
        self.short_region.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn complete_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TS_AUTH_KEY", "tskey-primary"),
            ("TS_AUTH_KEY_2", "tskey-relay"),
            ("OPENVPN_CONFIG_ENV", "example"),
            ("AWS_ACCESS_KEY_ID", "AKIATEST"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_SESSION_TOKEN", "token"),
            ("AWS_REGION", "me-south-1"),
            ("SHORT_REGION", "ME"),
            ("TERRAFORM_ORGANIZATION", "acme"),
            ("TERRAFORM_WORKSPACE", "vpn-me"),
        ])
    }

    #[test]
    fn complete_environment_resolves() {
        let env = complete_env();
        let config = EnvConfig::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.ts_auth_key, "tskey-primary");
        assert_eq!(config.aws_region, "me-south-1");
        assert_eq!(config.short_region_lower(), "me");
    }

    #[test]
    fn missing_variables_reported_in_one_batch() {
        let mut env = complete_env();
        env.remove("TS_AUTH_KEY");
        env.remove("AWS_REGION");
        env.remove("TERRAFORM_WORKSPACE");

        let err =
            EnvConfig::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap_err();

        match err {
            AppError::MissingEnvVars(names) => {
                assert_eq!(names, vec!["TS_AUTH_KEY", "AWS_REGION", "TERRAFORM_WORKSPACE"]);
            }
            other => panic!("expected MissingEnvVars, got {:?}", other),
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut env = complete_env();
        env.insert("TS_AUTH_KEY_2", "");

        let err =
            EnvConfig::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap_err();

        assert!(matches!(err, AppError::MissingEnvVars(names) if names == vec!["TS_AUTH_KEY_2"]));
    }
}
