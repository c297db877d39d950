//! Stack parameters and Terraform JSON synthesis.
//!
//! The synthesized document is plain Terraform JSON syntax: backend, provider,
//! AMI lookup, one instance resource carrying the bootstrap script as user
//! data, and the declared outputs. Everything beyond producing this document
//! (plan, apply, state) belongs to the Terraform engine.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::AppError;
use crate::domain::env_config::EnvConfig;

/// Remote backend host for Terraform Cloud workspaces.
const BACKEND_HOSTNAME: &str = "app.terraform.io";

/// Instance parameters, overridable via an optional `tunnelstack.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// EC2 instance type.
    pub instance_type: String,
    /// Name of the EC2 key pair for SSH access.
    pub key_name: String,
    /// AMI name filter for the most-recent lookup.
    pub ami_name_filter: String,
    /// AMI owner account aliases.
    pub ami_owners: Vec<String>,
    /// Whether the OpenVPN-over-Tailscale relay stack is included.
    pub relay: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            instance_type: "t4g.nano".to_string(),
            key_name: "tailscale-nord-me".to_string(),
            ami_name_filter: "al2023-ami-2023.*-arm64".to_string(),
            ami_owners: vec!["amazon".to_string()],
            relay: true,
        }
    }
}

/// Parse and validate stack configuration content.
pub fn parse_stack_config_content(content: &str) -> Result<StackConfig, AppError> {
    let config: StackConfig = toml::from_str(content).map_err(|e| AppError::ParseError {
        what: "tunnelstack.toml".into(),
        details: e.to_string(),
    })?;

    if config.instance_type.is_empty() {
        return Err(AppError::config_error("instance_type must not be empty"));
    }
    if config.ami_owners.is_empty() {
        return Err(AppError::config_error("ami_owners must list at least one owner"));
    }

    Ok(config)
}

/// Synthesize the Terraform JSON document for the appliance stack.
///
/// `user_data` is embedded verbatim; `user_data_replace_on_change` forces
/// instance replacement whenever the script changes, since EC2 does not
/// re-run first-boot payloads on an unchanged instance.
pub fn synthesize(env: &EnvConfig, stack: &StackConfig, user_data: &str) -> Value {
    json!({
        "terraform": {
            "backend": {
                "remote": {
                    "hostname": BACKEND_HOSTNAME,
                    "organization": env.terraform_organization,
                    "workspaces": {
                        "name": env.terraform_workspace
                    }
                }
            },
            "required_providers": {
                "aws": {
                    "source": "hashicorp/aws"
                }
            }
        },
        "provider": {
            "aws": [{
                "region": env.aws_region,
                "access_key": env.aws_access_key_id,
                "secret_key": env.aws_secret_access_key,
                "token": env.aws_session_token
            }]
        },
        "data": {
            "aws_ami": {
                "ami": {
                    "most_recent": true,
                    "owners": stack.ami_owners,
                    "filter": [{
                        "name": "name",
                        "values": [stack.ami_name_filter]
                    }]
                }
            }
        },
        "resource": {
            "aws_instance": {
                "instance": {
                    "ami": "${data.aws_ami.ami.id}",
                    "instance_type": stack.instance_type,
                    "key_name": stack.key_name,
                    "tags": {
                        "Name": format!("TunnelOpenVPN-{}", env.short_region),
                        "Environment": "production",
                        "ManagedBy": "tunnelstack"
                    },
                    "user_data": user_data,
                    "user_data_replace_on_change": true
                }
            }
        },
        "output": {
            "instance_public_ip": {
                "value": "${aws_instance.instance.public_ip}"
            },
            "instance_id": {
                "value": "${aws_instance.instance.id}"
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_env() -> EnvConfig {
        EnvConfig {
            ts_auth_key: "tskey-primary".into(),
            ts_auth_key_2: "tskey-relay".into(),
            openvpn_config_env: "example".into(),
            aws_access_key_id: "AKIATEST".into(),
            aws_secret_access_key: "secret".into(),
            aws_session_token: "token".into(),
            aws_region: "me-south-1".into(),
            short_region: "ME".into(),
            terraform_organization: "acme".into(),
            terraform_workspace: "vpn-me".into(),
        }
    }

    #[test]
    fn defaults_match_appliance_profile() {
        let config = StackConfig::default();

        assert_eq!(config.instance_type, "t4g.nano");
        assert_eq!(config.ami_name_filter, "al2023-ami-2023.*-arm64");
        assert_eq!(config.ami_owners, vec!["amazon".to_string()]);
        assert!(config.relay);
    }

    #[test]
    fn parse_accepts_partial_overrides() {
        let config = parse_stack_config_content("instance_type = \"t4g.micro\"\nrelay = false\n")
            .unwrap();

        assert_eq!(config.instance_type, "t4g.micro");
        assert!(!config.relay);
        assert_eq!(config.key_name, "tailscale-nord-me");
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let err = parse_stack_config_content("instance_tpe = \"t4g.micro\"\n").unwrap_err();
        assert!(matches!(err, AppError::ParseError { .. }));
    }

    #[test]
    fn parse_rejects_empty_owners() {
        let err = parse_stack_config_content("ami_owners = []\n").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn document_wires_backend_instance_and_outputs() {
        let document = synthesize(&test_env(), &StackConfig::default(), "#!/bin/bash\n");

        assert_eq!(
            document["terraform"]["backend"]["remote"]["organization"],
            json!("acme")
        );
        assert_eq!(
            document["terraform"]["backend"]["remote"]["workspaces"]["name"],
            json!("vpn-me")
        );
        assert_eq!(document["provider"]["aws"][0]["region"], json!("me-south-1"));
        assert_eq!(document["data"]["aws_ami"]["ami"]["most_recent"], json!(true));

        let instance = &document["resource"]["aws_instance"]["instance"];
        assert_eq!(instance["ami"], json!("${data.aws_ami.ami.id}"));
        assert_eq!(instance["user_data"], json!("#!/bin/bash\n"));
        assert_eq!(instance["user_data_replace_on_change"], json!(true));
        assert_eq!(instance["tags"]["Name"], json!("TunnelOpenVPN-ME"));

        assert_eq!(
            document["output"]["instance_public_ip"]["value"],
            json!("${aws_instance.instance.public_ip}")
        );
        assert_eq!(
            document["output"]["instance_id"]["value"],
            json!("${aws_instance.instance.id}")
        );
    }
}
