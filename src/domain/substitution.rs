//! Literal placeholder substitution for template content.
//!
//! Two token forms exist in the template files: `${NAME}` in env-style
//! templates, and `$$NAME` in shell scripts, where a single `$` would collide
//! with native shell variable syntax. Substitution is plain text replacement.
//! There is no expression language, no escaping, and unmatched tokens are left
//! verbatim in the output.

use std::collections::BTreeMap;

use crate::domain::env_config::EnvConfig;
use crate::domain::template::{TemplateSet, TemplateSlot};

/// Socket path for the primary tailscaled instance.
const TS_SOCKET: &str = "/var/run/tailscale/tailscaled.sock";
/// Socket path for the relay's tailscaled instance.
const OVPN_TS_SOCKET: &str = "/var/run/tailscale/ovpn-tailscaled.sock";
/// Flags passed to `tailscale up` on the relay node.
const RELAY_EXTRA_ARGS: &str = "--advertise-exit-node --accept-routes";

/// Placeholder name to resolved value mapping for one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionContext {
    values: BTreeMap<String, String>,
}

impl SubstitutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Apply every mapping to the template.
    ///
    /// Replacement order is by descending name length so that a token like
    /// `$$TS_AUTH_KEY_2` is never partially consumed by `$$TS_AUTH_KEY`.
    pub fn apply(&self, template: &str) -> String {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));

        let mut output = template.to_string();
        for name in names {
            let value = &self.values[name];
            output = output.replace(&format!("${{{}}}", name), value);
            output = output.replace(&format!("$${}", name), value);
        }
        output
    }
}

/// Per-slot substitution contexts derived from the environment configuration.
///
/// The primary tunnel node uses `TS_AUTH_KEY`; the relay node gets its own
/// key (`TS_AUTH_KEY_2`) since Tailscale auth keys are commonly single-use.
#[derive(Debug, Clone)]
pub struct SubstitutionPlan {
    tailscale_env: SubstitutionContext,
    ovpn_env: SubstitutionContext,
    entrypoint: SubstitutionContext,
}

impl SubstitutionPlan {
    pub fn build(config: &EnvConfig) -> Self {
        let short = config.short_region_lower();
        let tunnel_hostname = format!("{}-aws-tunnel-ts", short);
        let relay_hostname = format!("{}-aws-ovpn-platform-internal", short);

        let tailscale_env = SubstitutionContext::new()
            .with("TS_AUTH_KEY", &config.ts_auth_key)
            .with("TS_HOSTNAME", tunnel_hostname)
            .with("TS_SOCKET", TS_SOCKET);

        let ovpn_env = SubstitutionContext::new()
            .with("TS_AUTH_KEY", &config.ts_auth_key_2)
            .with("TS_HOSTNAME", relay_hostname.clone())
            .with("TS_SOCKET", OVPN_TS_SOCKET);

        let entrypoint = SubstitutionContext::new()
            .with("TS_AUTH_KEY", &config.ts_auth_key_2)
            .with("TS_HOSTNAME", relay_hostname)
            .with("TS_EXTRA_ARGS", RELAY_EXTRA_ARGS);

        Self { tailscale_env, ovpn_env, entrypoint }
    }

    /// Context for a slot, if that slot carries placeholders.
    ///
    /// Compose files, the Dockerfile, and the VPN config are embedded verbatim.
    pub fn context_for(&self, slot: TemplateSlot) -> Option<&SubstitutionContext> {
        match slot {
            TemplateSlot::TailscaleEnv => Some(&self.tailscale_env),
            TemplateSlot::OvpnEnv => Some(&self.ovpn_env),
            TemplateSlot::EntrypointScript => Some(&self.entrypoint),
            _ => None,
        }
    }

    /// Substitute every templated slot in the set, returning the resolved set.
    pub fn apply(&self, mut templates: TemplateSet) -> TemplateSet {
        for slot in TemplateSlot::ALL {
            if let Some(context) = self.context_for(slot) {
                if let Some(content) = templates.get(slot) {
                    let substituted = context.apply(content);
                    templates.replace(slot, substituted);
                }
            }
        }
        templates
    }
}
