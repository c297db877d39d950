//! Template slots and the loaded template set.

use std::collections::BTreeMap;

use crate::domain::AppError;

/// Named slot for each template file the bootstrap script embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TemplateSlot {
    TailscaleCompose,
    OvpnCompose,
    TailscaleEnv,
    OvpnEnv,
    EntrypointScript,
    Dockerfile,
    VpnConfig,
}

impl TemplateSlot {
    /// All slots, in the order files are written by the bootstrap script.
    pub const ALL: [TemplateSlot; 7] = [
        TemplateSlot::TailscaleCompose,
        TemplateSlot::OvpnCompose,
        TemplateSlot::TailscaleEnv,
        TemplateSlot::OvpnEnv,
        TemplateSlot::EntrypointScript,
        TemplateSlot::Dockerfile,
        TemplateSlot::VpnConfig,
    ];

    /// Stable identifier used in error messages and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateSlot::TailscaleCompose => "tailscale-compose",
            TemplateSlot::OvpnCompose => "ovpn-compose",
            TemplateSlot::TailscaleEnv => "tailscale-env",
            TemplateSlot::OvpnEnv => "ovpn-env",
            TemplateSlot::EntrypointScript => "entrypoint-script",
            TemplateSlot::Dockerfile => "dockerfile",
            TemplateSlot::VpnConfig => "vpn-config",
        }
    }

    /// Path of the template file relative to the base directory.
    ///
    /// The VPN config lives under an environment-specific subdirectory chosen
    /// by `OPENVPN_CONFIG_ENV`.
    pub fn relative_path(&self, openvpn_config_env: &str) -> String {
        match self {
            TemplateSlot::TailscaleCompose => {
                "docker/compose/tailscale.docker-compose.yml".to_string()
            }
            TemplateSlot::OvpnCompose => "docker/compose/ts-ovpn.docker-compose.yml".to_string(),
            TemplateSlot::TailscaleEnv => "config/templates/docker.ts.env.template".to_string(),
            TemplateSlot::OvpnEnv => "config/templates/docker.ts.ovpn.env.template".to_string(),
            TemplateSlot::EntrypointScript => {
                "docker/scripts/tailscale-entrypoint.sh".to_string()
            }
            TemplateSlot::Dockerfile => "docker/Dockerfiles/openvpn.Dockerfile".to_string(),
            TemplateSlot::VpnConfig => {
                format!("config/environments/{}/config.ovpn", openvpn_config_env)
            }
        }
    }

    /// Slots that belong to the OpenVPN relay stack only.
    pub fn relay_only(&self) -> bool {
        matches!(
            self,
            TemplateSlot::OvpnCompose
                | TemplateSlot::OvpnEnv
                | TemplateSlot::EntrypointScript
                | TemplateSlot::Dockerfile
                | TemplateSlot::VpnConfig
        )
    }
}

/// Raw template contents keyed by slot, read once from disk.
///
/// Every slot present must be non-empty; the loader enforces this before a
/// set is constructed.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    contents: BTreeMap<TemplateSlot, String>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert content for a slot, rejecting empty content.
    pub fn insert(&mut self, slot: TemplateSlot, content: String, path: &str) -> Result<(), AppError> {
        if content.trim().is_empty() {
            return Err(AppError::EmptyTemplate {
                slot: slot.name().to_string(),
                path: path.to_string(),
            });
        }
        self.contents.insert(slot, content);
        Ok(())
    }

    pub fn get(&self, slot: TemplateSlot) -> Option<&str> {
        self.contents.get(&slot).map(String::as_str)
    }

    pub fn contains(&self, slot: TemplateSlot) -> bool {
        self.contents.contains_key(&slot)
    }

    /// Replace a slot's content in place, e.g. after substitution.
    pub fn replace(&mut self, slot: TemplateSlot, content: String) {
        self.contents.insert(slot, content);
    }

    pub fn iter(&self) -> impl Iterator<Item = (TemplateSlot, &str)> + '_ {
        self.contents.iter().map(|(slot, content)| (*slot, content.as_str()))
    }
}
