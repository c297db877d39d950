//! First-boot bootstrap script generation.
//!
//! The generated script is the EC2 instance's user data. It installs the
//! container runtime, writes every substituted template to the default user's
//! home directory via here-documents, and brings the container stacks up.
//! Ordering is load-bearing: the relay stack must be running before the
//! primary tunnel stack starts.

use crate::domain::AppError;
use crate::domain::template::{TemplateSet, TemplateSlot};

/// Home directory of the instance's default user.
const HOME: &str = "/home/ec2-user";
/// Here-document delimiter for embedded file content.
const HEREDOC_MARKER: &str = "EOF";

/// Slots in the order their files are written on the instance, with target
/// file names.
const WRITE_ORDER: [(TemplateSlot, &str); 7] = [
    (TemplateSlot::TailscaleCompose, "tailscale-docker-compose.yml"),
    (TemplateSlot::TailscaleEnv, ".tailscale.env"),
    (TemplateSlot::VpnConfig, "config.ovpn"),
    (TemplateSlot::OvpnCompose, "ts-ovpn-docker-compose.yml"),
    (TemplateSlot::OvpnEnv, ".ovpn-ts.env"),
    (TemplateSlot::Dockerfile, "openvpn.Dockerfile"),
    (TemplateSlot::EntrypointScript, "tailscale-entrypoint.sh"),
];

/// Generate the bootstrap script from a fully substituted template set.
///
/// When `with_relay` is false the relay-only files, the IP forwarding sysctl,
/// and the relay `up` invocation are omitted. Every slot the script embeds
/// must be present in the set; a missing slot is a configuration error, since
/// the loader is expected to have filled all required slots.
pub fn generate(templates: &TemplateSet, with_relay: bool) -> Result<String, AppError> {
    let mut script = String::new();

    script.push_str("#!/bin/bash\nset -e\n\n");

    // 1. Container runtime
    script.push_str("# Update system and install Docker\n");
    script.push_str("dnf update -y\n");
    script.push_str("dnf install docker -y\n");
    script.push_str("usermod -a -G docker ec2-user\n");
    script.push_str("systemctl enable docker.service\n");
    script.push_str("systemctl start docker.service\n\n");

    // 2. Kernel forwarding, relay traffic only
    if with_relay {
        script.push_str("# Enable IP forwarding\n");
        script.push_str("echo 'net.ipv4.ip_forward = 1' >> /etc/sysctl.conf\n");
        script.push_str("sysctl -p\n\n");
    }

    // 3. Orchestration tool
    script.push_str("# Install Docker Compose\n");
    script.push_str(
        "wget https://github.com/docker/compose/releases/latest/download/docker-compose-$(uname -s)-$(uname -m) -O /usr/local/bin/docker-compose\n",
    );
    script.push_str("chmod +x /usr/local/bin/docker-compose\n\n");

    // 4. Configuration files
    script.push_str("# Create configuration files\n");
    script.push_str(&format!("mkdir -p {}/config\n\n", HOME));

    for (slot, file_name) in WRITE_ORDER {
        if slot.relay_only() && !with_relay {
            continue;
        }
        let content = templates.get(slot).ok_or_else(|| {
            AppError::config_error(format!(
                "Template slot '{}' missing from substituted set",
                slot.name()
            ))
        })?;
        script.push_str(&format!(
            "cat > {}/{} << '{}'\n{}\n{}\n\n",
            HOME, file_name, HEREDOC_MARKER, content, HEREDOC_MARKER
        ));
    }

    if with_relay {
        script.push_str(&format!("chmod +x {}/tailscale-entrypoint.sh\n\n", HOME));
    }

    // 5. Service startup, relay before primary
    script.push_str("# Start services\n");
    script.push_str(&format!("cd {}\n", HOME));
    if with_relay {
        script.push_str(
            "COMPOSE_BAKE=true /usr/local/bin/docker-compose -p ts-ovpn -f ts-ovpn-docker-compose.yml up -d\n",
        );
    }
    script.push_str(
        "COMPOSE_BAKE=true /usr/local/bin/docker-compose -p ts -f tailscale-docker-compose.yml up -d\n",
    );

    Ok(script)
}
