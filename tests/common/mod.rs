//! Shared testing utilities for tunnelstack CLI tests.

use assert_cmd::Command;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every environment variable the tool requires, paired with test values.
pub const TEST_ENV: [(&str, &str); 10] = [
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
];

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the working directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled binary with a scrubbed environment.
    ///
    /// Every required variable is removed first so ambient shell state cannot
    /// leak into assertions; tests add back what they need via `envs`.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("tunnelstack").expect("Failed to locate binary");
        cmd.current_dir(&self.work_dir);
        for (name, _) in TEST_ENV {
            cmd.env_remove(name);
        }
        cmd
    }

    /// Build a command with the complete test environment applied.
    pub fn cli_with_env(&self) -> Command {
        let mut cmd = self.cli();
        cmd.envs(TEST_ENV);
        cmd
    }

    /// Build a command with the test environment minus the named variables.
    pub fn cli_without(&self, omitted: &[&str]) -> Command {
        let mut cmd = self.cli();
        let env: HashMap<&str, &str> =
            TEST_ENV.iter().filter(|(name, _)| !omitted.contains(name)).copied().collect();
        cmd.envs(env);
        cmd
    }

    /// Write a complete template tree with recognizable content per slot.
    pub fn write_template_tree(&self) {
        self.write_template(
            "docker/compose/tailscale.docker-compose.yml",
            "services:\n  tailscale:\n    image: tailscale/tailscale:latest\n",
        );
        self.write_template(
            "docker/compose/ts-ovpn.docker-compose.yml",
            "services:\n  ts-ovpn:\n    build:\n      dockerfile: openvpn.Dockerfile\n",
        );
        self.write_template(
            "config/templates/docker.ts.env.template",
            "TS_AUTHKEY=${TS_AUTH_KEY}\nTS_HOSTNAME=${TS_HOSTNAME}\nTS_SOCKET=${TS_SOCKET}\n",
        );
        self.write_template(
            "config/templates/docker.ts.ovpn.env.template",
            "TS_AUTHKEY=${TS_AUTH_KEY}\nTS_HOSTNAME=${TS_HOSTNAME}\nTS_SOCKET=${TS_SOCKET}\n",
        );
        self.write_template(
            "docker/scripts/tailscale-entrypoint.sh",
            "#!/bin/sh\ntailscale up --authkey=$$TS_AUTH_KEY --hostname=$$TS_HOSTNAME $$TS_EXTRA_ARGS\n",
        );
        self.write_template(
            "docker/Dockerfiles/openvpn.Dockerfile",
            "FROM tailscale/tailscale:latest\nRUN apk add --no-cache openvpn\n",
        );
        self.write_template(
            "config/environments/example/config.ovpn",
            "client\ndev tun\nremote vpn.example.com 1194\n",
        );
    }

    /// Write a single template file relative to the work directory.
    pub fn write_template(&self, relative_path: &str, content: &str) {
        let path = self.work_dir.join(relative_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Remove a template file relative to the work directory.
    pub fn remove_template(&self, relative_path: &str) {
        fs::remove_file(self.work_dir.join(relative_path)).unwrap();
    }

    /// Read the synthesized stack document from the default output directory.
    pub fn read_stack_document(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.work_dir.join("cdktf.out/cdk.tf.json"))
            .expect("stack document should exist");
        serde_json::from_str(&content).expect("stack document should be valid JSON")
    }
}
