//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a kmscreds command with an isolated environment.
    ///
    /// - HOME points at the temporary home directory
    /// - KMSCREDS_CONFIG points at a settings file that does not exist
    /// - colors are off so output can be matched literally
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("kmscreds").expect("failed to find kmscreds binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("KMSCREDS_CONFIG", self.home.path().join("config.toml"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("KMSCREDS_PATH");
        cmd.env_remove("KMSCREDS_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `kmscreds init`.
    pub fn init_cmd(&self, key_id: &str, context: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["init", "--kms-key-id", key_id]);
        for entry in context {
            cmd.args(["--context", *entry]);
        }
        cmd.output().expect("failed to run kmscreds init")
    }

    /// Shortcut for `kmscreds add`, piping the value on stdin.
    pub fn add(&self, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["add", name])
            .write_stdin(format!("{}\n", value))
            .output()
            .expect("failed to run kmscreds add")
    }

    /// Shortcut for `kmscreds rotate`, piping the value on stdin.
    pub fn rotate(&self, name: &str, value: &str) -> Output {
        self.cmd()
            .args(["rotate", name])
            .write_stdin(format!("{}\n", value))
            .output()
            .expect("failed to run kmscreds rotate")
    }

    /// Shortcut for `kmscreds export --format <format>`.
    pub fn export(&self, format: &str) -> Output {
        self.cmd()
            .args(["export", "--format", format])
            .output()
            .expect("failed to run kmscreds export")
    }

    /// Shortcut for `kmscreds list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run kmscreds list")
    }

    /// Shortcut for `kmscreds list --json`, parsed.
    pub fn list_json(&self) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run kmscreds list --json");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("list --json is not JSON")
    }
}
