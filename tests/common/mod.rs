//! Shared testing utilities for pathwise CLI tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LEARNER: &str = "ada";

/// Long enough to pass the default reflection length gate.
pub const REFLECTION: &str =
    "I learned how to price my work by adding material cost, time and a fair margin.";

/// Isolated data directory with offline services.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn data_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a `pathwise` command bound to this data directory with mock services.
    pub fn cli(&self) -> Command {
        let mut cmd = self.cli_without_mock();
        cmd.arg("--mock");
        cmd
    }

    /// Build a `pathwise` command that would reach for real services.
    pub fn cli_without_mock(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathwise").expect("Failed to locate pathwise binary");
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .env_remove("PATHWISE_DATA_DIR")
            .env_remove("GEMINI_API_KEY")
            .env_remove("YOUTUBE_API_KEY")
            .env("RUST_LOG", "off");
        cmd
    }

    pub fn pathway_file(&self, id: u64) -> PathBuf {
        self.data_dir().join("pathways").join(format!("{}.json", id))
    }

    /// Create the first pathway for [`LEARNER`]; ids start at 1 for pathways and modules.
    pub fn create_pathway(&self) {
        self.cli()
            .args(["create", "-l", LEARNER, "-g", "grow_existing_business", "--location", "Lagos"])
            .assert()
            .success();
    }

    pub fn complete(&self, module: u64) -> assert_cmd::assert::Assert {
        self.cli()
            .args(["complete", "-l", LEARNER, &module.to_string(), "-r", REFLECTION])
            .assert()
    }
}
