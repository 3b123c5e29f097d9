//! Common test utilities for librepub integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A temporary project directory holding manifests, templates and output
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Default output directory used by the tests
    pub fn out_path(&self) -> PathBuf {
        self.project_dir.join("out")
    }

    /// Write `publication.toml` into the project directory
    pub fn write_manifest(&self, content: &str) -> Result<PathBuf> {
        let manifest_path = self.project_dir.join("publication.toml");
        fs::write(&manifest_path, content)
            .with_context(|| format!("Failed to write manifest to {:?}", manifest_path))?;
        Ok(manifest_path)
    }

    /// Create a file relative to the project directory
    pub fn create_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Run librepub in the project directory
    pub fn run_librepub(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run_librepub_with_env(args, &[])
    }

    /// Run librepub with extra environment variables
    pub fn run_librepub_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_librepub");
        let mut command = Command::new(binary);
        command
            .args(args)
            .current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("LIBREPUB_SERIALIZATION_METHOD")
            .env_remove("LIBREPUB_TEMPLATE_DIR");
        for (key, value) in env {
            command.env(key, value);
        }

        let output = command.output().context("Failed to run librepub command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed with exit status 1
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        assert_eq!(self.code, Some(1), "Stderr: {}", self.stderr);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file not to exist: {}", path.display());
    }

    /// Assert a file contains the given text
    pub fn contains(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        assert!(
            content.contains(expected),
            "Expected {} to contain '{}'\nActual content:\n{}",
            path.display(),
            expected,
            content
        );
    }
}
