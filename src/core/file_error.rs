//! Structured file system error handling for librepub
//!
//! File operations capture their context (what was being done, to which path,
//! on behalf of whom) at the call site, so callers never have to parse error
//! messages to explain a failure.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Detailed file operation context for better error messages
#[derive(Debug, Clone)]
pub struct FileOperationContext {
    /// The type of operation being performed
    pub operation: FileOperation,
    /// The file path being accessed
    pub file_path: PathBuf,
    /// Additional context about why the file is being accessed
    pub purpose: String,
    /// The code that initiated the operation
    pub caller: String,
}

/// Types of file operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Reading a file completely
    Read,
    /// Creating or truncating a file for writing
    Create,
    /// Writing file contents
    Write,
    /// Creating a directory
    CreateDir,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Create => write!(f, "creating"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::CreateDir => write!(f, "creating directory"),
        }
    }
}

impl FileOperationContext {
    /// Create a new file operation context
    pub fn new(
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            file_path: file_path.into(),
            purpose: purpose.into(),
            caller: caller.into(),
        }
    }
}

/// File operation error with full context
#[derive(Error, Debug)]
#[error("File operation failed: {operation} {}", .file_path.display())]
pub struct FileOperationError {
    /// The type of operation that failed
    pub operation: FileOperation,
    /// The file path that was being accessed
    pub file_path: PathBuf,
    /// Why the file was being accessed
    pub purpose: String,
    /// What code initiated the operation
    pub caller: String,
    /// The underlying IO error
    #[source]
    pub source: std::io::Error,
}

impl FileOperationError {
    /// Create a new file operation error from context and IO error
    pub fn new(context: FileOperationContext, source: std::io::Error) -> Self {
        Self {
            operation: context.operation,
            file_path: context.file_path,
            purpose: context.purpose,
            caller: context.caller,
            source,
        }
    }

    /// Get a user-friendly error message with context
    pub fn user_message(&self) -> String {
        let mut message = format!(
            "Failed {} file '{}' for {} ({})",
            self.operation,
            self.file_path.display(),
            self.purpose,
            self.caller
        );

        match self.source.kind() {
            std::io::ErrorKind::NotFound => {
                if matches!(self.operation, FileOperation::Create | FileOperation::Write) {
                    message.push_str(
                        "\n\nThe parent directory does not exist. Output directories are not created automatically.",
                    );
                } else {
                    message.push_str("\n\nThe file does not exist at the specified path.");
                }
            }
            std::io::ErrorKind::PermissionDenied => {
                message.push_str(&format!(
                    "\n\nPermission denied. Check file/directory permissions for: {}",
                    self.file_path.display()
                ));
            }
            std::io::ErrorKind::InvalidData => {
                message.push_str("\n\nThe file contains invalid data or encoding.");
                message.push_str("\nEnsure the file contains valid UTF-8 text.");
            }
            _ => {
                message.push_str(&format!("\n\nError details: {}", self.source));
            }
        }

        message
    }
}

/// Extension trait for Result types to add file operation context
pub trait FileResultExt<T> {
    /// Add file operation context to a Result
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Result<T, FileOperationError>;
}

impl<T> FileResultExt<T> for Result<T, std::io::Error> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Result<T, FileOperationError> {
        self.map_err(|io_error| {
            let context = FileOperationContext::new(operation, file_path, purpose, caller);
            FileOperationError::new(context, io_error)
        })
    }
}

/// Reads a whole text file, attaching operation context on failure.
pub fn read_text_file(path: &Path, purpose: &str, caller: &str) -> Result<String, FileOperationError> {
    std::fs::read_to_string(path).with_file_context(FileOperation::Read, path, purpose, caller)
}
