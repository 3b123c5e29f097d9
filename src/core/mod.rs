//! Core types for librepub
//!
//! This module holds the error handling shared by every other module:
//!
//! - [`error`]: [`LibrepubError`], the library error type, plus [`ErrorContext`]
//!   and [`user_friendly_error`] for CLI display
//! - [`file_error`]: [`FileOperationError`] and the [`FileResultExt`] extension
//!   that attaches operation context to IO results
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use librepub::core::{LibrepubError, user_friendly_error};
//!
//! let error = anyhow::Error::new(LibrepubError::InvalidPublication {
//!     field: "title".to_string(),
//! });
//! let friendly = user_friendly_error(error);
//! assert!(friendly.suggestion.is_some());
//! ```

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, LibrepubError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationContext, FileOperationError, FileResultExt};
