//! Integration test suite for librepub
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **serialize**: library end-to-end: manifests and template directories
//!   through `Renderable::serialize`
//! - **render_command**: the `librepub render` binary, including failures
//! - **context_command**: the `librepub context` binary

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod context_command;
mod render_command;
mod serialize;
