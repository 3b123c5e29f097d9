//! Constants shared across the librepub codebase.
//!
//! Content-type markers, default template names, and the names of the
//! configuration file and environment variables live here so that the
//! model, the loaders, and the CLI agree on them.

/// Content-type marker identifying text (XHTML) items.
///
/// Publications derive their `text_items` by comparing each item's type
/// against this value.
pub const TEXT_CONTENT_TYPE: &str = "application/xhtml+xml";

/// Template every [`Item`](crate::model::Item) renders through, whatever its type.
pub const TEXT_ITEM_TEMPLATE: &str = "text_item.xhtml";

/// Default template for the publication's package document.
pub const PUBLICATION_TEMPLATE: &str = "content.opf";

/// Default file name of the package document written by `librepub render`.
pub const DEFAULT_PACKAGE_FILE: &str = "content.opf";

/// Configuration file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "librepub.toml";

/// Environment variable overriding the configured serialization method.
pub const ENV_SERIALIZATION_METHOD: &str = "LIBREPUB_SERIALIZATION_METHOD";

/// Environment variable adding a template directory in front of the configured ones.
pub const ENV_TEMPLATE_DIR: &str = "LIBREPUB_TEMPLATE_DIR";

/// Maximum number of "did you mean" suggestions attached to an error.
pub const MAX_SUGGESTIONS: usize = 3;
