//! A single content unit of a publication.

use serde::{Deserialize, Serialize};
use tera::Context as TeraContext;

use super::Renderable;
use crate::constants::{TEXT_CONTENT_TYPE, TEXT_ITEM_TEMPLATE};

/// Part of a publication: a chapter (XHTML), an image such as a cover, or a
/// stylesheet.
///
/// Every item renders through the text-item template, whatever its `media_type`.
/// Image and style items therefore render as XHTML documents too; callers
/// normally serialize only the items that carry inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier referenced from the package manifest and spine
    pub id: String,
    /// Source file name, relative to the package document
    pub file: String,
    /// Content-type marker, e.g. `application/xhtml+xml`, `image/png`, `text/css`
    #[serde(rename = "type")]
    pub media_type: String,
    /// Inline content, used when the item is rendered as a standalone file
    pub content: Option<String>,
}

impl Item {
    /// Create an item without inline content.
    pub fn new(id: impl Into<String>, file: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file: file.into(),
            media_type: media_type.into(),
            content: None,
        }
    }

    /// Attach inline content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether this item is text content (an XHTML document).
    pub fn is_text(&self) -> bool {
        self.media_type == TEXT_CONTENT_TYPE
    }
}

impl Renderable for Item {
    fn template_name(&self) -> &str {
        TEXT_ITEM_TEMPLATE
    }

    fn to_context(&self) -> TeraContext {
        let mut context = TeraContext::new();
        context.insert("id", &self.id);
        context.insert("file", &self.file);
        context.insert("type", &self.media_type);
        context.insert("content", &self.content);
        context
    }
}
