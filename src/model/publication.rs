//! Publications: metadata plus an ordered list of items.

use std::sync::Arc;

use tera::Context as TeraContext;

use super::{Item, Renderable};
use crate::constants::PUBLICATION_TEMPLATE;
use crate::core::LibrepubError;

/// A publication that can be converted to a package format such as EPUB.
///
/// Items are shared: a publication holds `Arc<Item>` references and does not
/// own their lifecycle. The same item may appear in several publications.
///
/// # Rendering Context
///
/// | key | value |
/// |-----|-------|
/// | `title`, `language`, `identifier` | strings |
/// | `subject`, `description`, `creator`, `publisher`, `date` | string or `null` |
/// | `items` | every item, or `null` when no item list was given |
/// | `text_items` | the items whose type is `application/xhtml+xml`, in order |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub title: String,
    pub language: String,
    pub identifier: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub publisher: Option<String>,
    pub date: Option<String>,
    pub items: Option<Vec<Arc<Item>>>,
    template: String,
}

impl Publication {
    /// Create a publication with the required metadata and no items.
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            identifier: identifier.into(),
            subject: None,
            description: None,
            creator: None,
            publisher: None,
            date: None,
            items: None,
            template: PUBLICATION_TEMPLATE.to_string(),
        }
    }

    /// Render through `template` instead of the default package document template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    #[must_use]
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<Arc<Item>>) -> Self {
        self.items = Some(items);
        self
    }

    /// The items whose type marks them as text content, in their original order.
    ///
    /// Computed on every call; an absent item list yields no text items.
    pub fn text_items(&self) -> Vec<Arc<Item>> {
        self.items.iter().flatten().filter(|item| item.is_text()).cloned().collect()
    }

    /// Check that the required metadata is present.
    ///
    /// Rendering does not call this; a publication with empty fields still
    /// renders whatever its template makes of them.
    ///
    /// # Errors
    ///
    /// Returns [`LibrepubError::InvalidPublication`] naming the first empty
    /// field among `title`, `language` and `identifier`.
    pub fn validate(&self) -> Result<(), LibrepubError> {
        for (field, value) in
            [("title", &self.title), ("language", &self.language), ("identifier", &self.identifier)]
        {
            if value.trim().is_empty() {
                return Err(LibrepubError::InvalidPublication {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Renderable for Publication {
    fn template_name(&self) -> &str {
        &self.template
    }

    fn to_context(&self) -> TeraContext {
        let items: Option<Vec<&Item>> =
            self.items.as_ref().map(|items| items.iter().map(|item| &**item).collect());
        let text_items = self.text_items();
        let text_items: Vec<&Item> = text_items.iter().map(|item| &**item).collect();

        let mut context = TeraContext::new();
        context.insert("title", &self.title);
        context.insert("language", &self.language);
        context.insert("identifier", &self.identifier);
        context.insert("subject", &self.subject);
        context.insert("description", &self.description);
        context.insert("creator", &self.creator);
        context.insert("publisher", &self.publisher);
        context.insert("date", &self.date);
        context.insert("items", &items);
        context.insert("text_items", &text_items);
        context
    }
}
