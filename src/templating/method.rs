//! Output serialization methods.
//!
//! A [`SerializationMethod`] selects the textual form every render call of a
//! [`TemplateRenderer`](super::TemplateRenderer) produces. Markup methods
//! escape interpolated values; templates opt out per value with Tera's `safe`
//! filter (as the bundled `text_item.xhtml` does for inline chapter content).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Textual output form applied to every render of a renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SerializationMethod {
    /// Generic XML markup (package documents, navigation files)
    #[default]
    Xml,
    /// XHTML markup (chapter documents)
    Xhtml,
    /// HTML markup
    Html,
    /// Plain text, no escaping
    Text,
}

impl SerializationMethod {
    /// Every supported method, in declaration order.
    pub const ALL: [SerializationMethod; 4] = [
        SerializationMethod::Xml,
        SerializationMethod::Xhtml,
        SerializationMethod::Html,
        SerializationMethod::Text,
    ];

    /// Whether interpolated values are XML-escaped.
    pub fn escapes(self) -> bool {
        !matches!(self, SerializationMethod::Text)
    }

    /// Media type of documents produced with this method.
    pub fn media_type(self) -> &'static str {
        match self {
            SerializationMethod::Xml => "application/xml",
            SerializationMethod::Xhtml => "application/xhtml+xml",
            SerializationMethod::Html => "text/html",
            SerializationMethod::Text => "text/plain",
        }
    }

    /// Lowercase configuration name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            SerializationMethod::Xml => "xml",
            SerializationMethod::Xhtml => "xhtml",
            SerializationMethod::Html => "html",
            SerializationMethod::Text => "text",
        }
    }
}

impl fmt::Display for SerializationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SerializationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|method| method.as_str() == normalized).ok_or_else(|| {
            format!(
                "unknown serialization method '{}' (expected one of: xml, xhtml, html, text)",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("XHTML".parse::<SerializationMethod>().unwrap(), SerializationMethod::Xhtml);
        assert_eq!(" text ".parse::<SerializationMethod>().unwrap(), SerializationMethod::Text);
        assert!("markdown".parse::<SerializationMethod>().is_err());
    }

    #[test]
    fn test_only_text_disables_escaping() {
        for method in SerializationMethod::ALL {
            assert_eq!(method.escapes(), method != SerializationMethod::Text);
        }
    }

    #[test]
    fn test_display_matches_config_name() {
        for method in SerializationMethod::ALL {
            assert_eq!(method.to_string().parse::<SerializationMethod>().unwrap(), method);
        }
        assert_eq!(SerializationMethod::default(), SerializationMethod::Xml);
    }

    #[test]
    fn test_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            method: SerializationMethod,
        }

        let parsed: Wrapper = toml::from_str("method = \"html\"").unwrap();
        assert_eq!(parsed.method, SerializationMethod::Html);
        assert_eq!(SerializationMethod::Html.media_type(), "text/html");
    }
}
