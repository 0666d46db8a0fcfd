// ABOUTME: Error types for RSS deserialization.
// ABOUTME: Covers xml-level, missing-field, type-conversion, and validation failures.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while deserializing an RSS document.
#[derive(Debug, Error)]
pub enum RssError {
    /// The underlying XML reader rejected the document.
    #[error("malformed xml: {0}")]
    Xml(String),

    /// The input contained no root element at all.
    #[error("document contains no elements")]
    EmptyDocument,

    /// The document has no <channel> element to interpret.
    #[error("document has no <channel> element")]
    NoChannel,

    /// A required child element was absent.
    #[error("missing required element <{name}> in <{parent}>")]
    MissingElement { parent: String, name: &'static str },

    /// A required attribute was absent.
    #[error("missing required attribute \"{name}\" on <{element}>")]
    MissingAttribute { element: String, name: &'static str },

    /// An element's text could not be converted to the target type.
    #[error("cannot convert text {text:?} of <{name}> to {target}")]
    ElementConversion {
        name: String,
        target: &'static str,
        text: String,
    },

    /// An attribute's text could not be converted to the target type.
    #[error("cannot convert attribute \"{name}\" value {text:?} to {target}")]
    AttributeConversion {
        name: &'static str,
        target: &'static str,
        text: String,
    },

    /// A value was well-typed but empty where a non-empty string is required.
    #[error("element <{0}> has an empty value")]
    EmptyValue(&'static str),

    /// skipHours contained hours outside [0, 23].
    #[error("skipHours contains out-of-range hours: {0:?}")]
    HoursOutOfRange(Vec<i32>),

    /// The background parse task failed to complete.
    #[error("parse task failed: {0}")]
    Task(String),
}

impl RssError {
    /// Creates an Xml error from an underlying quick-xml error.
    pub(crate) fn xml(err: impl fmt::Display) -> Self {
        RssError::Xml(err.to_string())
    }

    pub(crate) fn missing_element(parent: &str, name: &'static str) -> Self {
        RssError::MissingElement {
            parent: parent.to_string(),
            name,
        }
    }

    pub(crate) fn missing_attribute(element: &str, name: &'static str) -> Self {
        RssError::MissingAttribute {
            element: element.to_string(),
            name,
        }
    }

    pub(crate) fn element_conversion(name: &str, target: &'static str, text: &str) -> Self {
        RssError::ElementConversion {
            name: name.to_string(),
            target,
            text: text.to_string(),
        }
    }

    pub(crate) fn attribute_conversion(name: &'static str, target: &'static str, text: &str) -> Self {
        RssError::AttributeConversion {
            name,
            target,
            text: text.to_string(),
        }
    }
}
