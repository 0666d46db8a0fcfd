// ABOUTME: Value types for RSS 2.0 channels, items, and their sub-elements.
// ABOUTME: Immutable after construction; validating constructors guard the invariant-carrying types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RssError;

/// Hours of the day (0 = midnight) during which aggregators may skip
/// updating the channel. Up to 24 `<hour>` sub-elements.
///
/// Construction rejects any hour outside [0, 23]; order and duplicates of
/// the input are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipHours {
    hours: Vec<i32>,
}

impl SkipHours {
    pub fn new(hours: Vec<i32>) -> Result<Self, RssError> {
        let invalid: Vec<i32> = hours
            .iter()
            .copied()
            .filter(|h| !(0..=23).contains(h))
            .collect();
        if !invalid.is_empty() {
            return Err(RssError::HoursOutOfRange(invalid));
        }
        Ok(SkipHours { hours })
    }

    pub fn hours(&self) -> &[i32] {
        &self.hours
    }
}

/// The seven admissible values of a `<skipDays>` `<day>` sub-element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SkipDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl SkipDay {
    pub const ALL: [SkipDay; 7] = [
        SkipDay::Sunday,
        SkipDay::Monday,
        SkipDay::Tuesday,
        SkipDay::Wednesday,
        SkipDay::Thursday,
        SkipDay::Friday,
        SkipDay::Saturday,
    ];

    /// Exact match against the capitalized weekday names the RSS spec uses.
    pub fn from_name(name: &str) -> Option<SkipDay> {
        match name {
            "Sunday" => Some(SkipDay::Sunday),
            "Monday" => Some(SkipDay::Monday),
            "Tuesday" => Some(SkipDay::Tuesday),
            "Wednesday" => Some(SkipDay::Wednesday),
            "Thursday" => Some(SkipDay::Thursday),
            "Friday" => Some(SkipDay::Friday),
            "Saturday" => Some(SkipDay::Saturday),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkipDay::Sunday => "Sunday",
            SkipDay::Monday => "Monday",
            SkipDay::Tuesday => "Tuesday",
            SkipDay::Wednesday => "Wednesday",
            SkipDay::Thursday => "Thursday",
            SkipDay::Friday => "Friday",
            SkipDay::Saturday => "Saturday",
        }
    }
}

/// Days of the week during which aggregators may skip updating the channel.
/// Set semantics; an empty set is a valid value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDays {
    pub days: BTreeSet<SkipDay>,
}

/// A category the channel or item belongs to, with an optional taxonomy
/// domain, e.g. `<category domain="http://www.fool.com/cusips">MSFT</category>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    value: String,
    domain: Option<Url>,
}

impl Category {
    /// Fails on an empty value, regardless of domain.
    pub fn new(value: impl Into<String>, domain: Option<Url>) -> Result<Self, RssError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RssError::EmptyValue("category"));
        }
        Ok(Category { value, domain })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> Option<&Url> {
        self.domain.as_ref()
    }
}

/// The `<cloud>` publish-subscribe registration point. All five attributes
/// are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    pub domain: String,
    pub port: String,
    pub path: String,
    pub register_procedure: String,
    pub protocol: String,
}

/// A media object attached to an item, e.g.
/// `<enclosure url="http://example.com/ep.mp3" length="12216320" type="audio/mpeg"/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: Url,
    /// Size in bytes.
    pub length: u64,
    /// Standard MIME type; wire name is "type".
    pub mime_type: String,
}

/// The RSS channel an item came from. The value is the source channel's
/// title; `url` links to its XMLization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    value: String,
    url: Url,
}

impl Source {
    /// Fails on an empty value.
    pub fn new(value: impl Into<String>, url: Url) -> Result<Self, RssError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RssError::EmptyValue("source"));
        }
        Ok(Source { value, url })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// A GIF, JPEG or PNG image that can be displayed with the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: Url,
    pub title: String,
    pub link: Url,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: Option<String>,
}

/// A text input box that can be displayed with the channel. Most aggregators
/// ignore it; all four sub-elements are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub title: String,
    pub description: String,
    pub name: String,
    pub link: Url,
}

/// Channel metadata. `title`, `link`, and `description` are required; every
/// other field is optional per the RSS 2.0 spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,
    pub link: Url,
    pub description: String,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub managing_editor: Option<String>,
    pub web_master: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_build_date: Option<DateTime<Utc>>,
    pub category: Vec<Category>,
    pub generator: Option<String>,
    pub docs: Option<Url>,
    pub cloud: Option<Cloud>,
    /// Minutes the channel may be cached before refreshing.
    pub ttl: Option<u32>,
    pub image: Option<Image>,
    /// The PICS rating for the channel.
    pub rating: Option<String>,
    pub text_input: Option<TextInput>,
    pub skip_hours: Option<SkipHours>,
    pub skip_days: Option<SkipDays>,
}

/// A single story within a channel. All fields are structurally optional;
/// the RSS spec's "at least one of title or description" rule is not
/// enforced at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: Option<String>,
    pub link: Option<Url>,
    pub description: Option<String>,
    /// Email address of the item's author.
    pub author: Option<String>,
    pub category: Vec<Category>,
    /// URL of a page for comments relating to the item.
    pub comments: Option<Url>,
    pub enclosure: Option<Enclosure>,
    pub guid: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub source: Option<Source>,
}

/// A deserialized feed: one channel plus its items in document order.
///
/// Generic over the channel and item types so callers can substitute their
/// own [`crate::FromXml`] implementations; defaults to the standard
/// [`Channel`] and [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed<C = Channel, I = Item> {
    pub channel: C,
    pub items: Vec<I>,
}
