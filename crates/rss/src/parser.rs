// ABOUTME: Per-type RSS deserialization rules plus the feed-level entry points.
// ABOUTME: Required fields fail the node; optional fields degrade; repeated children drop bad entries.

use tracing::{debug, warn};

use crate::convert::{
    optional_date, optional_text, optional_u32, optional_url, required_attr, required_attr_u64,
    required_text, required_url, url_from_attr,
};
use crate::error::RssError;
use crate::model::{
    Category, Channel, Cloud, Enclosure, Feed, Image, Item, SkipDay, SkipDays, SkipHours, Source,
    TextInput,
};
use crate::xml::{Document, Element};

/// A type that can be built from one XML element of a feed document.
///
/// Implemented for every RSS value type; implement it yourself to parse a
/// feed into custom channel or item types via [`parse_feed`].
pub trait FromXml: Sized {
    fn from_xml(element: &Element) -> Result<Self, RssError>;
}

impl FromXml for SkipHours {
    /// Collects all `<hour>` children. Text that is not an integer at all is
    /// skipped; integers outside [0, 23] fail the whole element.
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        let hours: Vec<i32> = element
            .children("hour")
            .filter_map(|el| el.text().parse().ok())
            .collect();
        SkipHours::new(hours)
    }
}

impl FromXml for SkipDays {
    /// Collects all `<day>` children; unknown day names are dropped, never
    /// fatal. An empty set is a valid result.
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        let days = element
            .children("day")
            .filter_map(|el| {
                let day = SkipDay::from_name(el.text());
                if day.is_none() {
                    debug!(day = el.text(), "dropping unrecognized skip day");
                }
                day
            })
            .collect();
        Ok(SkipDays { days })
    }
}

impl FromXml for Category {
    /// The element text is the value; an unparsable `domain` attribute
    /// degrades to no domain.
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        let domain = element.attr("domain").and_then(|d| url::Url::parse(d).ok());
        Category::new(element.text(), domain)
    }
}

impl FromXml for Cloud {
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Ok(Cloud {
            domain: required_attr(element, "domain")?.to_string(),
            port: required_attr(element, "port")?.to_string(),
            path: required_attr(element, "path")?.to_string(),
            register_procedure: required_attr(element, "registerProcedure")?.to_string(),
            protocol: required_attr(element, "protocol")?.to_string(),
        })
    }
}

impl FromXml for Enclosure {
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Ok(Enclosure {
            url: url_from_attr(element, "url")?,
            length: required_attr_u64(element, "length")?,
            mime_type: required_attr(element, "type")?.to_string(),
        })
    }
}

impl FromXml for Source {
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Source::new(element.text(), url_from_attr(element, "url")?)
    }
}

impl FromXml for Image {
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Ok(Image {
            url: required_url(element, "url")?,
            title: required_text(element, "title")?,
            link: required_url(element, "link")?,
            width: optional_u32(element, "width"),
            height: optional_u32(element, "height"),
            description: optional_text(element, "description"),
        })
    }
}

impl FromXml for TextInput {
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Ok(TextInput {
            title: required_text(element, "title")?,
            description: required_text(element, "description")?,
            name: required_text(element, "name")?,
            link: required_url(element, "link")?,
        })
    }
}

impl FromXml for Channel {
    /// The three required fields propagate failure; every optional field is
    /// attempted independently and degrades to absent on conversion failure.
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Ok(Channel {
            title: required_text(element, "title")?,
            link: required_url(element, "link")?,
            description: required_text(element, "description")?,
            language: optional_text(element, "language"),
            copyright: optional_text(element, "copyright"),
            managing_editor: optional_text(element, "managingEditor"),
            web_master: optional_text(element, "webMaster"),
            pub_date: optional_date(element, "pubDate"),
            last_build_date: optional_date(element, "lastBuildDate"),
            category: collect_categories(element),
            generator: optional_text(element, "generator"),
            docs: optional_url(element, "docs"),
            cloud: optional_nested(element, "cloud"),
            ttl: optional_u32(element, "ttl"),
            image: optional_nested(element, "image"),
            rating: optional_text(element, "rating"),
            text_input: optional_nested(element, "textInput"),
            skip_hours: optional_nested(element, "skipHours"),
            skip_days: optional_nested(element, "skipDays"),
        })
    }
}

impl FromXml for Item {
    /// Every field is structurally optional: absence and conversion failure
    /// both degrade to absent.
    fn from_xml(element: &Element) -> Result<Self, RssError> {
        Ok(Item {
            title: optional_text(element, "title"),
            link: optional_url(element, "link"),
            description: optional_text(element, "description"),
            author: optional_text(element, "author"),
            category: collect_categories(element),
            comments: optional_url(element, "comments"),
            enclosure: optional_nested(element, "enclosure"),
            guid: optional_text(element, "guid"),
            pub_date: optional_date(element, "pubDate"),
            source: optional_nested(element, "source"),
        })
    }
}

/// Best-effort nested deserialization: a failing child degrades to None.
fn optional_nested<T: FromXml>(parent: &Element, name: &str) -> Option<T> {
    let el = parent.child(name)?;
    match T::from_xml(el) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(element = name, %err, "dropping malformed optional element");
            None
        }
    }
}

/// Collects `<category>` children, dropping malformed ones.
fn collect_categories(parent: &Element) -> Vec<Category> {
    parent
        .children("category")
        .filter_map(|el| match Category::from_xml(el) {
            Ok(cat) => Some(cat),
            Err(err) => {
                debug!(%err, "dropping malformed category");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Feed-level aggregation and entry points
// ---------------------------------------------------------------------------

/// Finds the `<channel>` element. RSS 2.0 nests it under `<rss>`; a document
/// whose root *is* a `<channel>` is also accepted.
fn locate_channel(root: &Element) -> Result<&Element, RssError> {
    match root.name() {
        "channel" => Ok(root),
        "rss" => root.child("channel").ok_or(RssError::NoChannel),
        _ => Err(RssError::NoChannel),
    }
}

/// Parses feed bytes into a generic `Feed<C, I>`.
///
/// The channel failing to deserialize fails the whole parse. Items are
/// deserialized independently: a failing item is logged and dropped, never
/// aborting the feed. Item order follows document order.
pub fn parse_feed<C, I>(data: &[u8]) -> Result<Feed<C, I>, RssError>
where
    C: FromXml,
    I: FromXml,
{
    let doc = Document::parse(data)?;
    let channel_node = locate_channel(doc.root())?;
    let channel = C::from_xml(channel_node)?;
    let items: Vec<I> = channel_node
        .children("item")
        .filter_map(|node| match I::from_xml(node) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(%err, "dropping item that failed to deserialize");
                None
            }
        })
        .collect();
    Ok(Feed { channel, items })
}

/// Parses feed bytes into the standard [`Feed`] of [`Channel`] and [`Item`].
pub fn parse_feed_bytes(data: &[u8]) -> Result<Feed, RssError> {
    parse_feed::<Channel, Item>(data)
}

/// Runs [`parse_feed`] on tokio's blocking pool.
///
/// Semantics are identical to the synchronous form; the returned future
/// resolves exactly once on the caller's runtime. A panicked worker surfaces
/// as [`RssError::Task`].
pub async fn parse_feed_async<C, I>(data: Vec<u8>) -> Result<Feed<C, I>, RssError>
where
    C: FromXml + Send + 'static,
    I: FromXml + Send + 'static,
{
    match tokio::task::spawn_blocking(move || parse_feed::<C, I>(&data)).await {
        Ok(result) => result,
        Err(err) => Err(RssError::Task(err.to_string())),
    }
}

/// Async variant of [`parse_feed_bytes`].
pub async fn parse_feed_bytes_async(data: Vec<u8>) -> Result<Feed, RssError> {
    parse_feed_async::<Channel, Item>(data).await
}
