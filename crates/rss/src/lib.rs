// ABOUTME: RSS 2.0 deserialization library: typed, validated feed models from raw XML bytes.
// ABOUTME: Re-exports the value types, error type, and synchronous/async parse entry points.

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod xml;

pub use convert::{
    date_from_attr, date_from_element, parse_rfc822_date, url_from_attr, url_from_element,
};
pub use error::RssError;
pub use model::{
    Category, Channel, Cloud, Enclosure, Feed, Image, Item, SkipDay, SkipDays, SkipHours, Source,
    TextInput,
};
pub use parser::{
    parse_feed, parse_feed_async, parse_feed_bytes, parse_feed_bytes_async, FromXml,
};
pub use xml::{Document, Element};
