// ABOUTME: Primitive converters and typed field extraction over the XML tree.
// ABOUTME: Explicit field-to-wire-name calls; failures carry the node name and raw text.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::RssError;
use crate::xml::Element;

/// Parses an RFC-822 style date as used by RSS date fields,
/// e.g. "Sat, 07 Sep 2002 00:00:01 GMT".
///
/// Relies on chrono's native RFC-2822 parser; no extra timezone-abbreviation
/// fallback is applied.
pub fn parse_rfc822_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(text.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converts an element's text to an absolute URL.
pub fn url_from_element(el: &Element) -> Result<Url, RssError> {
    Url::parse(el.text()).map_err(|_| RssError::element_conversion(el.name(), "URL", el.text()))
}

/// Converts an element's text to an RFC-822 date.
pub fn date_from_element(el: &Element) -> Result<DateTime<Utc>, RssError> {
    parse_rfc822_date(el.text())
        .ok_or_else(|| RssError::element_conversion(el.name(), "Date", el.text()))
}

/// Converts an attribute's text to an absolute URL.
pub fn url_from_attr(el: &Element, name: &'static str) -> Result<Url, RssError> {
    let text = required_attr(el, name)?;
    Url::parse(text).map_err(|_| RssError::attribute_conversion(name, "URL", text))
}

/// Converts an attribute's text to an RFC-822 date.
pub fn date_from_attr(el: &Element, name: &'static str) -> Result<DateTime<Utc>, RssError> {
    let text = required_attr(el, name)?;
    parse_rfc822_date(text).ok_or_else(|| RssError::attribute_conversion(name, "Date", text))
}

// ---------------------------------------------------------------------------
// Child-element extraction
// ---------------------------------------------------------------------------

pub(crate) fn required_child<'a>(
    parent: &'a Element,
    name: &'static str,
) -> Result<&'a Element, RssError> {
    parent
        .child(name)
        .ok_or_else(|| RssError::missing_element(parent.name(), name))
}

pub(crate) fn required_text(parent: &Element, name: &'static str) -> Result<String, RssError> {
    Ok(required_child(parent, name)?.text().to_string())
}

pub(crate) fn optional_text(parent: &Element, name: &str) -> Option<String> {
    parent.child(name).map(|el| el.text().to_string())
}

pub(crate) fn required_url(parent: &Element, name: &'static str) -> Result<Url, RssError> {
    url_from_element(required_child(parent, name)?)
}

/// Absent element or unparsable text both yield None.
pub(crate) fn optional_url(parent: &Element, name: &str) -> Option<Url> {
    parent.child(name).and_then(|el| Url::parse(el.text()).ok())
}

pub(crate) fn optional_date(parent: &Element, name: &str) -> Option<DateTime<Utc>> {
    parent.child(name).and_then(|el| parse_rfc822_date(el.text()))
}

pub(crate) fn optional_u32(parent: &Element, name: &str) -> Option<u32> {
    parent.child(name).and_then(|el| el.text().parse().ok())
}

// ---------------------------------------------------------------------------
// Attribute extraction
// ---------------------------------------------------------------------------

pub(crate) fn required_attr<'a>(
    el: &'a Element,
    name: &'static str,
) -> Result<&'a str, RssError> {
    el.attr(name)
        .ok_or_else(|| RssError::missing_attribute(el.name(), name))
}

pub(crate) fn required_attr_u64(el: &Element, name: &'static str) -> Result<u64, RssError> {
    let text = required_attr(el, name)?;
    text.parse()
        .map_err(|_| RssError::attribute_conversion(name, "integer", text))
}
