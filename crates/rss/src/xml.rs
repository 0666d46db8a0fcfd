// ABOUTME: Owned XML element tree built from quick-xml events.
// ABOUTME: Provides the navigable child/attribute/text queries the RSS layer runs on.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::RssError;

/// A parsed XML document holding its root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

/// One element in the tree: name, attributes, child elements, and the
/// concatenated (trimmed) text content of its own text and CDATA nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Document {
    /// Parses a byte buffer into an element tree.
    ///
    /// Fails on malformed XML and on input with no root element. Only the
    /// first top-level element is kept; processing instructions, comments,
    /// and the XML declaration are skipped.
    pub fn parse(data: &[u8]) -> Result<Document, RssError> {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from_start(e));
                }
                Ok(Event::Empty(ref e)) => {
                    let el = element_from_start(e);
                    attach(&mut stack, &mut root, el);
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map(|s| s.into_owned())
                            .unwrap_or_else(|_| String::from_utf8_lossy(e.as_ref()).into_owned());
                        parent.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::End(_)) => {
                    // quick-xml validates end-tag names, so the stack cannot
                    // be empty here on well-formed input.
                    if let Some(el) = stack.pop() {
                        attach(&mut stack, &mut root, el);
                    }
                }
                Ok(Event::Eof) => break,
                Err(err) => return Err(RssError::xml(err)),
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(RssError::Xml("unexpected end of document".to_string()));
        }
        root.map(|root| Document { root })
            .ok_or(RssError::EmptyDocument)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First child element with the given name, in document order.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The element's own text content, whitespace-trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

fn element_from_start(e: &BytesStart) -> Element {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let attrs = e
        .attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (key, value)
        })
        .collect();
    Element {
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    }
}

/// Hands a completed element to its parent, or makes it the document root.
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}
