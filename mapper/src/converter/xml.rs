//! Generic XML to nested mapping conversion.
//!
//! No OAI-PMH specific logic here. The output follows the usual
//! xml-to-dict conventions:
//!
//! | XML | Value |
//! |-----|-------|
//! | `<a>text</a>` | `{"a": "text"}` (whitespace trimmed) |
//! | `<a/>`, `<a></a>` | `{"a": null}` |
//! | `<a x="1">text</a>` | `{"a": {"@x": "1", "#text": "text"}}` |
//! | `<a><b>1</b><b>2</b></a>` | `{"a": {"b": ["1", "2"]}}` |
//!
//! Qualified names are kept verbatim (`oai_dc:dc`, `@xml:lang`).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{ConverterError, ConverterResult};

/// Prefix of attribute keys
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Key of element text when the element also has attributes or children
pub const TEXT_KEY: &str = "#text";

/// An element being assembled
struct Frame {
    name: String,
    entries: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> ConverterResult<Self> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut entries = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = attr.unescape_value()?;
            entries.insert(
                format!("{ATTRIBUTE_PREFIX}{key}"),
                Value::String(value.into_owned()),
            );
        }
        Ok(Self {
            name,
            entries,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.entries.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            let mut entries = self.entries;
            if !text.is_empty() {
                entries.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
            }
            Value::Object(entries)
        };
        (self.name, value)
    }
}

/// Add a child element, turning repeated siblings into a list
fn push_child(entries: &mut Map<String, Value>, name: String, value: Value) {
    match entries.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            entries.insert(name, value);
        }
    }
}

/// Parse an XML document into a nested mapping keyed by its root element.
///
/// Comments, processing instructions and the XML declaration are ignored.
pub fn xml_to_value(xml: &str) -> ConverterResult<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                match stack.last_mut() {
                    Some(parent) => push_child(&mut parent.entries, name, value),
                    None => push_child(&mut root, name, value),
                }
            }
            Event::End(_) => {
                // end names are checked by the reader
                if let Some(frame) = stack.pop() {
                    let (name, value) = frame.close();
                    match stack.last_mut() {
                        Some(parent) => push_child(&mut parent.entries, name, value),
                        None => push_child(&mut root, name, value),
                    }
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(std::str::from_utf8(&data)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConverterError::UnclosedElement(open.name.clone()));
    }

    Ok(Value::Object(root))
}
