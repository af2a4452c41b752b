//! Strict reader: legacy text into an [`XmlDocument`]
//!
//! The tokenizer checks end-tag names and attribute uniqueness; the element
//! stack here adds what it leaves to the caller: unclosed elements at end of
//! input, a single root, no stray text around it.

use super::tree::{XmlDocument, XmlElement, XmlNode};
use crate::error::ParseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a complete document
///
/// # Errors
///
/// Returns [`ParseError`] for anything a DOM parser would reject. Comments,
/// processing instructions and the doctype are dropped from the tree.
pub fn parse_document(xml: &str) -> Result<XmlDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|source| ParseError::Syntax { position, source })?;

        match event {
            Event::Start(start) => {
                stack.push(open_element(&start, position)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start, position)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // end-tag names are already matched by the tokenizer
                if let Some(element) = stack.pop() {
                    attach(element, &mut stack, &mut root)?;
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|source| ParseError::Syntax { position, source })?;
                match stack.last_mut() {
                    Some(parent) => parent.push_node(XmlNode::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => return Err(ParseError::TextOutsideRoot { position }),
                }
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)?;
                match stack.last_mut() {
                    Some(parent) => parent.push_node(XmlNode::Text(text.to_string())),
                    None => return Err(ParseError::TextOutsideRoot { position }),
                }
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::Unclosed(open.name().to_string()));
    }
    root.map(XmlDocument::new).ok_or(ParseError::NoRoot)
}

fn open_element(start: &BytesStart<'_>, position: usize) -> Result<XmlElement, ParseError> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())?;
    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|source| ParseError::Attribute { position, source })?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(|source| ParseError::Syntax { position, source })?
            .into_owned();
        element.push_attr(key, value);
    }
    Ok(element)
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_node(XmlNode::Element(element));
        return Ok(());
    }
    match root {
        Some(first) => Err(ParseError::MultipleRoots {
            first: first.name().to_string(),
            second: element.name().to_string(),
        }),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}
