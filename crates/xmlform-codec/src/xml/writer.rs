//! Single-pass serializer for [`XmlElement`] trees

use super::tree::{XmlElement, XmlNode};
use crate::error::EncodeError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Serialize a document rooted at `root`
///
/// Output is the XML declaration (`standalone="yes"`), a newline, the
/// document without indentation, and a trailing newline. Childless elements
/// are written as empty elements.
///
/// # Errors
///
/// Returns [`EncodeError`] if the writer fails.
pub fn write_document(root: &XmlElement) -> Result<String, EncodeError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    write_element(&mut writer, root)?;
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), EncodeError> {
    let mut start = BytesStart::new(element.name());
    for (name, value) in element.attributes() {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            XmlNode::Element(nested) => write_element(writer, nested)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            XmlNode::Escaped(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}
