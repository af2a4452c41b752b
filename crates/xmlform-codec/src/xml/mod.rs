//! Minimal XML document layer over `quick-xml`

mod reader;
mod tree;
mod writer;

pub use reader::parse_document;
pub use tree::{XmlDocument, XmlElement, XmlNode};
pub use writer::write_document;
