//! Owned element tree
//!
//! The encoder assembles one of these bottom-up through the consuming `with_*`
//! builders, the reader produces one from text. Lookups mirror the DOM calls
//! the legacy dialect was designed around: `getElementsByTagName`,
//! `getAttribute`, `lastChild`, `nodeValue`.

use std::borrow::Cow;

/// Child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Character data, unescaped
    Text(String),
    /// Character data already escaped for XML, written verbatim
    Escaped(String),
}

impl XmlNode {
    /// True when the node is an element with children
    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        matches!(self, Self::Element(element) if !element.children.is_empty())
    }

    /// DOM `nodeValue` of a leaf: the text, or `""` for an element
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Element(element) => Cow::Owned(element.text_content()),
            Self::Text(text) | Self::Escaped(text) => Cow::Borrowed(text),
        }
    }
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create empty element
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, overwriting an existing one in place
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append child elements
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    /// Replace all children with pre-escaped text
    ///
    /// Empty text leaves the element without children.
    #[must_use]
    pub fn with_escaped_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Escaped(text));
        }
        self
    }

    /// Set an attribute, overwriting an existing one in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub(crate) fn push_attr(&mut self, name: String, value: String) {
        self.attributes.push((name, value));
    }

    pub(crate) fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Element name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// True when the element carries at least one attribute
    #[inline]
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Attribute value by exact name
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child nodes
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Last child node
    #[inline]
    #[must_use]
    pub fn last_child(&self) -> Option<&XmlNode> {
        self.children.last()
    }

    /// Concatenated text of all descendant text nodes
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.collect_text(out),
                XmlNode::Text(text) | XmlNode::Escaped(text) => out.push_str(text),
            }
        }
    }

    /// Descendant elements named `name`, document order, excluding `self`
    #[must_use]
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Self> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    /// First descendant element named `name`, excluding `self`
    #[must_use]
    pub fn first_named(&self, name: &str) -> Option<&Self> {
        self.children.iter().find_map(|child| match child {
            XmlNode::Element(element) if element.name == name => Some(element),
            XmlNode::Element(element) => element.first_named(name),
            XmlNode::Text(_) | XmlNode::Escaped(_) => None,
        })
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Self>) {
        for child in &self.children {
            if let XmlNode::Element(element) = child {
                if element.name == name {
                    found.push(element);
                }
                element.collect_named(name, found);
            }
        }
    }
}

/// A parsed document: exactly one root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Wrap a root element
    #[inline]
    #[must_use]
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Root element
    #[inline]
    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// First element named `name` in document order, the root included
    #[must_use]
    pub fn first_named(&self, name: &str) -> Option<&XmlElement> {
        if self.root.name == name {
            Some(&self.root)
        } else {
            self.root.first_named(name)
        }
    }

    /// All elements named `name` in document order, the root included
    #[must_use]
    pub fn elements_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        if self.root.name == name {
            found.push(&self.root);
        }
        self.root.collect_named(name, &mut found);
        found
    }
}
