use crate::Result;
use ohno::IntoAppError;
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::BTreeMap;

/// An owned markup element.
///
/// Attribute values are always exposed as strings and repeated child elements keep their
/// document order, which is all the derivations rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Self>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// All child elements, whatever their name.
    #[must_use]
    pub fn elements(&self) -> &[Self] {
        &self.children
    }

    /// Parse raw markup into an element tree rooted at the document element.
    ///
    /// Comments and processing instructions are dropped. Text content is trimmed and
    /// whitespace-only text is discarded.
    pub fn parse(markup: &str) -> Result<Self> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        let doc = Document::parse_with_options(markup, options).into_app_err("parsing document markup")?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text()
                && let Some(t) = child.text()
            {
                text.push_str(t);
            }
        }

        let text = text.trim();

        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            text: (!text.is_empty()).then(|| text.to_string()),
            children,
        }
    }
}
