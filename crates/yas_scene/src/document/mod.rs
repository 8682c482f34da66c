//! Attributed node tree
//!
//! A generic parsed document: named nodes with string attributes and ordered
//! children. Scene parsing only ever talks to this tree, never to the text
//! format it came from.
//!
//! Typed attribute lookups apply one validity rule everywhere: a number is
//! valid iff it parses and is not NaN, a string is valid iff it is present.

mod source;

pub use source::{DocumentError, DocumentFormat, DocumentSource, FileSource, TextSource};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One node of the attributed document tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Tag name
    pub name: String,
    /// Attribute values by name
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Child nodes in document order
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a node with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Builder: append a child
    #[must_use]
    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: append several children
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = DocumentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Child nodes in document order
    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    /// First child with the given tag
    pub fn child(&self, name: &str) -> Option<&DocumentNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// String attribute; `None` when absent
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Float attribute; `None` when absent, unparsable or NaN
    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.get_string(name)
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|value| !value.is_nan())
    }

    /// Integer attribute; `None` when absent or not an integer
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get_string(name).and_then(|raw| raw.trim().parse::<i64>().ok())
    }

    /// Boolean attribute accepting `true`/`false`/`1`/`0`
    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        match self.get_string(name)?.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_validity_rule() {
        let node = DocumentNode::new("translate")
            .with_attr("x", "1.5")
            .with_attr("y", "NaN")
            .with_attr("z", "abc");

        assert_eq!(node.get_float("x"), Some(1.5));
        assert_eq!(node.get_float("y"), None, "NaN must be rejected");
        assert_eq!(node.get_float("z"), None);
        assert_eq!(node.get_float("w"), None);
    }

    #[test]
    fn test_integer_and_boolean_lookup() {
        let node = DocumentNode::new("sphere")
            .with_attr("slices", "12")
            .with_attr("stacks", "2.5")
            .with_attr("enabled", "0");

        assert_eq!(node.get_integer("slices"), Some(12));
        assert_eq!(node.get_integer("stacks"), None);
        assert_eq!(node.get_boolean("enabled"), Some(false));
        assert_eq!(node.get_boolean("slices"), None);
    }

    #[test]
    fn test_child_lookup() {
        let root = DocumentNode::new("yas")
            .with_child(DocumentNode::new("views"))
            .with_child(DocumentNode::new("scene"));

        assert_eq!(root.children().len(), 2);
        assert!(root.child("lights").is_none());
        assert_eq!(root.child("views").map(|n| n.name.as_str()), Some("views"));
    }
}
