pub mod css;
pub mod layout;
pub mod parser;
pub mod query;

use std::collections::HashMap;

use crate::dom::layout::LayoutBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
}

/// Internal DOM node representation.
///
/// Unlike browser DOMs, each node carries its computed layout box directly;
/// the layout pass fills it in document coordinates.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
    /// Document-coordinate box, zero until the layout pass runs.
    pub bounds: LayoutBox,
    /// Effective font size assigned during layout.
    pub font_size: f32,
}

impl DomNode {
    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
            node_type: NodeType::Element,
            bounds: LayoutBox::ZERO,
            font_size: 16.0,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
            node_type: NodeType::Text,
            bounds: LayoutBox::ZERO,
            font_size: 16.0,
        }
    }

    /// Recursively count all nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Collect all text content recursively, space-joined.
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        if !self.text.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(self.text.trim());
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// First descendant (depth-first) whose tag is in `tags`, self included.
    pub fn find_first(&self, tags: &[&str]) -> Option<&DomNode> {
        if tags.contains(&self.tag.as_str()) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_first(tags))
    }

    /// Walk a child-index path from this node.
    pub fn node_at(&self, path: &[usize]) -> Option<&DomNode> {
        let mut node = self;
        for &idx in path {
            node = node.children.get(idx)?;
        }
        Some(node)
    }
}

/// Parsed DOM tree with metadata.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub root: DomNode,
    pub url: String,
    pub title: String,
}

/// A parsed document: the converted tree plus the original parse, kept for
/// CSS-selector queries, and a map from parse-node ids to tree paths.
pub struct Document {
    pub(crate) html: scraper::Html,
    pub tree: DomTree,
    pub(crate) paths: HashMap<ego_tree::NodeId, Vec<usize>>,
}

impl Document {
    /// Run the layout pass, assigning document-coordinate boxes.
    pub fn layout(&mut self, viewport_width: f32) {
        layout::compute_layout(&mut self.tree, viewport_width);
    }
}
