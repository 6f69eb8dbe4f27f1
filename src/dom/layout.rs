//! Block layout: assigns every DOM node a bounding box in document
//! coordinates (top-to-bottom block model, pixel units).
//!
//! This supplies the element geometry the coordinate mapper consumes, the
//! same role `getBoundingClientRect` plays in a live browser.

use crate::dom::{DomNode, DomTree, NodeType};

/// Bounding box for a laid-out DOM node, document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutBox {
    pub const ZERO: LayoutBox = LayoutBox {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        LayoutBox { x, y, width, height }
    }
}

const BLOCK_TAGS: &[&str] = &[
    "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "table",
    "tr", "td", "th", "form", "section", "article", "aside", "main", "header", "footer", "nav",
    "blockquote", "pre", "figure", "figcaption", "details", "summary", "img", "hr",
];

/// Tags that occupy no layout space.
const HIDDEN_TAGS: &[&str] = &[
    "script", "style", "noscript", "svg", "head", "meta", "link", "title", "base",
];

/// Per-tag vertical margins (top, bottom) in pixels.
fn tag_margins(tag: &str) -> (f32, f32) {
    match tag {
        "h1" => (24.0, 16.0),
        "h2" => (20.0, 12.0),
        "h3" | "h4" => (16.0, 10.0),
        "h5" | "h6" => (12.0, 8.0),
        "p" => (4.0, 10.0),
        "ul" | "ol" => (8.0, 8.0),
        "li" => (2.0, 2.0),
        "section" | "article" | "main" => (16.0, 16.0),
        "nav" | "header" | "footer" => (12.0, 12.0),
        "blockquote" => (12.0, 12.0),
        "pre" => (8.0, 8.0),
        "hr" => (8.0, 8.0),
        _ => (0.0, 0.0),
    }
}

/// Per-tag padding in pixels.
fn tag_padding(tag: &str, is_block: bool) -> f32 {
    match tag {
        "section" | "article" | "main" | "aside" => 16.0,
        "nav" | "header" | "footer" => 12.0,
        "blockquote" => 20.0,
        _ if is_block => 4.0,
        _ => 0.0,
    }
}

fn tag_font_size(tag: &str, parent: f32) -> f32 {
    match tag {
        "h1" => 32.0,
        "h2" => 24.0,
        "h3" => 20.0,
        "h4" => 18.0,
        "h5" | "h6" => 16.0,
        "small" => 12.0,
        _ => parent,
    }
}

/// Compute layout for the whole tree (simple top-to-bottom block model).
pub fn compute_layout(tree: &mut DomTree, viewport_width: f32) {
    let mut cursor_y = 0.0;
    layout_node(&mut tree.root, 0.0, &mut cursor_y, viewport_width, 16.0);
}

fn layout_node(
    node: &mut DomNode,
    x: f32,
    cursor_y: &mut f32,
    available_width: f32,
    parent_font_size: f32,
) {
    if node.node_type == NodeType::Element && HIDDEN_TAGS.contains(&node.tag.as_str()) {
        node.bounds = LayoutBox::new(x, *cursor_y, 0.0, 0.0);
        node.font_size = parent_font_size;
        return;
    }

    let is_block = node.node_type == NodeType::Element && BLOCK_TAGS.contains(&node.tag.as_str());
    let font_size = tag_font_size(&node.tag, parent_font_size);

    // Replaced content: images take their declared pixel size.
    if node.tag == "img" {
        let w = attr_px(node, "width").unwrap_or(available_width);
        let h = attr_px(node, "height").unwrap_or(w * 0.75);
        node.bounds = LayoutBox::new(x, *cursor_y, w.min(available_width), h);
        node.font_size = font_size;
        *cursor_y += h;
        return;
    }

    let (margin_top, margin_bottom) = tag_margins(&node.tag);
    let padding = tag_padding(&node.tag, is_block);

    if is_block {
        *cursor_y += margin_top;
    }

    let start_y = *cursor_y;

    if padding > 0.0 {
        *cursor_y += padding;
    }

    let child_x = x + padding;
    let child_width = (available_width - padding * 2.0).max(0.0);

    for child in &mut node.children {
        layout_node(child, child_x, cursor_y, child_width, font_size);
    }

    // Text content contributes to height
    if !node.text.is_empty() {
        let line_height = font_size * 1.4;
        let chars_per_line = (available_width / (font_size * 0.6)).max(1.0) as usize;
        let lines = (node.text.trim().len() as f32 / chars_per_line as f32)
            .ceil()
            .max(1.0);
        *cursor_y += lines * line_height;
    }

    if padding > 0.0 {
        *cursor_y += padding;
    }

    let height = *cursor_y - start_y;

    if is_block {
        *cursor_y += margin_bottom;
    }

    node.bounds = LayoutBox::new(x, start_y, available_width, height);
    node.font_size = font_size;
}

fn attr_px(node: &DomNode, name: &str) -> Option<f32> {
    node.attr(name)?.trim().parse::<f32>().ok().filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    fn body_of(tree: &crate::dom::DomTree) -> &DomNode {
        tree.root.find_first(&["body"]).unwrap()
    }

    #[test]
    fn blocks_stack_vertically() {
        let html = r#"<html><body>
            <div>first block of text content</div>
            <div>second block of text content</div>
        </body></html>"#;
        let mut doc = parse_html(html, "https://example.com");
        doc.layout(800.0);

        let body = body_of(&doc.tree);
        let divs: Vec<&DomNode> = body.children.iter().filter(|c| c.tag == "div").collect();
        assert_eq!(divs.len(), 2);
        assert!(divs[1].bounds.y >= divs[0].bounds.y + divs[0].bounds.height);
        assert!(divs[0].bounds.height > 0.0);
    }

    #[test]
    fn images_use_declared_size() {
        let html = r#"<html><body><img src="x.png" width="200" height="100"></body></html>"#;
        let mut doc = parse_html(html, "https://example.com");
        doc.layout(800.0);

        let img = doc.tree.root.find_first(&["img"]).unwrap();
        assert_eq!(img.bounds.width, 200.0);
        assert_eq!(img.bounds.height, 100.0);
    }

    #[test]
    fn hidden_tags_take_no_space() {
        let html = r#"<html><head><style>p{}</style></head><body><p>hi</p></body></html>"#;
        let mut doc = parse_html(html, "https://example.com");
        doc.layout(800.0);

        let style = doc.tree.root.find_first(&["style"]).unwrap();
        assert_eq!(style.bounds.height, 0.0);
    }

    #[test]
    fn padding_indents_children() {
        let html = r#"<html><body><section><p>inner</p></section></body></html>"#;
        let mut doc = parse_html(html, "https://example.com");
        doc.layout(800.0);

        let section = doc.tree.root.find_first(&["section"]).unwrap();
        let p = section.find_first(&["p"]).unwrap();
        assert!(p.bounds.x > section.bounds.x);
    }
}
