use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node};

use crate::dom::{Document, DomNode, DomTree};

/// Tags whose children should be stripped (invisible/script content).
const SKIP_CHILDREN: &[&str] = &["script", "style", "noscript", "svg"];

/// Parse a raw HTML string into a [`Document`].
///
/// Keeps the original parse around so configured CSS selectors can be
/// evaluated against it later; each converted element remembers its path
/// into the tree so selector matches map back to laid-out nodes.
pub fn parse_html(html: &str, url: &str) -> Document {
    let document = Html::parse_document(html);

    let title = scraper::Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let mut paths = HashMap::new();
    let root = convert_element(document.root_element(), Vec::new(), &mut paths);

    Document {
        tree: DomTree {
            root,
            url: url.to_string(),
            title: title.trim().to_string(),
        },
        html: document,
        paths,
    }
}

fn convert_element(
    el: ElementRef<'_>,
    path: Vec<usize>,
    paths: &mut HashMap<NodeId, Vec<usize>>,
) -> DomNode {
    let tag = el.value().name.local.as_ref().to_string();
    let attributes: HashMap<String, String> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    paths.insert(el.id(), path.clone());

    // Skip children of invisible elements
    if SKIP_CHILDREN.contains(&tag.as_str()) {
        return DomNode::element(tag, attributes, Vec::new());
    }

    let mut children = Vec::new();

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    let mut child_path = path.clone();
                    child_path.push(children.len());
                    children.push(convert_element(child_el, child_path, paths));
                }
            }
            Node::Text(t) => {
                let s = t.text.to_string();
                if !s.trim().is_empty() {
                    children.push(DomNode::text(s));
                }
            }
            _ => {}
        }
    }

    DomNode::element(tag, attributes, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_html() {
        let html = r#"
        <html>
            <head><title>Test Page</title></head>
            <body>
                <h1>Hello, diorama</h1>
                <p>Content paragraph</p>
            </body>
        </html>
        "#;

        let doc = parse_html(html, "https://example.com");
        assert_eq!(doc.tree.title, "Test Page");
        assert!(doc.tree.root.node_count() > 0);
    }

    #[test]
    fn strips_script_children() {
        let html = r#"
        <html><body>
            <p>Visible</p>
            <script>alert("hidden");</script>
        </body></html>
        "#;

        let doc = parse_html(html, "https://example.com");
        let text = doc.tree.root.collect_text();
        assert!(text.contains("Visible"));
        assert!(!text.contains("alert"));
    }

    #[test]
    fn selector_matches_map_to_tree_paths() {
        let html = r#"<html><body><div id="a"></div><div id="b"></div></body></html>"#;
        let doc = parse_html(html, "https://example.com");

        let sel = scraper::Selector::parse("#b").unwrap();
        let el = doc.html.select(&sel).next().unwrap();
        let path = doc.paths.get(&el.id()).unwrap();
        let node = doc.tree.root.node_at(path).unwrap();
        assert_eq!(node.attr("id"), Some("b"));
    }
}
