//! Element queries: apply the configured selectors to a parsed document and
//! extract the per-element view the generators and rasterizers consume.

use log::warn;
use scraper::Selector;
use url::Url;

use crate::config::SrcConfig;
use crate::dom::css::{self, Color};
use crate::dom::layout::LayoutBox;
use crate::dom::{Document, DomNode};
use crate::error::ConfigError;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Extracted view of one matched DOM element, in document order.
#[derive(Debug, Clone)]
pub struct SourceElement {
    /// Position in the query result, which the procedural generators use
    /// for row/column and page arithmetic.
    pub index: usize,
    pub tag: String,
    /// Document-coordinate bounding box from the layout pass.
    pub bounds: LayoutBox,
    pub font_size: f32,
    /// Title text: the `src.title` sub-selector match, else the first heading.
    pub title: String,
    /// Body text: the `src.content` sub-selector match, else all text.
    pub text: String,
    /// Inline-style background color, absent when transparent or unset.
    pub background: Option<Color>,
    /// Resolved image source (the element itself or its first `<img>` child).
    pub image_src: Option<String>,
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::BadSelector(selector.to_string()))
}

/// Resolve the positioning container's layout box.
pub fn resolve_container(doc: &Document, selector: &str) -> Result<LayoutBox, ConfigError> {
    let sel = compile(selector)?;
    let el = doc
        .html
        .select(&sel)
        .next()
        .ok_or_else(|| ConfigError::NoContainer(selector.to_string()))?;
    doc.paths
        .get(&el.id())
        .and_then(|path| doc.tree.root.node_at(path))
        .map(|node| node.bounds)
        .ok_or_else(|| ConfigError::NoContainer(selector.to_string()))
}

/// Run the configured `src` selectors and extract one [`SourceElement`]
/// per match, preserving document order.
pub fn extract_elements(doc: &Document, src: &SrcConfig) -> Result<Vec<SourceElement>, ConfigError> {
    let sel = compile(&src.selector)?;
    let title_sel = src.title.as_deref().map(compile).transpose()?;
    let content_sel = src.content.as_deref().map(compile).transpose()?;
    let base_url = Url::parse(&doc.tree.url).ok();

    let mut elements = Vec::new();
    for el in doc.html.select(&sel) {
        let Some(node) = doc.paths.get(&el.id()).and_then(|p| doc.tree.root.node_at(p)) else {
            warn!("selector match has no laid-out node, skipping");
            continue;
        };

        let title = title_sel
            .as_ref()
            .and_then(|s| el.select(s).next())
            .map(|t| t.text().collect::<String>().trim().to_string())
            .or_else(|| node.find_first(HEADING_TAGS).map(|h| h.collect_text()))
            .unwrap_or_default();

        let text = content_sel
            .as_ref()
            .and_then(|s| el.select(s).next())
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| node.collect_text());

        let background = node
            .attr("style")
            .map(css::parse_inline_style)
            .and_then(|props| props.background_color)
            .filter(|c| c.a > 0);

        let image_src = image_source(node).map(|raw| match &base_url {
            Some(base) => base
                .join(raw)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| raw.to_string()),
            None => raw.to_string(),
        });

        elements.push(SourceElement {
            index: elements.len(),
            tag: node.tag.clone(),
            bounds: node.bounds,
            font_size: node.font_size,
            title,
            text,
            background,
            image_src,
        });
    }
    Ok(elements)
}

fn image_source(node: &DomNode) -> Option<&str> {
    if node.tag == "img" {
        return node.attr("src");
    }
    node.find_first(&["img"]).and_then(|img| img.attr("src"))
}
