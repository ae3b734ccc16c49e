//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the sanitizer and the
//! provider scrapers. Everything operates on `Selection`s so callers can mix
//! these with `dom_query`'s own selector API.

pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string (full document or fragment) into a document.
///
/// Fragments are placed under `<body>` by the HTML5 tree builder, which is
/// where [`body`] picks them up again.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// The `<body>` element of a parsed document.
#[inline]
#[must_use]
pub fn body(doc: &Document) -> Selection<'_> {
    doc.select("body")
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get all attributes as key-value pairs
///
/// Returns empty vector if node has no attributes or if selection is empty.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Clear all attributes from a selection.
pub fn clear_all_attributes(sel: &Selection) {
    for (key, _) in get_all_attributes(sel) {
        sel.remove_attr(&key);
    }
}

/// Trimmed text content of the first matching descendant, if any.
#[must_use]
pub fn select_text(sel: &Selection, selector: &str) -> Option<String> {
    let found = sel.select_single(selector);
    if found.is_empty() {
        return None;
    }
    let text = text_content(&found).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Text content of a selection, without copying out of the tendril.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree Navigation ===

/// Get next element sibling (skipping text nodes)
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

// === Tree Manipulation ===

/// Replace an element with its own inner markup (unwrap).
///
/// The tag and its attributes are discarded, children are hoisted into the
/// parent at the element's position.
#[inline]
pub fn unwrap(sel: &Selection) {
    let inner = sel.inner_html();
    sel.replace_with_html(inner);
}

/// Replace an element with its plain text content.
pub fn replace_with_text(sel: &Selection) {
    let text = escape_text(&sel.text());
    sel.replace_with_html(text.as_str());
}

/// Rename element tag
#[inline]
pub fn rename(sel: &Selection, new_tag: &str) {
    sel.rename(new_tag);
}

/// Remove every comment node below `root`.
///
/// Returns the number of comments removed.
pub fn remove_comments(root: &Selection) -> usize {
    let comments: Vec<NodeRef> = root
        .nodes()
        .iter()
        .flat_map(NodeRef::descendants)
        .filter(NodeRef::is_comment)
        .collect();
    for node in &comments {
        node.remove_from_parent();
    }
    comments.len()
}

/// Escape text for re-insertion as HTML.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
