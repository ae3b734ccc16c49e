//! Passage Sanitizer
//!
//! Reduces an arbitrary fragment of third-party passage markup to a small,
//! stable tag subset (`h1`-`h4`, `p`, `span`, `i`, `br`, `sup`) with no
//! attributes. Verse-number superscripts, paragraph and line structure,
//! headings and italics survive; everything administrative is dropped.
//!
//! The pipeline runs in a fixed order, each step mutating the tree left by
//! the previous one:
//!
//! 1. remove administrative subtrees and non-verse-number superscripts
//! 2. (poetry only) turn spacers into line breaks, flatten poetry wrappers
//! 3. strip comments, drop `script`/`style`, unwrap disallowed tags
//! 4. unwrap small-caps spans into their text
//! 5. unwrap grouping-only spans until a pass changes nothing
//! 6. strip every attribute
//! 7. drop whitespace-only paragraphs without a line break
//! 8. turn non-breaking spaces into spaces and trim
//!
//! Sanitizing already-sanitized output returns it unchanged.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use tracing::debug;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::error::{Error, Result};
use crate::patterns::{
    ADMINISTRATIVE_SELECTOR, POETRY_CONTAINER_SELECTOR, POETRY_INDENT_SELECTOR,
    POETRY_LINE_SELECTOR, POETRY_SPACER_SELECTOR, SMALL_CAPS_SELECTOR, LEADING_NUMBER,
};

/// Tags allowed in sanitized output.
pub static ALLOWED_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["h1", "h2", "h3", "h4", "p", "span", "i", "br", "sup"]
        .into_iter()
        .collect()
});

/// Tags removed together with their content.
const DROPPED_TAGS: &str = "script, style, noscript, template";

/// Block-level tags that must not end up inside a `<p>`.
const BLOCK_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, div, ul, ol, table, blockquote, section";

/// Upper bound on redundant-span passes; each pass removes at least one
/// span, so real input settles long before this.
const MAX_UNWRAP_PASSES: usize = 64;

/// Sanitize a passage fragment.
///
/// `is_poetry` enables the poetry restructuring step. The result is
/// trimmed HTML using only [`ALLOWED_TAGS`], without attributes.
pub fn sanitize(fragment: &str, is_poetry: bool) -> Result<String> {
    let doc = dom::parse(fragment);
    let body = dom::body(&doc);
    if body.is_empty() {
        return Err(Error::ParseError("fragment has no document body".to_string()));
    }

    remove_administrative(&body);
    if is_poetry {
        flatten_poetry(&body);
    }
    strip_disallowed(&doc);
    unwrap_small_caps(&body);
    let passes = unwrap_redundant_spans(&body);
    strip_attributes(&body);
    if remove_empty_paragraphs(&body) > 0 {
        unwrap_redundant_spans(&body);
    }

    let html = body.inner_html();
    let cleaned = html.replace("&nbsp;", " ").replace('\u{a0}', " ");
    let cleaned = cleaned.trim().to_string();

    debug!(
        input_len = fragment.len(),
        output_len = cleaned.len(),
        span_passes = passes,
        is_poetry,
        "sanitized passage fragment"
    );
    Ok(cleaned)
}

/// Whether a fragment carries poetry markup that [`sanitize`] should flatten.
#[must_use]
pub fn is_poetry(fragment: &Selection) -> bool {
    fragment.select(POETRY_CONTAINER_SELECTOR).exists()
}

// === Step 1: administrative subtrees ===

fn remove_administrative(body: &Selection) {
    body.select(ADMINISTRATIVE_SELECTOR).remove();
    // Script text must not count towards a superscript's verse number.
    body.select(DROPPED_TAGS).remove();

    for node in body.select("sup").nodes().iter().rev() {
        let sup = Selection::from(*node);
        if !is_verse_number(&sup) {
            sup.remove();
        }
    }
}

/// Verse numbers (`16`, `16a`, `(16)`, `3:16`) keep their superscript;
/// footnote and cross-reference markers (`[a]`, `(A)`) do not.
///
/// Judged on text alone: a superscript kept once is kept again after its
/// attributes are gone.
fn is_verse_number(sup: &Selection) -> bool {
    LEADING_NUMBER.is_match(&dom::text_content(sup))
}

// === Step 2: poetry ===

fn flatten_poetry(body: &Selection) {
    for node in body.select(POETRY_SPACER_SELECTOR).nodes().iter().rev() {
        let spacer = Selection::from(*node);
        if dom::text_content(&spacer).trim().is_empty() {
            spacer.replace_with_html("<br>");
        }
    }

    for node in body.select(POETRY_INDENT_SELECTOR).nodes().iter().rev() {
        dom::unwrap(&Selection::from(*node));
    }

    // Decide on separators before any line is replaced.
    let lines: Vec<(Selection, bool)> = body
        .select(POETRY_LINE_SELECTOR)
        .nodes()
        .iter()
        .map(|node| {
            let line = Selection::from(*node);
            let followed_by_line = dom::next_element_sibling(&line)
                .is_some_and(|next| next.is(POETRY_LINE_SELECTOR));
            (line, followed_by_line)
        })
        .collect();
    for (line, followed_by_line) in lines.iter().rev() {
        let mut inner = line.inner_html().to_string();
        if *followed_by_line {
            inner.push_str("<br>");
        }
        line.replace_with_html(inner.as_str());
    }

    for node in body.select(POETRY_CONTAINER_SELECTOR).nodes().iter().rev() {
        let container = Selection::from(*node);
        // Only a div can become a paragraph without landing inside another one.
        let is_div = dom::tag_name(&container).as_deref() == Some("div");
        if !is_div || container.select(BLOCK_SELECTOR).exists() {
            dom::unwrap(&container);
        } else {
            dom::clear_all_attributes(&container);
            dom::rename(&container, "p");
        }
    }
}

// === Step 3: comments, dropped and disallowed tags ===

fn strip_disallowed(doc: &Document) {
    let body = dom::body(doc);
    dom::remove_comments(&body);
    body.select(DROPPED_TAGS).remove();

    let disallowed: BTreeSet<String> = body
        .select("*")
        .nodes()
        .iter()
        .filter_map(|node| node.node_name().map(|name| name.to_lowercase()))
        .filter(|name| !ALLOWED_TAGS.contains(name.as_str()))
        .collect();

    if !disallowed.is_empty() {
        let names: Vec<&str> = disallowed.iter().map(String::as_str).collect();
        body.strip_elements(&names);
    }
}

// === Step 4: small caps ===

fn unwrap_small_caps(body: &Selection) {
    for node in body.select(SMALL_CAPS_SELECTOR).nodes().iter().rev() {
        dom::replace_with_text(&Selection::from(*node));
    }
}

// === Step 5: redundant spans ===

/// Unwrap spans that only group other spans, repeating until a full pass
/// makes no change. Returns the number of passes that changed something.
fn unwrap_redundant_spans(body: &Selection) -> usize {
    let mut passes = 0;
    while passes < MAX_UNWRAP_PASSES {
        let mut changed = false;
        for node in body.select("span").nodes().iter().rev() {
            if is_grouping_span(node) {
                dom::unwrap(&Selection::from(*node));
                changed = true;
            }
        }
        if !changed {
            break;
        }
        passes += 1;
    }
    passes
}

/// A span whose children are only whitespace text and other spans, with at
/// least one span among them.
fn is_grouping_span(node: &NodeRef) -> bool {
    let mut has_span_child = false;
    for child in node.children() {
        if child.is_text() {
            if !child.text().chars().all(char::is_whitespace) {
                return false;
            }
        } else if child.is_element() {
            if child.node_name().as_deref() != Some("span") {
                return false;
            }
            has_span_child = true;
        } else if !child.is_comment() {
            return false;
        }
    }
    has_span_child
}

// === Steps 6-7: attributes and empty paragraphs ===

fn strip_attributes(body: &Selection) {
    for node in body.select("*").nodes() {
        dom::clear_all_attributes(&Selection::from(*node));
    }
}

fn remove_empty_paragraphs(body: &Selection) -> usize {
    let mut removed = 0;
    for node in body.select("p").nodes().iter().rev() {
        let p = Selection::from(*node);
        if dom::text_content(&p).trim().is_empty() && !p.select("br").exists() {
            p.remove();
            removed += 1;
        }
    }
    removed
}
