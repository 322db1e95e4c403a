//! HTML to plain-text reduction.
//!
//! Parsing goes through html5ever (via `scraper`), which recovers from any
//! malformed or truncated markup the way a browser would, so extraction has
//! no failure path.

use scraper::{Html, Node};

/// Elements whose text content is never visible on the rendered page.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Reduces `html` to its visible text.
///
/// Each text node is separated from its neighbours by a space, then every
/// whitespace run is collapsed to a single space and the ends are trimmed.
/// Entities are decoded and comments dropped. Plain text passes through with
/// only whitespace normalization; empty input yields an empty string.
#[must_use]
pub fn extract_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            pieces.push(&**text);
        }
    }

    collapse_whitespace(&pieces.join(" "))
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
