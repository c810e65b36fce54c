//! Parsed rendered-markup tree and traversal helpers.
//!
//! A [`MarkupTree`] wraps one snapshot of the page source as parsed by
//! `scraper`. It is produced fresh from every render and never mutated;
//! extraction strategies treat it as a read-only document.

use scraper::{ElementRef, Html, Selector};

/// Immutable parsed snapshot of one rendered page
pub struct MarkupTree {
    document: Html,
}

impl MarkupTree {
    /// Parse serialized markup into a tree. Malformed input is repaired by the
    /// HTML5 parsing algorithm rather than rejected.
    pub fn parse(source: &str) -> Self {
        Self { document: Html::parse_document(source) }
    }

    /// The underlying parsed document
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Select elements matching a compiled selector
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.document.select(selector)
    }

    /// Whole-page text with whitespace collapsed, used for diagnostics
    pub fn full_text(&self) -> String {
        collapse_whitespace(self.document.root_element().text())
    }

    /// Elements following `origin` in document order, starting with its own
    /// descendants. Mirrors how a flat forward scan of the markup behaves.
    pub fn elements_after<'a>(&'a self, origin: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
        let origin_id = origin.id();
        self.document
            .root_element()
            .descendants()
            .skip_while(move |node| node.id() != origin_id)
            .skip(1)
            .filter_map(ElementRef::wrap)
    }
}

/// Trimmed, whitespace-collapsed text content of an element and its descendants
pub fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(element.text())
}

/// The next sibling that is an element, skipping text and comment nodes
pub fn next_sibling_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn collapse_whitespace<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments {
        for word in segment.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }
    out
}
