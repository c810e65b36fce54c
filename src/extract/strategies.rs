//! The three structural hypotheses tried against every page.
//!
//! Strategy order is a policy decision: tables are the strongest signal on
//! registry pages, so [`TabularStrategy`] runs first and the looser sibling
//! and inline heuristics only see trees that offered no table match.

use crate::extract::ExtractionStrategy;
use crate::markup::{element_text, next_sibling_element, MarkupTree};
use scraper::{ElementRef, Selector};

/// Scans every table row, treating the first two header/data cells as a
/// (label, value) pair.
///
/// Cells are taken positionally; header rows are not distinguished from data
/// rows, so a table whose first row is an irregular header can win an
/// ambiguous match. That behavior is intentional and load-bearing for which
/// of several candidates is returned.
pub struct TabularStrategy {
    tables: Selector,
    rows: Selector,
    cells: Selector,
}

impl TabularStrategy {
    pub fn new() -> Self {
        Self {
            tables: Selector::parse("table").expect("table selector is valid"),
            rows: Selector::parse("tr").expect("row selector is valid"),
            cells: Selector::parse("th, td").expect("cell selector is valid"),
        }
    }
}

impl Default for TabularStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for TabularStrategy {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn try_extract(&self, tree: &MarkupTree, label: &str) -> Option<String> {
        let needle = label.to_lowercase();
        for table in tree.select(&self.tables) {
            for row in table.select(&self.rows) {
                let mut cells = row.select(&self.cells);
                let (Some(label_cell), Some(value_cell)) = (cells.next(), cells.next()) else {
                    continue;
                };
                if element_text(&label_cell).to_lowercase().contains(&needle) {
                    return Some(element_text(&value_cell));
                }
            }
        }
        None
    }
}

/// Scans block-level containers whose text mentions the label and reads the
/// next sibling element as the value.
pub struct BlockSiblingStrategy {
    blocks: Selector,
}

impl BlockSiblingStrategy {
    pub fn new() -> Self {
        Self { blocks: Selector::parse("div").expect("block selector is valid") }
    }
}

impl Default for BlockSiblingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for BlockSiblingStrategy {
    fn name(&self) -> &'static str {
        "block-sibling"
    }

    fn try_extract(&self, tree: &MarkupTree, label: &str) -> Option<String> {
        let needle = label.to_lowercase();
        for block in tree.select(&self.blocks) {
            let block_text = element_text(&block);
            if !block_text.to_lowercase().contains(&needle) {
                continue;
            }
            if let Some(sibling) = next_sibling_element(&block) {
                let value = element_text(&sibling);
                if !value.is_empty() && value != block_text {
                    return Some(value);
                }
            }
        }
        None
    }
}

/// Scans `label`/`span` nodes matching the label and reads the first
/// span/div/cell following their enclosing container in document order.
pub struct InlineLabelStrategy {
    labels: Selector,
}

impl InlineLabelStrategy {
    pub fn new() -> Self {
        Self { labels: Selector::parse("label, span").expect("label selector is valid") }
    }

    fn matches_value(&self, candidate: &ElementRef) -> bool {
        let name = candidate.value().name();
        name.eq_ignore_ascii_case("span")
            || name.eq_ignore_ascii_case("div")
            || name.eq_ignore_ascii_case("td")
    }
}

impl Default for InlineLabelStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for InlineLabelStrategy {
    fn name(&self) -> &'static str {
        "inline-label"
    }

    fn try_extract(&self, tree: &MarkupTree, label: &str) -> Option<String> {
        let needle = label.to_lowercase();
        for label_node in tree.select(&self.labels) {
            let label_text = element_text(&label_node);
            if !label_text.to_lowercase().contains(&needle) {
                continue;
            }
            let Some(parent) = label_node.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            // Only the first candidate after the container is consulted; if it
            // turns out to be the label node itself the match is rejected and
            // the scan moves on to the next label occurrence.
            let Some(candidate) = tree.elements_after(&parent).find(|el| self.matches_value(el))
            else {
                continue;
            };
            let value = element_text(&candidate);
            if !value.is_empty() && value != label_text {
                return Some(value);
            }
        }
        None
    }
}
