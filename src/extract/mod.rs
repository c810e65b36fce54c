//! Adaptive field extraction over heterogeneous markup.
//!
//! The registry renders the same logical fields with different markup from
//! page to page (plain tables, div grids, label/span pairs). Extraction is a
//! fixed-priority list of independent [`ExtractionStrategy`] implementations,
//! each a pure function over the tree; the first hit wins. Tabular layouts
//! are the most reliable signal on this class of site, so the table scan runs
//! before the looser heuristics.

pub mod strategies;

pub use strategies::{BlockSiblingStrategy, InlineLabelStrategy, TabularStrategy};

use crate::markup::MarkupTree;

/// One independent heuristic for locating a labeled value in a markup tree.
///
/// Implementations are side-effect-free and must never panic on any input
/// tree; "no match" is `None`, never an error.
pub trait ExtractionStrategy: Send + Sync {
    /// Strategy name used in logs
    fn name(&self) -> &'static str;

    /// Attempt to find the value labeled `label` (case-insensitive substring
    /// match against candidate label text)
    fn try_extract(&self, tree: &MarkupTree, label: &str) -> Option<String>;
}

/// Runs extraction strategies in priority order
pub struct FieldExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl FieldExtractor {
    /// Extractor with the default strategy order: tabular, block-sibling,
    /// inline-label
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(TabularStrategy::new()),
            Box::new(BlockSiblingStrategy::new()),
            Box::new(InlineLabelStrategy::new()),
        ])
    }

    /// Extractor with a custom strategy list, tried in the given order
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Try each strategy in order; first hit wins
    pub fn extract(&self, tree: &MarkupTree, label: &str) -> Option<String> {
        for strategy in &self.strategies {
            if let Some(value) = strategy.try_extract(tree, label) {
                log::debug!("Found '{}' via {} strategy: {}", label, strategy.name(), value);
                return Some(value);
            }
        }
        log::debug!("No strategy matched label '{}'", label);
        None
    }

    /// Like [`extract`](Self::extract) but substituting `default` when no
    /// strategy matches
    pub fn extract_or(&self, tree: &MarkupTree, label: &str, default: &str) -> String {
        self.extract(tree, label).unwrap_or_else(|| default.to_string())
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_table_row() {
        let tree = MarkupTree::parse(
            "<table><tr><th>RERA No</th><td>RP/01/1234</td></tr></table>",
        );
        let extractor = FieldExtractor::new();

        assert_eq!(extractor.extract_or(&tree, "RERA", "N/A"), "RP/01/1234");
    }

    #[test]
    fn test_extract_returns_default_when_nothing_matches() {
        let tree = MarkupTree::parse("<p>completely unrelated content</p>");
        let extractor = FieldExtractor::new();

        assert_eq!(extractor.extract(&tree, "GST"), None);
        assert_eq!(extractor.extract_or(&tree, "GST", "N/A"), "N/A");
    }

    #[test]
    fn test_extract_never_panics_on_empty_tree() {
        let extractor = FieldExtractor::new();
        for source in ["", "<html></html>", "<<<>>>", "<table></table>"] {
            let tree = MarkupTree::parse(source);
            assert_eq!(extractor.extract(&tree, "Anything"), None);
        }
    }

    #[test]
    fn test_extract_is_idempotent() {
        let tree = MarkupTree::parse(
            "<div>Project Name</div><div>Sunrise Towers</div>",
        );
        let extractor = FieldExtractor::new();

        let first = extractor.extract(&tree, "Project Name");
        let second = extractor.extract(&tree, "Project Name");
        assert_eq!(first, second);
        assert_eq!(first, Some("Sunrise Towers".to_string()));
    }

    #[test]
    fn test_tabular_takes_precedence_over_block_sibling() {
        // Both the table row and the div pair could satisfy the label; the
        // tabular result must win.
        let tree = MarkupTree::parse(
            "<div>Registration</div><div>from-divs</div>\
             <table><tr><th>Registration</th><td>from-table</td></tr></table>",
        );
        let extractor = FieldExtractor::new();

        assert_eq!(extractor.extract(&tree, "Registration"), Some("from-table".to_string()));
    }

    #[test]
    fn test_custom_strategy_order() {
        let extractor = FieldExtractor::with_strategies(vec![Box::new(BlockSiblingStrategy::new())]);
        let tree = MarkupTree::parse(
            "<table><tr><th>GST</th><td>21AAAAA0000A1Z5</td></tr></table>",
        );

        // Only the block-sibling strategy is registered, so the table is invisible
        assert_eq!(extractor.extract(&tree, "GST"), None);
    }
}
