//! Maps canonical record fields to ordered label synonyms and resolves each
//! through the extraction engine.

use crate::extract::FieldExtractor;
use crate::markup::MarkupTree;
use crate::record::{Field, FieldValue};
use indexmap::IndexMap;

/// Ordered label synonyms per canonical field, tried in priority order
pub type FieldLabels = IndexMap<Field, Vec<String>>;

/// The label variants the registry has been observed to use for each field
pub fn default_labels() -> FieldLabels {
    let mut labels = IndexMap::new();
    labels.insert(Field::RegistrationNumber, synonyms(&["RERA", "Registration", "Regd"]));
    labels.insert(Field::ProjectName, synonyms(&["Project Name", "Name"]));
    labels.insert(Field::PromoterName, synonyms(&["Company Name", "Promoter Name", "Name"]));
    labels.insert(
        Field::PromoterAddress,
        synonyms(&["Address", "Registered Office", "Office Address"]),
    );
    labels.insert(Field::GstNumber, synonyms(&["GST", "GST No", "GSTIN"]));
    labels
}

fn synonyms(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// Resolves canonical fields against a markup tree via the extraction engine.
/// Pure over the tree: no field resolution has side effects beyond logging.
pub struct RecordAssembler {
    extractor: FieldExtractor,
    labels: FieldLabels,
}

impl RecordAssembler {
    /// Assembler with the default extractor and label table
    pub fn new() -> Self {
        Self { extractor: FieldExtractor::new(), labels: default_labels() }
    }

    /// Assembler with a custom label table (e.g. loaded from configuration)
    pub fn with_labels(labels: FieldLabels) -> Self {
        Self { extractor: FieldExtractor::new(), labels }
    }

    /// Resolve one canonical field, trying its label synonyms in order
    pub fn resolve(&self, tree: &MarkupTree, field: Field) -> FieldValue {
        let Some(candidates) = self.labels.get(&field) else {
            return FieldValue::NotFound;
        };
        for label in candidates {
            if let Some(value) = self.extractor.extract(tree, label) {
                log::debug!("Resolved {} via label '{}'", field.name(), label);
                return FieldValue::Found(value);
            }
        }
        log::warn!("Could not resolve {} with any known label", field.name());
        FieldValue::NotFound
    }

    /// Resolve the fields available on the detail view's base tab
    pub fn assemble_base(&self, tree: &MarkupTree) -> (FieldValue, FieldValue) {
        (
            self.resolve(tree, Field::RegistrationNumber),
            self.resolve(tree, Field::ProjectName),
        )
    }

    /// Resolve the fields available on the promoter sub-tab
    pub fn assemble_promoter(&self, tree: &MarkupTree) -> (FieldValue, FieldValue, FieldValue) {
        (
            self.resolve(tree, Field::PromoterName),
            self.resolve(tree, Field::PromoterAddress),
            self.resolve(tree, Field::GstNumber),
        )
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}
