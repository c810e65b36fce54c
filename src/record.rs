use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Value of one extracted field.
///
/// `NotFound` means no label/strategy combination matched; `Error` means the
/// navigation or extraction pipeline failed for the whole record. Both are
/// distinguishable from a legitimately empty `Found("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A value was located in the markup
    Found(String),
    /// No matching label was located
    NotFound,
    /// The record's traversal failed before this field could be resolved
    Error,
}

impl FieldValue {
    /// Whether a real value was extracted
    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// String form used for output: sentinels render as "N/A" / "Error"
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Found(value) => value,
            FieldValue::NotFound => "N/A",
            FieldValue::Error => "Error",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Canonical fields resolved for every registry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RegistrationNumber,
    ProjectName,
    PromoterName,
    PromoterAddress,
    GstNumber,
}

impl Field {
    /// Human-readable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Field::RegistrationNumber => "RERA Regd. No",
            Field::ProjectName => "Project Name",
            Field::PromoterName => "Promoter Name",
            Field::PromoterAddress => "Promoter Address",
            Field::GstNumber => "GST No",
        }
    }
}

/// One fully assembled registry record.
///
/// Created once per processed index and immutable once handed to the
/// collector. Serializes with the JSON keys the registry export uses.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Record {
    #[serde(rename = "Project No")]
    pub project_no: usize,

    #[serde(rename = "RERA Regd. No")]
    pub registration_number: FieldValue,

    #[serde(rename = "Project Name")]
    pub project_name: FieldValue,

    #[serde(rename = "Promoter Name")]
    pub promoter_name: FieldValue,

    #[serde(rename = "Promoter Address")]
    pub promoter_address: FieldValue,

    #[serde(rename = "GST No")]
    pub gst_number: FieldValue,
}

impl Record {
    /// Record for an index that had no corresponding element on the list page
    pub fn unavailable(project_no: usize) -> Self {
        Self {
            project_no,
            registration_number: FieldValue::NotFound,
            project_name: FieldValue::NotFound,
            promoter_name: FieldValue::NotFound,
            promoter_address: FieldValue::NotFound,
            gst_number: FieldValue::NotFound,
        }
    }

    /// Record for an index whose traversal failed outright
    pub fn failed(project_no: usize) -> Self {
        Self {
            project_no,
            registration_number: FieldValue::Error,
            project_name: FieldValue::Error,
            promoter_name: FieldValue::Error,
            promoter_address: FieldValue::Error,
            gst_number: FieldValue::Error,
        }
    }

    /// Field name/value pairs in output order
    pub fn field_rows(&self) -> [(&'static str, &FieldValue); 5] {
        [
            (Field::RegistrationNumber.name(), &self.registration_number),
            (Field::ProjectName.name(), &self.project_name),
            (Field::PromoterName.name(), &self.promoter_name),
            (Field::PromoterAddress.name(), &self.promoter_address),
            (Field::GstNumber.name(), &self.gst_number),
        ]
    }

    /// Whether any field carries the `Error` sentinel
    pub fn has_error(&self) -> bool {
        self.field_rows().iter().any(|(_, v)| **v == FieldValue::Error)
    }
}
