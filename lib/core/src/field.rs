//! Field schema for soil aggregation
//!
//! Declares, per field, how neighbor values are reduced to one prediction.
//! The declaration is made by the caller up front instead of being guessed
//! from the runtime type of each value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// The closed set of soil record fields that can be predicted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilField {
    Region,
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl SoilField {
    /// Every field, in prediction order
    pub const ALL: [SoilField; 5] = [
        SoilField::Region,
        SoilField::Ph,
        SoilField::Nitrogen,
        SoilField::Phosphorus,
        SoilField::Potassium,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SoilField::Region => "region",
            SoilField::Ph => "ph",
            SoilField::Nitrogen => "nitrogen",
            SoilField::Phosphorus => "phosphorus",
            SoilField::Potassium => "potassium",
        }
    }

    /// Whether the underlying sample value is a number
    pub fn is_numeric(&self) -> bool {
        !matches!(self, SoilField::Region)
    }
}

impl fmt::Display for SoilField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field is reduced across neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Arithmetic mean
    Numeric,
    /// Most frequent value, first seen wins ties
    Categorical,
}

/// A single field value read from a sample or produced by aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Category(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FieldValue::Category(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

/// Per-field aggregation declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub fields: BTreeMap<SoilField, FieldKind>,
}

impl Default for FieldSchema {
    /// `region` by majority vote, nutrients by mean
    fn default() -> Self {
        let fields = SoilField::ALL
            .iter()
            .map(|f| {
                let kind = if f.is_numeric() { FieldKind::Numeric } else { FieldKind::Categorical };
                (*f, kind)
            })
            .collect();
        Self { fields }
    }
}

impl FieldSchema {
    pub fn new(fields: BTreeMap<SoilField, FieldKind>) -> Self {
        Self { fields }
    }

    /// Override the kind of one field
    #[must_use]
    pub fn with_kind(mut self, field: SoilField, kind: FieldKind) -> Self {
        self.fields.insert(field, kind);
        self
    }

    /// Reject an empty schema and numeric declarations over text fields
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::InvalidConfig("field schema cannot be empty".to_string()));
        }
        for (field, kind) in &self.fields {
            if *kind == FieldKind::Numeric && !field.is_numeric() {
                return Err(Error::FieldTypeMismatch {
                    field: *field,
                    expected: FieldKind::Numeric,
                });
            }
        }
        Ok(())
    }

    /// Declared kind for `field`; undeclared fields fall back to their natural kind
    pub fn kind_of(&self, field: SoilField) -> FieldKind {
        self.fields.get(&field).copied().unwrap_or(if field.is_numeric() {
            FieldKind::Numeric
        } else {
            FieldKind::Categorical
        })
    }
}

/// Aggregated output keyed by field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldValues(BTreeMap<SoilField, FieldValue>);

impl FieldValues {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, field: SoilField, value: FieldValue) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: SoilField) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of `field`. A number that won a categorical vote still counts.
    pub fn number(&self, field: SoilField) -> Result<f64> {
        self.get(field)
            .and_then(FieldValue::as_number)
            .ok_or(Error::MissingField(field))
    }

    pub fn category(&self, field: SoilField) -> Result<&str> {
        self.get(field)
            .and_then(FieldValue::as_category)
            .ok_or(Error::MissingField(field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SoilField, &FieldValue)> {
        self.0.iter()
    }
}
