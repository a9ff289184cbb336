//! In-memory customer table and exact-match record lookup.

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::sync::Arc;

use fake::Fake;
use fake::faker::name::raw::Name;
use fake::locales::PT_BR;

use crate::error::LoadError;
use crate::schema::{
    self, CANONICAL_COLUMNS, DISPLAY_NAME, DISPLAY_NAME_HEADER, IDENTIFIER,
    Schema,
};

/// A single spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A blank cell. Rendered as `NaN`, which the summary instructions
    /// tell the model to ignore.
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// A date cell, already rendered as `YYYY-MM-DD HH:MM:SS`.
    DateTime(String),
}

impl FieldValue {
    /// Renders the value as a lookup key.
    ///
    /// Numeric identifiers are stored as numbers by most spreadsheet
    /// tools, so whole floats are rendered without a fractional part.
    pub fn key(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Float(value) if is_whole(*value) => {
                format!("{}", *value as i64)
            }
            other => other.to_string(),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => f.write_str("NaN"),
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) if value.is_nan() => f.write_str("NaN"),
            FieldValue::Float(value) if is_whole(*value) => {
                write!(f, "{value:.1}")
            }
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Text(text) | FieldValue::DateTime(text) => {
                f.write_str(text)
            }
        }
    }
}

#[inline]
fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15
}

/// One customer's row.
///
/// Cloning is cheap, the schema and the values are shared.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerRecord {
    identifier: String,
    schema: Schema,
    values: Arc<[FieldValue]>,
}

impl CustomerRecord {
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> String {
        self.values[DISPLAY_NAME].to_string()
    }

    /// Returns the value of the field at `index` in schema order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    /// Returns the value of the field called `name`.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.schema.position(name).and_then(|idx| self.get(idx))
    }

    /// Iterates over `(field name, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema.iter().zip(self.values.iter())
    }

    /// The labelled subset of fields shown when a customer is selected,
    /// rendered for display.
    ///
    /// The identifier is rendered as its lookup key, so the panel shows
    /// exactly what has to be typed to select this customer again.
    pub fn key_fields(&self) -> impl Iterator<Item = (&'static str, String)> {
        schema::KEY_FIELDS.iter().map(|&(label, idx)| {
            let value = &self.values[idx];
            let text = match idx {
                IDENTIFIER => value.key(),
                _ => value.to_string(),
            };
            (label, text)
        })
    }
}

/// A table as read from the source, before the schema is fixed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}

/// The full customer table. Immutable once built.
#[derive(Debug)]
pub struct Dataset {
    schema: Schema,
    records: Vec<CustomerRecord>,
    duplicates: HashSet<String>,
}

impl Dataset {
    /// Fixes the schema of a raw table.
    ///
    /// A missing display-name column is inserted at its canonical position
    /// and filled with generated pt-BR names. The resulting columns are then
    /// renamed positionally to [`CANONICAL_COLUMNS`], which fails unless the
    /// column count matches exactly.
    pub fn from_table(table: RawTable) -> Result<Self, LoadError> {
        let RawTable { mut header, mut rows } = table;
        let width = header.len();
        for row in &mut rows {
            row.resize(width, FieldValue::Empty);
        }

        if !header.iter().any(|h| h == DISPLAY_NAME_HEADER) {
            debug!(rows = rows.len(), "synthesizing display names");
            let at = DISPLAY_NAME.min(width);
            header.insert(at, DISPLAY_NAME_HEADER.to_owned());
            for row in &mut rows {
                let name: String = Name(PT_BR).fake();
                row.insert(at, FieldValue::Text(name));
            }
        }

        if header.len() != CANONICAL_COLUMNS.len() {
            return Err(LoadError::SchemaMismatch {
                expected: CANONICAL_COLUMNS.len(),
                found: header.len(),
            });
        }

        let schema = Schema::canonical();
        let mut seen = HashSet::with_capacity(rows.len());
        let mut duplicates = HashSet::new();
        let records = rows
            .into_iter()
            .map(|values| {
                let identifier = values[IDENTIFIER].key();
                if !seen.insert(identifier.clone()) {
                    duplicates.insert(identifier.clone());
                }
                CustomerRecord {
                    identifier,
                    schema: schema.clone(),
                    values: values.into(),
                }
            })
            .collect();

        Ok(Self {
            schema,
            records,
            duplicates,
        })
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline]
    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the record whose identifier equals `identifier` exactly.
    ///
    /// No trimming or case folding is applied. When the identifier is
    /// duplicated in the source, the first row wins.
    pub fn find(&self, identifier: &str) -> Option<&CustomerRecord> {
        self.records
            .iter()
            .find(|record| record.identifier == identifier)
    }

    /// Returns `true` if more than one row carries `identifier`.
    #[inline]
    pub fn is_duplicate(&self, identifier: &str) -> bool {
        self.duplicates.contains(identifier)
    }

    /// Identifiers that appear in more than one row, in no particular order.
    pub fn duplicate_identifiers(&self) -> impl Iterator<Item = &str> {
        self.duplicates.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, canonical_header, customer_row};
    use crate::schema::{MODEM_MODEL, MUNICIPALITY};

    #[test]
    fn test_render_values() {
        assert_eq!(FieldValue::Empty.to_string(), "NaN");
        assert_eq!(FieldValue::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(FieldValue::Float(12.0).to_string(), "12.0");
        assert_eq!(FieldValue::Float(97.25).to_string(), "97.25");
        assert_eq!(FieldValue::Int(0).to_string(), "0");
        assert_eq!(FieldValue::Bool(true).to_string(), "True");
        assert_eq!(
            FieldValue::DateTime("2024-05-10 00:00:00".to_owned()).to_string(),
            "2024-05-10 00:00:00"
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(FieldValue::Float(123456.0).key(), "123456");
        assert_eq!(FieldValue::Int(42).key(), "42");
        assert_eq!(FieldValue::Text(" C-1 ".to_owned()).key(), " C-1 ");
    }

    #[test]
    fn test_find() {
        let dataset = fixtures::dataset(&[("C-100", "São Paulo")]);
        let record = dataset.find("C-100").unwrap();
        assert_eq!(
            record.field("Município"),
            Some(&FieldValue::Text("São Paulo".to_owned()))
        );
        assert!(dataset.find("C-999").is_none());
    }

    #[test]
    fn test_find_is_exact() {
        let dataset = fixtures::dataset(&[("C-100", "São Paulo")]);
        assert!(dataset.find("c-100").is_none());
        assert!(dataset.find(" C-100").is_none());
        assert!(dataset.find("C-10").is_none());
        assert!(dataset.find("").is_none());
    }

    #[test]
    fn test_find_returns_full_row() {
        let row = customer_row("C-200", "Campinas");
        let dataset = Dataset::from_table(RawTable {
            header: canonical_header(),
            rows: vec![row.clone()],
        })
        .unwrap();

        let record = dataset.find("C-200").unwrap();
        let values: Vec<_> = record.fields().map(|(_, v)| v.clone()).collect();
        assert_eq!(values, row);
        let names: Vec<_> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, CANONICAL_COLUMNS);
    }

    #[test]
    fn test_duplicates_first_match_wins() {
        let dataset = fixtures::dataset(&[
            ("C-1", "Recife"),
            ("C-2", "Natal"),
            ("C-1", "Olinda"),
        ]);
        let record = dataset.find("C-1").unwrap();
        assert_eq!(record.get(MUNICIPALITY).unwrap().to_string(), "Recife");
        assert!(dataset.is_duplicate("C-1"));
        assert!(!dataset.is_duplicate("C-2"));
        assert_eq!(dataset.duplicate_identifiers().count(), 1);
    }

    #[test]
    fn test_synthesizes_display_names() {
        let mut header = canonical_header();
        header.remove(DISPLAY_NAME);
        let rows = ["C-1", "C-2"]
            .into_iter()
            .map(|id| {
                let mut row = customer_row(id, "Belém");
                row.remove(DISPLAY_NAME);
                row
            })
            .collect();

        let dataset = Dataset::from_table(RawTable { header, rows }).unwrap();
        assert_eq!(dataset.len(), 2);
        for record in dataset.records() {
            assert!(matches!(
                record.get(DISPLAY_NAME),
                Some(FieldValue::Text(name)) if !name.is_empty()
            ));
            // Columns after the inserted one keep their canonical meaning.
            assert_eq!(record.get(MUNICIPALITY).unwrap().to_string(), "Belém");
        }
    }

    #[test]
    fn test_schema_mismatch() {
        let mut header = canonical_header();
        header.push("Coluna Extra".to_owned());
        let err = Dataset::from_table(RawTable {
            header,
            rows: vec![],
        })
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::SchemaMismatch {
                expected: 59,
                found: 60
            }
        ));

        // 57 source columns plus a synthesized name are still one short.
        let mut header = canonical_header();
        header.truncate(58);
        header.remove(DISPLAY_NAME);
        let err = Dataset::from_table(RawTable {
            header,
            rows: vec![],
        })
        .unwrap_err();
        assert!(matches!(err, LoadError::SchemaMismatch { found: 58, .. }));
    }

    #[test]
    fn test_positional_rename_and_padding() {
        let header = (0..CANONICAL_COLUMNS.len())
            .map(|i| {
                if i == DISPLAY_NAME {
                    DISPLAY_NAME_HEADER.to_owned()
                } else {
                    format!("col{i}")
                }
            })
            .collect();
        let short_row = vec![
            FieldValue::Float(777.0),
            FieldValue::Text("Ana".to_owned()),
        ];
        let dataset = Dataset::from_table(RawTable {
            header,
            rows: vec![short_row],
        })
        .unwrap();

        let record = dataset.find("777").unwrap();
        assert_eq!(record.display_name(), "Ana");
        assert_eq!(record.get(MODEM_MODEL), Some(&FieldValue::Empty));
        assert_eq!(
            dataset.schema().iter().collect::<Vec<_>>(),
            CANONICAL_COLUMNS
        );
    }

    #[test]
    fn test_key_fields() {
        let dataset = fixtures::dataset(&[("C-100", "São Paulo")]);
        let record = dataset.find("C-100").unwrap();
        let fields: Vec<_> = record
            .key_fields()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        assert_eq!(fields[0], "Contrato/Operadora: C-100");
        assert_eq!(fields[2], "Município: São Paulo");
        assert_eq!(fields.len(), 8);
    }

    #[test]
    fn test_key_fields_show_numeric_identifier_as_typed() {
        let mut row = customer_row("unused", "Recife");
        row[IDENTIFIER] = FieldValue::Float(12345.0);
        let dataset = Dataset::from_table(RawTable {
            header: canonical_header(),
            rows: vec![row],
        })
        .unwrap();

        let record = dataset.find("12345").unwrap();
        let (label, identifier) = record.key_fields().next().unwrap();
        assert_eq!(label, "Contrato/Operadora");
        assert_eq!(identifier, "12345");
        // The full dump keeps the spreadsheet rendering.
        assert_eq!(record.get(IDENTIFIER).unwrap().to_string(), "12345.0");
    }
}
