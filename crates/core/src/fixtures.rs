//! Table builders shared by unit tests.

use std::sync::Arc;

use crate::dataset::{Dataset, FieldValue, RawTable};
use crate::schema::{
    BROADBAND_TECHNOLOGY, CANONICAL_COLUMNS, DISPLAY_NAME, IDENTIFIER,
    MUNICIPALITY,
};

pub fn canonical_header() -> Vec<String> {
    CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// A full-width row: mostly zeros and blanks, like the real sheet.
pub fn customer_row(identifier: &str, municipality: &str) -> Vec<FieldValue> {
    (0..CANONICAL_COLUMNS.len())
        .map(|idx| match idx {
            IDENTIFIER => FieldValue::Text(identifier.to_owned()),
            DISPLAY_NAME => FieldValue::Text(format!("Cliente {identifier}")),
            MUNICIPALITY => FieldValue::Text(municipality.to_owned()),
            BROADBAND_TECHNOLOGY => FieldValue::Text("HFC".to_owned()),
            idx if idx % 3 == 0 => FieldValue::Int(0),
            idx if idx % 3 == 1 => FieldValue::Empty,
            idx => FieldValue::Float(idx as f64 * 1.5),
        })
        .collect()
}

pub fn dataset(customers: &[(&str, &str)]) -> Arc<Dataset> {
    let table = RawTable {
        header: canonical_header(),
        rows: customers
            .iter()
            .map(|(id, municipality)| customer_row(id, municipality))
            .collect(),
    };
    Arc::new(Dataset::from_table(table).expect("fixture table is canonical"))
}
