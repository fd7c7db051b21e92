use crate::document::Document;
use quill::connector::ResultSet;
use tracing::warn;

/// The decoded output of a read: one document per row, plus the number of
/// rows dropped because they could not be mapped back to document shape.
#[derive(Debug, Default)]
pub struct DecodedRows {
    pub documents: Vec<Document>,
    pub omitted: usize,
}

/// Zips column names with row values into documents. Every column appears
/// exactly once per document, in result-set order. A row whose arity does
/// not match the column list is dropped and counted, leaving the rest of
/// the result intact; cell-level coercion has already happened in the
/// connector.
pub fn decode(result_set: ResultSet) -> DecodedRows {
    let columns = result_set.columns().to_vec();
    let mut decoded = DecodedRows::default();

    for row in result_set {
        let values = row.into_values();

        if values.len() != columns.len() {
            warn!(
                expected = columns.len(),
                found = values.len(),
                "dropping a row whose arity does not match the column list"
            );
            decoded.omitted += 1;
            continue;
        }

        decoded
            .documents
            .push(columns.iter().cloned().zip(values).collect());
    }

    decoded
}
