use crate::document::Document;

/// What the router hands back for a successfully executed intent.
#[derive(Debug, PartialEq)]
pub enum QueryResponse {
    /// The decoded documents of a find, plus how many rows were dropped
    /// because they could not be decoded.
    Documents { documents: Vec<Document>, omitted: usize },

    /// Insert acknowledgment with per-row visibility: how many rows the
    /// engine took, how many it rejected, and why.
    Inserted {
        inserted: usize,
        failed: usize,
        errors: Vec<String>,
    },

    /// The number of rows a delete removed.
    Deleted { deleted: u64 },
}
