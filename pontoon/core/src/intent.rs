use crate::document::Document;
use crate::filter::Filter;

/// The decoded, typed representation of one incoming request. Anything
/// that does not fit one of these shapes is rejected at the protocol
/// boundary before a `QueryIntent` exists.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryIntent {
    Find {
        collection: String,
        filter: Filter,
    },
    Insert {
        collection: String,
        documents: Vec<Document>,
    },
    Delete {
        collection: String,
        filter: Filter,
        confirm_unconditional: bool,
    },
}

impl QueryIntent {
    pub fn collection(&self) -> &str {
        match self {
            Self::Find { collection, .. }
            | Self::Insert { collection, .. }
            | Self::Delete { collection, .. } => collection,
        }
    }
}
