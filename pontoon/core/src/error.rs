use thiserror::Error;

/// Everything that can go wrong between receiving a query intent and
/// handing documents back. Compiler and router failures are recoverable:
/// they are reported to the caller with no state mutated.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("Unknown field `{field}` on collection `{collection}`")]
    UnknownField { collection: String, field: String },

    #[error("Unsupported condition `{operator}` on field `{field}`")]
    UnsupportedCondition { field: String, operator: String },

    #[error("Insert requires at least one document")]
    EmptyInsertSet,

    #[error("Deleting without a filter requires the confirmUnconditional flag")]
    UnconfirmedUnconditionalDelete,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Execution failed: {0}")]
    ExecutionError(quill::Error),

    #[error("Could not decode column `{column}`: {message}")]
    DecodeError { column: String, message: String },
}

impl CoreError {
    /// The stable identifier used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "MalformedRequest",
            Self::UnknownField { .. } => "UnknownField",
            Self::UnsupportedCondition { .. } => "UnsupportedCondition",
            Self::EmptyInsertSet => "EmptyInsertSet",
            Self::UnconfirmedUnconditionalDelete => "UnconfirmedUnconditionalDelete",
            Self::UnsupportedOperation(_) => "UnsupportedOperation",
            Self::ExecutionError(_) => "ExecutionError",
            Self::DecodeError { .. } => "DecodeError",
        }
    }
}

impl From<quill::Error> for CoreError {
    fn from(e: quill::Error) -> Self {
        match e.kind() {
            quill::error::ErrorKind::ColumnReadFailure { column, message } => CoreError::DecodeError {
                column: column.clone(),
                message: message.clone(),
            },
            _ => CoreError::ExecutionError(e),
        }
    }
}
