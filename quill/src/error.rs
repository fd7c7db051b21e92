//! Error module
use std::{borrow::Cow, fmt, io};
use thiserror::Error as ThisError;

#[derive(Debug, PartialEq, Eq)]
pub enum DatabaseConstraint {
    Fields(Vec<String>),
    Index(String),
    ForeignKey,
}

impl fmt::Display for DatabaseConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => write!(f, "({})", fields.join(",")),
            Self::Index(index) => index.fmt(f),
            Self::ForeignKey => "FOREIGN KEY".fmt(f),
        }
    }
}

/// The error type for connection handling, statement execution and value
/// conversion.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    original_code: Option<String>,
    original_message: Option<String>,
}

pub struct ErrorBuilder {
    kind: ErrorKind,
    original_code: Option<String>,
    original_message: Option<String>,
}

impl ErrorBuilder {
    pub fn set_original_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.original_code = Some(code.into());
        self
    }

    pub fn set_original_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.original_message = Some(message.into());
        self
    }

    pub fn build(self) -> Error {
        Error {
            kind: self.kind,
            original_code: self.original_code,
            original_message: self.original_message,
        }
    }
}

impl Error {
    pub fn builder(kind: ErrorKind) -> ErrorBuilder {
        ErrorBuilder {
            kind,
            original_code: None,
            original_message: None,
        }
    }

    /// The error code sent by the database, if available.
    pub fn original_code(&self) -> Option<&str> {
        self.original_code.as_deref()
    }

    /// The original error message sent by the database, if available.
    pub fn original_message(&self) -> Option<&str> {
        self.original_message.as_deref()
    }

    /// A more specific error type for matching.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// `true` when the database rejected the statement over a constraint.
    /// These failures are attributable to individual rows of a batched
    /// write and recoverable at that granularity.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UniqueConstraintViolation { .. }
                | ErrorKind::NullConstraintViolation { .. }
                | ErrorKind::ForeignKeyConstraintViolation { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error("Error querying the database: {0}")]
    QueryError(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Error creating a database connection.")]
    ConnectionError(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Unique constraint failed: {constraint}")]
    UniqueConstraintViolation { constraint: DatabaseConstraint },

    #[error("Null constraint failed: {constraint}")]
    NullConstraintViolation { constraint: DatabaseConstraint },

    #[error("Foreign key constraint failed: {constraint}")]
    ForeignKeyConstraintViolation { constraint: DatabaseConstraint },

    #[error("Error reading column {column}: {message}")]
    ColumnReadFailure { column: String, message: String },

    #[error("Conversion failed: {0}")]
    ConversionError(Cow<'static, str>),

    #[error("Error parsing connection string: {0}")]
    DatabaseUrlIsInvalid(String),

    #[error("Error in an I/O operation: {0}")]
    IoError(io::Error),

    #[error("Operation timed out ({0})")]
    Timeout(String),
}

impl ErrorKind {
    pub(crate) fn conversion(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConversionError(msg.into())
    }

    pub(crate) fn column_read(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ColumnReadFailure {
            column: column.into(),
            message: message.into(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::builder(ErrorKind::IoError(e)).build()
    }
}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Error {
        Error::builder(ErrorKind::conversion("Problems writing AST into a query string.")).build()
    }
}
