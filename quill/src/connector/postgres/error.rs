use crate::error::{DatabaseConstraint, Error, ErrorKind};

impl From<tokio_postgres::Error> for Error {
    fn from(e: tokio_postgres::Error) -> Error {
        let (code, message, constraint, column) = match e.as_db_error() {
            Some(db_error) => (
                Some(db_error.code().code().to_string()),
                Some(db_error.message().to_string()),
                db_error.constraint().map(ToString::to_string),
                db_error.column().map(ToString::to_string),
            ),
            None => (None, None, None, None),
        };

        let kind = match code.as_deref() {
            Some("23505") => ErrorKind::UniqueConstraintViolation {
                constraint: constraint
                    .map(DatabaseConstraint::Index)
                    .unwrap_or(DatabaseConstraint::Fields(Vec::new())),
            },
            Some("23502") => ErrorKind::NullConstraintViolation {
                constraint: column
                    .map(|column| DatabaseConstraint::Fields(vec![column]))
                    .unwrap_or(DatabaseConstraint::Fields(Vec::new())),
            },
            Some("23503") => ErrorKind::ForeignKeyConstraintViolation {
                constraint: constraint
                    .map(DatabaseConstraint::Index)
                    .unwrap_or(DatabaseConstraint::ForeignKey),
            },
            _ => ErrorKind::QueryError(e.into()),
        };

        let mut builder = Error::builder(kind);

        if let Some(code) = code {
            builder.set_original_code(code);
        }

        if let Some(message) = message {
            builder.set_original_message(message);
        }

        builder.build()
    }
}
