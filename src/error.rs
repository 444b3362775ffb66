use thiserror::Error as ThisError;

/// Convenience result type for the record and query operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The broad category of an [`Error`], for callers that only care about what went wrong and not
/// about the details.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A value that should have been a number or a date did not parse.
    Format,
    /// A field was requested that the record does not have.
    Key,
    /// An argument to an operation was unusable.
    Argument,
}

/// Errors returned by record normalization and the query operations.
///
/// Every operation fails as a whole: when an error is returned, no partial output was produced.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// A numeric or date-shaped field did not parse.
    #[error("unable to parse field '{field}' value '{value}': {reason}")]
    Format {
        field: String,
        value: String,
        reason: String,
    },

    /// A requested field is absent from a record.
    #[error("record has no field named '{field}'")]
    MissingField { field: String },

    /// A bin edge that cannot be ordered was supplied.
    #[error("bin edge {edge} cannot be used, edges must be numbers")]
    InvalidBinEdge { edge: f64 },
}

impl Error {
    pub(crate) fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::Format {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn missing_field(field: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format { .. } => ErrorKind::Format,
            Error::MissingField { .. } => ErrorKind::Key,
            Error::InvalidBinEdge { .. } => ErrorKind::Argument,
        }
    }
}
