//! Error types and error handling

use thiserror::Error;

/// Library error type
///
/// Configuration-time errors (`Introspection`, `PropertyType`) are fatal and
/// halt setup. Per-operation errors are contained to that operation's flow:
/// `OperationFailed` reconciles the listing and keeps the user's form open,
/// while `Unexpected` is re-raised to the host after the listing has been
/// refreshed.
#[derive(Debug, Error)]
pub enum CrudError {
    /// Domain type exposes no editable properties
    #[error("cannot introspect domain type: {0}")]
    Introspection(String),

    /// A configured visible property does not exist in the schema
    #[error("cannot resolve type for property `{property}`")]
    PropertyType {
        /// Name of the misconfigured property
        property: String,
    },

    /// A fresh domain object could not be constructed for the add flow
    #[error("cannot construct domain object: {0}")]
    Instantiation(String),

    /// Known operation failure signalled by the data layer (e.g. a
    /// uniqueness conflict); recoverable, never propagated past the
    /// controller
    #[error("{0}")]
    OperationFailed(String),

    /// Anything else thrown from a data operation
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl CrudError {
    /// Tag an error as a known, recoverable operation failure.
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed(message.into())
    }

    /// Wrap an arbitrary data-layer error as unexpected.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Whether this is a known operation failure as opposed to an
    /// unexpected error.
    #[must_use]
    pub const fn is_known_failure(&self) -> bool {
        matches!(self, Self::OperationFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_failure_tagging() {
        let err = CrudError::operation_failed("name already taken");
        assert!(err.is_known_failure());
        assert_eq!(err.to_string(), "name already taken");

        let err = CrudError::unexpected("connection lost");
        assert!(!err.is_known_failure());
        assert_eq!(err.to_string(), "unexpected error: connection lost");
    }

    #[test]
    fn test_property_type_message() {
        let err = CrudError::PropertyType {
            property: "age".into(),
        };
        assert_eq!(err.to_string(), "cannot resolve type for property `age`");
    }
}
