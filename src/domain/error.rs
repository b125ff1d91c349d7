//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the data model itself.
/// These are independent of how documents are read or displayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown data type: {0:?}")]
    UnknownDataType(String),
}
