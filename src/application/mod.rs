//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod cells;
pub mod error;
pub mod error_ext;
pub mod format;
pub mod leaves;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use leaves::StandardLeaves;
