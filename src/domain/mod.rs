//! Domain layer: tree entities, tag set, view model and leaf dispatch
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod data_type;
pub mod entities;
pub mod error;
pub mod renderer;
pub mod view;

pub use data_type::{resolve_tag, DataType, ViewKind};
pub use entities::*;
pub use error::DomainError;
pub use renderer::{render_data, LeafViews};
pub use view::{Align, View};
