//! Product entity wiring: stock actions and catalog errors.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
