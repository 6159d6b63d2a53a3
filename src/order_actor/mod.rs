//! Order entity wiring: status actions and checkout errors.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
