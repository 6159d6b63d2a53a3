//! Business operations over the storage capabilities.
//!
//! Each ledger validates input, talks to one or more stores and converts
//! storage failures into its own error type at the boundary.

pub mod cart;
pub mod catalog;
mod checkout;
pub mod orders;
pub mod users;

pub use cart::{CartError, CartLedger};
pub use catalog::Catalog;
pub use orders::{CancelReport, FailedRestore, OrderLedger};
pub use users::{Signup, UserDirectory};
