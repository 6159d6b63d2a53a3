//! Business entities. Plain data with no actor or storage concerns.

pub mod cart;
pub mod ids;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use ids::*;
pub use order::*;
pub use product::*;
pub use user::*;
