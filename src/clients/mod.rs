//! Typed handles over the actor channels.
//!
//! Every client is cheap to clone and implements one of the storage traits in
//! [`crate::store`].

#[macro_use]
mod macros;

mod cart_client;
mod order_client;
mod product_client;
mod user_client;

pub use cart_client::CartClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
