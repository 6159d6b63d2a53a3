//! Cart, checkout and order core for the outdoor equipment storefront.
//!
//! Every store is an in-process actor (see [`actor_framework`] and
//! [`actors`]); the ledgers in [`ledger`] implement the business operations
//! on top of the storage traits in [`store`]. [`app_system::StoreSystem`]
//! wires it all together.

pub mod actor_framework;
pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod messages;
pub mod order_actor;
pub mod pricing;
pub mod product_actor;
pub mod store;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
