//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STORE_FREE_SHIPPING_THRESHOLD` - Subtotal at which shipping is free (default: 500)
//! - `STORE_FLAT_SHIPPING_FEE` - Shipping below the threshold (default: 29.90)
//! - `STORE_MIN_ADDRESS_LENGTH` - Minimum trimmed shipping address length (default: 10)
//! - `STORE_ACCEPT_BANK_TRANSFER` - Offer `bank_transfer` at checkout (default: false)
//! - `STORE_STRICT_CART_STOCK` - Re-check stock on cart increments and updates (default: false)
//! - `STORE_ACTOR_BUFFER` - Mailbox size of each actor (default: 100)
//! - `STORE_LOG` - Default tracing filter when `RUST_LOG` is unset (default: info)

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::ShippingPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Rules applied when turning a cart into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Minimum length of the trimmed shipping address, in characters.
    pub min_address_length: usize,
    pub accept_bank_transfer: bool,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            min_address_length: 10,
            accept_bank_transfer: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartPolicy {
    /// When set, increments and quantity updates are checked against live
    /// stock, not just the first add.
    pub strict_stock: bool,
}

/// Store application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub shipping: ShippingPolicy,
    pub checkout: CheckoutPolicy,
    pub cart: CartPolicy,
    /// Bounded channel size for every actor.
    pub actor_buffer: usize,
    /// Fallback `EnvFilter` directive.
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shipping: ShippingPolicy::default(),
            checkout: CheckoutPolicy::default(),
            cart: CartPolicy::default(),
            actor_buffer: 100,
            log_filter: "info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable does not parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let free_shipping_threshold: Decimal =
            parse_or_default(&lookup, "STORE_FREE_SHIPPING_THRESHOLD", "500")?;
        let flat_fee: Decimal = parse_or_default(&lookup, "STORE_FLAT_SHIPPING_FEE", "29.90")?;
        let min_address_length = parse_or_default(&lookup, "STORE_MIN_ADDRESS_LENGTH", "10")?;
        let accept_bank_transfer =
            parse_or_default(&lookup, "STORE_ACCEPT_BANK_TRANSFER", "false")?;
        let strict_stock = parse_or_default(&lookup, "STORE_STRICT_CART_STOCK", "false")?;
        let actor_buffer: usize = parse_or_default(&lookup, "STORE_ACTOR_BUFFER", "100")?;
        let log_filter = get_or_default(&lookup, "STORE_LOG", "info");

        ensure_non_negative("STORE_FREE_SHIPPING_THRESHOLD", free_shipping_threshold)?;
        ensure_non_negative("STORE_FLAT_SHIPPING_FEE", flat_fee)?;
        if actor_buffer == 0 {
            return Err(ConfigError::InvalidValue(
                "STORE_ACTOR_BUFFER".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            shipping: ShippingPolicy {
                free_shipping_threshold,
                flat_fee,
            },
            checkout: CheckoutPolicy {
                min_address_length,
                accept_bank_transfer,
            },
            cart: CartPolicy { strict_stock },
            actor_buffer,
            log_filter,
        })
    }
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    get_or_default(lookup, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn ensure_non_negative(key: &str, value: Decimal) -> Result<(), ConfigError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("{value} is negative"),
        ));
    }
    Ok(())
}
