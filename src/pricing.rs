//! Subtotal, shipping and total computation.
//!
//! Everything here is pure. Amounts are `Decimal` in the store currency's
//! natural unit and no rounding is applied; rendering is left to the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CartItem, OrderLine};

/// An amount that does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("line amount overflows: {quantity} x {unit_price}")]
    LineOverflow { unit_price: Decimal, quantity: u32 },
    #[error("order amount overflows")]
    SumOverflow,
}

/// A line that contributes an amount to a subtotal.
pub trait Priced {
    /// `None` when the price could not be resolved.
    fn unit_price(&self) -> Option<Decimal>;

    fn quantity(&self) -> u32;

    /// `quantity * unit_price`, or `Ok(None)` for an unresolved line.
    fn amount(&self) -> Result<Option<Decimal>, PricingError> {
        let Some(unit_price) = self.unit_price() else {
            return Ok(None);
        };
        let quantity = self.quantity();
        unit_price
            .checked_mul(Decimal::from(quantity))
            .map(Some)
            .ok_or(PricingError::LineOverflow {
                unit_price,
                quantity,
            })
    }
}

impl Priced for CartItem {
    fn unit_price(&self) -> Option<Decimal> {
        CartItem::unit_price(self)
    }

    fn quantity(&self) -> u32 {
        CartItem::quantity(self)
    }
}

impl Priced for OrderLine {
    fn unit_price(&self) -> Option<Decimal> {
        Some(self.unit_price)
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Sum of line amounts. Unresolved lines contribute zero.
pub fn subtotal<'a, L, I>(lines: I) -> Result<Decimal, PricingError>
where
    L: Priced + 'a,
    I: IntoIterator<Item = &'a L>,
{
    lines.into_iter().try_fold(Decimal::ZERO, |acc, line| {
        match line.amount()? {
            Some(amount) => acc.checked_add(amount).ok_or(PricingError::SumOverflow),
            None => Ok(acc),
        }
    })
}

pub fn total(subtotal: Decimal, shipping: Decimal) -> Result<Decimal, PricingError> {
    subtotal
        .checked_add(shipping)
        .ok_or(PricingError::SumOverflow)
}

/// Flat-fee shipping with a single free-shipping breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub free_shipping_threshold: Decimal,
    pub flat_fee: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(500, 0),
            flat_fee: Decimal::new(2990, 2),
        }
    }
}

impl ShippingPolicy {
    /// Zero at or above the threshold, the flat fee below it. An empty cart
    /// still pays the fee.
    pub fn shipping(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_fee
        }
    }

    pub fn quote<'a, L, I>(&self, lines: I) -> Result<Quote, PricingError>
    where
        L: Priced + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        let subtotal = subtotal(lines)?;
        let shipping = self.shipping(subtotal);
        Ok(Quote {
            subtotal,
            shipping,
            total: total(subtotal, shipping)?,
        })
    }
}

/// The three numbers shown at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}
