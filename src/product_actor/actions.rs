/// Stock operations that must be atomic per product.
///
/// The product actor applies one action at a time, so each of these is a
/// single conditional write with no read-then-write window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// `stock -= n` only if `stock >= n`.
    ReserveStock(u32),
    /// `stock += n`, unconditionally (saturating).
    RestoreStock(u32),
}

/// Results from [`ProductAction`]; variants line up with the actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reserved { remaining: u32 },
    /// The reservation was refused and stock left untouched.
    Insufficient { available: u32 },
    Restored { stock: u32 },
}
