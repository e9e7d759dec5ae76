// storefront/src/models/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// IVA applied at checkout (16%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// Rounds to currency precision (two decimals, half away from zero).
pub fn round_currency(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Checkout totals derived from a cart total. Recomputed on demand, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
  pub subtotal: Decimal,
  pub tax: Decimal,
  pub total: Decimal,
}

impl TaxBreakdown {
  pub fn for_subtotal(subtotal: Decimal, rate: Decimal) -> Self {
    let tax = round_currency(subtotal * rate);
    Self {
      subtotal,
      tax,
      total: round_currency(subtotal + tax),
    }
  }

  pub fn zero() -> Self {
    Self {
      subtotal: Decimal::ZERO,
      tax: Decimal::ZERO,
      total: Decimal::ZERO,
    }
  }
}
