//! # Money Module
//!
//! Provides the `Money` type for menu prices and order totals.
//!
//! ## Why Integer Money?
//! The shop prices everything in Vietnamese đồng, which has no minor unit in
//! practice. Amounts are whole `i64` đồng, so totals never pick up floating
//! point noise. Arithmetic saturates at the `i64` bounds, the same way
//! quantities saturate at `u32::MAX`:
//!
//! ```text
//!   Cam ép      20.000 ₫ × 2  =  40.000 ₫
//!   Dưa hấu     25.000 ₫ × 1  =  25.000 ₫
//!   ─────────────────────────────────────
//!   Total                        65.000 ₫
//! ```
//!
//! ## Usage
//! ```rust
//! use juice_core::money::Money;
//!
//! let price = Money::from_dong(20_000);
//! let line = price * 3;
//! assert_eq!(line.dong(), 60_000);
//! assert_eq!(line.to_string(), "60.000 ₫");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// A monetary amount in whole đồng.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole đồng.
    #[inline]
    pub const fn from_dong(dong: i64) -> Self {
        Money(dong)
    }

    /// Returns the amount in đồng.
    #[inline]
    pub const fn dong(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

/// Price × quantity.
impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Formats as `20.000 ₫`: dot-grouped thousands, symbol last.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{} ₫", sign, grouped)
    }
}
