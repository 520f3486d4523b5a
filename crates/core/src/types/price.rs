//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] amounts in the currency's standard unit
//! (reais, not centavos) and formatted the way the currency's home market
//! writes them:
//!
//! ```
//! use customtee_core::{CurrencyCode, Price};
//!
//! let price = Price::from_cents(8990, CurrencyCode::BRL);
//! assert_eq!(price.display(), "R$ 89,90");
//!
//! let bulk = price.times(12);
//! assert_eq!(bulk.display(), "R$ 1.078,80");
//! ```

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// `percent`% of this price, rounded to cents (midpoint away from zero).
    #[must_use]
    pub fn percentage(&self, percent: u32) -> Self {
        let amount = (self.amount * Decimal::from(percent) / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self::new(amount, self.currency_code)
    }

    /// Subtract another amount in the same currency, never going below zero.
    ///
    /// The other price's currency is ignored; callers only combine prices
    /// taken from the same cart.
    #[must_use]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        let amount = (self.amount - other.amount).max(Decimal::ZERO);
        Self::new(amount, self.currency_code)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., "R$ 89,90" or "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let raw = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

        let grouped = group_thousands(int_part, self.currency_code.thousands_separator());
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{sign}{}{grouped}{}{frac_part}",
            self.currency_code.prefix(),
            self.currency_code.decimal_separator()
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `separator` between every group of three digits, from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
}

impl CurrencyCode {
    /// Symbol and spacing written before the amount.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::BRL => "R$ ",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::BRL => ',',
            Self::USD => '.',
        }
    }

    const fn thousands_separator(self) -> char {
        match self {
            Self::BRL => '.',
            Self::USD => ',',
        }
    }
}
