//! # Price Model
//!
//! Pure functions over products, variants and quantities. Nothing in here performs I/O
//! or mutates shared state; the checkout actor calls these on every render so totals are
//! always derived from their inputs and never cached across quantity edits.
//!
//! ## Rules
//!
//! - The unit price of a line is the variant price when a variant is selected, otherwise
//!   the product price.
//! - A line total is `unit price × quantity`.
//! - A [`Quantity`] never drops below 1. Increments are unbounded apart from the numeric
//!   ceiling; stock limits are the order API's concern.

use crate::model::{Product, Variant};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use std::num::NonZeroU32;

/// A purchasable quantity, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Floor-clamped at 1.
    pub fn decrement(self) -> Self {
        NonZeroU32::new(self.0.get() - 1).map_or(self, Self)
    }

    /// Parses a `quantity` navigation hint.
    ///
    /// The storefront has always read this parameter leniently: surrounding whitespace
    /// and a leading `+` are accepted, and only the leading run of digits counts, so
    /// `"3abc"` is 3 and `"2.5"` is 2. Zero, negatives, empty digit runs and values that
    /// overflow `u32` are rejected.
    pub fn parse_hint(hint: &str) -> Option<Self> {
        let trimmed = hint.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits_len = unsigned
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let digits = unsigned.get(..digits_len)?;
        digits.parse::<u32>().ok().and_then(Self::new)
    }

    /// Starting quantity for a single-product checkout: the hint when valid, else 1.
    pub fn from_hint(hint: Option<&str>) -> Self {
        hint.and_then(Self::parse_hint).unwrap_or_default()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant price if a variant is selected, else product price.
pub fn unit_price(product: &Product, variant: Option<&Variant>) -> Decimal {
    variant.map_or(product.price, |v| v.price)
}

pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Formats an amount the way the storefront displays prices: currency code, a space,
/// comma thousands separators and exactly two decimals (`ETB 1,234.50`).
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{currency} {grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decrement_floors_at_one() {
        let mut quantity = Quantity::new(3).unwrap();
        for _ in 0..5 {
            quantity = quantity.decrement();
        }
        assert_eq!(quantity, Quantity::ONE);
    }

    #[test]
    fn test_increment_saturates() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment().get(), u32::MAX);
    }

    #[test]
    fn test_parse_hint_follows_lenient_integer_rules() {
        assert_eq!(Quantity::parse_hint("3").map(Quantity::get), Some(3));
        assert_eq!(Quantity::parse_hint(" 4 ").map(Quantity::get), Some(4));
        assert_eq!(Quantity::parse_hint("+5").map(Quantity::get), Some(5));
        assert_eq!(Quantity::parse_hint("3abc").map(Quantity::get), Some(3));
        assert_eq!(Quantity::parse_hint("2.5").map(Quantity::get), Some(2));
        assert_eq!(Quantity::parse_hint("0"), None);
        assert_eq!(Quantity::parse_hint("-2"), None);
        assert_eq!(Quantity::parse_hint("abc"), None);
        assert_eq!(Quantity::parse_hint(""), None);
        assert_eq!(Quantity::parse_hint("99999999999"), None);
    }

    #[test]
    fn test_from_hint_defaults_to_one() {
        assert_eq!(Quantity::from_hint(None), Quantity::ONE);
        assert_eq!(Quantity::from_hint(Some("zero")), Quantity::ONE);
        assert_eq!(Quantity::from_hint(Some("7")).get(), 7);
    }

    #[test]
    fn test_unit_price_prefers_variant() {
        let product = Product::new("p-1", "Tea", Decimal::from(100));
        let variant = Variant::new("v-1", "Large", Decimal::from(140));

        assert_eq!(unit_price(&product, None), Decimal::from(100));
        assert_eq!(unit_price(&product, Some(&variant)), Decimal::from(140));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::from(300), "ETB"), "ETB 300.00");
        assert_eq!(format_price(Decimal::new(123_450, 2), "ETB"), "ETB 1,234.50");
        assert_eq!(format_price(Decimal::new(1_000_000_005, 3), "ETB"), "ETB 1,000,000.01");
        assert_eq!(format_price(Decimal::ZERO, "ETB"), "ETB 0.00");
        assert_eq!(format_price(Decimal::from(-42), "USD"), "-USD 42.00");
    }

    proptest! {
        #[test]
        fn prop_quantity_never_below_one(start in 1u32..1_000, steps in 0usize..2_000) {
            let mut quantity = Quantity::new(start).unwrap();
            for _ in 0..steps {
                quantity = quantity.decrement();
            }
            prop_assert!(quantity.get() >= 1);
            prop_assert_eq!(quantity.get(), start.saturating_sub(steps as u32).max(1));
        }

        #[test]
        fn prop_line_total_is_price_times_quantity(cents in 0i64..10_000_000, quantity in 1u32..10_000) {
            let price = Decimal::new(cents, 2);
            let total = line_total(price, quantity);
            prop_assert_eq!(total, price * Decimal::from(quantity));
            prop_assert_eq!(total / Decimal::from(quantity), price);
        }
    }
}
