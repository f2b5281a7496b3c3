use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::{Cents, cents_to_decimal, decimal_to_cents};

/// Discount a nominal value into constant purchasing power:
/// `real = nominal / (1 + annual_rate)^(month_index / 12)`.
///
/// Month 0 is today and gets no discount. A zero rate is the identity. The
/// deflator exponent uses the month the value was recorded at, so a yearly
/// series discounts by whole years.
pub fn real_value(nominal: Decimal, annual_rate: f64, month_index: u32) -> Decimal {
    if month_index == 0 || annual_rate == 0.0 {
        return nominal;
    }

    let deflator = (1.0 + annual_rate).powf(f64::from(month_index) / 12.0);
    match Decimal::from_f64(deflator) {
        Some(d) if d > Decimal::ZERO => nominal / d,
        // Degenerate rates are rejected upstream; identity keeps this total
        _ => nominal,
    }
}

/// Cents convenience wrapper; rounds at this presentation boundary.
pub fn real_cents(nominal_cents: Cents, annual_rate: f64, month_index: u32) -> Cents {
    decimal_to_cents(real_value(
        cents_to_decimal(nominal_cents),
        annual_rate,
        month_index,
    ))
}
