//! Conversions between base-unit integers and display amounts.
//!
//! Base units are carried as `u128` end to end. Floating point only appears
//! in [`to_display`], the last step before rendering.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{FlowError, Result};

/// Decimals assumed for a token the directory does not know.
pub const DEFAULT_DECIMALS: u32 = 9;

/// Integer amount in a token's smallest unit.
pub type BaseUnits = u128;

/// Convert a display amount to base units, truncating excess precision.
///
/// # Errors
///
/// Returns `FlowError::Overflow` if the amount is negative or the scaled value
/// does not fit in a `u128`.
pub fn to_base_units(x: Decimal, decimals: u32) -> Result<BaseUnits> {
    let overflow = || FlowError::Overflow(format!("to_base_units: {x} * 10^{decimals}"));

    let mut scaled = x;
    for _ in 0..decimals {
        scaled = scaled.checked_mul(Decimal::TEN).ok_or_else(overflow)?;
    }
    scaled.trunc().to_u128().ok_or_else(overflow)
}

/// Convert base units to a floating-point display amount.
///
/// Whole and fractional parts are split in integer arithmetic so that large
/// deposits keep their integer digits exact up to `f64` precision.
pub fn to_display(amount: BaseUnits, decimals: u32) -> f64 {
    match 10u128.checked_pow(decimals) {
        Some(divisor) => {
            let whole = amount / divisor;
            let frac = amount % divisor;
            whole as f64 + frac as f64 / divisor as f64
        }
        None => amount as f64 / 10f64.powi(decimals as i32),
    }
}

/// Exact decimal rendering of a base-unit amount, if it fits in a `Decimal`.
pub fn to_display_decimal(amount: BaseUnits, decimals: u32) -> Option<Decimal> {
    let mantissa = i128::try_from(amount).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, decimals)
        .ok()
        .map(|d| d.normalize())
}

/// Serde adapter for base-unit amounts.
///
/// Serializes as a decimal string. Deserializes from a decimal string, a
/// `0x`-prefixed hex string, or a non-negative JSON integer up to `u64::MAX`.
/// JSON numbers above that arrive as floats and are rejected; send them as
/// strings.
pub mod serde_base_units {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::BaseUnits;

    pub fn serialize<S: Serializer>(value: &BaseUnits, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BaseUnits, D::Error> {
        deserializer.deserialize_any(BaseUnitsVisitor)
    }

    struct BaseUnitsVisitor;

    impl<'de> Visitor<'de> for BaseUnitsVisitor {
        type Value = BaseUnits;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or integer string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BaseUnits, E> {
            Ok(v as BaseUnits)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<BaseUnits, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BaseUnits, E> {
            BaseUnits::try_from(v).map_err(|_| E::custom(format!("negative amount: {v}")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<BaseUnits, E> {
            Err(E::custom(format!(
                "amount {v} is not an exact integer; encode large amounts as strings"
            )))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BaseUnits, E> {
            let v = v.trim();
            let parsed = match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
                Some(hex) => BaseUnits::from_str_radix(hex, 16),
                None => v.parse::<BaseUnits>(),
            };
            parsed.map_err(|e| E::custom(format!("invalid amount {v:?}: {e}")))
        }
    }
}
