//! Lenient currency coercion for dashboard inputs.
//!
//! Amounts arrive as `NUMERIC` from PostgreSQL, but records handed to the
//! aggregator can also come from exported JSON where an amount may be a
//! string, a number, `null`, or missing altogether. [`to_amount`] is the one
//! named place where anything that is not a readable number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Converts a loosely typed JSON value into a currency amount.
///
/// Numbers and numeric strings (surrounding whitespace allowed, scientific
/// notation accepted) convert exactly. Everything else, including `null`,
/// booleans, and strings with trailing garbage, yields `0`. A numeric
/// prefix is never salvaged: `"12abc"` is `0`, not `12`.
#[must_use]
pub fn to_amount(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => parse_amount(&n.to_string())
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
            .unwrap_or(Decimal::ZERO),
        serde_json::Value::String(s) => parse_amount(s).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Serde adapter applying [`to_amount`] to a field.
///
/// Pair with `#[serde(default)]` so a missing field also reads as zero.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, to_amount))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_strings_convert_exactly() {
        assert_eq!(to_amount(&json!("1500.50")), dec!(1500.50));
        assert_eq!(to_amount(&json!("  75 ")), dec!(75));
        assert_eq!(to_amount(&json!("1.2e3")), dec!(1200));
    }

    #[test]
    fn numbers_convert() {
        assert_eq!(to_amount(&json!(500)), dec!(500));
        assert_eq!(to_amount(&json!(99.5)), dec!(99.5));
    }

    #[test]
    fn unreadable_values_are_zero() {
        assert_eq!(to_amount(&json!(null)), Decimal::ZERO);
        assert_eq!(to_amount(&json!("")), Decimal::ZERO);
        assert_eq!(to_amount(&json!("n/a")), Decimal::ZERO);
        assert_eq!(to_amount(&json!("12abc")), Decimal::ZERO);
        assert_eq!(to_amount(&json!(true)), Decimal::ZERO);
        assert_eq!(to_amount(&json!({"value": 3})), Decimal::ZERO);
    }

    #[test]
    fn serde_adapter_reads_missing_as_zero() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_amount")]
            amount: Decimal,
        }

        let rows: Vec<Row> =
            serde_json::from_value(json!([{"amount": "250.00"}, {"amount": null}, {}]))
                .unwrap_or_default();
        let amounts: Vec<Decimal> = rows.into_iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec!(250.00), Decimal::ZERO, Decimal::ZERO]);
    }
}
