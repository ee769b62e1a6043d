//! Price normalization into the base currency (BGN).

use crate::error::PriceError;
use crate::shops::models::RawPriceToken;
use tracing::trace;

/// Base currency every price is reported in.
pub const BASE_CURRENCY: &str = "BGN";

/// Fixed conversion rates into the base currency, keyed by currency symbol.
///
/// The EUR rate is the BGN currency board peg.
pub const CURRENCY_RATES: &[(&str, f64)] = &[("€", 1.95583)];

/// Returns the conversion rate for the first known currency symbol in `text`.
pub fn conversion_rate(text: &str) -> f64 {
    CURRENCY_RATES
        .iter()
        .find(|(symbol, _)| text.contains(symbol))
        .map(|(_, rate)| *rate)
        .unwrap_or(1.0)
}

/// Keeps digits and decimal separators, rewriting commas to periods.
///
/// Grouping separators are never interpreted: "1.234,56" becomes "1.234.56"
/// and fails to parse.
fn strip_price(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter_map(|c| match c {
            '0'..='9' | '.' => Some(c),
            ',' => Some('.'),
            _ => None,
        })
        .collect();

    cleaned.trim_end_matches('.').to_string()
}

/// Rounds to two decimal places from the exact binary value.
///
/// Goes through the formatter so near-ties such as `977.915` are not
/// pushed across by the scaling multiply.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Converts a raw token into a two-decimal price in the base currency.
pub fn normalize(token: &RawPriceToken) -> Result<f64, PriceError> {
    let raw = token.first().ok_or(PriceError::EmptyPrice)?;

    let cleaned = strip_price(raw);
    let value: f64 = cleaned.parse().map_err(|_| PriceError::MalformedPrice(raw.to_string()))?;

    let converted = value * conversion_rate(raw);
    trace!("normalized {:?} -> {} ({})", raw, converted, BASE_CURRENCY);

    Ok(round2(converted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_text(text: &str) -> Result<f64, PriceError> {
        normalize(&RawPriceToken::text(text))
    }

    #[test]
    fn test_strip_price() {
        assert_eq!(strip_price("49.99 лв."), "49.99");
        assert_eq!(strip_price("€10,00"), "10.00");
        assert_eq!(strip_price(" 1 299,00 лв "), "1299.00");
        assert_eq!(strip_price("N/A"), "");
        assert_eq!(strip_price("12.."), "12");
    }

    #[test]
    fn test_normalize_local_currency() {
        assert_eq!(normalize_text("49.99 лв.").unwrap(), 49.99);
        assert_eq!(normalize_text("59,90 лв.").unwrap(), 59.9);
        assert_eq!(normalize_text("100").unwrap(), 100.0);
        assert_eq!(normalize_text("0").unwrap(), 0.0);
    }

    #[test]
    fn test_normalize_comma_and_period_agree() {
        assert_eq!(normalize_text("12,50").unwrap(), 12.50);
        assert_eq!(normalize_text("12.50").unwrap(), 12.50);
    }

    #[test]
    fn test_normalize_euro_conversion() {
        assert_eq!(normalize_text("€10,00").unwrap(), 19.56);
        assert_eq!(normalize_text("€20,00").unwrap(), 39.12);
        assert_eq!(normalize_text("45,00 €").unwrap(), round2(45.0 * 1.95583));
        assert_eq!(normalize_text("€1").unwrap(), 1.96);
    }

    #[test]
    fn test_normalize_euro_near_ties() {
        // 500 * 1.95583 is stored just below 977.915
        assert_eq!(normalize_text("€500,00").unwrap(), 977.91);
        assert_eq!(normalize_text("€1500,00").unwrap(), 2933.74);
        assert_eq!(normalize_text("€2500,00").unwrap(), 4889.57);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["49.99 лв.", "€10,00", "12,5", "€ 99.95", "7"] {
            let once = normalize_text(raw).unwrap();
            let twice = normalize_text(&once.to_string()).unwrap();
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_first_node_only() {
        let token = RawPriceToken::Nodes(vec!["30,00".to_string(), "€99".to_string()]);
        assert_eq!(normalize(&token).unwrap(), 30.0);
    }

    #[test]
    fn test_normalize_empty_sequence() {
        let token = RawPriceToken::Nodes(Vec::new());
        assert_eq!(normalize(&token).unwrap_err(), PriceError::EmptyPrice);
    }

    #[test]
    fn test_normalize_malformed() {
        assert_eq!(normalize_text("N/A").unwrap_err(), PriceError::MalformedPrice("N/A".into()));
        assert!(matches!(normalize_text(""), Err(PriceError::MalformedPrice(_))));
        assert!(matches!(normalize_text("€"), Err(PriceError::MalformedPrice(_))));
        // Grouping separators are not interpreted
        assert!(matches!(normalize_text("1.234,56"), Err(PriceError::MalformedPrice(_))));
    }

    #[test]
    fn test_conversion_rate() {
        assert_eq!(conversion_rate("€10"), 1.95583);
        assert_eq!(conversion_rate("10 лв."), 1.0);
        assert_eq!(conversion_rate(""), 1.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(19.5583), 19.56);
        assert_eq!(round2(39.1166), 39.12);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(500.0 * 1.95583), 977.91);
    }
}
