//! Price estimate and currency formatting

/// A single model estimate with its display string
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEstimate {
    /// Raw model output
    pub price: f64,
    /// Price rendered with the configured currency prefix
    pub formatted: String,
}

impl PriceEstimate {
    /// Create an estimate, formatting the price with `currency_prefix`
    pub fn new(price: f64, currency_prefix: &str) -> Self {
        Self {
            price,
            formatted: format_currency(price, currency_prefix),
        }
    }
}

/// Format a price as `"<prefix> <digits>"` with `,` thousands separators and no decimals.
///
/// Rounding is that of `{:.0}` (ties to even). Negative values keep their sign
/// after the prefix.
pub fn format_currency(value: f64, prefix: &str) -> String {
    let rounded = format!("{:.0}", value);
    let (negative, digits) = match rounded.strip_prefix('-') {
        Some(digits) => (digits != "0", digits),
        None => (false, rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{} {}", prefix, grouped)
}
