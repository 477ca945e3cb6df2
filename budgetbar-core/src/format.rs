//! Default currency formatting.

use serde::{Deserialize, Serialize};

use crate::models::AmountKind;
use crate::traits::CurrencyFormatter;

/// Formats cents as a grouped decimal amount, e.g. `-$1,234.56`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialFormatter {
    /// Currency symbol placed before the number.
    pub symbol: String,
    /// Separator between groups of three integer digits.
    pub thousands_separator: Option<char>,
    /// Separator before the two fractional digits.
    pub decimal_separator: char,
}

impl Default for FinancialFormatter {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: Some(','),
            decimal_separator: '.',
        }
    }
}

impl FinancialFormatter {
    /// Creates a formatter with the given symbol and default separators.
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    fn group_digits(&self, units: u64) -> String {
        let digits = units.to_string();
        let Some(sep) = self.thousands_separator else {
            return digits;
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

impl CurrencyFormatter for FinancialFormatter {
    fn format(&self, amount: i64, kind: AmountKind) -> String {
        match kind {
            AmountKind::Financial => {
                let sign = if amount < 0 { "-" } else { "" };
                let magnitude = amount.unsigned_abs();
                format!(
                    "{sign}{}{}{}{:02}",
                    self.symbol,
                    self.group_digits(magnitude / 100),
                    self.decimal_separator,
                    magnitude % 100
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basic_amounts() {
        let fmt = FinancialFormatter::default();
        assert_eq!(fmt.format(0, AmountKind::Financial), "$0.00");
        assert_eq!(fmt.format(5, AmountKind::Financial), "$0.05");
        assert_eq!(fmt.format(10000, AmountKind::Financial), "$100.00");
        assert_eq!(fmt.format(123_456, AmountKind::Financial), "$1,234.56");
    }

    #[test]
    fn test_format_negative() {
        let fmt = FinancialFormatter::default();
        assert_eq!(fmt.format(-2000, AmountKind::Financial), "-$20.00");
        assert_eq!(fmt.format(-100_000_001, AmountKind::Financial), "-$1,000,000.01");
    }

    #[test]
    fn test_format_extreme_does_not_overflow() {
        let fmt = FinancialFormatter::default();
        assert_eq!(
            fmt.format(i64::MIN, AmountKind::Financial),
            "-$92,233,720,368,547,758.08"
        );
    }

    #[test]
    fn test_format_custom_separators() {
        let fmt = FinancialFormatter {
            symbol: "€".to_string(),
            thousands_separator: Some('.'),
            decimal_separator: ',',
        };
        assert_eq!(fmt.format(123_456_789, AmountKind::Financial), "€1.234.567,89");

        let plain = FinancialFormatter {
            thousands_separator: None,
            ..FinancialFormatter::with_symbol("")
        };
        assert_eq!(plain.format(123_456_789, AmountKind::Financial), "1234567.89");
    }
}
