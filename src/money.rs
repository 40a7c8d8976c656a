//! Cent rounding and the textual money formats printed on the documents.

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums the values and rounds the result to cents.
pub fn sum_cents<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    round2(values.into_iter().sum())
}

/// `1234.5` becomes `"1234.50"`.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// `1234.5` becomes `"1,234.50"`.
pub fn format_grouped(value: f64) -> String {
    let formatted = format_amount(value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if round2(value) < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// A rate of `0.13` becomes `"13.0%"`.
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// How an amount is labelled with its currency on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    /// Symbol printed before the amount, such as `$` or `¥`.
    Prefix(&'static str),
    /// Code printed directly after the amount, such as `USD`.
    Suffix(&'static str),
}

impl Currency {
    pub const DOLLAR: Self = Self::Prefix("$");
    pub const YUAN: Self = Self::Prefix("¥");

    /// Formats with two decimals.
    pub fn amount(self, value: f64) -> String {
        self.wrap(format_amount(value))
    }

    /// Formats with two decimals and thousands separators.
    pub fn grouped(self, value: f64) -> String {
        self.wrap(format_grouped(value))
    }

    fn wrap(self, digits: String) -> String {
        match self {
            Self::Prefix(symbol) => format!("{symbol}{digits}"),
            Self::Suffix(code) => format!("{digits}{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(-2.345_1), -2.35);
    }

    #[test]
    fn sums_to_cents() {
        assert_eq!(sum_cents([0.1, 0.2, 0.3]), 0.6);
        assert_eq!(sum_cents(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_amount(1234.5), "1234.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_grouped(1234.5), "1,234.50");
        assert_eq!(format_grouped(37844.0), "37,844.00");
        assert_eq!(format_grouped(999.99), "999.99");
        assert_eq!(format_grouped(1_000_000.0), "1,000,000.00");
        assert_eq!(format_grouped(-1234.5), "-1,234.50");
    }

    #[test]
    fn formats_percentages_with_one_decimal() {
        assert_eq!(format_percent(0.13), "13.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(0.085), "8.5%");
    }

    #[test]
    fn currency_placement() {
        assert_eq!(Currency::DOLLAR.amount(5.0), "$5.00");
        assert_eq!(Currency::YUAN.grouped(12345.678), "¥12,345.68");
        assert_eq!(Currency::Suffix("USD").amount(19.9), "19.90USD");
    }
}
