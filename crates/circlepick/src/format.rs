//! Turning picker values into the text drawn in the middle of the wheel.

use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display, EnumString};

pub trait ValueFormatter {
    fn format(&self, value: f64) -> String;
}

impl<F: Fn(f64) -> String> ValueFormatter for F {
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Fixed number of decimals, no grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleFormatter {
    pub precision: usize,
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        Self { precision: 1 }
    }
}

impl ValueFormatter for SimpleFormatter {
    fn format(&self, value: f64) -> String {
        fixed(value, self.precision)
    }
}

/// Exactly `digits` decimals, thousands grouped with `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormatter {
    pub digits: usize,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self { digits: 1 }
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        let text = fixed(value, self.digits);
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let mut out = String::with_capacity(text.len() + int_part.len() / 3);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part));
        if !frac_part.is_empty() {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PercentFormatter;

impl ValueFormatter for PercentFormatter {
    fn format(&self, value: f64) -> String {
        format!("{} %", DecimalFormatter { digits: 1 }.format(value))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    #[default]
    Simple,
    Decimal,
    Percent,
}

impl FormatterKind {
    pub fn build(self, precision: usize) -> Box<dyn ValueFormatter> {
        match self {
            FormatterKind::Simple => Box::new(SimpleFormatter { precision }),
            FormatterKind::Decimal => Box::new(DecimalFormatter { digits: precision }),
            FormatterKind::Percent => Box::new(PercentFormatter),
        }
    }
}

fn fixed(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    // "-0.0" reads badly under a wheel that sits at zero
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_formatter() {
        let f = SimpleFormatter::default();
        assert_eq!(f.format(25.0), "25.0");
        assert_eq!(f.format(-3.24), "-3.2");
        assert_eq!(f.format(-0.01), "0.0");
        assert_eq!(SimpleFormatter { precision: 0 }.format(12.7), "13");
    }

    #[test]
    fn test_decimal_formatter_groups_thousands() {
        let f = DecimalFormatter { digits: 2 };
        assert_eq!(f.format(1234567.891), "1,234,567.89");
        assert_eq!(f.format(-1000.0), "-1,000.00");
        assert_eq!(f.format(999.0), "999.00");
        assert_eq!(f.format(12.5), "12.50");
        assert_eq!(f.format(-0.001), "0.00");
    }

    #[test]
    fn test_decimal_formatter_keeps_trailing_zeros() {
        assert_eq!(DecimalFormatter::default().format(25.0), "25.0");
        assert_eq!(DecimalFormatter { digits: 3 }.format(0.5), "0.500");
        assert_eq!(DecimalFormatter { digits: 0 }.format(1234.6), "1,235");
    }

    #[test]
    fn test_percent_formatter() {
        assert_eq!(PercentFormatter.format(25.0), "25.0 %");
        assert_eq!(PercentFormatter.format(33.33), "33.3 %");
        assert_eq!(PercentFormatter.format(1500.0), "1,500.0 %");
    }

    #[test]
    fn test_closure_formatter() {
        let f = |v: f64| format!("{v}°");
        assert_eq!(ValueFormatter::format(&f, 90.0), "90°");
    }

    #[test]
    fn test_formatter_kind_deserialization() {
        let cases = vec![
            ("\"simple\"", FormatterKind::Simple),
            ("\"Decimal\"", FormatterKind::Decimal),
            ("\"PERCENT\"", FormatterKind::Percent),
        ];
        for (json, expected) in cases {
            let kind: FormatterKind = serde_json::from_str(json).unwrap();
            assert_eq!(kind, expected);
        }
        assert!(serde_json::from_str::<FormatterKind>("\"currency\"").is_err());
        assert_eq!(FormatterKind::Percent.build(3).format(50.0), "50.0 %");
    }
}
