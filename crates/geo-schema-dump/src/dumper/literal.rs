//! Literal rendering for dumped definitions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{ColumnType, DefaultValue, LiteralQuoter};

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("number pattern is valid"));

/// Render a string as a double-quoted literal, escaping quotes, backslashes,
/// control characters and interpolation markers.
pub fn quote_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a list of names as `["a", "b"]`.
pub fn quote_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| quote_str(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Render a float bare; NaN and the infinities have no bare literal and are
/// quoted.
fn float_literal(value: f64) -> String {
    if value.is_finite() {
        format!("{:?}", value)
    } else if value.is_nan() {
        quote_str("NaN")
    } else if value > 0.0 {
        quote_str("Infinity")
    } else {
        quote_str("-Infinity")
    }
}

/// Render decimal text bare only when it is a plain number.
fn decimal_literal(text: &str) -> String {
    if PLAIN_NUMBER.is_match(text) {
        text.to_string()
    } else {
        quote_str(text)
    }
}

/// Default quoter: strings double-quoted, numbers and booleans bare,
/// temporal values single-quoted in database format.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaLiteralQuoter;

impl LiteralQuoter for SchemaLiteralQuoter {
    fn quote(&self, value: &DefaultValue, _column_type: ColumnType) -> String {
        match value {
            DefaultValue::Boolean(b) => b.to_string(),
            DefaultValue::Integer(i) => i.to_string(),
            DefaultValue::Float(f) => float_literal(*f),
            DefaultValue::Decimal { decimal } => decimal_literal(decimal),
            DefaultValue::Date { date } => format!("'{}'", date.format("%Y-%m-%d")),
            DefaultValue::DateTime { datetime } => {
                format!("'{}'", datetime.format("%Y-%m-%d %H:%M:%S"))
            }
            DefaultValue::Time { time } => format!("'{}'", time.format("%H:%M:%S")),
            DefaultValue::String(s) => quote_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_quote_str_escapes() {
        assert_eq!(quote_str("name"), "\"name\"");
        assert_eq!(quote_str("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_str("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote_str("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote_str("#{x}"), "\"\\#{x}\"");
        assert_eq!(quote_str("#1"), "\"#1\"");
    }

    #[test]
    fn test_quote_list() {
        assert_eq!(quote_list(&["geom"]), "[\"geom\"]");
        assert_eq!(quote_list(&["a", "b"]), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_default_quoting() {
        let q = SchemaLiteralQuoter;
        assert_eq!(q.quote(&DefaultValue::Boolean(false), ColumnType::Boolean), "false");
        assert_eq!(q.quote(&DefaultValue::Integer(-3), ColumnType::Integer), "-3");
        assert_eq!(q.quote(&DefaultValue::Float(1.0), ColumnType::Float), "1.0");
        assert_eq!(
            q.quote(
                &DefaultValue::Decimal {
                    decimal: "9.99".into()
                },
                ColumnType::Decimal
            ),
            "9.99"
        );
        assert_eq!(
            q.quote(&DefaultValue::String("open".into()), ColumnType::String),
            "\"open\""
        );
        let date = NaiveDate::from_ymd_opt(2008, 3, 1).unwrap();
        assert_eq!(
            q.quote(&DefaultValue::Date { date }, ColumnType::Date),
            "'2008-03-01'"
        );
        let datetime = date.and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(
            q.quote(&DefaultValue::DateTime { datetime }, ColumnType::Datetime),
            "'2008-03-01 12:30:00'"
        );
        let time = NaiveTime::from_hms_opt(8, 0, 5).unwrap();
        assert_eq!(
            q.quote(&DefaultValue::Time { time }, ColumnType::Time),
            "'08:00:05'"
        );
    }

    #[test]
    fn test_non_numeric_decimal_is_quoted() {
        let q = SchemaLiteralQuoter;
        let decimal = |text: &str| DefaultValue::Decimal {
            decimal: text.to_string(),
        };
        assert_eq!(q.quote(&decimal("-12.50"), ColumnType::Decimal), "-12.50");
        assert_eq!(
            q.quote(&decimal("1\n  drop_table \"t\""), ColumnType::Decimal),
            "\"1\\n  drop_table \\\"t\\\"\""
        );
        assert_eq!(q.quote(&decimal("1e5"), ColumnType::Decimal), "\"1e5\"");
    }

    #[test]
    fn test_non_finite_float_is_quoted() {
        let q = SchemaLiteralQuoter;
        assert_eq!(q.quote(&DefaultValue::Float(2.5), ColumnType::Float), "2.5");
        assert_eq!(q.quote(&DefaultValue::Float(f64::NAN), ColumnType::Float), "\"NaN\"");
        assert_eq!(
            q.quote(&DefaultValue::Float(f64::INFINITY), ColumnType::Float),
            "\"Infinity\""
        );
        assert_eq!(
            q.quote(&DefaultValue::Float(f64::NEG_INFINITY), ColumnType::Float),
            "\"-Infinity\""
        );
    }
}
