//! String⇄value conversion per value kind
//!
//! Mirrors the converter table a binding framework would register per
//! widget: one fixed parse per [`ValueKind`], with a fixed user-facing
//! message on failure.

use chrono::NaiveDate;

use crate::schema::{FieldValue, ValueKind};

/// Message shown when a numeric field cannot be parsed
pub const MUST_BE_A_NUMBER: &str = "Must be a number";

/// Message shown when a char field holds more than one character
pub const MUST_BE_A_CHARACTER: &str = "Must be a single character";

/// Message shown when a date field cannot be parsed
pub const MUST_BE_A_DATE: &str = "Must be a date (YYYY-MM-DD)";

/// Message shown when a select field holds an unknown variant
pub const MUST_BE_AN_OPTION: &str = "Must be one of the listed options";

/// Message shown when a boolean field holds non-boolean text
pub const MUST_BE_A_BOOLEAN: &str = "Must be true or false";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a value as the raw widget text it loads into.
#[must_use]
pub fn value_to_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Bool(v) => v.to_string(),
        FieldValue::Text(v) | FieldValue::Choice(v) => v.clone(),
        FieldValue::Char(v) => v.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::BigInt(v) => v.to_string(),
        FieldValue::Float(v) => v.to_string(),
        FieldValue::Date(v) => v.format(DATE_FORMAT).to_string(),
    }
}

/// Parse raw widget text into a value of the given kind.
///
/// The error is the exact message to surface next to the widget.
pub fn text_to_value(kind: ValueKind, raw: &str) -> Result<FieldValue, &'static str> {
    let raw = raw.trim();
    match kind {
        ValueKind::Bool => raw
            .parse::<bool>()
            .map(FieldValue::Bool)
            .map_err(|_| MUST_BE_A_BOOLEAN),
        ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueKind::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(FieldValue::Char(c)),
                _ => Err(MUST_BE_A_CHARACTER),
            }
        }
        ValueKind::Int => raw
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| MUST_BE_A_NUMBER),
        ValueKind::BigInt => raw
            .parse::<i128>()
            .map(FieldValue::BigInt)
            .map_err(|_| MUST_BE_A_NUMBER),
        ValueKind::Float => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| MUST_BE_A_NUMBER),
        ValueKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(FieldValue::Date)
            .map_err(|_| MUST_BE_A_DATE),
        ValueKind::Select { variants } => {
            if variants.contains(&raw) {
                Ok(FieldValue::Choice(raw.to_string()))
            } else {
                Err(MUST_BE_AN_OPTION)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_rejects_text() {
        assert_eq!(text_to_value(ValueKind::Int, "abc"), Err(MUST_BE_A_NUMBER));
        assert_eq!(text_to_value(ValueKind::Float, "1,5"), Err(MUST_BE_A_NUMBER));
        assert_eq!(text_to_value(ValueKind::BigInt, ""), Err(MUST_BE_A_NUMBER));
    }

    #[test]
    fn test_numeric_parses() {
        assert_eq!(text_to_value(ValueKind::Int, " 30 "), Ok(FieldValue::Int(30)));
        assert_eq!(
            text_to_value(ValueKind::Float, "1.5"),
            Ok(FieldValue::Float(1.5))
        );
    }

    #[test]
    fn test_char_single_unit() {
        assert_eq!(text_to_value(ValueKind::Char, "x"), Ok(FieldValue::Char('x')));
        assert_eq!(text_to_value(ValueKind::Char, "xy"), Err(MUST_BE_A_CHARACTER));
        assert_eq!(text_to_value(ValueKind::Char, ""), Err(MUST_BE_A_CHARACTER));
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let text = value_to_text(&FieldValue::Date(date));
        assert_eq!(text, "2024-03-09");
        assert_eq!(
            text_to_value(ValueKind::Date, &text),
            Ok(FieldValue::Date(date))
        );
        assert_eq!(
            text_to_value(ValueKind::Date, "03/09/2024"),
            Err(MUST_BE_A_DATE)
        );
    }

    #[test]
    fn test_select_checks_variants() {
        let kind = ValueKind::Select {
            variants: &["Red", "Green"],
        };
        assert_eq!(
            text_to_value(kind, "Red"),
            Ok(FieldValue::Choice("Red".into()))
        );
        assert_eq!(text_to_value(kind, "Blue"), Err(MUST_BE_AN_OPTION));
    }
}
