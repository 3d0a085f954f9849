//! Loosely typed import rows and their coercion rules.
//!
//! Rows come from CSV (every value a string) or JSON (values typed by the
//! parser). The accessors coerce either form with the same fallbacks.

use serde_json::{Map, Value};

/// One flat record from an import payload, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRow(Map<String, Value>);

impl ImportRow {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Field as text.
    ///
    /// Missing fields, `null`, `false`, `0` and `""` all read as an empty
    /// string. Other numbers and `true` render in their JSON form.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null | Value::Bool(false)) => String::new(),
            Some(Value::String(value)) => value.clone(),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Field as text, or `None` when it reads as empty.
    pub fn optional_text(&self, field: &str) -> Option<String> {
        Some(self.text(field)).filter(|value| !value.is_empty())
    }

    /// Field as a number, or `default` when it is missing, unparsable or
    /// zero.
    ///
    /// Strings are trimmed before parsing; an empty string reads as zero.
    pub fn number_or(&self, field: &str, default: f64) -> f64 {
        let parsed = match self.0.get(field) {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(value)) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
            Some(Value::Null) => Some(0.0),
            None | Some(Value::Array(_) | Value::Object(_)) => None,
        };
        match parsed {
            Some(value) if value.is_finite() && value != 0.0 => value,
            _ => default,
        }
    }

    /// Field as a whole non-negative count, truncating fractions.
    ///
    /// Values that coerce to zero, a negative number or nothing fall back to
    /// `default`.
    pub fn count_or(&self, field: &str, default: u32) -> u32 {
        let value = self.number_or(field, f64::from(default)).trunc();
        if value >= 1.0 && value <= f64::from(u32::MAX) {
            // Whole and in range, so the cast is exact.
            value as u32
        } else {
            default
        }
    }

    /// Whether the field is the string `"true"` or boolean `true`.
    pub fn is_true(&self, field: &str) -> bool {
        matches!(self.0.get(field), Some(Value::Bool(true)))
            || matches!(self.0.get(field), Some(Value::String(value)) if value == "true")
    }

    /// Whether the field is anything other than the string `"false"` or
    /// boolean `false`. A missing field counts as set.
    pub fn is_not_false(&self, field: &str) -> bool {
        !matches!(self.0.get(field), Some(Value::Bool(false)))
            && !matches!(self.0.get(field), Some(Value::String(value)) if value == "false")
    }
}

impl From<Map<String, Value>> for ImportRow {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
