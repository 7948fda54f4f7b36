//! Typed node attributes.
//!
//! Raw cfg values are strings. They are coerced to the narrowest type that
//! round-trips (integer, then float, else string), then annotated from the
//! operator's schema: boolean-typed attributes turn `0`/`1` into `false`/`true`,
//! and attributes that are hidden or equal to their default are marked
//! invisible.

use crate::metadata::{AttributeSchema, Metadata};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl AttributeValue {
    /// Integer when the numeric value is integral (`"1.0"` is `Int(1)`),
    /// float when it is any other finite number, else the raw string.
    pub fn coerce(raw: &str) -> Self {
        if let Ok(int) = raw.parse::<i64>() {
            return Self::Int(int);
        }
        match raw.parse::<f64>() {
            Ok(float) if float.is_finite() => match integral(float) {
                Some(int) => Self::Int(int),
                None => Self::Float(float),
            },
            _ => Self::String(raw.to_string()),
        }
    }

    /// Loose equality against a schema default, numbers compared by value.
    fn matches(&self, default: &Value) -> bool {
        match (self, default) {
            (Self::Int(v), Value::Number(d)) => match d.as_i64() {
                Some(d) => *v == d,
                None => d.as_f64() == Some(*v as f64),
            },
            (Self::Float(v), Value::Number(d)) => d.as_f64() == Some(*v),
            (Self::Int(v), Value::Bool(d)) => *v == i64::from(*d),
            (Self::Float(v), Value::Bool(d)) => *v == f64::from(u8::from(*d)),
            (Self::Int(v), Value::String(d)) => numeric(d) == Some(*v as f64),
            (Self::Float(v), Value::String(d)) => numeric(d) == Some(*v),
            (Self::Bool(v), Value::Number(d)) => d.as_i64() == Some(i64::from(*v)),
            (Self::Bool(v), Value::Bool(d)) => v == d,
            (Self::Bool(v), Value::String(d)) => numeric(d) == Some(f64::from(u8::from(*v))),
            (Self::String(v), Value::String(d)) => v == d,
            _ => false,
        }
    }
}

fn integral(float: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

/// A string default that reads as a number, e.g. `"0"`.
fn numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
    pub visible: bool,
}

impl Attribute {
    pub fn new(metadata: &Metadata, operator: &str, name: impl Into<String>, raw: &str) -> Self {
        let name = name.into();
        let mut value = AttributeValue::coerce(raw);
        let mut visible = true;

        if let Some(schema) = metadata.attribute_schema(operator, &name) {
            if schema.is_boolean() {
                value = match value {
                    AttributeValue::Int(0) => AttributeValue::Bool(false),
                    AttributeValue::Int(1) => AttributeValue::Bool(true),
                    other => other,
                };
            }
            visible = !hidden_by(schema, &value);
        }

        Self {
            name,
            value,
            visible,
        }
    }
}

fn hidden_by(schema: &AttributeSchema, value: &AttributeValue) -> bool {
    if schema.is_hidden() {
        return true;
    }
    schema
        .default
        .as_ref()
        .is_some_and(|default| value.matches(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metadata() -> Metadata {
        Metadata::from_json(
            r#"[{ "name": "convolutional", "schema": { "attributes": [
                { "name": "stride", "type": "int32", "default": 1 },
                { "name": "scale", "type": "float32", "default": 1 },
                { "name": "binary", "type": "boolean", "default": false },
                { "name": "activation", "type": "string", "default": "logistic" },
                { "name": "flipped", "type": "boolean", "visible": false },
                { "name": "random", "type": "int32", "default": true },
                { "name": "pad", "type": "int32", "default": "0" },
                { "name": "jitter", "type": "float32", "default": "0.2" }
            ] } }]"#,
        )
        .unwrap()
    }

    #[test]
    fn coerces_numbers_before_strings() {
        assert_eq!(AttributeValue::coerce("3"), AttributeValue::Int(3));
        assert_eq!(AttributeValue::coerce("-1"), AttributeValue::Int(-1));
        assert_eq!(AttributeValue::coerce("0.5"), AttributeValue::Float(0.5));
        assert_eq!(AttributeValue::coerce(".001"), AttributeValue::Float(0.001));
        assert_eq!(AttributeValue::coerce("1.0"), AttributeValue::Int(1));
        assert_eq!(AttributeValue::coerce("100.000"), AttributeValue::Int(100));
        assert_eq!(AttributeValue::coerce("-2.0"), AttributeValue::Int(-2));
        assert_eq!(AttributeValue::coerce("1e3"), AttributeValue::Int(1000));
        assert_eq!(AttributeValue::coerce("1e30"), AttributeValue::Float(1e30));
        assert_eq!(
            AttributeValue::coerce("leaky"),
            AttributeValue::String("leaky".to_string())
        );
        assert_eq!(
            AttributeValue::coerce("10,14"),
            AttributeValue::String("10,14".to_string())
        );
        assert_eq!(
            AttributeValue::coerce("3x"),
            AttributeValue::String("3x".to_string())
        );
        assert_eq!(
            AttributeValue::coerce("inf"),
            AttributeValue::String("inf".to_string())
        );
    }

    #[test]
    fn attributes_without_schema_are_visible() {
        let attr = Attribute::new(&Metadata::empty(), "convolutional", "filters", "32");
        assert_eq!(
            attr,
            Attribute {
                name: "filters".to_string(),
                value: AttributeValue::Int(32),
                visible: true,
            }
        );
    }

    #[test]
    fn default_values_are_hidden() {
        let metadata = metadata();
        assert!(!Attribute::new(&metadata, "convolutional", "stride", "1").visible);
        assert!(Attribute::new(&metadata, "convolutional", "stride", "2").visible);
        assert!(!Attribute::new(&metadata, "convolutional", "scale", "1.0").visible);
        assert!(!Attribute::new(&metadata, "convolutional", "activation", "logistic").visible);
        assert!(Attribute::new(&metadata, "convolutional", "activation", "leaky").visible);
    }

    #[test]
    fn defaults_compare_loosely_across_types() {
        let metadata = metadata();
        assert!(!Attribute::new(&metadata, "convolutional", "random", "1").visible);
        assert!(Attribute::new(&metadata, "convolutional", "random", "0").visible);
        assert!(!Attribute::new(&metadata, "convolutional", "pad", "0").visible);
        assert!(Attribute::new(&metadata, "convolutional", "pad", "1").visible);
        assert!(!Attribute::new(&metadata, "convolutional", "jitter", ".2").visible);
        assert!(Attribute::new(&metadata, "convolutional", "jitter", ".3").visible);
    }

    #[test]
    fn boolean_schema_converts_zero_and_one() {
        let metadata = metadata();

        let off = Attribute::new(&metadata, "convolutional", "binary", "0");
        assert_eq!(off.value, AttributeValue::Bool(false));
        assert!(!off.visible);

        let on = Attribute::new(&metadata, "convolutional", "binary", "1");
        assert_eq!(on.value, AttributeValue::Bool(true));
        assert!(on.visible);

        let other = Attribute::new(&metadata, "convolutional", "binary", "2");
        assert_eq!(other.value, AttributeValue::Int(2));
    }

    #[test]
    fn explicitly_hidden_attributes_stay_hidden() {
        let attr = Attribute::new(&metadata(), "convolutional", "flipped", "1");
        assert_eq!(attr.value, AttributeValue::Bool(true));
        assert!(!attr.visible);
    }
}
