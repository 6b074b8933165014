//! Serde helpers for coordinates that may not be finite
//!
//! JSON has no NaN or infinity, so those are written as the strings `"NaN"`,
//! `"Infinity"` and `"-Infinity"`. Finite values stay plain numbers.

use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

fn non_finite_name(value: f64) -> &'static str {
    if value.is_nan() {
        NAN
    } else if value.is_sign_positive() {
        INFINITY
    } else {
        NEG_INFINITY
    }
}

fn parse_non_finite(text: &str) -> Option<f64> {
    match text {
        NAN => Some(f64::NAN),
        INFINITY => Some(f64::INFINITY),
        NEG_INFINITY => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

/// Converts a coordinate into the value stored in a persisted map
pub fn to_value(value: f64) -> Value {
    if value.is_finite() {
        Value::from(value)
    } else {
        Value::String(String::from(non_finite_name(value)))
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(non_finite_name(*value))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFloat {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match RawFloat::deserialize(deserializer)? {
        RawFloat::Number(value) => Ok(value),
        RawFloat::Text(text) => parse_non_finite(&text)
            .ok_or_else(|| de::Error::custom(format!("expected a number, found \"{}\"", text))),
    }
}
