// ABOUTME: Permissive serde helpers for third-party nutrition payloads and stored rows
// ABOUTME: Coerces numeric strings, blank names and malformed timestamps into safe defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Lenient field decoding.
//!
//! Food data providers disagree on types: the same nutrient may arrive as
//! `95`, `"95.00"`, `""` or `null`. These helpers are used with
//! `#[serde(default, deserialize_with = "...")]` so a single odd field never
//! rejects an otherwise usable payload.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON number or numeric string into a finite `f64`
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerce a JSON string or number into trimmed, non-empty text
#[must_use]
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Non-negative nutrient amount; anything unusable becomes `0.0`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).filter(|v| *v > 0.0).unwrap_or(0.0))
}

/// Strictly positive quantity, absent otherwise
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn positive_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).filter(|v| *v > 0.0))
}

/// Trimmed text, absent when blank or not a scalar
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(&value))
}

/// Provider boolean flag encoded as `true`, `1` or `"1"`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|v| v > 0.0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

/// Timestamp that degrades to `None` when missing or unparseable
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => parse_timestamp(&raw),
        _ => None,
    })
}
