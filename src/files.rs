// ABOUTME: JSON import helpers for food log entries and provider payloads on disk
// ABOUTME: Used by the CLI to feed the pipeline from exported data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use pierre_nutrition_core::errors::{AppError, AppResult};
use pierre_nutrition_core::models::{FoodLogEntry, ProviderPayload};
use serde_json::Value;

fn read_json(path: &Path) -> AppResult<Value> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::invalid_input(format!("Cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::invalid_input(format!("{} is not valid JSON: {e}", path.display())))
}

/// Read food log entries from a JSON array, or from an object holding the
/// array under `entries`.
///
/// Fields are read leniently: numbers may be strings, and unparseable
/// timestamps become absent so the aggregator reports them as skipped.
///
/// # Errors
///
/// Returns invalid input if the file is unreadable, not JSON, or an entry
/// lacks a required field
pub fn read_entries(path: &Path) -> AppResult<Vec<FoodLogEntry>> {
    let value = match read_json(path)? {
        Value::Object(mut object) => object.remove("entries").unwrap_or(Value::Null),
        other => other,
    };
    if !value.is_array() {
        return Err(AppError::invalid_input(format!(
            "{} must contain an array of entries",
            path.display()
        )));
    }
    serde_json::from_value(value).map_err(|e| {
        AppError::invalid_input(format!("{} has an invalid entry: {e}", path.display()))
    })
}

/// Read one provider payload in either supported shape
///
/// # Errors
///
/// Returns invalid input if the file is unreadable, not JSON, or not a
/// recognized payload
pub fn read_payload(path: &Path) -> AppResult<ProviderPayload> {
    Ok(ProviderPayload::from_value(read_json(path)?)?)
}
