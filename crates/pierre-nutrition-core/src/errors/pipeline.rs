// ABOUTME: Errors raised by the pure nutrition pipeline stages
// ABOUTME: Missing food names, invalid portion multipliers and malformed payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Synchronous rejections from the adapter, scaler and helpers.
///
/// These are never logged inside the pipeline; callers decide how to
/// present them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Provider payload lacks a field without which the food cannot be logged
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// Portion multiplier was zero, negative, NaN or infinite
    #[error("Invalid portion multiplier: {multiplier} (must be a positive finite number and keep nutrients finite)")]
    InvalidPortion {
        /// Rejected multiplier
        multiplier: f64,
    },

    /// Payload is not a JSON object or does not match either provider shape
    #[error("Unrecognized provider payload: {reason}")]
    UnrecognizedPayload {
        /// Decoder message
        reason: String,
    },

    /// Meal type text did not name a known meal
    #[error("Invalid meal type: {0} (expected breakfast, lunch, dinner or snack)")]
    InvalidMealType(String),

    /// Granularity text did not name a known bucket size
    #[error("Invalid granularity: {0} (expected day, week or month)")]
    InvalidGranularity(String),

    /// Body measurement outside the range the calorie formula supports
    #[error("Invalid {field}: {value}")]
    InvalidBodyMetric {
        /// Measurement name
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}
