// ABOUTME: Core types and constants for the Pierre nutrition pipeline
// ABOUTME: Foundation crate with food log models, provider payloads, error handling and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Nutrition Core
//!
//! Foundation crate providing the shared vocabulary of the nutrition pipeline.
//! Every other crate in the workspace speaks in these types.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, `PipelineError` and `ProviderError`
//! - **constants**: Default goals, rounding precision, tier thresholds
//! - **models**: Canonical records, log entries, goals and provider payloads

/// Unified error handling with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`NutrientRecord`, `FoodLogEntry`, `UserGoal`, payloads)
pub mod models;
