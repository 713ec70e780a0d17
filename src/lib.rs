// ABOUTME: Main library entry point for the Pierre nutrition service
// ABOUTME: Wires food data providers, the normalization pipeline and the food log store together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Nutrition
//!
//! Food logging and nutrition summaries built on three workspace crates:
//!
//! - `pierre-nutrition-core`: shared models, errors and constants
//! - `pierre-nutrition-pipeline`: pure normalization, aggregation and goal evaluation
//! - `pierre-nutrition-providers`: Nutritionix and FatSecret clients
//!
//! This crate adds the application layer around them:
//!
//! - **config**: environment-driven configuration
//! - **logging**: structured logging setup
//! - **store**: food log persistence contract and an in-memory implementation
//! - **services**: logging foods and summarizing intake against goals
//! - **files**: JSON import for the command-line tool

/// Environment-driven configuration
pub mod config;
/// JSON file import helpers
pub mod files;
/// Structured logging setup
pub mod logging;
/// Food logging and summary services
pub mod services;
/// Food log persistence contract
pub mod store;

pub use pierre_nutrition_core::{constants, errors, models};
pub use pierre_nutrition_pipeline as pipeline;
pub use pierre_nutrition_providers as providers;
