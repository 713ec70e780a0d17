// ABOUTME: Configuration module for the nutrition service
// ABOUTME: Re-exports environment-based configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing and the top-level `NutritionConfig`
pub mod environment;

pub use environment::{Environment, NutritionConfig};
