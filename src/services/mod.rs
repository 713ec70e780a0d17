// ABOUTME: Nutrition service layer composing providers, the pipeline and the log store
// ABOUTME: Protocol-agnostic operations reusable from the CLI or any future transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition service layer
//!
//! Services own the side effects around the pure pipeline: provider calls,
//! store reads and writes, clock reads and logging.

/// Food search, logging, quick-add shortcuts and favorites
pub mod food_log;

/// Registry of configured food data providers
pub mod providers;

/// Period summaries, daily progress and goals
pub mod summary;

pub use food_log::{FoodLogService, LogFoodRequest};
pub use providers::ProviderRegistry;
pub use summary::{DailyProgress, NutritionSummary, NutritionSummaryService};
