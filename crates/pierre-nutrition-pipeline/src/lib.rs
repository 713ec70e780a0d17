// ABOUTME: Nutrient normalization and aggregation pipeline for Pierre nutrition
// ABOUTME: Pure stages from provider payload to log entry, and from log entries to goal progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Nutrition Pipeline
//!
//! Data flows one way through five pure stages:
//!
//! ```text
//! adapter -> portion -> normalizer -> (store) -> aggregator -> goals
//! ```
//!
//! Every function here is synchronous, performs no I/O and holds no state
//! between calls, so all of it is safe to call from any thread or task.
//! Failures are returned as [`PipelineError`] and are never logged here.

/// Provider payload to canonical `NutrientRecord`
pub mod adapter;
/// Time-bucketed totals and macro distribution
pub mod aggregator;
/// Frequently logged foods
pub mod favorites;
/// Goal progress tiers and remaining intake
pub mod goals;
/// Scaled nutrients to persistence-ready `FoodLogEntry`
pub mod normalizer;
/// Portion multiplier application and rounding
pub mod portion;
/// Daily calorie goal from body metrics
pub mod recommendation;

pub use adapter::{adapt, adapt_value};
pub use aggregator::{
    aggregate, aggregate_with, bucket_key, week_number, AggregationOptions, AggregationReport,
    DailyAggregate, Granularity, MacroPercentages, SkipReason, SkippedEntry,
};
pub use favorites::{favorite_foods, FavoriteFood};
pub use goals::{
    evaluate, evaluate_totals, remaining, GoalMetric, GoalStatus, GoalTier, RemainingNutrients,
};
pub use normalizer::{from_quick_add, to_log_entry, LogMeta};
pub use portion::{round_to_tenth, scale, PortionLimits};
pub use recommendation::{
    calculate_bmr, recommend_calorie_goal, ActivityLevel, BodyMetrics, Gender, WeightGoal,
};

pub use pierre_nutrition_core::errors::PipelineError;
