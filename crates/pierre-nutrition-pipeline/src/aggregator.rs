// ABOUTME: Aggregator folding food log entries into day, week or month buckets
// ABOUTME: Exact tenth-based totals, macro distribution, goal percentage and skipped-entry reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Aggregation
//!
//! Buckets are keyed by:
//!
//! - **day**: `YYYY-MM-DD` of the timestamp in the configured UTC offset
//! - **week**: `W` + two-digit `ceil((day_of_year + jan1_weekday) / 7)`,
//!   where `jan1_weekday` counts from Sunday = 0. Keys carry no year and can
//!   reach `W53` or `W54` at the end of a year.
//! - **month**: `YYYY-MM`
//!
//! Sums are accumulated as integer tenths, matching the one-decimal precision
//! of logged entries, so the result does not depend on input order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use pierre_nutrition_core::constants::portion::TENTHS_PER_UNIT;
use pierre_nutrition_core::errors::PipelineError;
use pierre_nutrition_core::models::{FoodLogEntry, NutrientTotals, UserGoal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Size of an aggregation bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar day
    #[default]
    Day,
    /// Week of year
    Week,
    /// Calendar month
    Month,
}

impl Granularity {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            _ => Err(PipelineError::InvalidGranularity(s.to_owned())),
        }
    }
}

/// Inputs to aggregation besides the entries themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationOptions {
    /// Offset whose calendar defines day, week and month boundaries
    pub utc_offset: FixedOffset,
    /// Goal used for `goal_percentage`; omitted when `None`
    pub goal: Option<UserGoal>,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            goal: None,
        }
    }
}

impl AggregationOptions {
    /// Use a goal for `goal_percentage`
    #[must_use]
    pub fn with_goal(mut self, goal: UserGoal) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Bucket by the calendar of a fixed offset
    #[must_use]
    pub fn with_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }
}

/// Share of each macro in total macro grams, whole percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroPercentages {
    /// Protein share
    pub protein_pct: f64,
    /// Carbohydrate share
    pub carbs_pct: f64,
    /// Fat share
    pub fat_pct: f64,
}

impl MacroPercentages {
    /// Percentages of `protein + carbs + fat` grams; all zero when that sum is zero
    #[must_use]
    pub fn from_totals(totals: &NutrientTotals) -> Self {
        let macro_total = totals.macro_grams();
        if !macro_total.is_finite() || macro_total <= 0.0 {
            return Self::default();
        }
        let share = |grams: f64| (grams / macro_total * 100.0).round();
        Self {
            protein_pct: share(totals.protein),
            carbs_pct: share(totals.carbs),
            fat_pct: share(totals.fat),
        }
    }
}

/// Totals for one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    /// Day, week or month key
    pub bucket_key: String,
    /// Summed nutrients
    pub totals: NutrientTotals,
    /// Macro distribution by grams
    pub macro_percentages: MacroPercentages,
    /// `round(calories / goal calories * 100)`, unclamped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_percentage: Option<f64>,
    /// Number of entries folded into this bucket
    pub entry_count: usize,
}

/// Why an entry was left out of aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `logged_at` was absent or could not be parsed
    MissingTimestamp,
}

/// An entry excluded from aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// Store identifier, if the entry has one
    pub id: Option<Uuid>,
    /// Food name, for caller-side reporting
    pub food_name: String,
    /// Exclusion reason
    pub reason: SkipReason,
}

/// Aggregation result: ordered buckets plus the entries that were skipped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Buckets keyed and ordered by bucket key
    pub buckets: BTreeMap<String, DailyAggregate>,
    /// Entries excluded from every bucket
    pub skipped: Vec<SkippedEntry>,
}

impl AggregationReport {
    /// Number of entries excluded from aggregation
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Bucket for a key
    #[must_use]
    pub fn get(&self, bucket_key: &str) -> Option<&DailyAggregate> {
        self.buckets.get(bucket_key)
    }

    /// Buckets in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = &DailyAggregate> {
        self.buckets.values()
    }

    /// Whether no bucket was produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Default)]
struct TenthsAccumulator {
    calories: i64,
    protein: i64,
    carbs: i64,
    fat: i64,
    fiber: i64,
    count: usize,
}

fn to_tenths(value: f64) -> i64 {
    if value.is_finite() {
        (value * TENTHS_PER_UNIT).round() as i64
    } else {
        0
    }
}

fn from_tenths(tenths: i64) -> f64 {
    tenths as f64 / TENTHS_PER_UNIT
}

impl TenthsAccumulator {
    // Saturates at i64::MAX tenths instead of overflowing on absurd rows
    fn add(&mut self, entry: &FoodLogEntry) {
        self.calories = self.calories.saturating_add(to_tenths(entry.calories));
        self.protein = self.protein.saturating_add(to_tenths(entry.protein));
        self.carbs = self.carbs.saturating_add(to_tenths(entry.carbs));
        self.fat = self.fat.saturating_add(to_tenths(entry.fat));
        self.fiber = self.fiber.saturating_add(to_tenths(entry.fiber));
        self.count += 1;
    }

    fn totals(&self) -> NutrientTotals {
        NutrientTotals {
            calories: from_tenths(self.calories),
            protein: from_tenths(self.protein),
            carbs: from_tenths(self.carbs),
            fat: from_tenths(self.fat),
            fiber: from_tenths(self.fiber),
        }
    }
}

/// Week of year: `ceil((day_of_year + jan1_weekday) / 7)` with Sunday = 0
#[must_use]
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1_weekday = NaiveDate::from_yo_opt(date.year(), 1)
        .map_or(0, |jan1| jan1.weekday().num_days_from_sunday());
    (date.ordinal() + jan1_weekday).div_ceil(7)
}

/// Bucket key of a timestamp in the calendar of `utc_offset`
#[must_use]
pub fn bucket_key(
    logged_at: DateTime<Utc>,
    granularity: Granularity,
    utc_offset: FixedOffset,
) -> String {
    let date = logged_at.with_timezone(&utc_offset).date_naive();
    match granularity {
        Granularity::Day => date.format("%Y-%m-%d").to_string(),
        Granularity::Week => format!("W{:02}", week_number(date)),
        Granularity::Month => date.format("%Y-%m").to_string(),
    }
}

fn goal_percentage(totals: &NutrientTotals, goal: Option<&UserGoal>) -> Option<f64> {
    goal.filter(|g| g.calories.is_finite() && g.calories > 0.0)
        .map(|g| (totals.calories / g.calories * 100.0).round())
}

/// Aggregate with UTC day boundaries and no goal
#[must_use]
pub fn aggregate(entries: &[FoodLogEntry], granularity: Granularity) -> AggregationReport {
    aggregate_with(entries, granularity, &AggregationOptions::default())
}

/// Fold entries into buckets.
///
/// Entries without a timestamp are reported in `skipped` rather than
/// dropped. An empty input yields an empty report. The output is identical
/// for any ordering of the same entries.
#[must_use]
pub fn aggregate_with(
    entries: &[FoodLogEntry],
    granularity: Granularity,
    options: &AggregationOptions,
) -> AggregationReport {
    let mut accumulators: BTreeMap<String, TenthsAccumulator> = BTreeMap::new();
    let mut skipped = Vec::new();

    for entry in entries {
        let Some(logged_at) = entry.logged_at else {
            skipped.push(SkippedEntry {
                id: entry.id,
                food_name: entry.food_name.clone(),
                reason: SkipReason::MissingTimestamp,
            });
            continue;
        };
        accumulators
            .entry(bucket_key(logged_at, granularity, options.utc_offset))
            .or_default()
            .add(entry);
    }

    skipped.sort_by(|a, b| {
        a.id.cmp(&b.id)
            .then_with(|| a.food_name.cmp(&b.food_name))
    });

    let buckets = accumulators
        .into_iter()
        .map(|(bucket_key, accumulator)| {
            let totals = accumulator.totals();
            let aggregate = DailyAggregate {
                macro_percentages: MacroPercentages::from_totals(&totals),
                goal_percentage: goal_percentage(&totals, options.goal.as_ref()),
                entry_count: accumulator.count,
                bucket_key: bucket_key.clone(),
                totals,
            };
            (bucket_key, aggregate)
        })
        .collect();

    AggregationReport { buckets, skipped }
}
