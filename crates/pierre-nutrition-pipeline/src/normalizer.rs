// ABOUTME: Log normalizer producing persistence-ready food log entries
// ABOUTME: Fills unit defaults, sanitizes nutrient values and builds quick-add entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pierre_nutrition_core::constants::portion::DEFAULT_UNIT;
use pierre_nutrition_core::models::{
    FoodLogEntry, MealType, NutrientRecord, QuickAddItem, ScaledNutrients,
};
use uuid::Uuid;

/// Metadata attached to scaled nutrients when logging a food
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMeta {
    /// Owner of the entry
    pub user_id: Uuid,
    /// Meal the food was eaten at
    pub meal_type: MealType,
    /// Display name
    pub food_name: String,
    /// Provider identifier
    pub food_external_id: Option<String>,
    /// Explicit log time; the store fills the current time when absent
    pub logged_at: Option<DateTime<Utc>>,
}

impl LogMeta {
    /// Metadata naming the food the way the record does
    #[must_use]
    pub fn for_record(record: &NutrientRecord, user_id: Uuid, meal_type: MealType) -> Self {
        Self {
            user_id,
            meal_type,
            food_name: record.name.clone(),
            food_external_id: record.external_id.clone(),
            logged_at: None,
        }
    }

    /// Set an explicit log time
    #[must_use]
    pub fn at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = Some(logged_at);
        self
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn unit_or_default(unit: &str) -> String {
    let unit = unit.trim();
    if unit.is_empty() {
        DEFAULT_UNIT.to_owned()
    } else {
        unit.to_owned()
    }
}

/// Build a `FoodLogEntry` ready for insertion.
///
/// The entry has no `id`; `logged_at` is taken from the metadata and left
/// for the store to fill when absent.
#[must_use]
pub fn to_log_entry(scaled: ScaledNutrients, meta: LogMeta) -> FoodLogEntry {
    FoodLogEntry {
        id: None,
        user_id: meta.user_id,
        food_name: meta.food_name.trim().to_owned(),
        food_external_id: meta.food_external_id,
        calories: sanitize(scaled.calories),
        protein: sanitize(scaled.protein),
        carbs: sanitize(scaled.carbs),
        fat: sanitize(scaled.fat),
        fiber: sanitize(scaled.fiber),
        portion_size: sanitize(scaled.portion_size),
        portion_unit: unit_or_default(&scaled.portion_unit),
        meal_type: meta.meal_type,
        logged_at: meta.logged_at,
    }
}

/// Build a calories-only entry from a quick-add shortcut: one serving, no macros
#[must_use]
pub fn from_quick_add(
    item: &QuickAddItem,
    meal_type: MealType,
    logged_at: Option<DateTime<Utc>>,
) -> FoodLogEntry {
    FoodLogEntry {
        id: None,
        user_id: item.user_id,
        food_name: item.food_name.trim().to_owned(),
        food_external_id: item.food_external_id.clone(),
        calories: sanitize(item.calories),
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
        portion_size: 1.0,
        portion_unit: DEFAULT_UNIT.to_owned(),
        meal_type,
        logged_at,
    }
}
