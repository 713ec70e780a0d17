// ABOUTME: Canonical nutrition models shared by the pipeline, providers and store
// ABOUTME: NutrientRecord, ScaledNutrients, FoodLogEntry, NutrientTotals, MealType, UserGoal, QuickAddItem
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::default_goal;
use crate::errors::PipelineError;
use crate::models::lenient;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// All meal types in day order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => Err(PipelineError::InvalidMealType(s.to_owned())),
        }
    }
}

/// Provider-agnostic nutrient content of one serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    /// Display name of the food
    pub name: String,
    /// Provider identifier, only meaningful within that provider
    pub external_id: Option<String>,
    /// Energy per serving (kcal)
    pub calories_per_serving: f64,
    /// Protein per serving (g)
    pub protein_per_serving: f64,
    /// Carbohydrates per serving (g)
    pub carbs_per_serving: f64,
    /// Fat per serving (g)
    pub fat_per_serving: f64,
    /// Fiber per serving (g)
    pub fiber_per_serving: f64,
    /// Magnitude of one serving, e.g. `100` for "100 g"
    pub serving_quantity: f64,
    /// Unit of one serving, empty when the provider names none
    pub serving_unit: String,
}

/// Nutrients after a portion multiplier has been applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledNutrients {
    /// Energy (kcal), one decimal place
    pub calories: f64,
    /// Protein (g), one decimal place
    pub protein: f64,
    /// Carbohydrates (g), one decimal place
    pub carbs: f64,
    /// Fat (g), one decimal place
    pub fat: f64,
    /// Fiber (g), one decimal place
    pub fiber: f64,
    /// Consumed quantity: serving quantity times multiplier
    pub portion_size: f64,
    /// Unit of `portion_size`, empty when unknown
    pub portion_unit: String,
}

/// Persisted unit of truth for one logged food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    /// Store-assigned identifier, absent before persistence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Owner of the entry
    pub user_id: Uuid,
    /// Display name of the food
    pub food_name: String,
    /// Provider identifier used for favorites lookups
    #[serde(default)]
    pub food_external_id: Option<String>,
    /// Energy (kcal)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub calories: f64,
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub protein: f64,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub carbs: f64,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fat: f64,
    /// Fiber (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fiber: f64,
    /// Consumed quantity
    #[serde(default, deserialize_with = "lenient::amount")]
    pub portion_size: f64,
    /// Unit of `portion_size`
    #[serde(default)]
    pub portion_unit: String,
    /// Meal the food was eaten at
    pub meal_type: MealType,
    /// When the food was eaten; absent or unparseable values deserialize to `None`
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub logged_at: Option<DateTime<Utc>>,
}

/// Summed nutrients for a bucket or a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Fiber (g)
    pub fiber: f64,
}

impl NutrientTotals {
    /// Protein, carbohydrate and fat grams combined
    #[must_use]
    pub fn macro_grams(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }
}

/// Daily nutrient targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserGoal {
    /// Energy target (kcal)
    pub calories: f64,
    /// Protein target (g)
    pub protein: f64,
    /// Carbohydrate target (g)
    pub carbs: f64,
    /// Fat target (g)
    pub fat: f64,
    /// Fiber target (g), not tracked unless set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

impl Default for UserGoal {
    fn default() -> Self {
        Self {
            calories: default_goal::CALORIES,
            protein: default_goal::PROTEIN_G,
            carbs: default_goal::CARBS_G,
            fat: default_goal::FAT_G,
            fiber: None,
        }
    }
}

impl UserGoal {
    /// Replace the calorie target, keeping macro targets
    #[must_use]
    pub fn with_calories(mut self, calories: f64) -> Self {
        self.calories = calories;
        self
    }
}

/// One-tap calorie shortcut saved by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAddItem {
    /// Store-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Owner of the shortcut
    pub user_id: Uuid,
    /// Name shown on the shortcut and logged as the food name
    pub food_name: String,
    /// Provider identifier of the underlying food, if any
    #[serde(default)]
    pub food_external_id: Option<String>,
    /// Energy logged per tap (kcal)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub calories: f64,
    /// Position in the user's shortcut list
    #[serde(default)]
    pub display_order: u32,
}
