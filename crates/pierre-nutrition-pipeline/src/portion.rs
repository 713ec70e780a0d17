// ABOUTME: Portion scaler applying a multiplier to canonical nutrient records
// ABOUTME: One-decimal half-away-from-zero rounding plus a UI clamp helper for multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_nutrition_core::constants::portion::{
    MAX_MULTIPLIER, MIN_MULTIPLIER, MULTIPLIER_STEP, TENTHS_PER_UNIT,
};
use pierre_nutrition_core::errors::PipelineError;
use pierre_nutrition_core::models::{NutrientRecord, ScaledNutrients};

/// Round to one decimal place, halves away from zero.
///
/// Same result as multiplying by ten, rounding to the nearest integer and
/// dividing by ten.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * TENTHS_PER_UNIT).round() / TENTHS_PER_UNIT
}

/// Scale a record by a portion multiplier.
///
/// Each nutrient is multiplied then rounded to one decimal place.
/// `portion_size` is the consumed quantity (`serving_quantity * multiplier`)
/// and is not rounded.
///
/// # Errors
///
/// Returns `PipelineError::InvalidPortion` if `multiplier` is not a positive
/// finite number, or if any scaled value overflows to infinity
pub fn scale(record: &NutrientRecord, multiplier: f64) -> Result<ScaledNutrients, PipelineError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(PipelineError::InvalidPortion { multiplier });
    }

    let scaled = ScaledNutrients {
        calories: round_to_tenth(record.calories_per_serving * multiplier),
        protein: round_to_tenth(record.protein_per_serving * multiplier),
        carbs: round_to_tenth(record.carbs_per_serving * multiplier),
        fat: round_to_tenth(record.fat_per_serving * multiplier),
        fiber: round_to_tenth(record.fiber_per_serving * multiplier),
        portion_size: record.serving_quantity * multiplier,
        portion_unit: record.serving_unit.clone(),
    };
    let values = [
        scaled.calories,
        scaled.protein,
        scaled.carbs,
        scaled.fat,
        scaled.fiber,
        scaled.portion_size,
    ];
    if values.iter().all(|value| value.is_finite()) {
        Ok(scaled)
    } else {
        Err(PipelineError::InvalidPortion { multiplier })
    }
}

/// Range and step of multipliers offered by portion pickers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortionLimits {
    /// Smallest multiplier
    pub min: f64,
    /// Largest multiplier
    pub max: f64,
    /// Increment between choices
    pub step: f64,
}

impl Default for PortionLimits {
    fn default() -> Self {
        Self {
            min: MIN_MULTIPLIER,
            max: MAX_MULTIPLIER,
            step: MULTIPLIER_STEP,
        }
    }
}

impl PortionLimits {
    /// Snap a requested multiplier to the nearest step inside `[min, max]`.
    ///
    /// Non-finite input falls back to `min`. This is a convenience for input
    /// controls; `scale` does not call it.
    #[must_use]
    pub fn clamp(&self, multiplier: f64) -> f64 {
        if !multiplier.is_finite() {
            return self.min;
        }
        let bounded = multiplier.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return bounded;
        }
        let steps = ((bounded - self.min) / self.step).round();
        round_to_tenth(self.step.mul_add(steps, self.min)).clamp(self.min, self.max)
    }
}
