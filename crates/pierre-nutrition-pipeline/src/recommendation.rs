// ABOUTME: Daily calorie goal recommendation from body metrics for onboarding
// ABOUTME: Mifflin-St Jeor BMR, activity multiplier and weight-goal adjustment with unit helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie goal recommendation
//!
//! `goal = round(BMR * activity_factor + adjustment)` where BMR follows
//! Mifflin-St Jeor (1990):
//!
//! ```text
//! BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age + 5     (male)
//! BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age - 161   (female)
//! ```
//!
//! Reference: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241

use std::str::FromStr;

use pierre_nutrition_core::errors::PipelineError;
use serde::{Deserialize, Serialize};

const KG_PER_POUND: f64 = 0.453_592;
const CM_PER_INCH: f64 = 2.54;
const DAILY_ADJUSTMENT_KCAL: f64 = 250.0;

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (+5 kcal constant)
    Male,
    /// Female (-161 kcal constant)
    Female,
}

impl Gender {
    const fn constant(self) -> f64 {
        match self {
            Self::Male => 5.0,
            Self::Female => -161.0,
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day)
    ExtraActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "lightly_active" | "light" => Ok(Self::LightlyActive),
            "moderately_active" | "moderate" => Ok(Self::ModeratelyActive),
            "very_active" | "very" => Ok(Self::VeryActive),
            "extra_active" | "extra" => Ok(Self::ExtraActive),
            other => Err(format!("unknown activity level: {other}")),
        }
    }
}

/// Direction of desired weight change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    /// Caloric deficit
    Lose,
    /// Caloric balance
    Maintain,
    /// Caloric surplus
    Gain,
}

impl WeightGoal {
    /// Daily kcal added to maintenance
    #[must_use]
    pub const fn calorie_adjustment(self) -> f64 {
        match self {
            Self::Lose => -DAILY_ADJUSTMENT_KCAL,
            Self::Maintain => 0.0,
            Self::Gain => DAILY_ADJUSTMENT_KCAL,
        }
    }
}

impl FromStr for WeightGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" | "weight_loss" => Ok(Self::Lose),
            "maintain" | "maintenance" => Ok(Self::Maintain),
            "gain" | "weight_gain" => Ok(Self::Gain),
            other => Err(format!("unknown weight goal: {other}")),
        }
    }
}

/// Pounds to kilograms
#[must_use]
pub fn pounds_to_kg(pounds: f64) -> f64 {
    pounds * KG_PER_POUND
}

/// Inches to centimeters
#[must_use]
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Body measurements used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age: u32,
    /// Gender
    pub gender: Gender,
}

impl BodyMetrics {
    /// Build from pounds and inches
    #[must_use]
    pub fn from_imperial(weight_lb: f64, height_in: f64, age: u32, gender: Gender) -> Self {
        Self {
            weight_kg: pounds_to_kg(weight_lb),
            height_cm: inches_to_cm(height_in),
            age,
            gender,
        }
    }
}

/// Basal metabolic rate (kcal/day), Mifflin-St Jeor
///
/// # Errors
///
/// Returns `PipelineError::InvalidBodyMetric` if weight or height is outside
/// `(0, 300]` or age is outside `10..=120`
pub fn calculate_bmr(metrics: &BodyMetrics) -> Result<f64, PipelineError> {
    if !metrics.weight_kg.is_finite() || metrics.weight_kg <= 0.0 || metrics.weight_kg > 300.0 {
        return Err(PipelineError::InvalidBodyMetric {
            field: "weight_kg",
            value: metrics.weight_kg,
        });
    }
    if !metrics.height_cm.is_finite() || metrics.height_cm <= 0.0 || metrics.height_cm > 300.0 {
        return Err(PipelineError::InvalidBodyMetric {
            field: "height_cm",
            value: metrics.height_cm,
        });
    }
    if !(10..=120).contains(&metrics.age) {
        return Err(PipelineError::InvalidBodyMetric {
            field: "age",
            value: f64::from(metrics.age),
        });
    }

    Ok(6.25f64.mul_add(
        metrics.height_cm,
        10.0f64.mul_add(metrics.weight_kg, -5.0 * f64::from(metrics.age)),
    ) + metrics.gender.constant())
}

/// Recommended daily calorie goal, whole kcal
///
/// # Errors
///
/// Returns `PipelineError::InvalidBodyMetric` for out-of-range measurements
pub fn recommend_calorie_goal(
    metrics: &BodyMetrics,
    activity: ActivityLevel,
    goal: WeightGoal,
) -> Result<f64, PipelineError> {
    let bmr = calculate_bmr(metrics)?;
    Ok(bmr
        .mul_add(activity.factor(), goal.calorie_adjustment())
        .round())
}
