// ABOUTME: Goal evaluator comparing aggregated intake against daily targets
// ABOUTME: Percent-of-goal, low/near/met tiering and remaining intake per metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use pierre_nutrition_core::constants::goal_tiers::{
    MAX_TIER_PCT, MET_THRESHOLD_PCT, NEAR_THRESHOLD_PCT,
};
use pierre_nutrition_core::models::{NutrientTotals, UserGoal};
use serde::{Deserialize, Serialize};

use crate::aggregator::DailyAggregate;
use crate::portion::round_to_tenth;

/// Coarse progress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTier {
    /// Below 50% of target
    Low,
    /// 50% up to 80% of target
    Near,
    /// 80% of target or more
    Met,
}

impl GoalTier {
    /// Tier for a percentage, clamped to `[0, 100]` first
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        let clamped = if percentage.is_nan() {
            0.0
        } else {
            percentage.clamp(0.0, MAX_TIER_PCT)
        };
        if clamped < NEAR_THRESHOLD_PCT {
            Self::Low
        } else if clamped < MET_THRESHOLD_PCT {
            Self::Near
        } else {
            Self::Met
        }
    }
}

/// Tracked nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMetric {
    /// Energy (kcal)
    Calories,
    /// Protein (g)
    Protein,
    /// Carbohydrates (g)
    Carbs,
    /// Fat (g)
    Fat,
    /// Fiber (g)
    Fiber,
}

impl GoalMetric {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
            Self::Fiber => "fiber",
        }
    }
}

impl fmt::Display for GoalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one metric toward its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    /// Metric evaluated
    pub metric: GoalMetric,
    /// Amount consumed
    pub actual: f64,
    /// Target amount
    pub goal: f64,
    /// `round(actual / goal * 100)`, not clamped
    pub percentage: f64,
    /// Tier of the clamped percentage
    pub tier: GoalTier,
}

fn targets(totals: &NutrientTotals, goal: &UserGoal) -> [(GoalMetric, f64, Option<f64>); 5] {
    [
        (GoalMetric::Calories, totals.calories, Some(goal.calories)),
        (GoalMetric::Protein, totals.protein, Some(goal.protein)),
        (GoalMetric::Carbs, totals.carbs, Some(goal.carbs)),
        (GoalMetric::Fat, totals.fat, Some(goal.fat)),
        (GoalMetric::Fiber, totals.fiber, goal.fiber),
    ]
}

/// Evaluate every metric of `goal` that has a positive target
#[must_use]
pub fn evaluate_totals(totals: &NutrientTotals, goal: &UserGoal) -> Vec<GoalStatus> {
    targets(totals, goal)
        .into_iter()
        .filter_map(|(metric, actual, target)| {
            let target = target.filter(|t| t.is_finite() && *t > 0.0)?;
            let percentage = (actual / target * 100.0).round();
            Some(GoalStatus {
                metric,
                actual,
                goal: target,
                percentage,
                tier: GoalTier::from_percentage(percentage),
            })
        })
        .collect()
}

/// Evaluate a bucket against a goal
#[must_use]
pub fn evaluate(aggregate: &DailyAggregate, goal: &UserGoal) -> Vec<GoalStatus> {
    evaluate_totals(&aggregate.totals, goal)
}

/// Target minus consumed; negative when over target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingNutrients {
    /// Energy left (kcal)
    pub calories: f64,
    /// Protein left (g)
    pub protein: f64,
    /// Carbohydrates left (g)
    pub carbs: f64,
    /// Fat left (g)
    pub fat: f64,
    /// Fiber left (g), only when a fiber target is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

/// Intake left for the day, one decimal place
#[must_use]
pub fn remaining(totals: &NutrientTotals, goal: &UserGoal) -> RemainingNutrients {
    RemainingNutrients {
        calories: round_to_tenth(goal.calories - totals.calories),
        protein: round_to_tenth(goal.protein - totals.protein),
        carbs: round_to_tenth(goal.carbs - totals.carbs),
        fat: round_to_tenth(goal.fat - totals.fat),
        fiber: goal.fiber.map(|fiber| round_to_tenth(fiber - totals.fiber)),
    }
}
