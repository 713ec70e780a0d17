// ABOUTME: Nutrition summary service producing period totals and daily goal progress
// ABOUTME: Resolves goals, queries the store and runs aggregation and goal evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use pierre_nutrition_core::errors::{AppError, AppResult};
use pierre_nutrition_core::models::{FoodLogEntry, MealType, NutrientTotals, UserGoal};
use pierre_nutrition_pipeline::{
    aggregate_with, evaluate, recommend_calorie_goal, remaining, ActivityLevel,
    AggregationOptions, AggregationReport, BodyMetrics, DailyAggregate, GoalStatus, Granularity,
    MacroPercentages, RemainingNutrients, WeightGoal,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::NutritionConfig;
use crate::store::{FoodLogStore, LogQuery};

/// Aggregated period with goal progress per bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Bucket size
    pub granularity: Granularity,
    /// Goal the buckets were evaluated against
    pub goal: UserGoal,
    /// Buckets and skipped entries
    pub report: AggregationReport,
    /// Goal statuses keyed by bucket key
    pub goal_statuses: BTreeMap<String, Vec<GoalStatus>>,
}

/// One day of intake against the user's goal.
///
/// Entries without a timestamp never fall inside a day window, so they are
/// absent here; `summarize` over an unbounded query reports them as skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Calendar day in the service offset
    pub date: NaiveDate,
    /// Goal in effect
    pub goal: UserGoal,
    /// Totals for the day; zeroed when nothing was logged
    pub aggregate: DailyAggregate,
    /// Progress per metric
    pub statuses: Vec<GoalStatus>,
    /// Intake left before reaching the goal
    pub remaining: RemainingNutrients,
    /// Totals per meal, only meals with entries
    pub by_meal: BTreeMap<MealType, NutrientTotals>,
}

/// Summaries and goals on top of a log store
#[derive(Clone)]
pub struct NutritionSummaryService {
    store: Arc<dyn FoodLogStore>,
    default_goal: UserGoal,
    utc_offset: FixedOffset,
}

fn validate_goal(goal: &UserGoal) -> AppResult<()> {
    let targets = [
        ("calories", goal.calories),
        ("protein", goal.protein),
        ("carbs", goal.carbs),
        ("fat", goal.fat),
    ];
    let fiber = goal.fiber.map(|fiber| ("fiber", fiber));
    for (name, target) in targets.into_iter().chain(fiber) {
        if !target.is_finite() || target < 0.0 {
            return Err(AppError::invalid_input(format!(
                "Goal {name} must be a non-negative number, got {target}"
            )));
        }
    }
    Ok(())
}

fn empty_aggregate(date: NaiveDate, goal: &UserGoal) -> DailyAggregate {
    DailyAggregate {
        bucket_key: date.format("%Y-%m-%d").to_string(),
        totals: NutrientTotals::default(),
        macro_percentages: MacroPercentages::default(),
        goal_percentage: (goal.calories > 0.0).then_some(0.0),
        entry_count: 0,
    }
}

impl NutritionSummaryService {
    /// Service with the built-in default goal and UTC day boundaries
    #[must_use]
    pub fn new(store: Arc<dyn FoodLogStore>) -> Self {
        Self {
            store,
            default_goal: UserGoal::default(),
            utc_offset: Utc.fix(),
        }
    }

    /// Service using the configured default goal and bucket offset
    #[must_use]
    pub fn from_config(store: Arc<dyn FoodLogStore>, config: &NutritionConfig) -> Self {
        Self::new(store)
            .with_default_goal(config.default_goal)
            .with_utc_offset(config.bucket_utc_offset)
    }

    /// Goal applied to users without a stored goal
    #[must_use]
    pub fn with_default_goal(mut self, default_goal: UserGoal) -> Self {
        self.default_goal = default_goal;
        self
    }

    /// Offset whose calendar defines day, week and month buckets
    #[must_use]
    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Stored goal of the user, or the default goal
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn goal(&self, user_id: Uuid) -> AppResult<UserGoal> {
        Ok(self
            .store
            .get_user_goal(user_id)
            .await?
            .unwrap_or(self.default_goal))
    }

    /// Replace the user's goal
    ///
    /// # Errors
    ///
    /// Returns invalid input for negative or non-finite targets, or a storage error
    pub async fn set_goal(&self, user_id: Uuid, goal: UserGoal) -> AppResult<UserGoal> {
        validate_goal(&goal)?;
        self.store.set_user_goal(user_id, goal).await?;
        info!(user_id = %user_id, calories = goal.calories, "Nutrition goal updated");
        Ok(goal)
    }

    /// The user's current goal with calories replaced by a recommendation.
    ///
    /// Nothing is stored; pass the result to `set_goal` to keep it.
    ///
    /// # Errors
    ///
    /// Returns invalid input for out-of-range body metrics, or a storage error
    pub async fn recommend_goal(
        &self,
        user_id: Uuid,
        metrics: &BodyMetrics,
        activity: ActivityLevel,
        weight_goal: WeightGoal,
    ) -> AppResult<UserGoal> {
        let calories = recommend_calorie_goal(metrics, activity, weight_goal)?;
        Ok(self.goal(user_id).await?.with_calories(calories))
    }

    /// Aggregate the user's entries in `query` and evaluate every bucket
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn summarize(
        &self,
        user_id: Uuid,
        granularity: Granularity,
        query: &LogQuery,
    ) -> AppResult<NutritionSummary> {
        let goal = self.goal(user_id).await?;
        let entries = self.store.query(user_id, query).await?;
        let report = self.aggregate(user_id, &entries, granularity, goal);
        let goal_statuses = report
            .iter()
            .map(|bucket| (bucket.bucket_key.clone(), evaluate(bucket, &goal)))
            .collect();
        Ok(NutritionSummary {
            granularity,
            goal,
            report,
            goal_statuses,
        })
    }

    /// Intake for one calendar day against the user's goal
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn daily_progress(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DailyProgress> {
        let goal = self.goal(user_id).await?;
        let query = LogQuery::for_day(date, self.utc_offset)?;
        let entries = self.store.query(user_id, &query).await?;
        let report = self.aggregate(user_id, &entries, Granularity::Day, goal);

        let aggregate = report
            .iter()
            .next()
            .cloned()
            .unwrap_or_else(|| empty_aggregate(date, &goal));

        let options = self.options(goal);
        let by_meal = MealType::ALL
            .into_iter()
            .filter_map(|meal_type| {
                let meal_entries: Vec<FoodLogEntry> = entries
                    .iter()
                    .filter(|entry| entry.meal_type == meal_type)
                    .cloned()
                    .collect();
                aggregate_with(&meal_entries, Granularity::Day, &options)
                    .iter()
                    .next()
                    .map(|bucket| (meal_type, bucket.totals))
            })
            .collect();

        Ok(DailyProgress {
            date,
            goal,
            statuses: evaluate(&aggregate, &goal),
            remaining: remaining(&aggregate.totals, &goal),
            by_meal,
            aggregate,
        })
    }

    fn options(&self, goal: UserGoal) -> AggregationOptions {
        AggregationOptions::default()
            .with_offset(self.utc_offset)
            .with_goal(goal)
    }

    fn aggregate(
        &self,
        user_id: Uuid,
        entries: &[FoodLogEntry],
        granularity: Granularity,
        goal: UserGoal,
    ) -> AggregationReport {
        let report = aggregate_with(entries, granularity, &self.options(goal));
        if report.skipped_count() > 0 {
            warn!(
                user_id = %user_id,
                skipped = report.skipped_count(),
                "Entries without a timestamp were left out of the summary"
            );
        }
        report
    }
}
