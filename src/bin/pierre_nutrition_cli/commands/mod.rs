// ABOUTME: Command implementations for the pierre-nutrition CLI
// ABOUTME: Each command reads its inputs, runs the pipeline and prints JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use pierre_nutrition::config::NutritionConfig;
use pierre_nutrition::files::{read_entries, read_payload};
use pierre_nutrition::models::{FoodSummary, MealType, ProviderKind};
use pierre_nutrition::pipeline::{
    adapt, aggregate_with, evaluate, recommend_calorie_goal, scale as scale_record, to_log_entry,
    ActivityLevel, BodyMetrics, Gender, Granularity, LogMeta, WeightGoal,
};
use pierre_nutrition::providers::MockFoodProvider;
use pierre_nutrition::services::{FoodLogService, ProviderRegistry};
use pierre_nutrition::store::InMemoryFoodLogStore;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ProviderChoice;

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Aggregate a log file and print buckets, skipped entries and goal statuses
pub fn summarize(
    input: &Path,
    granularity: Granularity,
    utc_offset_minutes: Option<i32>,
    goal_calories: Option<f64>,
) -> Result<()> {
    let config = NutritionConfig::from_env()?;
    let entries = read_entries(input)?;
    debug!(entries = entries.len(), path = %input.display(), "Loaded food log entries");

    let offset = config.bucket_offset(utc_offset_minutes)?;
    let goal = goal_calories.map_or(config.default_goal, |calories| {
        config.default_goal.with_calories(calories)
    });
    let options = config.aggregation_options().with_offset(offset).with_goal(goal);

    let report = aggregate_with(&entries, granularity, &options);
    if report.skipped_count() > 0 {
        warn!(
            skipped = report.skipped_count(),
            "Entries without a timestamp were left out of the summary"
        );
    }
    let goal_statuses: serde_json::Map<String, serde_json::Value> = report
        .iter()
        .map(|bucket| {
            serde_json::to_value(evaluate(bucket, &goal))
                .map(|statuses| (bucket.bucket_key.clone(), statuses))
        })
        .collect::<Result<_, _>>()?;

    print_json(&json!({
        "granularity": granularity,
        "goal": goal,
        "buckets": report.buckets,
        "skipped": report.skipped,
        "goal_statuses": goal_statuses,
    }))
}

/// Adapt, scale and normalize a payload file into a log entry
pub fn scale(
    input: &Path,
    multiplier: f64,
    meal_type: MealType,
    user_id: Option<Uuid>,
) -> Result<()> {
    let payload = read_payload(input)?;
    let record = adapt(&payload)?;
    let scaled = scale_record(&record, multiplier)?;
    let meta = LogMeta::for_record(&record, user_id.unwrap_or_else(Uuid::new_v4), meal_type)
        .at(Utc::now());
    print_json(&to_log_entry(scaled, meta))
}

/// Print the recommended daily calorie goal
pub fn recommend(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity: ActivityLevel,
    goal: WeightGoal,
) -> Result<()> {
    let metrics = BodyMetrics {
        weight_kg,
        height_cm,
        age,
        gender,
    };
    let calories = recommend_calorie_goal(&metrics, activity, goal)?;
    print_json(&json!({
        "metrics": metrics,
        "activity_level": activity,
        "goal": goal,
        "daily_calories": calories,
    }))
}

/// Search one provider, or every seeded mock provider
pub async fn search(provider: ProviderChoice, query: &str, limit: Option<usize>) -> Result<()> {
    let config = NutritionConfig::from_env()?;
    let (registry, kinds) = match provider {
        ProviderChoice::Nutritionix => (
            ProviderRegistry::from_config(&config),
            vec![ProviderKind::Nutritionix],
        ),
        ProviderChoice::Fatsecret => (
            ProviderRegistry::from_config(&config),
            vec![ProviderKind::FatSecret],
        ),
        ProviderChoice::Mock => {
            let registry = ProviderRegistry::new()
                .with_provider(Arc::new(MockFoodProvider::nutritionix()))
                .with_provider(Arc::new(MockFoodProvider::fatsecret()));
            let kinds = registry.kinds();
            (registry, kinds)
        }
    };

    let service = FoodLogService::new(registry, Arc::new(InMemoryFoodLogStore::new()))
        .with_search_limit(config.search_limit);
    let mut results: Vec<FoodSummary> = Vec::new();
    for kind in kinds {
        results.extend(service.search(kind, query, limit).await?);
    }
    print_json(&results)
}
