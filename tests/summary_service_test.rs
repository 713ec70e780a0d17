// ABOUTME: Tests for the nutrition summary service over the in-memory log store
// ABOUTME: Goals with defaults, period summaries, daily progress and goal recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use pierre_nutrition::errors::ErrorCode;
use pierre_nutrition::models::{MealType, UserGoal};
use pierre_nutrition::pipeline::{
    ActivityLevel, BodyMetrics, Gender, GoalMetric, GoalTier, Granularity, WeightGoal,
};
use pierre_nutrition::services::NutritionSummaryService;
use pierre_nutrition::store::{FoodLogStore, InMemoryFoodLogStore, LogQuery};
use uuid::Uuid;

mod common;

async fn seeded(user_id: Uuid) -> Arc<InMemoryFoodLogStore> {
    common::init_test_logging();
    let store = Arc::new(InMemoryFoodLogStore::new());
    let mut breakfast = common::entry(
        user_id,
        "Oatmeal",
        300.0,
        (10.0, 54.0, 6.0),
        Some(common::utc(2025, 3, 14, 7, 30)),
    );
    breakfast.meal_type = MealType::Breakfast;
    let lunch = common::entry(
        user_id,
        "Chicken wrap",
        660.0,
        (40.0, 60.0, 25.0),
        Some(common::utc(2025, 3, 14, 12, 15)),
    );
    let dinner = common::entry(
        user_id,
        "Salmon",
        700.0,
        (45.0, 30.0, 40.0),
        Some(common::utc(2025, 3, 15, 19, 0)),
    );
    let stranger = common::entry(
        Uuid::new_v4(),
        "Pizza",
        900.0,
        (30.0, 100.0, 40.0),
        Some(common::utc(2025, 3, 14, 20, 0)),
    );
    for entry in [breakfast, lunch, dinner, stranger] {
        store.insert(entry).await.unwrap();
    }
    store
}

// ============================================================================
// GOALS
// ============================================================================

#[tokio::test]
async fn test_goal_falls_back_to_default() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);
    assert_eq!(service.goal(user_id).await.unwrap(), UserGoal::default());

    let custom = UserGoal::default().with_calories(1800.0);
    let service = service.with_default_goal(custom);
    assert_eq!(service.goal(user_id).await.unwrap().calories, 1800.0);
}

#[tokio::test]
async fn test_set_goal_persists_and_validates() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);
    let goal = UserGoal {
        calories: 2400.0,
        protein: 150.0,
        carbs: 250.0,
        fat: 80.0,
        fiber: Some(30.0),
    };

    service.set_goal(user_id, goal).await.unwrap();
    assert_eq!(service.goal(user_id).await.unwrap(), goal);

    let invalid = UserGoal {
        fat: -1.0,
        ..goal
    };
    let error = service.set_goal(user_id, invalid).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(service.goal(user_id).await.unwrap(), goal);
}

#[tokio::test]
async fn test_recommend_goal_replaces_calories_only() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);
    let metrics = BodyMetrics {
        weight_kg: 70.0,
        height_cm: 175.0,
        age: 30,
        gender: Gender::Male,
    };

    let goal = service
        .recommend_goal(user_id, &metrics, ActivityLevel::LightlyActive, WeightGoal::Lose)
        .await
        .unwrap();
    assert_eq!(goal.calories, 2017.0);
    assert_eq!(goal.protein, UserGoal::default().protein);
    // Not stored until set_goal is called
    assert_eq!(service.goal(user_id).await.unwrap(), UserGoal::default());

    let bad = BodyMetrics { age: 3, ..metrics };
    let error = service
        .recommend_goal(user_id, &bad, ActivityLevel::Sedentary, WeightGoal::Maintain)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

// ============================================================================
// SUMMARIES
// ============================================================================

#[tokio::test]
async fn test_summarize_daily_buckets_with_statuses() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);

    let summary = service
        .summarize(user_id, Granularity::Day, &LogQuery::all())
        .await
        .unwrap();

    assert_eq!(summary.report.buckets.len(), 2);
    let friday = summary.report.get("2025-03-14").unwrap();
    assert_eq!(friday.entry_count, 2);
    assert_eq!(friday.totals.calories, 960.0);
    // 960 / 2000
    assert_eq!(friday.goal_percentage, Some(48.0));

    let statuses = &summary.goal_statuses["2025-03-14"];
    assert_eq!(statuses[0].metric, GoalMetric::Calories);
    assert_eq!(statuses[0].tier, GoalTier::Low);
    assert_eq!(summary.goal_statuses.len(), 2);
}

#[tokio::test]
async fn test_summarize_honors_query_range() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);
    let query = LogQuery::between(
        common::utc(2025, 3, 15, 0, 0),
        common::utc(2025, 3, 16, 0, 0),
    );

    let summary = service
        .summarize(user_id, Granularity::Month, &query)
        .await
        .unwrap();

    let march = summary.report.get("2025-03").unwrap();
    assert_eq!(march.entry_count, 1);
    assert_eq!(march.totals.calories, 700.0);
}

#[tokio::test]
async fn test_summarize_reports_rows_without_timestamp() {
    common::init_test_logging();
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryFoodLogStore::with_entries(vec![
        common::entry(
            user_id,
            "Apple",
            95.0,
            (0.5, 25.0, 0.3),
            Some(common::utc(2025, 3, 14, 10, 0)),
        ),
        common::entry(user_id, "Imported", 400.0, (10.0, 10.0, 10.0), None),
    ]));
    let service = NutritionSummaryService::new(store);

    let summary = service
        .summarize(user_id, Granularity::Day, &LogQuery::all())
        .await
        .unwrap();

    assert_eq!(summary.report.skipped_count(), 1);
    assert!(summary.report.skipped[0].id.is_some());
    assert_eq!(summary.report.get("2025-03-14").unwrap().totals.calories, 95.0);
}

// ============================================================================
// DAILY PROGRESS
// ============================================================================

#[tokio::test]
async fn test_daily_progress_totals_by_meal_and_remaining() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    let progress = service.daily_progress(user_id, date).await.unwrap();

    assert_eq!(progress.aggregate.bucket_key, "2025-03-14");
    assert_eq!(progress.aggregate.totals.calories, 960.0);
    assert_eq!(progress.remaining.calories, 1040.0);
    assert_eq!(progress.remaining.protein, 50.0);
    assert_eq!(progress.by_meal.len(), 2);
    assert_eq!(progress.by_meal[&MealType::Breakfast].calories, 300.0);
    assert_eq!(progress.by_meal[&MealType::Lunch].calories, 660.0);
    assert_eq!(progress.statuses.len(), 4);
}

#[tokio::test]
async fn test_daily_progress_leaves_out_undated_rows() {
    common::init_test_logging();
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryFoodLogStore::with_entries(vec![
        common::entry(
            user_id,
            "Apple",
            95.0,
            (0.5, 25.0, 0.3),
            Some(common::utc(2025, 3, 14, 10, 0)),
        ),
        common::entry(user_id, "Imported", 400.0, (10.0, 10.0, 10.0), None),
    ]));
    let service = NutritionSummaryService::new(store);

    let progress = service
        .daily_progress(user_id, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
        .await
        .unwrap();

    assert_eq!(progress.aggregate.entry_count, 1);
    assert_eq!(progress.aggregate.totals.calories, 95.0);
    assert_eq!(progress.by_meal[&MealType::Lunch].calories, 95.0);
}

#[tokio::test]
async fn test_daily_progress_for_empty_day() {
    let user_id = Uuid::new_v4();
    let service = NutritionSummaryService::new(seeded(user_id).await);
    let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

    let progress = service.daily_progress(user_id, date).await.unwrap();

    assert_eq!(progress.aggregate.entry_count, 0);
    assert_eq!(progress.aggregate.totals.calories, 0.0);
    assert_eq!(progress.aggregate.goal_percentage, Some(0.0));
    assert_eq!(progress.remaining.calories, 2000.0);
    assert!(progress.by_meal.is_empty());
    assert!(progress.statuses.iter().all(|s| s.tier == GoalTier::Low));
}

#[tokio::test]
async fn test_daily_progress_uses_service_offset() {
    let user_id = Uuid::new_v4();
    // 2025-03-14 12:15 UTC is already 2025-03-15 in UTC+12:00
    let service = NutritionSummaryService::new(seeded(user_id).await)
        .with_utc_offset(FixedOffset::east_opt(12 * 3600).unwrap());

    let progress = service
        .daily_progress(user_id, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        .await
        .unwrap();

    assert_eq!(progress.aggregate.entry_count, 1);
    assert_eq!(progress.aggregate.bucket_key, "2025-03-15");
    assert_eq!(progress.aggregate.totals.calories, 660.0);
}
