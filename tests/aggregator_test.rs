// ABOUTME: Tests for time-bucketed aggregation of food log entries
// ABOUTME: Order independence, macro distribution, skipped entries, bucket keys and offsets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

use chrono::{FixedOffset, NaiveDate, TimeDelta};
use pierre_nutrition::models::{FoodLogEntry, UserGoal};
use pierre_nutrition::pipeline::{
    aggregate, aggregate_with, bucket_key, week_number, AggregationOptions, Granularity,
    SkipReason,
};
use rayon::prelude::*;
use uuid::Uuid;

mod common;

fn sample_day(user_id: Uuid) -> Vec<FoodLogEntry> {
    vec![
        common::entry(
            user_id,
            "Oatmeal",
            150.0,
            (5.0, 27.0, 3.0),
            Some(common::utc(2025, 3, 14, 7, 0)),
        ),
        common::entry(
            user_id,
            "Chicken salad",
            420.5,
            (35.2, 12.1, 22.7),
            Some(common::utc(2025, 3, 14, 12, 30)),
        ),
        common::entry(
            user_id,
            "Pasta",
            610.3,
            (21.0, 88.4, 14.9),
            Some(common::utc(2025, 3, 15, 19, 0)),
        ),
    ]
}

// ============================================================================
// ORDER INDEPENDENCE
// ============================================================================

#[test]
fn test_identical_output_for_any_input_order() {
    let user_id = Uuid::new_v4();
    let start = common::utc(2025, 1, 1, 6, 0);

    let entries: Vec<FoodLogEntry> = (0..240_i64)
        .into_par_iter()
        .map(|i| {
            let logged_at = (i % 17 != 0).then(|| start + TimeDelta::hours(i * 7));
            common::entry(
                user_id,
                &format!("food-{i}"),
                (i % 13) as f64 * 37.3 + 0.1,
                ((i % 5) as f64 * 1.7, (i % 7) as f64 * 3.1, (i % 3) as f64 * 0.9),
                logged_at,
            )
        })
        .collect();

    let mut reversed = entries.clone();
    reversed.reverse();
    let mut interleaved: Vec<FoodLogEntry> = entries.iter().step_by(2).cloned().collect();
    interleaved.extend(entries.iter().skip(1).step_by(2).cloned());

    for granularity in [Granularity::Day, Granularity::Week, Granularity::Month] {
        let baseline = aggregate(&entries, granularity);
        assert_eq!(baseline, aggregate(&reversed, granularity));
        assert_eq!(baseline, aggregate(&interleaved, granularity));
        assert_eq!(baseline, aggregate(&entries, granularity));
    }
}

#[test]
fn test_buckets_sorted_by_key() {
    let report = aggregate(&sample_day(Uuid::new_v4()), Granularity::Day);
    let keys: Vec<&str> = report.iter().map(|b| b.bucket_key.as_str()).collect();
    assert_eq!(keys, vec!["2025-03-14", "2025-03-15"]);
}

// ============================================================================
// TOTALS AND MACRO DISTRIBUTION
// ============================================================================

#[test]
fn test_daily_totals_are_summed() {
    let report = aggregate(&sample_day(Uuid::new_v4()), Granularity::Day);
    let day = report.get("2025-03-14").unwrap();

    assert_eq!(day.entry_count, 2);
    assert_eq!(day.totals.calories, 570.5);
    assert_eq!(day.totals.protein, 40.2);
    assert_eq!(day.totals.carbs, 39.1);
    assert_eq!(day.totals.fat, 25.7);
}

#[test]
fn test_macro_percentages_by_grams() {
    let user_id = Uuid::new_v4();
    let entries = vec![common::entry(
        user_id,
        "Balanced",
        500.0,
        (30.0, 50.0, 20.0),
        Some(common::utc(2025, 3, 14, 12, 0)),
    )];

    let report = aggregate(&entries, Granularity::Day);
    let pct = report.get("2025-03-14").unwrap().macro_percentages;
    assert_eq!(pct.protein_pct, 30.0);
    assert_eq!(pct.carbs_pct, 50.0);
    assert_eq!(pct.fat_pct, 20.0);
}

#[test]
fn test_macro_percentages_sum_to_one_hundred() {
    let user_id = Uuid::new_v4();
    let samples = [
        (1.0, 1.0, 1.0),
        (0.1, 0.2, 0.4),
        (35.2, 12.1, 22.7),
        (99.9, 0.1, 0.0),
        (7.3, 7.3, 7.4),
    ];
    for (i, macros) in samples.into_iter().enumerate() {
        let entries = vec![common::entry(
            user_id,
            &format!("sample-{i}"),
            100.0,
            macros,
            Some(common::utc(2025, 3, 14, 12, 0)),
        )];
        let report = aggregate(&entries, Granularity::Day);
        let pct = report.get("2025-03-14").unwrap().macro_percentages;
        let sum = (pct.protein_pct + pct.carbs_pct + pct.fat_pct).round();
        assert!((sum - 100.0).abs() <= 1.0, "{macros:?} summed to {sum}");
    }
}

#[test]
fn test_zero_macros_yield_zero_percentages() {
    let user_id = Uuid::new_v4();
    let entries = vec![
        common::entry(
            user_id,
            "Black coffee",
            2.0,
            (0.0, 0.0, 0.0),
            Some(common::utc(2025, 3, 14, 8, 0)),
        ),
        common::entry(
            user_id,
            "Water",
            0.0,
            (0.0, 0.0, 0.0),
            Some(common::utc(2025, 3, 14, 9, 0)),
        ),
    ];

    let report = aggregate(&entries, Granularity::Day);
    let pct = report.get("2025-03-14").unwrap().macro_percentages;
    assert_eq!(pct.protein_pct, 0.0);
    assert_eq!(pct.carbs_pct, 0.0);
    assert_eq!(pct.fat_pct, 0.0);
}

// ============================================================================
// SKIPPED ENTRIES AND EMPTY INPUT
// ============================================================================

#[test]
fn test_entry_without_timestamp_is_reported_as_skipped() {
    let user_id = Uuid::new_v4();
    let entries = vec![
        common::entry(
            user_id,
            "Eggs",
            155.0,
            (13.0, 1.1, 11.0),
            Some(common::utc(2025, 3, 14, 8, 0)),
        ),
        common::entry(user_id, "Mystery snack", 300.0, (1.0, 1.0, 1.0), None),
        common::entry(
            user_id,
            "Rice",
            205.0,
            (4.3, 44.5, 0.4),
            Some(common::utc(2025, 3, 14, 13, 0)),
        ),
    ];

    let report = aggregate(&entries, Granularity::Day);

    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].food_name, "Mystery snack");
    assert_eq!(report.skipped[0].reason, SkipReason::MissingTimestamp);
    let day = report.get("2025-03-14").unwrap();
    assert_eq!(day.entry_count, 2);
    assert_eq!(day.totals.calories, 360.0);
}

#[test]
fn test_unparseable_stored_timestamp_is_skipped() {
    let rows = serde_json::json!([
        {"user_id": Uuid::nil(), "food_name": "A", "calories": 100, "meal_type": "lunch",
         "logged_at": "2025-03-14T12:00:00Z"},
        {"user_id": Uuid::nil(), "food_name": "B", "calories": 100, "meal_type": "lunch",
         "logged_at": "not a date"},
        {"user_id": Uuid::nil(), "food_name": "C", "calories": 100, "meal_type": "lunch",
         "logged_at": "2025-03-14T18:00:00.250"}
    ]);
    let entries: Vec<FoodLogEntry> = serde_json::from_value(rows).unwrap();

    let report = aggregate(&entries, Granularity::Day);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.get("2025-03-14").unwrap().totals.calories, 200.0);
}

#[test]
fn test_huge_stored_values_saturate_instead_of_overflowing() {
    let row = serde_json::json!({
        "user_id": Uuid::new_v4(),
        "food_name": "Corrupted import",
        "calories": 1e18,
        "meal_type": "dinner",
        "logged_at": "2025-03-14T19:00:00Z"
    });
    let entries: Vec<FoodLogEntry> = vec![
        serde_json::from_value(row.clone()).unwrap(),
        serde_json::from_value(row).unwrap(),
    ];

    let report = aggregate(&entries, Granularity::Day);

    let bucket = report.get("2025-03-14").unwrap();
    assert_eq!(bucket.entry_count, 2);
    assert!(bucket.totals.calories.is_finite());
    assert!(bucket.totals.calories > 9.0e17);
}

#[test]
fn test_empty_input_yields_empty_report() {
    let report = aggregate(&[], Granularity::Week);
    assert!(report.is_empty());
    assert_eq!(report.skipped_count(), 0);
}

// ============================================================================
// BUCKET KEYS
// ============================================================================

#[test]
fn test_week_numbers_follow_sunday_start_formula() {
    // 2025-01-01 is a Wednesday
    let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
    assert_eq!(week_number(date(1, 1)), 1);
    assert_eq!(week_number(date(1, 4)), 1);
    assert_eq!(week_number(date(1, 5)), 2);
    assert_eq!(week_number(date(3, 14)), 11);
    assert_eq!(week_number(date(12, 31)), 53);
}

#[test]
fn test_bucket_key_formats() {
    let at = common::utc(2025, 3, 4, 10, 0);
    let utc = FixedOffset::east_opt(0).unwrap();
    assert_eq!(bucket_key(at, Granularity::Day, utc), "2025-03-04");
    assert_eq!(bucket_key(at, Granularity::Week, utc), "W10");
    assert_eq!(bucket_key(at, Granularity::Month, utc), "2025-03");
}

#[test]
fn test_monthly_and_weekly_grouping() {
    let user_id = Uuid::new_v4();
    let mut entries = sample_day(user_id);
    // Sunday starts a new week
    entries.push(common::entry(
        user_id,
        "Pancakes",
        350.0,
        (8.0, 55.0, 10.0),
        Some(common::utc(2025, 3, 16, 9, 0)),
    ));

    let report = aggregate(&entries, Granularity::Month);
    assert_eq!(report.buckets.len(), 1);
    assert_eq!(report.get("2025-03").unwrap().entry_count, 4);

    let report = aggregate(&entries, Granularity::Week);
    assert_eq!(report.buckets.len(), 2);
    assert_eq!(report.get("W11").unwrap().entry_count, 3);
    assert_eq!(report.get("W12").unwrap().entry_count, 1);
}

#[test]
fn test_granularity_parsing() {
    assert_eq!("weekly".parse::<Granularity>().unwrap(), Granularity::Week);
    assert_eq!("MONTH".parse::<Granularity>().unwrap(), Granularity::Month);
    assert!("year".parse::<Granularity>().is_err());
}

// ============================================================================
// DAY BOUNDARIES ACROSS A UTC OFFSET
// ============================================================================

#[test]
fn test_midnight_entries_split_by_local_calendar() {
    let user_id = Uuid::new_v4();
    // 23:30 and 00:30 in UTC+02:00
    let late = common::entry(
        user_id,
        "Late snack",
        200.0,
        (5.0, 20.0, 10.0),
        Some(common::utc(2025, 3, 14, 21, 30)),
    );
    let early = common::entry(
        user_id,
        "Early snack",
        100.0,
        (2.0, 10.0, 5.0),
        Some(common::utc(2025, 3, 14, 22, 30)),
    );
    let entries = vec![late, early];

    let utc_report = aggregate(&entries, Granularity::Day);
    assert_eq!(utc_report.buckets.len(), 1);
    assert_eq!(utc_report.get("2025-03-14").unwrap().entry_count, 2);

    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let options = AggregationOptions::default().with_offset(plus_two);
    let local_report = aggregate_with(&entries, Granularity::Day, &options);
    assert_eq!(local_report.buckets.len(), 2);
    assert_eq!(local_report.get("2025-03-14").unwrap().totals.calories, 200.0);
    assert_eq!(local_report.get("2025-03-15").unwrap().totals.calories, 100.0);
}

// ============================================================================
// GOAL PERCENTAGE
// ============================================================================

#[test]
fn test_goal_percentage_present_only_with_goal() {
    let entries = sample_day(Uuid::new_v4());

    let report = aggregate(&entries, Granularity::Day);
    assert!(report.get("2025-03-14").unwrap().goal_percentage.is_none());

    let options = AggregationOptions::default().with_goal(UserGoal::default());
    let report = aggregate_with(&entries, Granularity::Day, &options);
    // 570.5 / 2000
    assert_eq!(report.get("2025-03-14").unwrap().goal_percentage, Some(29.0));
    assert!(report.get("2025-03-15").unwrap().goal_percentage.is_some());
}

#[test]
fn test_goal_percentage_is_not_clamped() {
    let user_id = Uuid::new_v4();
    let entries = vec![common::entry(
        user_id,
        "Feast",
        3000.0,
        (100.0, 300.0, 120.0),
        Some(common::utc(2025, 3, 14, 20, 0)),
    )];
    let options = AggregationOptions::default().with_goal(UserGoal::default());
    let report = aggregate_with(&entries, Granularity::Day, &options);
    assert_eq!(report.get("2025-03-14").unwrap().goal_percentage, Some(150.0));
}

#[test]
fn test_zero_calorie_goal_omits_percentage() {
    let options =
        AggregationOptions::default().with_goal(UserGoal::default().with_calories(0.0));
    let report = aggregate_with(&sample_day(Uuid::new_v4()), Granularity::Day, &options);
    assert!(report.iter().all(|bucket| bucket.goal_percentage.is_none()));
}
