// ABOUTME: Tests for the log normalizer building persistence-ready food log entries
// ABOUTME: Covers unit defaulting, value sanitizing, timestamps and quick-add entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

use pierre_nutrition::models::{FoodLogEntry, MealType, QuickAddItem, ScaledNutrients};
use pierre_nutrition::pipeline::{from_quick_add, to_log_entry, LogMeta};
use uuid::Uuid;

mod common;

fn scaled(unit: &str) -> ScaledNutrients {
    ScaledNutrients {
        calories: 95.0,
        protein: 0.5,
        carbs: 25.0,
        fat: 0.3,
        fiber: 4.4,
        portion_size: 1.0,
        portion_unit: unit.to_owned(),
    }
}

fn meta(user_id: Uuid) -> LogMeta {
    LogMeta {
        user_id,
        meal_type: MealType::Breakfast,
        food_name: "  apple ".to_owned(),
        food_external_id: None,
        logged_at: None,
    }
}

#[test]
fn test_missing_unit_defaults_to_serving() {
    let entry = to_log_entry(scaled(""), meta(Uuid::new_v4()));
    assert_eq!(entry.portion_unit, "serving");

    let entry = to_log_entry(scaled("   "), meta(Uuid::new_v4()));
    assert_eq!(entry.portion_unit, "serving");
}

#[test]
fn test_provider_unit_is_kept() {
    let entry = to_log_entry(scaled("medium"), meta(Uuid::new_v4()));
    assert_eq!(entry.portion_unit, "medium");
}

#[test]
fn test_entry_carries_metadata_and_trims_name() {
    let user_id = Uuid::new_v4();
    let entry = to_log_entry(scaled("medium"), meta(user_id));

    assert_eq!(entry.user_id, user_id);
    assert_eq!(entry.food_name, "apple");
    assert_eq!(entry.meal_type, MealType::Breakfast);
    assert!(entry.id.is_none());
    assert!(entry.logged_at.is_none());
    assert_eq!(entry.fiber, 4.4);
}

#[test]
fn test_explicit_timestamp_is_kept() {
    let at = common::utc(2025, 3, 14, 8, 30);
    let entry = to_log_entry(scaled("medium"), meta(Uuid::new_v4()).at(at));
    assert_eq!(entry.logged_at, Some(at));
}

#[test]
fn test_non_finite_and_negative_values_sanitized() {
    let nutrients = ScaledNutrients {
        calories: f64::NAN,
        protein: -1.0,
        carbs: f64::INFINITY,
        fat: 2.0,
        fiber: 0.0,
        portion_size: f64::NAN,
        portion_unit: "g".to_owned(),
    };
    let entry = to_log_entry(nutrients, meta(Uuid::new_v4()));

    assert_eq!(entry.calories, 0.0);
    assert_eq!(entry.protein, 0.0);
    assert_eq!(entry.carbs, 0.0);
    assert_eq!(entry.fat, 2.0);
    assert_eq!(entry.fiber, 0.0);
    assert_eq!(entry.portion_size, 0.0);
}

#[test]
fn test_quick_add_entry_has_calories_only() {
    let user_id = Uuid::new_v4();
    let item = QuickAddItem {
        id: Some(Uuid::new_v4()),
        user_id,
        food_name: "Coffee with milk".to_owned(),
        food_external_id: None,
        calories: 45.0,
        display_order: 0,
    };
    let at = common::utc(2025, 3, 14, 7, 0);

    let entry = from_quick_add(&item, MealType::Breakfast, Some(at));

    assert_eq!(entry.user_id, user_id);
    assert_eq!(entry.calories, 45.0);
    assert_eq!(entry.protein, 0.0);
    assert_eq!(entry.carbs, 0.0);
    assert_eq!(entry.fat, 0.0);
    assert_eq!(entry.fiber, 0.0);
    assert_eq!(entry.portion_size, 1.0);
    assert_eq!(entry.portion_unit, "serving");
    assert_eq!(entry.logged_at, Some(at));
}

#[test]
fn test_stored_rows_decode_leniently() {
    let rows = serde_json::json!([
        {
            "user_id": Uuid::nil(),
            "food_name": "Toast",
            "calories": "80.5",
            "protein": 3,
            "portion_unit": "slice",
            "meal_type": "breakfast",
            "logged_at": "2025-03-14 07:15:00"
        },
        {
            "user_id": Uuid::nil(),
            "food_name": "Tea",
            "meal_type": "snack",
            "logged_at": "yesterday"
        }
    ]);

    let entries: Vec<FoodLogEntry> = serde_json::from_value(rows).unwrap();

    assert_eq!(entries[0].calories, 80.5);
    assert_eq!(entries[0].carbs, 0.0);
    assert_eq!(entries[0].logged_at, Some(common::utc(2025, 3, 14, 7, 15)));
    assert!(entries[1].logged_at.is_none());
    assert!(entries[1].portion_unit.is_empty());
}

#[test]
fn test_meal_type_parsing() {
    assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
    assert!("brunch".parse::<MealType>().is_err());
}
