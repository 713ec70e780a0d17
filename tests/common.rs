// ABOUTME: Shared test utilities for nutrition pipeline and service integration tests
// ABOUTME: Builders for log entries, records and timestamps plus quiet logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_nutrition`

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use pierre_nutrition::models::{FoodLogEntry, MealType, NutrientRecord};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// UTC timestamp from calendar parts
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

/// Log entry with the given macros, logged at `logged_at`
pub fn entry(
    user_id: Uuid,
    food_name: &str,
    calories: f64,
    macros: (f64, f64, f64),
    logged_at: Option<DateTime<Utc>>,
) -> FoodLogEntry {
    let (protein, carbs, fat) = macros;
    FoodLogEntry {
        id: None,
        user_id,
        food_name: food_name.to_owned(),
        food_external_id: None,
        calories,
        protein,
        carbs,
        fat,
        fiber: 0.0,
        portion_size: 1.0,
        portion_unit: "serving".to_owned(),
        meal_type: MealType::Lunch,
        logged_at,
    }
}

/// Apple per 100 g
pub fn apple_per_100g() -> NutrientRecord {
    NutrientRecord {
        name: "Apple".to_owned(),
        external_id: Some("35718".to_owned()),
        calories_per_serving: 52.0,
        protein_per_serving: 0.26,
        carbs_per_serving: 13.81,
        fat_per_serving: 0.17,
        fiber_per_serving: 2.4,
        serving_quantity: 100.0,
        serving_unit: "g".to_owned(),
    }
}

/// Float comparison at one-hundredth precision
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}
