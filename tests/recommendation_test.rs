// ABOUTME: Tests for Mifflin-St Jeor calorie goal recommendations
// ABOUTME: Covers BMR, activity factors, weight goals, unit conversion and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

use pierre_nutrition::pipeline::recommendation::{inches_to_cm, pounds_to_kg};
use pierre_nutrition::pipeline::{
    calculate_bmr, recommend_calorie_goal, ActivityLevel, BodyMetrics, Gender, PipelineError,
    WeightGoal,
};

fn reference_male() -> BodyMetrics {
    BodyMetrics {
        weight_kg: 70.0,
        height_cm: 175.0,
        age: 30,
        gender: Gender::Male,
    }
}

// ============================================================================
// BMR
// ============================================================================

#[test]
fn test_bmr_male() {
    // 10 * 70 + 6.25 * 175 - 5 * 30 + 5
    assert_eq!(calculate_bmr(&reference_male()).unwrap(), 1648.75);
}

#[test]
fn test_bmr_female() {
    let metrics = BodyMetrics {
        weight_kg: 60.0,
        height_cm: 165.0,
        age: 25,
        gender: Gender::Female,
    };
    // 10 * 60 + 6.25 * 165 - 5 * 25 - 161
    assert_eq!(calculate_bmr(&metrics).unwrap(), 1345.25);
}

// ============================================================================
// RECOMMENDED GOAL
// ============================================================================

#[test]
fn test_weight_goal_adjustments() {
    let metrics = reference_male();
    let activity = ActivityLevel::LightlyActive;

    assert_eq!(
        recommend_calorie_goal(&metrics, activity, WeightGoal::Maintain).unwrap(),
        2267.0
    );
    assert_eq!(
        recommend_calorie_goal(&metrics, activity, WeightGoal::Lose).unwrap(),
        2017.0
    );
    assert_eq!(
        recommend_calorie_goal(&metrics, activity, WeightGoal::Gain).unwrap(),
        2517.0
    );
}

#[test]
fn test_activity_factors_increase_goal() {
    let metrics = reference_male();
    let levels = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];
    let goals: Vec<f64> = levels
        .iter()
        .map(|level| recommend_calorie_goal(&metrics, *level, WeightGoal::Maintain).unwrap())
        .collect();

    assert!(goals.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(goals[4], 3133.0);
}

#[test]
fn test_result_is_whole_kcal() {
    let metrics = BodyMetrics {
        weight_kg: 63.4,
        height_cm: 171.2,
        age: 41,
        gender: Gender::Female,
    };
    let goal =
        recommend_calorie_goal(&metrics, ActivityLevel::ModeratelyActive, WeightGoal::Lose)
            .unwrap();
    assert_eq!(goal, goal.round());
}

// ============================================================================
// UNITS AND VALIDATION
// ============================================================================

#[test]
fn test_imperial_conversion() {
    assert!((pounds_to_kg(154.0) - 69.853_168).abs() < 1e-6);
    assert!((inches_to_cm(69.0) - 175.26).abs() < 1e-9);

    let metrics = BodyMetrics::from_imperial(154.0, 69.0, 30, Gender::Male);
    assert!((metrics.weight_kg - 69.853_168).abs() < 1e-6);
    assert!((metrics.height_cm - 175.26).abs() < 1e-9);
}

#[test]
fn test_out_of_range_metrics_rejected() {
    let mut metrics = reference_male();
    metrics.weight_kg = 0.0;
    assert_eq!(
        calculate_bmr(&metrics).unwrap_err(),
        PipelineError::InvalidBodyMetric {
            field: "weight_kg",
            value: 0.0
        }
    );

    let mut metrics = reference_male();
    metrics.height_cm = f64::NAN;
    assert!(matches!(
        calculate_bmr(&metrics),
        Err(PipelineError::InvalidBodyMetric {
            field: "height_cm",
            ..
        })
    ));

    let mut metrics = reference_male();
    metrics.age = 5;
    assert!(matches!(
        recommend_calorie_goal(&metrics, ActivityLevel::Sedentary, WeightGoal::Maintain),
        Err(PipelineError::InvalidBodyMetric { field: "age", .. })
    ));
}

#[test]
fn test_enum_parsing() {
    assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!(
        "moderately-active".parse::<ActivityLevel>().unwrap(),
        ActivityLevel::ModeratelyActive
    );
    assert_eq!("gain".parse::<WeightGoal>().unwrap(), WeightGoal::Gain);
    assert!("couch".parse::<ActivityLevel>().is_err());
}
