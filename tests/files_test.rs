// ABOUTME: Tests for reading food log exports and provider payloads from disk
// ABOUTME: Accepted entry file shapes, lenient fields and rejection of malformed files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use pierre_nutrition::errors::ErrorCode;
use pierre_nutrition::files::{read_entries, read_payload};
use pierre_nutrition::models::{MealType, ProviderKind};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const ENTRY: &str = r#"{
    "user_id": "7d9f3c1e-2b4a-4c5d-8e6f-0a1b2c3d4e5f",
    "food_name": "Greek yogurt",
    "calories": "146",
    "protein": 20,
    "meal_type": "breakfast",
    "logged_at": "2025-03-14T07:15:00Z"
}"#;

#[test]
fn test_reads_plain_array_and_wrapped_object() {
    let dir = TempDir::new().unwrap();
    let array = write(&dir, "array.json", &format!("[{ENTRY}]"));
    let wrapped = write(&dir, "wrapped.json", &format!(r#"{{"entries": [{ENTRY}, {ENTRY}]}}"#));

    let entries = read_entries(&array).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].food_name, "Greek yogurt");
    assert!((entries[0].calories - 146.0).abs() < f64::EPSILON);
    assert_eq!(entries[0].meal_type, MealType::Breakfast);
    assert!(entries[0].logged_at.is_some());

    assert_eq!(read_entries(&wrapped).unwrap().len(), 2);
}

#[test]
fn test_unparseable_timestamp_becomes_absent() {
    let dir = TempDir::new().unwrap();
    let entry = ENTRY.replace("2025-03-14T07:15:00Z", "last tuesday");
    let path = write(&dir, "entries.json", &format!("[{entry}]"));

    let entries = read_entries(&path).unwrap();
    assert!(entries[0].logged_at.is_none());
}

#[test]
fn test_rejects_malformed_files() {
    let dir = TempDir::new().unwrap();
    let cases = [
        write(&dir, "broken.json", "[{"),
        write(&dir, "object.json", r#"{"items": []}"#),
        write(&dir, "no_user.json", r#"[{"food_name": "Toast", "meal_type": "breakfast"}]"#),
        dir.path().join("missing.json"),
    ];
    for path in cases {
        let error = read_entries(&path).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput, "{}", path.display());
    }
}

#[test]
fn test_reads_both_payload_shapes() {
    let dir = TempDir::new().unwrap();
    let flat = write(
        &dir,
        "flat.json",
        r#"{"food_name": "Banana", "nf_calories": 105, "serving_qty": 1, "serving_unit": "medium"}"#,
    );
    let nested = write(
        &dir,
        "nested.json",
        r#"{"food_name": "Rice", "servings": {"serving": {"calories": "206", "metric_serving_amount": "158"}}}"#,
    );

    assert_eq!(read_payload(&flat).unwrap().kind(), ProviderKind::Nutritionix);
    assert_eq!(read_payload(&nested).unwrap().kind(), ProviderKind::FatSecret);

    let not_object = write(&dir, "list.json", "[1, 2]");
    assert_eq!(
        read_payload(&not_object).unwrap_err().code,
        ErrorCode::InvalidInput
    );
}
