// ABOUTME: Source adapter converting provider payloads into canonical nutrient records
// ABOUTME: Handles flat Nutritionix fields and nested FatSecret servings exhaustively
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_nutrition_core::constants::portion::DEFAULT_SERVING_QUANTITY;
use pierre_nutrition_core::errors::PipelineError;
use pierre_nutrition_core::models::{
    FlatNutrientPayload, NestedServingPayload, NutrientRecord, ProviderPayload,
};
use serde_json::Value;

/// Convert a decoded provider payload into a `NutrientRecord`.
///
/// Numeric fields were already coerced during decoding: missing or malformed
/// values are `0`, a missing serving quantity is `1`, and a missing unit is
/// left empty for the normalizer to default.
///
/// # Errors
///
/// Returns `PipelineError::MissingField` if the payload has no food name
pub fn adapt(payload: &ProviderPayload) -> Result<NutrientRecord, PipelineError> {
    match payload {
        ProviderPayload::Flat(flat) => adapt_flat(flat),
        ProviderPayload::Nested(nested) => adapt_nested(nested),
    }
}

/// Decode a raw JSON payload and adapt it in one step
///
/// # Errors
///
/// Returns `PipelineError::UnrecognizedPayload` for non-object input and
/// `PipelineError::MissingField` if the food name is absent
pub fn adapt_value(value: Value) -> Result<NutrientRecord, PipelineError> {
    adapt(&ProviderPayload::from_value(value)?)
}

fn required_name(name: Option<&str>) -> Result<String, PipelineError> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .ok_or(PipelineError::MissingField { field: "food_name" })
}

fn adapt_flat(flat: &FlatNutrientPayload) -> Result<NutrientRecord, PipelineError> {
    Ok(NutrientRecord {
        name: required_name(flat.food_name.as_deref())?,
        external_id: flat.nix_item_id.clone(),
        calories_per_serving: flat.nf_calories,
        protein_per_serving: flat.nf_protein,
        carbs_per_serving: flat.nf_total_carbohydrate,
        fat_per_serving: flat.nf_total_fat,
        fiber_per_serving: flat.nf_dietary_fiber,
        serving_quantity: flat.serving_qty.unwrap_or(DEFAULT_SERVING_QUANTITY),
        serving_unit: flat.serving_unit.clone().unwrap_or_default(),
    })
}

fn adapt_nested(nested: &NestedServingPayload) -> Result<NutrientRecord, PipelineError> {
    let name = required_name(nested.food_name.as_deref())?;
    let serving = nested.servings.preferred();
    Ok(NutrientRecord {
        name,
        external_id: nested.food_id.clone(),
        calories_per_serving: serving.calories,
        protein_per_serving: serving.protein,
        carbs_per_serving: serving.carbohydrate,
        fat_per_serving: serving.fat,
        fiber_per_serving: serving.fiber,
        serving_quantity: serving
            .number_of_units
            .unwrap_or(DEFAULT_SERVING_QUANTITY),
        serving_unit: serving.measurement_description.clone().unwrap_or_default(),
    })
}
