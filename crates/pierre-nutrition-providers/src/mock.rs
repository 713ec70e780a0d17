// ABOUTME: In-memory food data provider for tests and offline use
// ABOUTME: Seeded with sample foods in both payload shapes, no network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pierre_nutrition_core::errors::{ProviderError, ProviderResult};
use pierre_nutrition_core::models::{
    FatSecretServing, FlatNutrientPayload, FoodSummary, NestedServingPayload, ProviderKind,
    ProviderPayload, ServingList,
};

use crate::core::{searchable_query, FoodDataProvider};

/// Provider answering from a fixed list of foods
pub struct MockFoodProvider {
    kind: ProviderKind,
    foods: Vec<(FoodSummary, ProviderPayload)>,
    detail_calls: AtomicUsize,
}

impl MockFoodProvider {
    /// Empty provider reporting `kind`
    #[must_use]
    pub const fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            foods: Vec::new(),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Add a food
    #[must_use]
    pub fn with_food(mut self, summary: FoodSummary, payload: ProviderPayload) -> Self {
        self.foods.push((summary, payload));
        self
    }

    /// Number of `food_details` calls served
    #[must_use]
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::Relaxed)
    }

    /// Flat-shape provider with an apple and a branded protein bar
    #[must_use]
    pub fn nutritionix() -> Self {
        let kind = ProviderKind::Nutritionix;
        Self::new(kind)
            .with_food(
                summary(kind, "apple", "apple", None),
                ProviderPayload::Flat(FlatNutrientPayload {
                    food_name: Some("apple".to_owned()),
                    nf_calories: 95.0,
                    nf_protein: 0.5,
                    nf_total_carbohydrate: 25.0,
                    nf_total_fat: 0.3,
                    nf_dietary_fiber: 4.4,
                    serving_qty: Some(1.0),
                    serving_unit: Some("medium".to_owned()),
                    ..FlatNutrientPayload::default()
                }),
            )
            .with_food(
                summary(kind, "51c3d4f097c3e6d8d3b4a1b2", "Protein Bar", Some("Acme")),
                ProviderPayload::Flat(FlatNutrientPayload {
                    food_name: Some("Protein Bar".to_owned()),
                    brand_name: Some("Acme".to_owned()),
                    nix_item_id: Some("51c3d4f097c3e6d8d3b4a1b2".to_owned()),
                    nf_calories: 210.0,
                    nf_protein: 20.0,
                    nf_total_carbohydrate: 23.0,
                    nf_total_fat: 7.0,
                    nf_dietary_fiber: 3.0,
                    serving_qty: Some(1.0),
                    serving_unit: Some("bar".to_owned()),
                }),
            )
    }

    /// Nested-shape provider with a per-100g apple and a banana
    #[must_use]
    pub fn fatsecret() -> Self {
        let kind = ProviderKind::FatSecret;
        Self::new(kind)
            .with_food(
                summary(kind, "35718", "Apples", None),
                ProviderPayload::Nested(NestedServingPayload {
                    food_id: Some("35718".to_owned()),
                    food_name: Some("Apples".to_owned()),
                    brand_name: None,
                    servings: ServingList::from_servings(vec![
                        FatSecretServing {
                            serving_description: Some("1 medium (3\" dia)".to_owned()),
                            calories: 95.0,
                            protein: 0.47,
                            carbohydrate: 25.13,
                            fat: 0.31,
                            fiber: 4.4,
                            number_of_units: Some(1.0),
                            measurement_description: Some("medium (3\" dia)".to_owned()),
                            ..FatSecretServing::default()
                        },
                        FatSecretServing {
                            serving_description: Some("100 g".to_owned()),
                            is_default: true,
                            calories: 52.0,
                            protein: 0.26,
                            carbohydrate: 13.81,
                            fat: 0.17,
                            fiber: 2.4,
                            number_of_units: Some(100.0),
                            measurement_description: Some("g".to_owned()),
                            ..FatSecretServing::default()
                        },
                    ]),
                }),
            )
            .with_food(
                summary(kind, "35755", "Bananas", None),
                ProviderPayload::Nested(NestedServingPayload {
                    food_id: Some("35755".to_owned()),
                    food_name: Some("Bananas".to_owned()),
                    brand_name: None,
                    servings: ServingList::from_servings(vec![FatSecretServing {
                        calories: 105.0,
                        protein: 1.29,
                        carbohydrate: 26.95,
                        fat: 0.39,
                        fiber: 3.1,
                        number_of_units: Some(1.0),
                        measurement_description: Some("medium".to_owned()),
                        ..FatSecretServing::default()
                    }]),
                }),
            )
    }
}

fn summary(kind: ProviderKind, id: &str, name: &str, brand: Option<&str>) -> FoodSummary {
    FoodSummary {
        id: id.to_owned(),
        name: name.to_owned(),
        brand: brand.map(str::to_owned),
        description: None,
        branded: brand.is_some(),
        provider: kind,
    }
}

#[async_trait]
impl FoodDataProvider for MockFoodProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn search_foods(&self, query: &str, limit: usize) -> ProviderResult<Vec<FoodSummary>> {
        let Some(query) = searchable_query(query) else {
            return Ok(Vec::new());
        };
        let needle = query.to_lowercase();
        Ok(self
            .foods
            .iter()
            .filter(|(summary, _)| summary.name.to_lowercase().contains(&needle))
            .map(|(summary, _)| summary.clone())
            .take(limit)
            .collect())
    }

    async fn food_details(&self, food: &FoodSummary) -> ProviderResult<ProviderPayload> {
        self.detail_calls.fetch_add(1, Ordering::Relaxed);
        self.foods
            .iter()
            .find(|(summary, _)| summary.id == food.id)
            .map(|(_, payload)| payload.clone())
            .ok_or_else(|| ProviderError::NotFound {
                provider: self.kind.to_string(),
                id: food.id.clone(),
            })
    }
}
