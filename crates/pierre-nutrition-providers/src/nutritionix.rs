// ABOUTME: Nutritionix Track API client authenticated with app id and key headers
// ABOUTME: Instant search, natural-language nutrients for common foods and branded item lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutritionix Track API client
//!
//! Instant search returns two lists: `common` (generic foods, identified by
//! name) and `branded` (packaged foods, identified by `nix_item_id`). Details
//! for common foods come from `POST /natural/nutrients`, details for branded
//! foods from `GET /search/item`.
//!
//! # API Reference
//! <https://docx.syndigo.com/developers/docs/nutritionix-api-guide>

use async_trait::async_trait;
use pierre_nutrition_core::errors::{ProviderError, ProviderResult};
use pierre_nutrition_core::models::{
    lenient, FlatNutrientPayload, FoodSummary, ProviderKind, ProviderPayload,
};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::NutritionixConfig;
use crate::core::{
    invalid_response, read_json, searchable_query, transport_error, FoodDataProvider,
};
use crate::http_client::shared_client;

const KIND: ProviderKind = ProviderKind::Nutritionix;

#[derive(Debug, Deserialize)]
struct InstantFood {
    #[serde(default, deserialize_with = "lenient::text")]
    food_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    nix_item_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::positive_quantity")]
    serving_qty: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    serving_unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::positive_quantity")]
    nf_calories: Option<f64>,
}

impl InstantFood {
    fn serving_text(&self) -> Option<String> {
        let unit = self.serving_unit.as_deref()?;
        Some(self.serving_qty.map_or_else(|| unit.to_owned(), |qty| format!("{qty} {unit}")))
    }

    fn into_common(self) -> Option<FoodSummary> {
        let description = self.serving_text();
        let name = self.food_name?;
        Some(FoodSummary {
            id: name.clone(),
            name,
            brand: None,
            description,
            branded: false,
            provider: KIND,
        })
    }

    fn into_branded(self) -> Option<FoodSummary> {
        let description = match (self.nf_calories, self.serving_text()) {
            (Some(calories), Some(serving)) => Some(format!("{calories} kcal per {serving}")),
            (Some(calories), None) => Some(format!("{calories} kcal")),
            (None, serving) => serving,
        };
        Some(FoodSummary {
            id: self.nix_item_id?,
            name: self.food_name?,
            brand: self.brand_name,
            description,
            branded: true,
            provider: KIND,
        })
    }
}

fn decode_list(body: &Value, key: &str) -> Vec<InstantFood> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| InstantFood::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Decode a `/search/instant` body: common foods first, then branded
#[must_use]
pub fn parse_instant_search(body: &Value, limit: usize) -> Vec<FoodSummary> {
    let common = decode_list(body, "common")
        .into_iter()
        .filter_map(InstantFood::into_common);
    let branded = decode_list(body, "branded")
        .into_iter()
        .filter_map(InstantFood::into_branded);
    common.chain(branded).take(limit).collect()
}

/// First entry of a `{"foods": [...]}` body
///
/// # Errors
///
/// `NotFound` if the list is empty or absent, `InvalidResponse` if the entry
/// does not decode
pub fn parse_first_food(body: &Value, lookup: &str) -> ProviderResult<FlatNutrientPayload> {
    let Some(food) = body
        .get("foods")
        .and_then(Value::as_array)
        .and_then(|foods| foods.first())
    else {
        return Err(ProviderError::NotFound {
            provider: KIND.to_string(),
            id: lookup.to_owned(),
        });
    };
    FlatNutrientPayload::deserialize(food).map_err(|e| invalid_response(KIND, e))
}

/// Nutritionix Track API client
pub struct NutritionixClient {
    config: NutritionixConfig,
    http: Client,
}

impl NutritionixClient {
    /// Client using the shared HTTP client
    #[must_use]
    pub fn new(config: NutritionixConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Client using a caller-provided HTTP client
    #[must_use]
    pub fn with_http_client(config: NutritionixConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("x-app-id", &self.config.app_id)
            .header("x-app-key", &self.config.app_key)
    }

    async fn send(&self, request: RequestBuilder) -> ProviderResult<Value> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| transport_error(KIND, &e))?;
        read_json(KIND, response).await
    }

    /// `GET /search/instant`
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on network, authentication or decode failure
    pub async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<FoodSummary>> {
        let Some(query) = searchable_query(query) else {
            return Ok(Vec::new());
        };
        let url = format!("{}/search/instant", self.config.base_url);
        let body = self
            .send(self.http.get(&url).query(&[("query", query)]))
            .await?;
        let foods = parse_instant_search(&body, limit);
        debug!(provider = %KIND, results = foods.len(), "Search response parsed");
        Ok(foods)
    }

    /// `POST /natural/nutrients` for a free-text food description
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing matched, otherwise a `ProviderError` on network,
    /// authentication or decode failure
    pub async fn natural_nutrients(&self, query: &str) -> ProviderResult<FlatNutrientPayload> {
        let url = format!("{}/natural/nutrients", self.config.base_url);
        let body = self
            .send(self.http.post(&url).json(&json!({ "query": query })))
            .await?;
        parse_first_food(&body, query)
    }

    /// `GET /search/item` for a branded food
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, otherwise a `ProviderError` on network,
    /// authentication or decode failure
    pub async fn branded_item(&self, nix_item_id: &str) -> ProviderResult<FlatNutrientPayload> {
        let url = format!("{}/search/item", self.config.base_url);
        let body = self
            .send(self.http.get(&url).query(&[("nix_item_id", nix_item_id)]))
            .await?;
        parse_first_food(&body, nix_item_id)
    }
}

#[async_trait]
impl FoodDataProvider for NutritionixClient {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    async fn search_foods(&self, query: &str, limit: usize) -> ProviderResult<Vec<FoodSummary>> {
        self.search(query, limit).await
    }

    async fn food_details(&self, food: &FoodSummary) -> ProviderResult<ProviderPayload> {
        let payload = if food.branded {
            self.branded_item(&food.id).await?
        } else {
            self.natural_nutrients(&food.name).await?
        };
        Ok(ProviderPayload::Flat(payload))
    }
}
