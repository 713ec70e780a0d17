// ABOUTME: FatSecret Platform API client with OAuth2 client-credentials authentication
// ABOUTME: foods.search and food.get.v2 calls, token caching and in-body error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! FatSecret Platform API client
//!
//! Authentication uses the OAuth2 client-credentials grant. The access token
//! lives in a [`TokenCache`] owned by the client and is refreshed shortly
//! before it expires, or immediately after the API rejects it.
//!
//! FatSecret reports some failures inside a `200 OK` body as
//! `{"error": {"code": N, "message": "..."}}`. Codes 13 and 14 mean the
//! token is invalid or expired.
//!
//! # API Reference
//! <https://platform.fatsecret.com/docs/guides>

use async_trait::async_trait;
use chrono::Utc;
use pierre_nutrition_core::errors::{ProviderError, ProviderResult};
use pierre_nutrition_core::models::{
    lenient, FoodSummary, NestedServingPayload, ProviderKind, ProviderPayload,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::FatSecretConfig;
use crate::core::{
    invalid_response, one_or_many, read_json, searchable_query, transport_error,
    FoodDataProvider,
};
use crate::http_client::shared_client;
use crate::token_cache::{AccessToken, TokenCache};

const KIND: ProviderKind = ProviderKind::FatSecret;
const TOKEN_ERROR_CODES: [i64; 2] = [13, 14];

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct SearchFood {
    #[serde(default, deserialize_with = "lenient::text")]
    food_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    food_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    food_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    food_type: Option<String>,
}

/// Decode a `foods.search` body into summaries, skipping hits without id or name
#[must_use]
pub fn parse_search_response(body: &Value, limit: usize) -> Vec<FoodSummary> {
    one_or_many(body.get("foods").and_then(|foods| foods.get("food")))
        .into_iter()
        .filter_map(|item| SearchFood::deserialize(item).ok())
        .filter_map(|food| {
            Some(FoodSummary {
                id: food.food_id?,
                name: food.food_name?,
                branded: food.food_type.as_deref() == Some("Brand") || food.brand_name.is_some(),
                brand: food.brand_name,
                description: food.food_description,
                provider: KIND,
            })
        })
        .take(limit)
        .collect()
}

/// Decode a `food.get.v2` body
///
/// # Errors
///
/// `NotFound` if the body has no `food` object, `InvalidResponse` if it does
/// not decode
pub fn parse_food_response(body: Value, food_id: &str) -> ProviderResult<NestedServingPayload> {
    let Some(food) = body.get("food").filter(|food| food.is_object()) else {
        return Err(ProviderError::NotFound {
            provider: KIND.to_string(),
            id: food_id.to_owned(),
        });
    };
    NestedServingPayload::deserialize(food).map_err(|e| invalid_response(KIND, e))
}

/// FatSecret Platform API client
pub struct FatSecretClient {
    config: FatSecretConfig,
    http: Client,
    tokens: Mutex<TokenCache>,
}

impl FatSecretClient {
    /// Client using the shared HTTP client
    #[must_use]
    pub fn new(config: FatSecretConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Client using a caller-provided HTTP client
    #[must_use]
    pub fn with_http_client(config: FatSecretConfig, http: Client) -> Self {
        Self {
            config,
            http,
            tokens: Mutex::new(TokenCache::default()),
        }
    }

    async fn access_token(&self) -> ProviderResult<String> {
        let mut tokens = self.tokens.lock().await;
        let now = Utc::now();
        if let Some(token) = tokens.valid_token(now) {
            return Ok(token.to_owned());
        }

        debug!(provider = %KIND, "Requesting FatSecret access token");
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.config.scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error(KIND, &e))?;

        let status = response.status();
        if status.is_client_error() {
            let reason = response.text().await.unwrap_or_default();
            warn!(
                provider = %KIND,
                status = status.as_u16(),
                "FatSecret rejected client credentials"
            );
            return Err(ProviderError::AuthenticationFailed {
                provider: KIND.to_string(),
                reason,
            });
        }

        let body = read_json(KIND, response).await?;
        let token: TokenResponse =
            serde_json::from_value(body).map_err(|e| invalid_response(KIND, e))?;
        let access = AccessToken::from_expires_in(token.access_token, token.expires_in, now);
        let value = access.value.clone();
        info!(
            provider = %KIND,
            expires_at = %access.expires_at,
            "FatSecret access token refreshed"
        );
        tokens.store(access);
        Ok(value)
    }

    async fn invalidate_token(&self) {
        self.tokens.lock().await.invalidate();
    }

    async fn call(&self, params: &[(&str, &str)]) -> ProviderResult<Value> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(&self.config.base_url)
            .bearer_auth(&token)
            .query(params)
            .query(&[("format", "json")])
            .send()
            .await
            .map_err(|e| transport_error(KIND, &e))?;

        let body = match read_json(KIND, response).await {
            Err(error @ ProviderError::AuthenticationFailed { .. }) => {
                self.invalidate_token().await;
                return Err(error);
            }
            other => other?,
        };

        if let Some(error) = body.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_owned();
            if TOKEN_ERROR_CODES.contains(&code) {
                self.invalidate_token().await;
                return Err(ProviderError::AuthenticationFailed {
                    provider: KIND.to_string(),
                    reason: message,
                });
            }
            return Err(invalid_response(KIND, format!("error {code}: {message}")));
        }
        Ok(body)
    }

    /// `foods.search`
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on network, authentication or decode failure
    pub async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<FoodSummary>> {
        let Some(query) = searchable_query(query) else {
            return Ok(Vec::new());
        };
        let max_results = limit.to_string();
        let body = self
            .call(&[
                ("method", "foods.search"),
                ("search_expression", query),
                ("max_results", &max_results),
            ])
            .await?;
        let foods = parse_search_response(&body, limit);
        debug!(provider = %KIND, results = foods.len(), "Search response parsed");
        Ok(foods)
    }

    /// `food.get.v2`
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, otherwise a `ProviderError` on network,
    /// authentication or decode failure
    pub async fn food_by_id(&self, food_id: &str) -> ProviderResult<NestedServingPayload> {
        let body = self
            .call(&[("method", "food.get.v2"), ("food_id", food_id)])
            .await?;
        parse_food_response(body, food_id)
    }
}

#[async_trait]
impl FoodDataProvider for FatSecretClient {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    async fn search_foods(&self, query: &str, limit: usize) -> ProviderResult<Vec<FoodSummary>> {
        self.search(query, limit).await
    }

    async fn food_details(&self, food: &FoodSummary) -> ProviderResult<ProviderPayload> {
        self.food_by_id(&food.id).await.map(ProviderPayload::Nested)
    }
}
