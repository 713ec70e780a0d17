// ABOUTME: Core food data provider trait and shared response handling
// ABOUTME: Search and details contract, query gating, status mapping and JSON decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use pierre_nutrition_core::constants::providers::MIN_QUERY_CHARS;
use pierre_nutrition_core::errors::{ProviderError, ProviderResult};
use pierre_nutrition_core::models::{FoodSummary, ProviderKind, ProviderPayload};
use reqwest::{Response, StatusCode};
use serde_json::Value;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// A searchable source of food nutrient data
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Which provider this is
    fn kind(&self) -> ProviderKind;

    /// Search foods by name.
    ///
    /// Queries shorter than two characters return an empty list without
    /// contacting the provider.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on network, authentication or decode failure
    async fn search_foods(&self, query: &str, limit: usize) -> ProviderResult<Vec<FoodSummary>>;

    /// Fetch the full nutrient payload for a search hit
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if the provider has no such food, or
    /// another `ProviderError` on network, authentication or decode failure
    async fn food_details(&self, food: &FoodSummary) -> ProviderResult<ProviderPayload>;
}

/// Trimmed query if it is long enough to send upstream
#[must_use]
pub fn searchable_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (trimmed.chars().count() >= MIN_QUERY_CHARS).then_some(trimmed)
}

/// Map a transport failure
#[must_use]
pub fn transport_error(kind: ProviderKind, error: &reqwest::Error) -> ProviderError {
    ProviderError::Unavailable {
        provider: kind.to_string(),
        reason: error.to_string(),
    }
}

/// Map a decode failure
#[must_use]
pub fn invalid_response(kind: ProviderKind, reason: impl ToString) -> ProviderError {
    ProviderError::InvalidResponse {
        provider: kind.to_string(),
        reason: reason.to_string(),
    }
}

/// Check the status and decode the body as JSON
///
/// # Errors
///
/// `AuthenticationFailed` for 401/403, `HttpStatus` for other non-success
/// statuses, `Unavailable` if the body cannot be read and `InvalidResponse`
/// if it is not JSON
pub async fn read_json(kind: ProviderKind, response: Response) -> ProviderResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::AuthenticationFailed {
                    provider: kind.to_string(),
                    reason: format!("HTTP {}: {body}", status.as_u16()),
                }
            }
            _ => ProviderError::HttpStatus {
                provider: kind.to_string(),
                status: status.as_u16(),
                body,
            },
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| transport_error(kind, &e))?;
    serde_json::from_str(&text).map_err(|e| invalid_response(kind, format!("JSON parse error: {e}")))
}

/// Items of a field that is a single object or an array of objects
#[must_use]
pub fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => Vec::new(),
    }
}
