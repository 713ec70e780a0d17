// ABOUTME: Connection settings for the Nutritionix and FatSecret clients
// ABOUTME: Credentials and endpoints with production defaults, independent of enabled features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_nutrition_core::constants::providers::{
    FATSECRET_BASE_URL, FATSECRET_SCOPE, FATSECRET_TOKEN_URL, NUTRITIONIX_BASE_URL,
};

/// Nutritionix client configuration
#[derive(Debug, Clone)]
pub struct NutritionixConfig {
    /// Application id sent as `x-app-id`
    pub app_id: String,
    /// Application key sent as `x-app-key`
    pub app_key: String,
    /// API base URL
    pub base_url: String,
}

impl NutritionixConfig {
    /// Production endpoint with the given credentials
    #[must_use]
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: NUTRITIONIX_BASE_URL.to_owned(),
        }
    }
}

/// FatSecret client configuration
#[derive(Debug, Clone)]
pub struct FatSecretConfig {
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Token endpoint
    pub token_url: String,
    /// REST endpoint
    pub base_url: String,
    /// Requested scope
    pub scope: String,
}

impl FatSecretConfig {
    /// Production endpoints with the given credentials
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: FATSECRET_TOKEN_URL.to_owned(),
            base_url: FATSECRET_BASE_URL.to_owned(),
            scope: FATSECRET_SCOPE.to_owned(),
        }
    }
}
