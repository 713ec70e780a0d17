// ABOUTME: Food data provider implementations for Nutritionix and FatSecret
// ABOUTME: Provider trait, OAuth2 token cache, shared HTTP client and an in-memory mock provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food data provider clients and core abstractions.
//!
//! Each provider exposes food search and a details lookup returning the
//! provider's own payload shape. Turning that payload into a canonical
//! record is the pipeline's job, not the client's.

pub use pierre_nutrition_core::constants;
pub use pierre_nutrition_core::errors;
pub use pierre_nutrition_core::models;

/// Provider credentials and endpoints
pub mod config;
/// Core provider trait and shared response handling
pub mod core;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// In-memory provider seeded with sample foods
pub mod mock;
/// Access token cache for OAuth2 client-credentials providers
pub mod token_cache;

/// FatSecret Platform API client (OAuth2 client credentials)
#[cfg(feature = "provider-fatsecret")]
pub mod fatsecret;
/// Nutritionix Track API client (API key headers)
#[cfg(feature = "provider-nutritionix")]
pub mod nutritionix;

pub use config::{FatSecretConfig, NutritionixConfig};
pub use core::{searchable_query, FoodDataProvider};
pub use http_client::{initialize_shared_client, shared_client, HttpClientConfig};
pub use mock::MockFoodProvider;
pub use token_cache::{AccessToken, TokenCache, TokenState};

#[cfg(feature = "provider-fatsecret")]
pub use fatsecret::FatSecretClient;
#[cfg(feature = "provider-nutritionix")]
pub use nutritionix::NutritionixClient;
