// ABOUTME: Registry mapping provider kinds to configured food data provider clients
// ABOUTME: Builds real clients from configuration according to enabled cargo features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use pierre_nutrition_core::errors::{AppResult, ProviderError};
use pierre_nutrition_core::models::ProviderKind;
use pierre_nutrition_providers::{initialize_shared_client, FoodDataProvider};
use tracing::{debug, info, warn};

use crate::config::NutritionConfig;

/// Food data providers available to the services, keyed by kind
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn FoodDataProvider>>,
}

impl ProviderRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the provider for its kind
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn FoodDataProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Add or replace the provider for its kind
    pub fn register(&mut self, provider: Arc<dyn FoodDataProvider>) {
        let kind = provider.kind();
        if self.providers.insert(kind, provider).is_some() {
            debug!(provider = %kind, "Replaced registered food data provider");
        }
    }

    /// Provider for a kind
    ///
    /// # Errors
    ///
    /// Returns a configuration-missing error if no provider of that kind is registered
    pub fn get(&self, kind: ProviderKind) -> AppResult<Arc<dyn FoodDataProvider>> {
        self.providers.get(&kind).cloned().ok_or_else(|| {
            ProviderError::NotConfigured {
                provider: kind.to_string(),
                reason: "no credentials configured".to_owned(),
            }
            .into()
        })
    }

    /// Registered kinds in stable order
    #[must_use]
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.providers.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Build real clients for every provider with credentials in `config`
    #[must_use]
    pub fn from_config(config: &NutritionConfig) -> Self {
        if !initialize_shared_client(config.http) {
            debug!("Shared HTTP client already initialized");
        }

        let mut registry = Self::new();

        if let Some(nutritionix) = &config.nutritionix {
            #[cfg(feature = "provider-nutritionix")]
            registry.register(Arc::new(
                pierre_nutrition_providers::NutritionixClient::new(nutritionix.clone()),
            ));
            #[cfg(not(feature = "provider-nutritionix"))]
            warn!(
                base_url = %nutritionix.base_url,
                "Nutritionix credentials present but provider-nutritionix feature is disabled"
            );
        }

        if let Some(fatsecret) = &config.fatsecret {
            #[cfg(feature = "provider-fatsecret")]
            registry.register(Arc::new(pierre_nutrition_providers::FatSecretClient::new(
                fatsecret.clone(),
            )));
            #[cfg(not(feature = "provider-fatsecret"))]
            warn!(
                base_url = %fatsecret.base_url,
                "FatSecret credentials present but provider-fatsecret feature is disabled"
            );
        }

        if registry.providers.is_empty() {
            warn!("No food data provider configured; search is unavailable");
        } else {
            info!(providers = ?registry.kinds(), "Food data providers registered");
        }
        registry
    }
}
