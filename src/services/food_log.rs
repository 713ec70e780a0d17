// ABOUTME: Food logging service from provider search to a stored log entry
// ABOUTME: Runs adapt, scale and normalize around provider calls and store writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pierre_nutrition_core::constants::favorites;
use pierre_nutrition_core::constants::providers::DEFAULT_SEARCH_LIMIT;
use pierre_nutrition_core::errors::{AppError, AppResult};
use pierre_nutrition_core::models::{
    FoodLogEntry, FoodSummary, MealType, ProviderKind, ProviderPayload, QuickAddItem,
};
use pierre_nutrition_pipeline::{
    adapt, favorite_foods, from_quick_add, scale, to_log_entry, FavoriteFood, LogMeta,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::providers::ProviderRegistry;
use crate::store::{FoodLogStore, LogQuery};

/// Who logs what, how much of it, and when
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogFoodRequest {
    /// Owner of the new entry
    pub user_id: Uuid,
    /// Portion multiplier applied to the per-serving values
    pub multiplier: f64,
    /// Meal the food was eaten at
    pub meal_type: MealType,
    /// Explicit log time; the current time when absent
    pub logged_at: Option<DateTime<Utc>>,
}

impl LogFoodRequest {
    /// One serving logged now
    #[must_use]
    pub fn new(user_id: Uuid, meal_type: MealType) -> Self {
        Self {
            user_id,
            multiplier: 1.0,
            meal_type,
            logged_at: None,
        }
    }

    /// Use a portion multiplier
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Log at an explicit time
    #[must_use]
    pub fn at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = Some(logged_at);
        self
    }
}

/// Food search and logging on top of a provider registry and a log store
#[derive(Clone)]
pub struct FoodLogService {
    providers: ProviderRegistry,
    store: Arc<dyn FoodLogStore>,
    search_limit: usize,
}

impl FoodLogService {
    /// Service using the default search limit
    #[must_use]
    pub fn new(providers: ProviderRegistry, store: Arc<dyn FoodLogStore>) -> Self {
        Self {
            providers,
            store,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Override the number of results returned when callers give no limit
    #[must_use]
    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit.max(1);
        self
    }

    /// Search foods on one provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not configured or the search fails
    pub async fn search(
        &self,
        kind: ProviderKind,
        query: &str,
        limit: Option<usize>,
    ) -> AppResult<Vec<FoodSummary>> {
        let provider = self.providers.get(kind)?;
        let limit = limit.unwrap_or(self.search_limit);
        let results = provider.search_foods(query, limit).await?;
        info!(provider = %kind, query = %query.trim(), results = results.len(), "Food search completed");
        Ok(results)
    }

    /// Fetch details for a search hit and log a portion of it
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unavailable, the payload lacks a
    /// name, the multiplier is invalid, or the store rejects the entry
    pub async fn log_food(
        &self,
        food: &FoodSummary,
        request: &LogFoodRequest,
    ) -> AppResult<FoodLogEntry> {
        let provider = self.providers.get(food.provider)?;
        let payload = provider.food_details(food).await?;
        debug!(provider = %food.provider, food_id = %food.id, "Fetched food details");
        self.log_payload(&payload, request).await
    }

    /// Log a portion of a payload already in hand
    ///
    /// # Errors
    ///
    /// Returns an error if the payload lacks a name, the multiplier is
    /// invalid, or the store rejects the entry
    pub async fn log_payload(
        &self,
        payload: &ProviderPayload,
        request: &LogFoodRequest,
    ) -> AppResult<FoodLogEntry> {
        let record = adapt(payload)?;
        let scaled = scale(&record, request.multiplier)?;
        let meta = LogMeta::for_record(&record, request.user_id, request.meal_type)
            .at(request.logged_at.unwrap_or_else(Utc::now));
        let entry = to_log_entry(scaled, meta);
        self.persist(entry).await
    }

    /// Log one serving of a saved quick-add shortcut
    ///
    /// # Errors
    ///
    /// Returns not-found if the user has no shortcut with that id, or a
    /// storage error
    pub async fn log_quick_add(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        meal_type: MealType,
    ) -> AppResult<FoodLogEntry> {
        let item = self
            .store
            .quick_add_items(user_id)
            .await?
            .into_iter()
            .find(|item| item.id == Some(item_id))
            .ok_or_else(|| AppError::not_found(format!("Quick-add item {item_id}")))?;
        let entry = from_quick_add(&item, meal_type, Some(Utc::now()));
        self.persist(entry).await
    }

    /// Save a quick-add shortcut at the end of the user's list
    ///
    /// # Errors
    ///
    /// Returns invalid input for a blank name or non-positive calories, or a
    /// storage error
    pub async fn save_quick_add(
        &self,
        user_id: Uuid,
        food_name: &str,
        calories: f64,
        food_external_id: Option<String>,
    ) -> AppResult<QuickAddItem> {
        let food_name = food_name.trim();
        if food_name.is_empty() {
            return Err(AppError::invalid_input("Quick-add food name is required"));
        }
        if !calories.is_finite() || calories <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "Quick-add calories must be positive, got {calories}"
            )));
        }
        let display_order = self
            .store
            .quick_add_items(user_id)
            .await?
            .iter()
            .map(|existing| existing.display_order.saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut item = QuickAddItem {
            id: None,
            user_id,
            food_name: food_name.to_owned(),
            food_external_id,
            calories,
            display_order,
        };
        item.id = Some(self.store.save_quick_add_item(item.clone()).await?);
        Ok(item)
    }

    /// Delete one of the user's quick-add shortcuts
    ///
    /// # Errors
    ///
    /// Returns not-found if the user has no shortcut with that id, or a
    /// storage error
    pub async fn delete_quick_add(&self, user_id: Uuid, item_id: Uuid) -> AppResult<()> {
        if !self.store.delete_quick_add_item(user_id, item_id).await? {
            return Err(AppError::not_found(format!("Quick-add item {item_id}")));
        }
        info!(user_id = %user_id, item_id = %item_id, "Quick-add item deleted");
        Ok(())
    }

    /// Saved quick-add shortcuts in display order
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn quick_add_items(&self, user_id: Uuid) -> AppResult<Vec<QuickAddItem>> {
        self.store.quick_add_items(user_id).await
    }

    /// Most frequently logged foods among the user's recent history
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn favorites(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> AppResult<Vec<FavoriteFood>> {
        let history = self
            .store
            .query(user_id, &LogQuery::recent(favorites::SCAN_LIMIT))
            .await?;
        Ok(favorite_foods(
            &history,
            limit.unwrap_or(favorites::DEFAULT_LIMIT),
        ))
    }

    /// The user's most recent entries, newest first
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn recent(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<FoodLogEntry>> {
        self.store.query(user_id, &LogQuery::recent(limit)).await
    }

    async fn persist(&self, mut entry: FoodLogEntry) -> AppResult<FoodLogEntry> {
        entry.logged_at.get_or_insert_with(Utc::now);
        let id = self.store.insert(entry.clone()).await?;
        entry.id = Some(id);
        info!(
            user_id = %entry.user_id,
            food = %entry.food_name,
            meal_type = %entry.meal_type,
            calories = entry.calories,
            "Food logged"
        );
        Ok(entry)
    }
}
