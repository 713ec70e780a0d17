// ABOUTME: In-memory implementation of the food log store backed by tokio RwLocks
// ABOUTME: Assigns ids, fills missing timestamps and applies range, order and limit on query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pierre_nutrition_core::errors::AppResult;
use pierre_nutrition_core::models::{FoodLogEntry, QuickAddItem, UserGoal};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FoodLogStore, LogQuery};

/// Food log store holding everything in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodLogStore {
    entries: Arc<RwLock<Vec<FoodLogEntry>>>,
    goals: Arc<RwLock<HashMap<Uuid, UserGoal>>>,
    quick_add: Arc<RwLock<Vec<QuickAddItem>>>,
}

impl InMemoryFoodLogStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with rows exactly as given, apart from missing ids.
    ///
    /// Unlike `insert`, missing timestamps are kept missing, which mirrors
    /// rows imported from elsewhere.
    #[must_use]
    pub fn with_entries(entries: Vec<FoodLogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.id.get_or_insert_with(Uuid::new_v4);
                entry
            })
            .collect();
        Self {
            entries: Arc::new(RwLock::new(entries)),
            ..Self::default()
        }
    }

    /// Number of stored entries across all users
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entry is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FoodLogStore for InMemoryFoodLogStore {
    async fn insert(&self, mut entry: FoodLogEntry) -> AppResult<Uuid> {
        let id = *entry.id.get_or_insert_with(Uuid::new_v4);
        entry.logged_at.get_or_insert_with(Utc::now);
        self.entries.write().await.push(entry);
        Ok(id)
    }

    async fn query(&self, user_id: Uuid, query: &LogQuery) -> AppResult<Vec<FoodLogEntry>> {
        let mut matching: Vec<FoodLogEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|entry| entry.user_id == user_id && query.matches(entry))
            .cloned()
            .collect();
        // Newest first; entries without a timestamp sort last
        matching.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        if let Some(limit) = query.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn get_user_goal(&self, user_id: Uuid) -> AppResult<Option<UserGoal>> {
        Ok(self.goals.read().await.get(&user_id).copied())
    }

    async fn set_user_goal(&self, user_id: Uuid, goal: UserGoal) -> AppResult<()> {
        self.goals.write().await.insert(user_id, goal);
        Ok(())
    }

    async fn quick_add_items(&self, user_id: Uuid) -> AppResult<Vec<QuickAddItem>> {
        let mut items: Vec<QuickAddItem> = self
            .quick_add
            .read()
            .await
            .iter()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.display_order);
        Ok(items)
    }

    async fn save_quick_add_item(&self, mut item: QuickAddItem) -> AppResult<Uuid> {
        let id = *item.id.get_or_insert_with(Uuid::new_v4);
        let mut items = self.quick_add.write().await;
        items.retain(|existing| existing.id != Some(id));
        items.push(item);
        Ok(id)
    }

    async fn delete_quick_add_item(&self, user_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let mut items = self.quick_add.write().await;
        let before = items.len();
        items.retain(|item| !(item.user_id == user_id && item.id == Some(item_id)));
        Ok(items.len() < before)
    }
}
