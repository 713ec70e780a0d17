// ABOUTME: Food log persistence contract consumed by the nutrition services
// ABOUTME: Insert and query log entries, read and write goals, manage quick-add shortcuts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory store for tests, the CLI and single-process deployments
pub mod memory;

pub use memory::InMemoryFoodLogStore;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};
use pierre_nutrition_core::errors::{AppError, AppResult};
use pierre_nutrition_core::models::{FoodLogEntry, QuickAddItem, UserGoal};
use uuid::Uuid;

/// Time window and size cap for a log query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Inclusive lower bound on `logged_at`
    pub start: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `logged_at`
    pub end: Option<DateTime<Utc>>,
    /// Maximum number of entries, newest first
    pub limit: Option<usize>,
}

impl LogQuery {
    /// Every entry of the user
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Entries in `[start, end)`
    #[must_use]
    pub const fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            limit: None,
        }
    }

    /// The `limit` most recent entries
    #[must_use]
    pub const fn recent(limit: usize) -> Self {
        Self {
            start: None,
            end: None,
            limit: Some(limit),
        }
    }

    /// Entries on one calendar day of `offset`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the day cannot be represented in UTC
    pub fn for_day(date: NaiveDate, offset: FixedOffset) -> AppResult<Self> {
        let start = date
            .and_time(NaiveTime::MIN)
            .and_local_timezone(offset)
            .single()
            .map(|start| start.with_timezone(&Utc))
            .ok_or_else(|| AppError::internal(format!("{date} has no start in {offset}")))?;
        Ok(Self::between(start, start + TimeDelta::days(1)))
    }

    /// Whether an entry falls inside the window.
    ///
    /// Entries without a timestamp only match unbounded queries.
    #[must_use]
    pub fn matches(&self, entry: &FoodLogEntry) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        entry.logged_at.is_some_and(|logged_at| {
            self.start.is_none_or(|start| logged_at >= start)
                && self.end.is_none_or(|end| logged_at < end)
        })
    }
}

/// Backing store for food logs, goals and quick-add shortcuts
#[async_trait]
pub trait FoodLogStore: Send + Sync {
    /// Persist an entry, assigning its id and filling `logged_at` when absent
    ///
    /// # Errors
    ///
    /// Returns a storage error if the entry cannot be written
    async fn insert(&self, entry: FoodLogEntry) -> AppResult<Uuid>;

    /// Entries of a user matching `query`, newest first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the entries cannot be read
    async fn query(&self, user_id: Uuid, query: &LogQuery) -> AppResult<Vec<FoodLogEntry>>;

    /// Stored goal of a user, `None` when never set
    ///
    /// # Errors
    ///
    /// Returns a storage error if the goal cannot be read
    async fn get_user_goal(&self, user_id: Uuid) -> AppResult<Option<UserGoal>>;

    /// Replace the goal of a user
    ///
    /// # Errors
    ///
    /// Returns a storage error if the goal cannot be written
    async fn set_user_goal(&self, user_id: Uuid, goal: UserGoal) -> AppResult<()>;

    /// Quick-add shortcuts of a user in display order
    ///
    /// # Errors
    ///
    /// Returns a storage error if the shortcuts cannot be read
    async fn quick_add_items(&self, user_id: Uuid) -> AppResult<Vec<QuickAddItem>>;

    /// Persist a quick-add shortcut, assigning its id
    ///
    /// # Errors
    ///
    /// Returns a storage error if the shortcut cannot be written
    async fn save_quick_add_item(&self, item: QuickAddItem) -> AppResult<Uuid>;

    /// Remove a quick-add shortcut owned by `user_id`; `false` when there was none
    ///
    /// # Errors
    ///
    /// Returns a storage error if the shortcut cannot be removed
    async fn delete_quick_add_item(&self, user_id: Uuid, item_id: Uuid) -> AppResult<bool>;
}
