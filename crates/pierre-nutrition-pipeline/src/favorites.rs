// ABOUTME: Ranks previously logged foods for one-tap re-logging
// ABOUTME: Groups by provider id or case-folded name, ordered by frequency then recency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pierre_nutrition_core::models::FoodLogEntry;
use serde::{Deserialize, Serialize};

/// A frequently logged food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteFood {
    /// Name as most recently logged
    pub food_name: String,
    /// Provider identifier, if logged from a provider
    pub food_external_id: Option<String>,
    /// How many entries matched
    pub times_logged: usize,
    /// Most recent log time
    pub last_logged_at: Option<DateTime<Utc>>,
    /// Most recent entry, usable as a template for a new log
    pub template: FoodLogEntry,
}

fn favorite_key(entry: &FoodLogEntry) -> String {
    entry
        .food_external_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map_or_else(
            || format!("name:{}", entry.food_name.trim().to_lowercase()),
            |id| format!("id:{id}"),
        )
}

/// Most logged foods first, ties broken by most recent log then name
#[must_use]
pub fn favorite_foods(entries: &[FoodLogEntry], limit: usize) -> Vec<FavoriteFood> {
    let mut grouped: HashMap<String, FavoriteFood> = HashMap::new();

    for entry in entries {
        grouped
            .entry(favorite_key(entry))
            .and_modify(|favorite| {
                favorite.times_logged += 1;
                if entry.logged_at > favorite.last_logged_at {
                    favorite.last_logged_at = entry.logged_at;
                    favorite.food_name.clone_from(&entry.food_name);
                    favorite.template = entry.clone();
                }
            })
            .or_insert_with(|| FavoriteFood {
                food_name: entry.food_name.clone(),
                food_external_id: entry.food_external_id.clone(),
                times_logged: 1,
                last_logged_at: entry.logged_at,
                template: entry.clone(),
            });
    }

    let mut favorites: Vec<FavoriteFood> = grouped.into_values().collect();
    favorites.sort_by(|a, b| {
        b.times_logged
            .cmp(&a.times_logged)
            .then_with(|| b.last_logged_at.cmp(&a.last_logged_at))
            .then_with(|| a.food_name.cmp(&b.food_name))
    });
    favorites.truncate(limit);
    favorites
}
