// ABOUTME: Nutrition constants shared across the pipeline, providers and services
// ABOUTME: Default goals, rounding precision, goal tier thresholds and provider defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

/// Default daily targets applied when a user has not set a goal
pub mod default_goal {
    /// Daily calories (kcal)
    pub const CALORIES: f64 = 2000.0;
    /// Daily protein (g)
    pub const PROTEIN_G: f64 = 100.0;
    /// Daily carbohydrates (g)
    pub const CARBS_G: f64 = 200.0;
    /// Daily fat (g)
    pub const FAT_G: f64 = 65.0;
}

/// Rounding and unit defaults for logged portions
pub mod portion {
    /// Scaled nutrients are stored with this many tenths per unit (one decimal place)
    pub const TENTHS_PER_UNIT: f64 = 10.0;
    /// Unit used when a provider does not name one
    pub const DEFAULT_UNIT: &str = "serving";
    /// Serving quantity used when a provider omits it or reports a non-positive value
    pub const DEFAULT_SERVING_QUANTITY: f64 = 1.0;
    /// Smallest multiplier offered to UI callers
    pub const MIN_MULTIPLIER: f64 = 0.5;
    /// Largest multiplier offered to UI callers
    pub const MAX_MULTIPLIER: f64 = 3.0;
    /// Multiplier increment offered to UI callers
    pub const MULTIPLIER_STEP: f64 = 0.1;
}

/// Goal progress thresholds (percent of target)
pub mod goal_tiers {
    /// Below this percentage a metric is `low`
    pub const NEAR_THRESHOLD_PCT: f64 = 50.0;
    /// At or above this percentage a metric is `met`
    pub const MET_THRESHOLD_PCT: f64 = 80.0;
    /// Upper bound used when classifying over-goal intake
    pub const MAX_TIER_PCT: f64 = 100.0;
}

/// Food data provider defaults
pub mod providers {
    /// Nutritionix API base URL
    pub const NUTRITIONIX_BASE_URL: &str = "https://trackapi.nutritionix.com/v2";
    /// FatSecret OAuth2 token endpoint
    pub const FATSECRET_TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";
    /// FatSecret REST endpoint
    pub const FATSECRET_BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";
    /// OAuth2 scope requested from FatSecret
    pub const FATSECRET_SCOPE: &str = "basic";
    /// Seconds before expiry at which a cached access token is refreshed
    pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
    /// Searches shorter than this many characters are not sent upstream
    pub const MIN_QUERY_CHARS: usize = 2;
    /// Default number of search results returned
    pub const DEFAULT_SEARCH_LIMIT: usize = 10;
}

/// Favorites and quick-add defaults
pub mod favorites {
    /// Number of favorite foods returned when the caller does not specify
    pub const DEFAULT_LIMIT: usize = 6;
    /// Most recent entries considered when ranking favorites
    pub const SCAN_LIMIT: usize = 500;
}
