// ABOUTME: Environment-based configuration for providers, goals and aggregation
// ABOUTME: Typed parsing of environment variables with documented defaults and strict validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment configuration
//!
//! Absent variables take their defaults. Present but malformed variables are
//! configuration errors rather than silent defaults. Blank values count as
//! absent.

use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;
use pierre_nutrition_core::constants::{default_goal, providers};
use pierre_nutrition_core::errors::{AppError, AppResult, ErrorCode};
use pierre_nutrition_core::models::UserGoal;
use pierre_nutrition_pipeline::AggregationOptions;
use pierre_nutrition_providers::{FatSecretConfig, HttpClientConfig, NutritionixConfig};
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct NutritionConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Shared HTTP client timeouts
    pub http: HttpClientConfig,
    /// Nutritionix credentials, when configured
    pub nutritionix: Option<NutritionixConfig>,
    /// FatSecret credentials, when configured
    pub fatsecret: Option<FatSecretConfig>,
    /// Default number of search results
    pub search_limit: usize,
    /// Goal applied to users who have not set one
    pub default_goal: UserGoal,
    /// Calendar offset used for day, week and month buckets
    pub bucket_utc_offset: FixedOffset,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            http: HttpClientConfig::default(),
            nutritionix: None,
            fatsecret: None,
            search_limit: providers::DEFAULT_SEARCH_LIMIT,
            default_goal: UserGoal::default(),
            bucket_utc_offset: AggregationOptions::default().utc_offset,
        }
    }
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn lookup_value(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_optional<T>(lookup: Lookup<'_>, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup_value(lookup, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::config(format!("{key}={raw} is invalid: {e}")))
        })
        .transpose()
}

fn parse_or<T>(lookup: Lookup<'_>, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

fn credential_pair(
    lookup: Lookup<'_>,
    id_key: &'static str,
    secret_key: &'static str,
) -> AppResult<Option<(String, String)>> {
    match (lookup_value(lookup, id_key), lookup_value(lookup, secret_key)) {
        (Some(id), Some(secret)) => Ok(Some((id, secret))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(AppError::new(
            ErrorCode::ConfigMissing,
            format!("{secret_key} must be set together with {id_key}"),
        )),
        (None, Some(_)) => Err(AppError::new(
            ErrorCode::ConfigMissing,
            format!("{id_key} must be set together with {secret_key}"),
        )),
    }
}

fn parse_goal(lookup: Lookup<'_>) -> AppResult<UserGoal> {
    let goal = UserGoal {
        calories: parse_or(lookup, "NUTRITION_DEFAULT_CALORIES", default_goal::CALORIES)?,
        protein: parse_or(lookup, "NUTRITION_DEFAULT_PROTEIN", default_goal::PROTEIN_G)?,
        carbs: parse_or(lookup, "NUTRITION_DEFAULT_CARBS", default_goal::CARBS_G)?,
        fat: parse_or(lookup, "NUTRITION_DEFAULT_FAT", default_goal::FAT_G)?,
        fiber: parse_optional(lookup, "NUTRITION_DEFAULT_FIBER")?,
    };
    let targets = [goal.calories, goal.protein, goal.carbs, goal.fat];
    if targets
        .iter()
        .chain(goal.fiber.iter())
        .any(|target| !target.is_finite() || *target < 0.0)
    {
        return Err(AppError::config(
            "NUTRITION_DEFAULT_* goal targets must be non-negative numbers",
        ));
    }
    Ok(goal)
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn parse_offset(lookup: Lookup<'_>) -> AppResult<FixedOffset> {
    let minutes: i32 = parse_or(lookup, "NUTRITION_BUCKET_UTC_OFFSET_MINUTES", 0)?;
    offset_from_minutes(minutes).ok_or_else(|| {
        AppError::config(format!(
            "NUTRITION_BUCKET_UTC_OFFSET_MINUTES={minutes} is outside -1439..=1439"
        ))
    })
}

impl NutritionConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is malformed or a
    /// provider credential pair is incomplete
    pub fn from_env() -> AppResult<Self> {
        let config = Self::from_lookup(&|key| env::var(key).ok())?;
        info!(
            environment = %config.environment,
            nutritionix = config.nutritionix.is_some(),
            fatsecret = config.fatsecret.is_some(),
            utc_offset = %config.bucket_utc_offset,
            "Nutrition configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any value is malformed or a provider
    /// credential pair is incomplete
    pub fn from_lookup(lookup: Lookup<'_>) -> AppResult<Self> {
        let environment = lookup_value(lookup, "ENVIRONMENT")
            .map_or_else(Environment::default, |raw| {
                Environment::from_str_or_default(&raw)
            });

        let nutritionix = credential_pair(lookup, "NUTRITIONIX_APP_ID", "NUTRITIONIX_APP_KEY")?
            .map(|(app_id, app_key)| {
                let mut config = NutritionixConfig::new(app_id, app_key);
                if let Some(base_url) = lookup_value(lookup, "NUTRITIONIX_BASE_URL") {
                    config.base_url = base_url;
                }
                config
            });

        let fatsecret =
            credential_pair(lookup, "FATSECRET_CLIENT_ID", "FATSECRET_CLIENT_SECRET")?.map(
                |(client_id, client_secret)| {
                    let mut config = FatSecretConfig::new(client_id, client_secret);
                    if let Some(token_url) = lookup_value(lookup, "FATSECRET_TOKEN_URL") {
                        config.token_url = token_url;
                    }
                    if let Some(base_url) = lookup_value(lookup, "FATSECRET_BASE_URL") {
                        config.base_url = base_url;
                    }
                    config
                },
            );

        let http_defaults = HttpClientConfig::default();
        let http = HttpClientConfig {
            timeout_secs: parse_or(
                lookup,
                "NUTRITION_HTTP_TIMEOUT_SECS",
                http_defaults.timeout_secs,
            )?,
            connect_timeout_secs: parse_or(
                lookup,
                "NUTRITION_HTTP_CONNECT_TIMEOUT_SECS",
                http_defaults.connect_timeout_secs,
            )?,
        };

        let search_limit = parse_or(
            lookup,
            "NUTRITION_SEARCH_LIMIT",
            providers::DEFAULT_SEARCH_LIMIT,
        )?;
        if search_limit == 0 {
            return Err(AppError::config("NUTRITION_SEARCH_LIMIT must be at least 1"));
        }

        Ok(Self {
            environment,
            http,
            nutritionix,
            fatsecret,
            search_limit,
            default_goal: parse_goal(lookup)?,
            bucket_utc_offset: parse_offset(lookup)?,
        })
    }

    /// Aggregation options using the configured calendar offset
    #[must_use]
    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions::default().with_offset(self.bucket_utc_offset)
    }

    /// Bucket offset for one request: an explicit override in minutes, else
    /// the configured offset
    ///
    /// # Errors
    ///
    /// Returns invalid input if the override is outside -1439..=1439 minutes
    pub fn bucket_offset(&self, override_minutes: Option<i32>) -> AppResult<FixedOffset> {
        override_minutes.map_or(Ok(self.bucket_utc_offset), |minutes| {
            offset_from_minutes(minutes).ok_or_else(|| {
                AppError::invalid_input(format!(
                    "UTC offset of {minutes} minutes is outside -1439..=1439"
                ))
            })
        })
    }
}
