// ABOUTME: Explicit access token cache for OAuth2 client-credentials providers
// ABOUTME: Empty or valid-until-expiry states with a refresh margin before expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use pierre_nutrition_core::constants::providers::TOKEN_REFRESH_MARGIN_SECS;

/// Bearer token and the instant the provider stops accepting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Bearer token value
    pub value: String,
    /// Provider-side expiry
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Token issued at `now` that lives for `expires_in_secs`
    #[must_use]
    pub fn from_expires_in(value: String, expires_in_secs: i64, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: now + Duration::seconds(expires_in_secs),
        }
    }
}

/// Cache lifecycle: `Empty -> Valid(expiry) -> refresh on expiry`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenState {
    /// No token fetched yet, or the last one was invalidated
    #[default]
    Empty,
    /// Token believed valid until its expiry
    Valid(AccessToken),
}

/// Token cache owned by a provider client
#[derive(Debug, Clone)]
pub struct TokenCache {
    state: TokenState,
    refresh_margin: Duration,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(Duration::seconds(TOKEN_REFRESH_MARGIN_SECS))
    }
}

impl TokenCache {
    /// Empty cache that treats tokens as stale `refresh_margin` before expiry
    #[must_use]
    pub fn new(refresh_margin: Duration) -> Self {
        Self {
            state: TokenState::Empty,
            refresh_margin,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &TokenState {
        &self.state
    }

    /// Token usable at `now`, if any
    #[must_use]
    pub fn valid_token(&self, now: DateTime<Utc>) -> Option<&str> {
        match &self.state {
            TokenState::Valid(token) if now + self.refresh_margin < token.expires_at => {
                Some(token.value.as_str())
            }
            TokenState::Valid(_) | TokenState::Empty => None,
        }
    }

    /// Whether a new token must be fetched before the next call
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.valid_token(now).is_none()
    }

    /// Replace the cached token
    pub fn store(&mut self, token: AccessToken) {
        self.state = TokenState::Valid(token);
    }

    /// Forget the cached token, e.g. after the provider rejected it
    pub fn invalidate(&mut self) {
        self.state = TokenState::Empty;
    }
}
