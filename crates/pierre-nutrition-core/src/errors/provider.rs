// ABOUTME: Error types for food data provider clients
// ABOUTME: Configuration, transport, authentication, status and decode failures with retry hints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Failures reaching or decoding an external food data provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Credentials or endpoints for the provider are not configured
    #[error("{provider} is not configured: {reason}")]
    NotConfigured {
        /// Provider name
        provider: String,
        /// What is missing
        reason: String,
    },

    /// Network failure or timeout
    #[error("{provider} is unavailable: {reason}")]
    Unavailable {
        /// Provider name
        provider: String,
        /// Transport error text
        reason: String,
    },

    /// Provider rejected our credentials or token
    #[error("{provider} authentication failed: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Provider message
        reason: String,
    },

    /// Provider answered with a non-success status
    #[error("{provider} returned HTTP {status}: {body}")]
    HttpStatus {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body (truncated by the caller)
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("{provider} response could not be parsed: {reason}")]
    InvalidResponse {
        /// Provider name
        provider: String,
        /// Decoder message
        reason: String,
    },

    /// Requested food does not exist upstream
    #[error("{provider} has no food matching {id}")]
    NotFound {
        /// Provider name
        provider: String,
        /// Requested identifier or query
        id: String,
    },
}

impl ProviderError {
    /// Whether a caller could reasonably retry the request later.
    ///
    /// The pipeline itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::NotConfigured { .. }
            | Self::AuthenticationFailed { .. }
            | Self::InvalidResponse { .. }
            | Self::NotFound { .. } => false,
        }
    }

    /// Name of the provider that produced the error
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::NotConfigured { provider, .. }
            | Self::Unavailable { provider, .. }
            | Self::AuthenticationFailed { provider, .. }
            | Self::HttpStatus { provider, .. }
            | Self::InvalidResponse { provider, .. }
            | Self::NotFound { provider, .. } => provider,
        }
    }
}

/// Result alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
