// ABOUTME: Unified error handling for the nutrition platform
// ABOUTME: AppError with standard error codes plus pipeline and provider error conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! - `PipelineError` - Rejections raised by the pure pipeline stages
//! - `ProviderError` - Failures talking to external food data providers
//! - `AppError` - Application-level error carrying an `ErrorCode`

/// Errors raised by the pure normalization and aggregation stages
pub mod pipeline;
/// Errors raised by food data provider clients
pub mod provider;

pub use pipeline::PipelineError;
pub use provider::{ProviderError, ProviderResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used across the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request input failed validation
    InvalidInput,
    /// A required field was absent
    MissingRequiredField,
    /// A numeric value was outside its accepted range
    ValueOutOfRange,
    /// Requested resource does not exist
    ResourceNotFound,
    /// External provider returned an error
    ExternalServiceError,
    /// External provider could not be reached
    ExternalServiceUnavailable,
    /// External provider rejected our credentials
    ExternalAuthFailed,
    /// Configuration value is malformed
    ConfigError,
    /// Required configuration is missing
    ConfigMissing,
    /// Backing store failure
    StorageError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status code a presentation layer should use for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,
            Self::ResourceNotFound => 404,
            Self::ExternalServiceError | Self::ExternalAuthFailed => 502,
            Self::ExternalServiceUnavailable => 503,
            Self::ConfigError
            | Self::ConfigMissing
            | Self::StorageError
            | Self::InternalError => 500,
        }
    }

    /// Short human-readable description of the error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::MissingRequiredField => "Missing required field",
            Self::ValueOutOfRange => "Value out of range",
            Self::ResourceNotFound => "Resource not found",
            Self::ExternalServiceError => "External service error",
            Self::ExternalServiceUnavailable => "External service unavailable",
            Self::ExternalAuthFailed => "External authentication failed",
            Self::ConfigError => "Configuration error",
            Self::ConfigMissing => "Configuration missing",
            Self::StorageError => "Storage error",
            Self::InternalError => "Internal error",
        }
    }
}

/// Application error with a stable code and a caller-facing message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .code.description())]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Detail message
    pub message: String,
}

/// Result alias used by the application layer
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an error with an explicit code
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Request input failed validation
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Requested resource does not exist
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, resource)
    }

    /// External provider failure
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {}", message.into()),
        )
    }

    /// Malformed configuration value
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Backing store failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Unexpected internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// HTTP status a presentation layer should use
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl From<PipelineError> for AppError {
    fn from(error: PipelineError) -> Self {
        let code = match &error {
            PipelineError::MissingField { .. } => ErrorCode::MissingRequiredField,
            PipelineError::InvalidPortion { .. } | PipelineError::InvalidBodyMetric { .. } => {
                ErrorCode::ValueOutOfRange
            }
            PipelineError::UnrecognizedPayload { .. }
            | PipelineError::InvalidMealType(_)
            | PipelineError::InvalidGranularity(_) => ErrorCode::InvalidInput,
        };
        Self::new(code, error.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::NotConfigured { .. } => ErrorCode::ConfigMissing,
            ProviderError::Unavailable { .. } => ErrorCode::ExternalServiceUnavailable,
            ProviderError::AuthenticationFailed { .. } => ErrorCode::ExternalAuthFailed,
            ProviderError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ProviderError::HttpStatus { .. } | ProviderError::InvalidResponse { .. } => {
                ErrorCode::ExternalServiceError
            }
        };
        Self::new(code, error.to_string())
    }
}
