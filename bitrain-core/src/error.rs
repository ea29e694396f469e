// SPDX-License-Identifier: MIT
//
// Bitrain: Binary Stream Sidebar Engine
// Copyright (c) 2025 Bitrain Contributors

//! Error types for the Bitrain system
//!
//! Provides a unified error taxonomy using `thiserror` for ergonomic error handling.
//! Stream generation itself never fails; errors only arise at the edges
//! (configuration, parsing fixtures, task teardown).

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Bitrain operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Data validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if error was caused by bad configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

// Conversions for common error types
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Internal(format!("Generator task failed: {}", e))
    }
}
