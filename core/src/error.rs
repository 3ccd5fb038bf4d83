// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors that can occur in gigcal operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("Event name must not be empty")]
    EmptyName,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("No events in the selected range")]
    NothingToExport,

    #[error("Unrecognized import data: {0}")]
    UnrecognizedImport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for gigcal operations.
pub type Result<T> = std::result::Result<T, Error>;
