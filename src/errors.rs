/*!
 * Error types for the kazkar application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 *
 * The heuristic core never produces errors: pattern misses, un-relocatable
 * quotes and unknown speakers all degrade to safe defaults. What surfaces
 * here is document loading, registry management, and the enforcement gate.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when loading or managing registries
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry file could not be read
    #[error("Failed to read registry: {0}")]
    ReadFailed(String),

    /// Registry file is not valid JSON
    #[error("Failed to parse registry: {0}")]
    ParseFailed(String),

    /// A management command referenced a speaker that does not exist
    #[error("Unknown speaker: {0}")]
    UnknownSpeaker(String),

    /// A management command requires an initialized registry
    #[error("Registry not initialized: {0}")]
    NotInitialized(String),
}

/// Errors that can occur when loading story documents
#[derive(Error, Debug)]
pub enum StoryError {
    /// Story file could not be read
    #[error("Failed to read story: {0}")]
    ReadFailed(String),

    /// Story file is not well-formed JSON
    #[error("Failed to parse story: {0}")]
    ParseFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from registry handling
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error from story loading
    #[error("Story error: {0}")]
    Story(#[from] StoryError),

    /// Unresolved speakers rejected by the enforcement flag
    #[error("Unresolved speakers found: {0}")]
    UnresolvedSpeakers(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
