//! Utils module - Shared utilities and helpers

/// Standardized error conversions
pub mod error_helpers;

/// Command-line input processing
pub mod input;

/// Logger setup and verbose output helpers
pub mod logging;

/// Input validation utilities
pub mod validation;
