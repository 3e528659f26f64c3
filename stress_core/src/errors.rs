//! # Error Types
//!
//! Structured error types for stress_core. Each variant carries enough
//! context to understand and fix the problem programmatically, and every
//! failure is raised at construction or resolution time — an object that
//! constructs successfully is fully usable.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::errors::{StressError, StressResult};
//!
//! fn validate_leg_size(s: f64) -> StressResult<()> {
//!     if s <= 0.0 {
//!         return Err(StressError::invalid_input(
//!             "s",
//!             s.to_string(),
//!             "Weld leg size must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stress_core operations
pub type StressResult<T> = Result<T, StressError>;

/// Structured error type for stress evaluation.
///
/// Degenerate numerics (zero torsion constant, zero area) are deliberately
/// NOT errors: they propagate through the stress formulas as infinity/NaN so
/// callers can detect an undefined engineering quantity in the results.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StressError {
    /// An input value is invalid (malformed axis label, bad orientation
    /// pair, weld parameters missing a required auxiliary field, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required property is missing from a custom shape or material
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Named shape not found in the shapes database
    #[error("Shape not found: {label}")]
    ShapeNotFound { label: String },

    /// Named material not found in the materials database
    #[error("Material not found: {name}")]
    MaterialNotFound { name: String },
}

impl StressError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StressError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        StressError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ShapeNotFound error
    pub fn shape_not_found(label: impl Into<String>) -> Self {
        StressError::ShapeNotFound {
            label: label.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(name: impl Into<String>) -> Self {
        StressError::MaterialNotFound { name: name.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StressError::InvalidInput { .. } => "INVALID_INPUT",
            StressError::MissingField { .. } => "MISSING_FIELD",
            StressError::ShapeNotFound { .. } => "SHAPE_NOT_FOUND",
            StressError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = StressError::invalid_input("primary", "-q", "Not a valid axis label");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: StressError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StressError::shape_not_found("W99X999").error_code(),
            "SHAPE_NOT_FOUND"
        );
        assert_eq!(
            StressError::material_not_found("unobtainium").error_code(),
            "MATERIAL_NOT_FOUND"
        );
        assert_eq!(
            StressError::missing_field("Ix").error_code(),
            "MISSING_FIELD"
        );
    }

    #[test]
    fn test_error_display() {
        let error = StressError::material_not_found("A517");
        assert_eq!(error.to_string(), "Material not found: A517");
    }
}
