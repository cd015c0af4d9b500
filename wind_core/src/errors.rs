//! # Error Types
//!
//! Structured error types for wind_core. Every failure names the table,
//! field or query that caused it so a caller can report it or correct the
//! configuration programmatically.
//!
//! Errors are raised at the point of detection and never retried: every
//! computation in this crate is deterministic, so a retry would reproduce
//! the same failure.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "height_m",
//!             height_m.to_string(),
//!             "Building height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_height(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wind_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for wind load operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A categorical input is not a key of the code table it was looked up in
    #[error("Invalid code key '{key}' for table '{table}'")]
    InvalidCodeKey { table: String, key: String },

    /// Topography descriptor cannot be evaluated
    #[error("Invalid topography input for '{field}': {value} - {reason}")]
    InvalidTopographyInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Non-physical input to the flexible-structure gust model
    #[error("Invalid gust input for '{field}': {value} - {reason}")]
    InvalidGustInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Height profile requested from an empty floor list
    #[error("Floor list is empty - at least one floor height is required")]
    EmptyFloorList,

    /// 1-based level index outside the height profile
    #[error("Level {level} is out of range (profile has {available} levels)")]
    LevelOutOfRange { level: usize, available: usize },

    /// No cladding rows exist for the requested effective area
    #[error("No pressure data computed for area {effective_area_m2:.2} m²")]
    NoPressureData { effective_area_m2: f64 },

    /// Zone label is not one of Zone 1 through Zone 5
    #[error("Unsupported cladding zone: {zone}")]
    UnsupportedZone { zone: String },

    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidCodeKey error
    pub fn invalid_code_key(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::InvalidCodeKey {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create an InvalidTopographyInput error
    pub fn invalid_topography(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTopographyInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGustInput error
    pub fn invalid_gust(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGustInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedZone error
    pub fn unsupported_zone(zone: impl Into<String>) -> Self {
        CalcError::UnsupportedZone { zone: zone.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidCodeKey { .. } => "INVALID_CODE_KEY",
            CalcError::InvalidTopographyInput { .. } => "INVALID_TOPOGRAPHY_INPUT",
            CalcError::InvalidGustInput { .. } => "INVALID_GUST_INPUT",
            CalcError::EmptyFloorList => "EMPTY_FLOOR_LIST",
            CalcError::LevelOutOfRange { .. } => "LEVEL_OUT_OF_RANGE",
            CalcError::NoPressureData { .. } => "NO_PRESSURE_DATA",
            CalcError::UnsupportedZone { .. } => "UNSUPPORTED_ZONE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_code_key("location_wind_speed", "Atlantis");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidCodeKey"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&CalcError::EmptyFloorList).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, CalcError::EmptyFloorList);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unsupported_zone("Zone 9").error_code(), "UNSUPPORTED_ZONE");
        assert_eq!(
            CalcError::LevelOutOfRange { level: 4, available: 3 }.error_code(),
            "LEVEL_OUT_OF_RANGE"
        );
        assert_eq!(
            CalcError::invalid_gust("damping_ratio", "0", "must be positive").error_code(),
            "INVALID_GUST_INPUT"
        );
    }

    #[test]
    fn test_error_messages_name_the_key() {
        let msg = CalcError::invalid_code_key("importance_factor", "V").to_string();
        assert!(msg.contains("importance_factor"));
        assert!(msg.contains("'V'"));

        let msg = CalcError::NoPressureData { effective_area_m2: 12.5 }.to_string();
        assert!(msg.contains("12.50"));
    }
}
