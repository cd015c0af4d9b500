//! # File I/O Module
//!
//! Configuration file operations:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! A configuration file is JSON with a schema version around the
//! [`WindLoadConfig`]:
//!
//! ```json
//! { "version": "0.1.0", "config": { "structure_type": "Buildings", ... } }
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use semver::Version;
use serde::{Deserialize, Serialize};

use wind_core::{CalcError, CalcResult, WindLoadConfig};

/// Current configuration file schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Schema version the file was written with
    pub version: String,
    pub config: WindLoadConfig,
}

impl ConfigFile {
    /// Wrap a configuration with the current schema version
    pub fn new(config: WindLoadConfig) -> Self {
        ConfigFile {
            version: SCHEMA_VERSION.to_string(),
            config,
        }
    }
}

/// Save a configuration with atomic write semantics.
///
/// The JSON is written to `<path>.tmp`, synced, then renamed over `path`,
/// so an interrupted save never leaves a truncated file behind.
pub fn save_config(config: &WindLoadConfig, path: &Path) -> CalcResult<()> {
    let document = ConfigFile::new(config.clone());
    let json = serde_json::to_string_pretty(&document).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a configuration file.
///
/// # Returns
///
/// * `Ok(WindLoadConfig)` - Successfully loaded configuration
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_config(path: &Path) -> CalcResult<WindLoadConfig> {
    let mut file =
        File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let document: ConfigFile = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&document.version)?;

    Ok(document.config)
}

/// `tower.json` -> `tower.json.tmp`
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    name.into()
}

/// Validate that a file version is compatible with the current schema.
///
/// The major version must match; while the schema is 0.x a newer minor
/// version is also rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (Ok(file), Ok(current)) = (Version::parse(file_version), Version::parse(SCHEMA_VERSION)) else {
        return Err(mismatch());
    };

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_config_path(name: &str) -> PathBuf {
        temp_dir().join(format!("windload_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");

        let mut config = WindLoadConfig::demo_building();
        config.location = "Cox's Bazar".to_string();
        config.parapet_height_m = 1.0;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_config_path("atomic");
        let tmp_path = tmp_path_for(&path);

        save_config(&WindLoadConfig::demo_building(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_config_path("newer");
        let document = ConfigFile {
            version: "0.9.0".to_string(),
            config: WindLoadConfig::demo_building(),
        };
        fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_config_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(&temp_config_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("banana").is_err());
    }
}
