//! Manager policy settings
//!
//! Settings are stored as TOML so hosts can ship a default policy file and
//! let users override it. Loading a missing file yields the defaults, so a
//! settings file is never required.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ═══════════════════════════════════════════════════════════════════════════
// Settings Types
// ═══════════════════════════════════════════════════════════════════════════

/// Which timers the bulk operations reach.
///
/// `cancel_all`, `pause_all`, and `resume_all` always walk the live set.
/// Timers registered since the last tick sit in the pending buffer and have
/// never been dispatched; whether a bulk call reaches them too is policy:
/// under `LiveOnly` a bulk cancel discards them without a `cancel()` call
/// and bulk pause/resume skip them, while `IncludePending` treats them the
/// same as live timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkScope {
    #[default]
    LiveOnly,
    IncludePending,
}

/// Manager-wide policy, applied at construction via
/// `TimerManager::with_settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// Scope of the bulk cancel/pause/resume operations
    #[serde(default)]
    pub bulk_scope: BulkScope,
}

impl ManagerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings = toml::from_str(&content).map_err(|e| SettingsError::ParseToml {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "Loaded timer settings");
        Ok(settings)
    }

    /// Save settings as pretty TOML, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::WriteFile {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(SettingsError::Serialize)?;

        std::fs::write(path, content).map_err(|e| SettingsError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "Saved timer settings");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Error Types
// ═══════════════════════════════════════════════════════════════════════════

/// Errors during settings load/save
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings")]
    Serialize(#[source] toml::ser::Error),

    #[error("failed to write settings file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_live_only_scope() {
        let settings = ManagerSettings::new();
        assert_eq!(settings.bulk_scope, BulkScope::LiveOnly);
    }

    #[test]
    fn parses_scope_from_toml() {
        let settings: ManagerSettings =
            toml::from_str(r#"bulk_scope = "include_pending""#).expect("Failed to parse TOML");
        assert_eq!(settings.bulk_scope, BulkScope::IncludePending);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ManagerSettings = toml::from_str("").expect("Failed to parse TOML");
        assert_eq!(settings, ManagerSettings::default());
    }

    #[test]
    fn toml_round_trip_preserves_scope() {
        let settings = ManagerSettings {
            bulk_scope: BulkScope::IncludePending,
        };
        let content = toml::to_string_pretty(&settings).expect("Failed to serialize");
        let parsed: ManagerSettings = toml::from_str(&content).expect("Failed to parse TOML");
        assert_eq!(parsed, settings);
    }

    /// Per-invocation scratch path; keeps parallel test runs apart.
    fn scratch_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tempo-settings-{}-{}.toml", tag, std::process::id()))
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let path = scratch_path("missing");
        let settings = ManagerSettings::load(&path).expect("Missing file should load defaults");
        assert_eq!(settings, ManagerSettings::default());
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let path = scratch_path("roundtrip");
        let settings = ManagerSettings {
            bulk_scope: BulkScope::IncludePending,
        };

        settings.save(&path).expect("Failed to save settings");
        let loaded = ManagerSettings::load(&path).expect("Failed to load settings");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn invalid_toml_reports_a_parse_error() {
        let path = scratch_path("invalid");
        std::fs::write(&path, "bulk_scope = 12").expect("Failed to write fixture");

        let err = ManagerSettings::load(&path).expect_err("Invalid TOML should fail");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, SettingsError::ParseToml { .. }));
    }
}
