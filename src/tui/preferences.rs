//! User preferences with safe atomic persistence.
//!
//! The only persisted preference is the color theme. Persistence failures
//! never block startup: load problems fall back to defaults, save problems
//! surface as a notification.
//!
//! Atomic write: serialize → temp file → fsync → rename over target, so a
//! reader never sees a partial file.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::theme::ThemeMode;

/// Current schema version. Additive fields rely on `#[serde(default)]`.
const SCHEMA_VERSION: u32 = 1;

/// Persisted showcase preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Schema version for migration detection.
    pub schema_version: u32,
    /// Color scheme.
    pub theme: ThemeMode,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            theme: ThemeMode::default(),
        }
    }
}

/// Result of reading the preferences file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Parsed successfully.
    Loaded(UserPreferences),
    /// No file yet (first launch); defaults apply.
    Missing,
    /// File exists but is not valid preferences JSON; defaults apply.
    Corrupt { details: String },
    /// File could not be read; defaults apply.
    IoError { details: String },
}

impl LoadOutcome {
    /// Effective preferences regardless of load status.
    #[must_use]
    pub fn into_prefs(self) -> UserPreferences {
        match self {
            Self::Loaded(prefs) => prefs,
            Self::Missing | Self::Corrupt { .. } | Self::IoError { .. } => {
                UserPreferences::default()
            }
        }
    }

    /// Loaded, or missing on first launch.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Missing)
    }

    /// Operator-facing warning for degraded loads.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Loaded(_) | Self::Missing => None,
            Self::Corrupt { details } => Some(format!("preferences file is corrupt: {details}")),
            Self::IoError { details } => Some(format!("preferences file unreadable: {details}")),
        }
    }
}

/// Read preferences from `path`. Never fails; see [`LoadOutcome`].
#[must_use]
pub fn load(path: &Path) -> LoadOutcome {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
        // Invalid UTF-8 is corrupt content, not an I/O error.
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return LoadOutcome::Corrupt {
                details: e.to_string(),
            };
        }
        Err(e) => {
            return LoadOutcome::IoError {
                details: e.to_string(),
            };
        }
    };

    match serde_json::from_str::<UserPreferences>(&content) {
        Ok(mut prefs) => {
            prefs.schema_version = SCHEMA_VERSION;
            LoadOutcome::Loaded(prefs)
        }
        Err(e) => LoadOutcome::Corrupt {
            details: e.to_string(),
        },
    }
}

/// Atomic save. Creates parent directories as needed.
pub fn save(prefs: &UserPreferences, path: &Path) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_first_launch() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = load(&dir.path().join("preferences.json"));
        assert_eq!(outcome, LoadOutcome::Missing);
        assert!(outcome.is_ok());
        assert_eq!(outcome.into_prefs().theme, ThemeMode::Dark);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = UserPreferences {
            theme: ThemeMode::Light,
            ..UserPreferences::default()
        };
        save(&prefs, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load(&path), LoadOutcome::Loaded(prefs));
    }

    #[test]
    fn corrupt_file_falls_back_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();
        let outcome = load(&path);
        assert!(!outcome.is_ok());
        assert!(outcome.warning().unwrap().contains("corrupt"));
        assert_eq!(outcome.into_prefs(), UserPreferences::default());
    }

    #[test]
    fn unknown_theme_value_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"theme":"sepia"}"#).unwrap();
        assert!(matches!(load(&path), LoadOutcome::Corrupt { .. }));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(load(&path), LoadOutcome::Loaded(UserPreferences::default()));
    }

    #[test]
    fn directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = load(dir.path());
        assert!(matches!(outcome, LoadOutcome::IoError { .. }));
        assert!(outcome.warning().is_some());
    }
}
