//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{FolioError, Result};
use crate::core::paths::resolve_against;
use crate::showcase::contact::is_valid_email;

/// Lower bound for the autoplay interval; anything faster is unreadable.
const MIN_AUTOPLAY_INTERVAL_MS: u64 = 250;

/// Full showcase configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub contact: ContactConfig,
    pub content: ContentConfig,
    pub paths: PathsConfig,
}

/// Testimonial carousel behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CarouselConfig {
    /// Advance to the next slide on a fixed interval.
    pub autoplay: bool,
    /// Autoplay period in milliseconds.
    pub interval_ms: u64,
}

/// Contact form handoff target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    /// Address placed in the `mailto:` link.
    pub recipient: String,
    /// Prepended to the user's subject line.
    pub subject_prefix: String,
}

/// Where showcase content (projects, portfolio items, testimonials) comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ContentConfig {
    /// TOML content file. `None` uses the built-in fixture.
    pub file: Option<PathBuf>,
}

/// Filesystem paths used by folio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub preferences_file: PathBuf,
    pub activity_log: PathBuf,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: 5_000,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "hello@example.com".to_string(),
            subject_prefix: "Portfolio Contact: ".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!(
                    "[FOLIO-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths"
                );
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        let cfg = home_dir.join(".config").join("folio");
        let data = home_dir.join(".local").join("share").join("folio");
        Self {
            config_file: cfg.join("config.toml"),
            preferences_file: cfg.join("preferences.json"),
            activity_log: data.join("activity.jsonl"),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| FolioError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(FolioError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides_from(env_var)?;
        cfg.normalize_paths();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic hash of the effective config for logging.
    ///
    /// FNV-1a over the canonical JSON form, stable across processes.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    /// Autoplay period as a `Duration`.
    #[must_use]
    pub const fn autoplay_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.carousel.interval_ms)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("FOLIO_CAROUSEL_AUTOPLAY") {
            self.carousel.autoplay = parse_env_bool("FOLIO_CAROUSEL_AUTOPLAY", &raw)?;
        }
        if let Some(raw) = lookup("FOLIO_CAROUSEL_INTERVAL_MS") {
            self.carousel.interval_ms = parse_env_u64("FOLIO_CAROUSEL_INTERVAL_MS", &raw)?;
        }
        if let Some(raw) = lookup("FOLIO_CONTACT_RECIPIENT") {
            self.contact.recipient = raw;
        }
        if let Some(raw) = lookup("FOLIO_CONTACT_SUBJECT_PREFIX") {
            self.contact.subject_prefix = raw;
        }
        if let Some(raw) = lookup("FOLIO_CONTENT_FILE") {
            self.content.file = Some(PathBuf::from(raw));
        }
        if let Some(raw) = lookup("FOLIO_PREFERENCES_FILE") {
            self.paths.preferences_file = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("FOLIO_ACTIVITY_LOG") {
            self.paths.activity_log = PathBuf::from(raw);
        }
        Ok(())
    }

    /// Resolve a relative content file against the config file's directory.
    fn normalize_paths(&mut self) {
        if let Some(file) = self.content.file.take() {
            let base = self
                .paths
                .config_file
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            self.content.file = Some(resolve_against(&base, &file));
        }
    }

    fn validate(&self) -> Result<()> {
        if self.carousel.interval_ms < MIN_AUTOPLAY_INTERVAL_MS {
            return Err(FolioError::InvalidConfig {
                details: format!(
                    "carousel.interval_ms must be >= {MIN_AUTOPLAY_INTERVAL_MS}, got {}",
                    self.carousel.interval_ms
                ),
            });
        }

        if !is_valid_email(self.contact.recipient.trim()) {
            return Err(FolioError::InvalidConfig {
                details: format!(
                    "contact.recipient is not a valid email address: {:?}",
                    self.contact.recipient
                ),
            });
        }

        if self.contact.subject_prefix.contains(['\n', '\r']) {
            return Err(FolioError::InvalidConfig {
                details: "contact.subject_prefix must be a single line".to_string(),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_u64(name: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|error| FolioError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.parse::<bool>().map_err(|error| FolioError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
