//! Configuration for comparison and backup

use std::path::{Path, PathBuf};

use regkit_format::DEFAULT_MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Decorations used in comparison displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayMarkers {
    /// Prefix on both sides of a match
    pub matched: String,
    /// Prefix on the file side of a difference
    pub file_side: String,
    /// Prefix on the live side of a difference
    pub live_side: String,
    /// Live-side text for a missing value
    pub not_found: String,
}

impl Default for DisplayMarkers {
    fn default() -> Self {
        Self {
            matched: "✅ ".to_string(),
            file_side: "📄 ".to_string(),
            live_side: "🖥️ ".to_string(),
            not_found: "❌ KEY/VALUE NOT FOUND".to_string(),
        }
    }
}

impl DisplayMarkers {
    /// Markers with no decoration, for machine-readable output
    #[must_use]
    pub fn plain() -> Self {
        Self {
            matched: String::new(),
            file_side: String::new(),
            live_side: String::new(),
            not_found: "NOT FOUND".to_string(),
        }
    }
}

/// regkit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegkitConfig {
    /// Display decorations
    pub markers: DisplayMarkers,
    /// Largest input accepted, in bytes
    pub max_file_size: u64,
    /// Appended to the input stem to name the default rollback file
    pub backup_suffix: String,
}

impl Default for RegkitConfig {
    fn default() -> Self {
        Self {
            markers: DisplayMarkers::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            backup_suffix: "_backup".to_string(),
        }
    }
}

impl RegkitConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With display markers
    #[inline]
    #[must_use]
    pub fn with_markers(mut self, markers: DisplayMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// With maximum input size
    #[inline]
    #[must_use]
    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    /// With backup suffix
    #[inline]
    #[must_use]
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Parse TOML; absent fields keep their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] on invalid TOML or mistyped fields
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - [`ConfigError::Io`] if the file cannot be read
    /// - [`ConfigError::Toml`] if it cannot be parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Default rollback destination for `input`: `<stem><suffix>.reg` beside it
    #[must_use]
    pub fn backup_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map_or_else(|| "registry".into(), |s| s.to_string_lossy());
        input.with_file_name(format!("{stem}{}.reg", self.backup_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = RegkitConfig::new();
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.backup_suffix, "_backup");
        assert_eq!(config.markers.matched, "✅ ");
        assert_eq!(config.markers.not_found, "❌ KEY/VALUE NOT FOUND");
    }

    #[test]
    fn builders() {
        let config = RegkitConfig::new()
            .with_max_file_size(64)
            .with_backup_suffix(".orig")
            .with_markers(DisplayMarkers::plain());
        assert_eq!(config.max_file_size, 64);
        assert_eq!(config.backup_suffix, ".orig");
        assert_eq!(config.markers.matched, "");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RegkitConfig::from_toml_str(
            "backup_suffix = \"_before\"\n\n[markers]\nmatched = \"OK \"\n",
        )
        .unwrap();
        assert_eq!(config.backup_suffix, "_before");
        assert_eq!(config.markers.matched, "OK ");
        assert_eq!(config.markers.file_side, "📄 ");
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(matches!(
            RegkitConfig::from_toml_str("max_file_size = \"big\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regkit.toml");
        std::fs::write(&path, "max_file_size = 2048\n").unwrap();
        assert_eq!(RegkitConfig::load(&path).unwrap().max_file_size, 2048);

        assert!(matches!(
            RegkitConfig::load(dir.path().join("absent.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn backup_path_uses_stem_and_suffix() {
        let config = RegkitConfig::new();
        assert_eq!(
            config.backup_path_for(Path::new("/tmp/tweaks.reg")),
            PathBuf::from("/tmp/tweaks_backup.reg")
        );
        assert_eq!(
            config.backup_path_for(Path::new("settings")),
            PathBuf::from("settings_backup.reg")
        );
    }
}
