//! The main config loading module for dirview.
//!
//! Handles loading and deserializing settings from `dirview.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config generation for `dv --init`.

use crate::config::{General, Keys, Theme};
use crate::ui::perms::PermStyles;
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file and then converted into [Config].
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for dirview
/// Holds the processed configuration, including the resolved permission styles.
#[derive(Debug)]
pub struct Config {
    general: General,
    theme: Theme,
    styles: PermStyles,
    keys: Keys,
}

/// Conversion from RawConfig to Config
/// Resolves the theme into the style table once, so rendering never rebuilds it.
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            styles: raw.theme.perm_styles(),
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

/// Public methods for loading and accessing the configuration
impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by entry point to load config at startup.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, falling back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw.into(),
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    tracing::warn!(path = %path.display(), error = %e, "invalid config");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable config");
                Self::default()
            }
        }
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn styles(&self) -> &PermStyles {
        &self.styles
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the DIRVIEW_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/dirview/dirview.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("DIRVIEW_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("dirview/dirview.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/dirview/dirview.toml");
        }
        PathBuf::from("dirview.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# dirview.toml - default configuration for dirview

# Note:
# Commented values are the internal defaults of dirview
# Colors: names ("cyan"), hex codes ("#RRGGBB" / "#RGB") or a 256 palette index ("69")

[general]
# rows reserved above the listing for the path header
# margin = 4

[theme]
# directory = "69"
# file = "252"
# symlink = "81"
# read = "214"
# write = "196"
# exec = "76"
# none = "240"
# special = "197"
# selection = "238"
# path = "default"
# bold_directory = true
# bold_symlink = true
# bold_special = true

[keys]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_parent = ["h", "Left", "Backspace"]
# go_into_dir = ["l", "Right"]
# quit = ["q", "Esc", "Ctrl+c"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_toml_parses_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let raw: RawConfig = toml::from_str(DEFAULT_TOML)?;
        let config = Config::from(raw);
        assert_eq!(config.general().margin(), 4);
        assert_eq!(config.theme(), &Theme::default());
        Ok(())
    }

    #[test]
    fn generate_refuses_to_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/dirview.toml");

        Config::generate_default(&path)?;
        assert!(path.exists());

        let err = Config::generate_default(&path).err().ok_or("expected an error")?;
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }

    #[test]
    fn broken_file_falls_back() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("dirview.toml");
        fs::write(&path, "[general\nmargin = ")?;

        let config = Config::load_from(&path);
        assert_eq!(config.general().margin(), 4);
        Ok(())
    }

    #[test]
    fn margin_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("dirview.toml");
        fs::write(&path, "[general]\nmargin = 2\n")?;

        assert_eq!(Config::load_from(&path).general().margin(), 2);
        Ok(())
    }
}
