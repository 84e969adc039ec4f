//! Configuration management for resumeforge.
//!
//! Configuration is loaded with figment from defaults, an optional TOML file
//! and `RESUMEFORGE_` environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::export::{ExportOptions, Orientation, PageFormat};
use crate::render::{Template, Theme};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "resumeforge";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "storage.db";

/// Output directory used when none is configured.
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Environment variable prefix. Nested keys use a double underscore,
/// e.g. `RESUMEFORGE_RENDER__PRIMARY_COLOR`.
const ENV_PREFIX: &str = "RESUMEFORGE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RESUMEFORGE_`)
/// 2. TOML config file at `~/.config/resumeforge/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Export configuration.
    pub export: ExportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/resumeforge/storage.db`
    pub database_path: Option<PathBuf>,
}

/// Rendering-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Template used when none is given on the command line.
    pub default_template: String,
    /// Accent color, as `#rrggbb`.
    pub primary_color: String,
    /// Font family used by the exported document.
    pub font_family: String,
}

/// Export-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported documents are written to.
    /// Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
    /// Page margin in millimetres.
    pub margin_mm: u32,
    /// Page format.
    pub page_format: PageFormat,
    /// Page orientation.
    pub orientation: Orientation,
    /// Image quality hint for rasterizing backends, in `(0, 1]`.
    pub image_quality: f32,
    /// Render scale hint for rasterizing backends.
    pub scale: f32,
    /// Upper bound on one export, in seconds.
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            default_template: Template::default().as_str().to_string(),
            primary_color: theme.primary_color,
            font_family: theme.font_family,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            output_dir: None,
            margin_mm: options.margin_mm,
            page_format: options.page_format,
            orientation: options.orientation,
            image_quality: options.image_quality,
            scale: options.scale,
            timeout_secs: options.timeout_secs,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &std::path::Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let hex = Regex::new(r"^#[0-9a-fA-F]{6}$")
            .map_err(|e| Error::internal(format!("color pattern: {e}")))?;
        if !hex.is_match(&self.render.primary_color) {
            return Err(Error::config_validation(format!(
                "primary_color must be a #rrggbb hex color, got '{}'",
                self.render.primary_color
            )));
        }

        if self.render.font_family.trim().is_empty() {
            return Err(Error::config_validation("font_family cannot be empty"));
        }

        if !(self.export.image_quality > 0.0 && self.export.image_quality <= 1.0) {
            return Err(Error::config_validation(format!(
                "image_quality must be in (0, 1], got {}",
                self.export.image_quality
            )));
        }

        if self.export.scale <= 0.0 {
            return Err(Error::config_validation("scale must be greater than 0"));
        }

        if self.export.timeout_secs == 0 {
            return Err(Error::config_validation("timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the export directory, resolving defaults if not set.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// The configured default template.
    ///
    /// An unknown name falls back to [`Template::Classic`].
    #[must_use]
    pub fn template(&self) -> Template {
        let name = &self.render.default_template;
        let template = Template::from_name_or_default(name);
        if template.as_str() != name.trim().to_ascii_lowercase() {
            warn!("Unknown default_template '{name}', using {template}");
        }
        template
    }

    /// Theme variables for exported documents.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme {
            primary_color: self.render.primary_color.clone(),
            font_family: self.render.font_family.clone(),
        }
    }

    /// Page options for exported documents.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            margin_mm: self.export.margin_mm,
            page_format: self.export.page_format,
            orientation: self.export.orientation,
            image_quality: self.export.image_quality,
            scale: self.export.scale,
            timeout_secs: self.export.timeout_secs,
        }
    }
}
