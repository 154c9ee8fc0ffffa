// Grid settings
// Loaded from ~/.config/rostergrid/settings.toml

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use rostergrid_engine::input::confirm_delete_message;
use rostergrid_io::{validate_delimiter, ExportOptions, QuoteStyle};

use crate::error::ConfigError;

/// Delimited export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub delimiter: char,
    pub quote_style: QuoteStyle,
    /// Filename stem; the table id when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename_stem: Option<String>,
    /// Append today's date to the suggested filename
    pub date_stamp: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_style: QuoteStyle::Minimal,
            filename_stem: None,
            date_stamp: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Heading shown above the printed table
    pub title: String,
    /// Replaces the built-in print stylesheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            title: "Student Management System".to_string(),
            stylesheet: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Flash alerts close after this many milliseconds
    pub alert_dismiss_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_delete_message: Option<String>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            alert_dismiss_ms: 5000,
            confirm_delete_message: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub export: ExportSettings,
    pub print: PrintSettings,
    pub ui: UiSettings,
}

impl GridSettings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rostergrid")
            .join("settings.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: GridSettings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_delimiter(self.export.delimiter)
            .map(|_| ())
            .map_err(|e| ConfigError::Validation(format!("export.delimiter: {e}")))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, text).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Export options for a run on `today`.
    pub fn export_options(&self, today: NaiveDate) -> ExportOptions {
        ExportOptions {
            delimiter: self.export.delimiter,
            quote_style: self.export.quote_style,
            filename_stem: self.export.filename_stem.clone(),
            date_stamp: self.export.date_stamp.then_some(today),
        }
    }

    /// Export options stamped with the local date.
    pub fn export_options_now(&self) -> ExportOptions {
        self.export_options(chrono::Local::now().date_naive())
    }

    pub fn print_stylesheet(&self) -> Option<&str> {
        self.print.stylesheet.as_deref()
    }

    pub fn alert_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.ui.alert_dismiss_ms)
    }

    pub fn delete_prompt(&self) -> &str {
        confirm_delete_message(self.ui.confirm_delete_message.as_deref())
    }
}
