//! Configuration management for swmming

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwmmingError};
use crate::models::{parse_keyword, FlowUnits};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Assembly settings
    #[serde(default)]
    pub assembly: AssemblyConfig,

    /// GeoJSON import settings
    #[serde(default)]
    pub gis: GisConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output directory
    pub output_dir: Option<PathBuf>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Automatically accept prompts
    pub auto_yes: bool,
}

/// Assembly configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Assemble even when the analysis reports errors
    pub force: bool,
    /// Flow units of generated templates
    pub default_flow_units: FlowUnits,
    /// Title header of generated templates
    pub title: Option<String>,
}

/// GeoJSON import configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GisConfig {
    /// Feature property holding the object name
    pub name_property: String,
    /// Feature property holding the invert elevation
    pub elevation_property: String,
    /// Feature property holding a subcatchment outlet
    pub outlet_property: String,
    /// Feature property holding a subcatchment rain gage
    pub rain_gage_property: String,
    /// Factor converting squared map units to acres or hectares
    pub area_factor: f64,
    /// Fraction of the extent added around imported geometry on the map
    pub map_margin: f64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Enable colored output
    pub color: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            force: false,
            default_flow_units: FlowUnits::Cfs,
            title: None,
        }
    }
}

impl Default for GisConfig {
    fn default() -> Self {
        Self {
            name_property: "name".to_string(),
            elevation_property: "elevation".to_string(),
            outlet_property: "outlet".to_string(),
            rain_gage_property: "rain_gage".to_string(),
            area_factor: 1.0 / 10_000.0,
            map_margin: 0.05,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            color: true,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| SwmmingError::Config(format!("Invalid boolean for {}: {}", key, value)))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| SwmmingError::Config(format!("Invalid number for {}: {}", key, value)))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Config {
    /// Every key accepted by [`Config::get`] and [`Config::set`]
    pub const KEYS: &'static [&'static str] = &[
        "general.output_dir",
        "general.jobs",
        "general.auto_yes",
        "assembly.force",
        "assembly.default_flow_units",
        "assembly.title",
        "gis.name_property",
        "gis.elevation_property",
        "gis.outlet_property",
        "gis.rain_gage_property",
        "gis.area_factor",
        "gis.map_margin",
        "logging.level",
        "logging.color",
    ];

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SwmmingError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("swmming").join("config.toml"))
    }

    fn resolve(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Load configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve(path)?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, or to the default location
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = Self::resolve(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| SwmmingError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(path: Option<&Path>) -> Result<()> {
        Self::default().save(path)
    }

    /// Initialize configuration file
    pub fn init(path: Option<&Path>, force: bool) -> Result<()> {
        let resolved = Self::resolve(path)?;

        if resolved.exists() && !force {
            return Err(SwmmingError::Config(
                "Configuration file already exists. Use --force to overwrite.".into(),
            ));
        }

        Self::default().save(Some(&resolved))
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "general.output_dir" => self
                .general
                .output_dir
                .as_ref()
                .map(|p| p.display().to_string()),
            "general.jobs" => self.general.jobs.map(|j| j.to_string()),
            "general.auto_yes" => Some(self.general.auto_yes.to_string()),

            "assembly.force" => Some(self.assembly.force.to_string()),
            "assembly.default_flow_units" => Some(self.assembly.default_flow_units.to_string()),
            "assembly.title" => self.assembly.title.clone(),

            "gis.name_property" => Some(self.gis.name_property.clone()),
            "gis.elevation_property" => Some(self.gis.elevation_property.clone()),
            "gis.outlet_property" => Some(self.gis.outlet_property.clone()),
            "gis.rain_gage_property" => Some(self.gis.rain_gage_property.clone()),
            "gis.area_factor" => Some(self.gis.area_factor.to_string()),
            "gis.map_margin" => Some(self.gis.map_margin.to_string()),

            "logging.level" => Some(self.logging.level.clone()),
            "logging.color" => Some(self.logging.color.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.output_dir" => {
                self.general.output_dir = non_empty(value).map(PathBuf::from);
            }
            "general.jobs" => {
                self.general.jobs = if value.is_empty() {
                    None
                } else {
                    Some(parse_number(key, value)?)
                };
            }
            "general.auto_yes" => self.general.auto_yes = parse_bool(key, value)?,

            "assembly.force" => self.assembly.force = parse_bool(key, value)?,
            "assembly.default_flow_units" => {
                self.assembly.default_flow_units = parse_keyword(key, value)
                    .map_err(|e| SwmmingError::Config(e.to_string()))?;
            }
            "assembly.title" => self.assembly.title = non_empty(value),

            "gis.name_property" => self.gis.name_property = value.to_string(),
            "gis.elevation_property" => self.gis.elevation_property = value.to_string(),
            "gis.outlet_property" => self.gis.outlet_property = value.to_string(),
            "gis.rain_gage_property" => self.gis.rain_gage_property = value.to_string(),
            "gis.area_factor" => self.gis.area_factor = parse_number(key, value)?,
            "gis.map_margin" => self.gis.map_margin = parse_number(key, value)?,

            "logging.level" => self.logging.level = value.to_string(),
            "logging.color" => self.logging.color = parse_bool(key, value)?,

            _ => {
                return Err(SwmmingError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Directory receiving assembled files
    pub fn output_dir(&self) -> PathBuf {
        self.general
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
