// Ubermap Config Parser - TOML with Serde
// Parses the mapper configuration and overlays it on a preset

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{MapperError, MapperResult};
use crate::input::DeviceAllowList;
use crate::key::key_from_name;
use crate::mapping::{MappingTable, MouseAction, Preset, MIN_MAX_STEP};
use crate::Key;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid mouse action: {0}")]
    InvalidMouseAction(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl From<ConfigError> for MapperError {
    fn from(err: ConfigError) -> Self {
        MapperError::Argument(err.to_string())
    }
}

/// Root TOML table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub devices: DevicesConfig,

    /// Direct-map overrides, applied when no layer is held
    #[serde(default)]
    pub direct: HashMap<String, String>,

    #[serde(default)]
    pub modifier: ModifierConfig,

    #[serde(default)]
    pub mouse: MouseConfig,
}

/// General settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Built-in mapping to start from ("full", "minimal", "empty")
    pub preset: Option<String>,
    /// Trace every event through the translator
    pub debug: Option<bool>,
}

/// Device selection
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevicesConfig {
    /// Device path or keyboard name
    pub device: Option<String>,
    /// Device-name substrings the mapping may run on
    pub allow: Option<Vec<String>>,
}

/// `[modifier]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModifierConfig {
    /// Layer key; "NONE" disables the layer
    pub key: Option<String>,
    #[serde(default)]
    pub map: HashMap<String, String>,
}

/// `[mouse]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MouseConfig {
    /// Layer key; "NONE" disables the layer
    pub key: Option<String>,
    pub sensitivity: Option<f64>,
    pub speedup_ms: Option<u64>,
    pub max_step: Option<i32>,
    #[serde(default)]
    pub map: HashMap<String, String>,
}

/// Parsed and checked configuration.
///
/// Only what the file sets is stored; everything else comes from the preset
/// when `mapping_table` builds the final policy.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub preset: Option<Preset>,
    pub debug: bool,
    pub device: Option<String>,
    /// `None` falls back to the preset's allow-list
    pub allow: Option<Vec<String>>,
    /// `None` as target clears the preset entry
    pub direct: Vec<(Key, Option<Key>)>,
    /// `Some(None)` disables the layer
    pub modifier_key: Option<Option<Key>>,
    pub modifier: Vec<(Key, Option<Key>)>,
    pub mouse_key: Option<Option<Key>>,
    pub mouse: Vec<(Key, MouseAction)>,
    pub sensitivity: Option<f64>,
    pub speedup_ms: Option<u64>,
    pub max_step: Option<i32>,
    /// File this configuration was read from
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        toml_config.to_config()
    }

    /// `$XDG_CONFIG_HOME/ubermap/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ubermap").join("config.toml"))
    }

    /// Load from the default location; a missing file is an empty config.
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        Ok(Self::default())
    }

    pub fn preset(&self) -> Preset {
        self.preset.unwrap_or_default()
    }

    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Build the final policy: the preset (or `preset_override`) with this
    /// file's entries laid over it.
    pub fn mapping_table(&self, preset_override: Option<Preset>) -> MapperResult<MappingTable> {
        let mut table = preset_override.unwrap_or_else(|| self.preset()).table();

        for (from, to) in &self.direct {
            match to {
                Some(to) => table.direct.set(*from, *to),
                None => table.direct.clear(*from),
            }
        }
        if let Some(key) = self.modifier_key {
            table.mod_key = key;
        }
        for (from, to) in &self.modifier {
            match to {
                Some(to) => table.modifier.set(*from, *to),
                None => table.modifier.clear(*from),
            }
        }
        if let Some(key) = self.mouse_key {
            table.mouse_key = key;
        }
        for (from, action) in &self.mouse {
            table.mouse.set(*from, *action);
        }
        if let Some(sensitivity) = self.sensitivity {
            table.speed.sensitivity = sensitivity;
        }
        if let Some(speedup_ms) = self.speedup_ms {
            table.speed.speedup_ms = speedup_ms;
        }
        if let Some(max_step) = self.max_step {
            table.speed.max_step = max_step;
        }

        table.validate()?;
        Ok(table)
    }

    /// The configured allow-list, or the preset's default.
    pub fn allow_list(&self, preset: Preset) -> DeviceAllowList {
        match &self.allow {
            Some(patterns) => DeviceAllowList::new(patterns.iter().cloned()),
            None => DeviceAllowList::new(preset.default_allow_list().iter().copied()),
        }
    }
}

impl ConfigToml {
    fn to_config(&self) -> Result<Config, ConfigError> {
        let preset = self
            .general
            .preset
            .as_deref()
            .map(|name| {
                Preset::from_str(name.trim())
                    .map_err(|_| ConfigError::InvalidValue(format!("unknown preset \"{}\"", name)))
            })
            .transpose()?;

        let mouse = &self.mouse;
        if let Some(s) = mouse.sensitivity {
            if !(s.is_finite() && s > 0.0) {
                return Err(ConfigError::InvalidValue(format!(
                    "mouse.sensitivity must be positive, got {}",
                    s
                )));
            }
        }
        if let Some(step) = mouse.max_step {
            if step < MIN_MAX_STEP {
                return Err(ConfigError::InvalidValue(format!(
                    "mouse.max_step must be at least {}, got {}",
                    MIN_MAX_STEP, step
                )));
            }
        }

        Ok(Config {
            preset,
            debug: self.general.debug.unwrap_or(false),
            device: self
                .devices
                .device
                .as_ref()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            allow: self.devices.allow.clone(),
            direct: parse_key_map(&self.direct)?,
            modifier_key: self.modifier.key.as_deref().map(parse_optional_key).transpose()?,
            modifier: parse_key_map(&self.modifier.map)?,
            mouse_key: mouse.key.as_deref().map(parse_optional_key).transpose()?,
            mouse: parse_mouse_map(&mouse.map)?,
            sensitivity: mouse.sensitivity,
            speedup_ms: mouse.speedup_ms,
            max_step: mouse.max_step,
            source_path: None,
        })
    }
}

/// Parse a key name into a Key
fn parse_key(name: &str) -> Result<Key, ConfigError> {
    let trimmed = name.trim();
    key_from_name(trimmed).ok_or_else(|| ConfigError::InvalidKey(trimmed.to_string()))
}

/// Like `parse_key`, with "NONE" meaning no key
fn parse_optional_key(name: &str) -> Result<Option<Key>, ConfigError> {
    if name.trim().eq_ignore_ascii_case("NONE") {
        return Ok(None);
    }
    parse_key(name).map(Some)
}

fn parse_key_map(map: &HashMap<String, String>) -> Result<Vec<(Key, Option<Key>)>, ConfigError> {
    let mut entries = map
        .iter()
        .map(|(from, to)| Ok((parse_key(from)?, parse_optional_key(to)?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    entries.sort_by_key(|(from, _)| *from);
    Ok(entries)
}

fn parse_mouse_map(map: &HashMap<String, String>) -> Result<Vec<(Key, MouseAction)>, ConfigError> {
    let mut entries = map
        .iter()
        .map(|(from, action)| {
            let action = MouseAction::from_str(action)
                .map_err(|_| ConfigError::InvalidMouseAction(action.trim().to_string()))?;
            Ok((parse_key(from)?, action))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    entries.sort_by_key(|(from, _)| *from);
    Ok(entries)
}
