// Ubermap Config API
// TOML configuration layered over the built-in presets

pub mod parser;

pub use parser::{
    Config, ConfigError, ConfigToml, DevicesConfig, GeneralConfig, ModifierConfig, MouseConfig,
};
