//! Layered settings: TOML file, then `DDF_*` environment, then command line.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use ddf_data::LoadOptions;
use serde::Deserialize;

/// Used when `--config` is not given; may be absent.
pub const DEFAULT_CONFIG: &str = "ddf.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub strict: bool,
    pub lax: bool,
    pub data_dirs: Vec<PathBuf>,
    pub log_level: Option<String>,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub strict: bool,
    pub lax: bool,
}

impl Settings {
    /// Read settings. An explicit `file` must exist; otherwise
    /// [`DEFAULT_CONFIG`] is used if present.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self, config::ConfigError> {
        let (path, required) = match file {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG), false),
        };
        Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix("DDF")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("data_dirs"),
            )
            .set_override_option("strict", overrides.strict.then_some(true))?
            .set_override_option("lax", overrides.lax.then_some(true))?
            .build()?
            .try_deserialize()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict,
            lax: self.lax,
        }
    }
}
