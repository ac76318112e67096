use std::path::PathBuf;

use color_eyre::eyre::Result;
use serde::Deserialize;

use crate::utils::get_config_dir;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
  pub title: String,
  pub highlight_symbol: String,
  /// Titles of the notes shown on startup.
  pub notes: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      title: "Notes".to_string(),
      highlight_symbol: "→".to_string(),
      notes: vec!["Groceries".to_string(), "Quarterly report".to_string(), "Birthday card".to_string()],
    }
  }
}

impl Config {
  /// Loads `config.toml` or `config.json` from the config directory, then
  /// applies `ROWKIT_*` environment overrides. Every source is optional.
  pub fn new() -> Result<Self> {
    Self::load_from(get_config_dir())
  }

  pub fn load_from(config_dir: PathBuf) -> Result<Self> {
    let config_files = [("config.toml", config::FileFormat::Toml), ("config.json", config::FileFormat::Json)];

    let mut builder = config::Config::builder();
    for (file, format) in &config_files {
      builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
    }
    builder = builder.add_source(
      config::Environment::with_prefix("ROWKIT").try_parsing(true).list_separator(",").with_list_parse_key("notes"),
    );

    let cfg: Self = builder.build()?.try_deserialize()?;
    Ok(cfg)
  }
}
