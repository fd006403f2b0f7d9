//! Runtime context resolved from global CLI arguments.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde_json::Value;
use tracing::debug;

use vellum_config::settings::{SystemSettings, find_settings_file, load_settings};
use vellum_dice::source::{FixedRolls, RandomSource, ThreadRngSource};

use crate::cli::GlobalArgs;

/// Everything a command handler needs beyond its own arguments.
pub struct RuntimeContext {
    /// The entity's property bag (empty object when no file was given).
    pub props: Value,

    /// Table-wide system settings.
    pub settings: SystemSettings,

    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build the context: load the props file if given, and discover or
    /// load settings.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let props = match &global.props {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read props file '{}'", path))?;
                debug!(path, "loaded property bag");
                serde_json::from_str(&content)
                    .with_context(|| format!("props file '{}' is not valid JSON", path))?
            }
            None => Value::Object(serde_json::Map::new()),
        };

        let settings = match &global.config {
            Some(path) => load_settings(Path::new(path))
                .with_context(|| format!("failed to load settings '{}'", path))?,
            None => match find_settings_file(Path::new(".")) {
                Some(path) => load_settings(&path)
                    .with_context(|| format!("failed to load settings '{}'", path.display()))?,
                None => SystemSettings::default(),
            },
        };

        Ok(Self {
            props,
            settings,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }
}

/// Build a randomness source: fixed faces when seeded, thread RNG otherwise.
pub fn random_source(seed_rolls: &Option<Vec<i64>>) -> Box<dyn RandomSource> {
    match seed_rolls {
        Some(values) => Box::new(FixedRolls::new(values.clone())),
        None => Box::new(ThreadRngSource),
    }
}
