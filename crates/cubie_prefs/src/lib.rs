//! User preferences.
//!
//! Defaults are embedded from `default.yaml`. A user file, if present, is
//! layered on top of them.

#![allow(missing_docs)] // too many things to document

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use cubie_core::CubeColors;
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
pub mod persist;
mod view;

pub use animation::*;
pub use interaction::*;
pub use view::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub colors: CubeColors,
    pub view: ViewPreferences,
}
impl Preferences {
    /// Loads preferences from `path`, or from the default preferences file if
    /// `path` is `None`. If loading fails, the default preferences are
    /// returned.
    pub fn load(path: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences from `path`, or from the default preferences file if
    /// `path` is `None`, layered over the defaults.
    pub fn try_load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        match path {
            Some(path) => {
                log::info!("Loading preferences from {}", path.display());
                config = config.add_source(persist::file_source(path).required(true));
            }
            None => match persist::user_config_source() {
                Ok(source) => config = config.add_source(source),
                Err(e) => log::warn!("Error loading user preferences: {e}"),
            },
        }

        let prefs: Self = config.build()?.try_deserialize()?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Writes preferences to `path`, or to the default preferences file if
    /// `path` is `None`.
    pub fn save(&self, path: Option<&Path>) -> eyre::Result<()> {
        match path {
            Some(path) => persist::save_to(path, self),
            None => persist::save(self),
        }
    }

    /// Serializes preferences to YAML.
    pub fn to_yaml(&self) -> eyre::Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> eyre::Result<()> {
        self.animation.validate()?;
        self.interaction.validate()?;
        self.view.validate()?;
        Ok(())
    }
}
