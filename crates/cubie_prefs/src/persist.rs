//! Preferences file location and saving.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};
use serde::Serialize;

const PREFS_FILE_NAME: &str = "cubie";
const PREFS_FILE_EXTENSION: &str = "yaml";

lazy_static! {
    static ref PROJECT_DIRS: Option<ProjectDirs> = ProjectDirs::from("", "", "Cubie");
}

/// Returns the path of the user preferences file.
pub fn prefs_file() -> Result<PathBuf> {
    let dirs = PROJECT_DIRS
        .as_ref()
        .ok_or_eyre("unable to get preferences file path")?;
    Ok(dirs
        .config_dir()
        .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")))
}

pub(crate) fn file_source(path: &Path) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path).format(super::PREFS_FILE_FORMAT)
}

/// Returns the user preferences file as an optional config source.
pub fn user_config_source() -> Result<impl config::Source + Send + Sync + 'static> {
    Ok(file_source(&prefs_file()?).required(false))
}

/// Writes preferences to the user preferences file.
pub fn save(prefs_data: &impl Serialize) -> Result<()> {
    save_to(&prefs_file()?, prefs_data)
}

/// Writes preferences to `path`, creating parent directories as needed.
pub fn save_to(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    log::info!("Saved preferences to {}", path.display());
    Ok(())
}
