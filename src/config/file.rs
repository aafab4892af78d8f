use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Bindings;
use crate::device::DeviceKind;
use crate::orientation::Orientation;
use crate::pointer::Positioning;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<String>,
    #[serde(default)]
    pub device: DeviceKind,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub positioning: Positioning,
    pub double_click_ms: Option<u64>,
    #[serde(default)]
    pub buttons: Bindings,
}

pub fn parse(content: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match parse(&content) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_from_default_paths() -> Option<FileConfig> {
    default_config_paths()
        .into_iter()
        .filter(|path| path.exists())
        .find_map(|path| load_from_path(&path))
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("rm-pointer.toml")];

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("rm-pointer.toml"));
    }

    paths
}
