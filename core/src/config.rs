// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The name of the gigcal application.
pub const APP_NAME: &str = "gigcal";

/// Configuration for the gigcal application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Directory holding the persisted data blobs. Defaults to the
    /// user-specific state directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<()> {
        match &self.data_dir {
            Some(dir) => {
                self.data_dir = Some(
                    expand_path(dir)
                        .map_err(|e| Error::Config(format!("Failed to expand data dir: {e}")))?,
                )
            }
            None => self.data_dir = Some(get_state_dir()?.join(APP_NAME)),
        };

        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config("Invalid path".to_string()))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| Error::Config("User-specific home directory not found".into()))
}

fn get_state_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| Error::Config("User-specific state directory not found".into()))
}
