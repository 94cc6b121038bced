// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compiler settings, loaded from RON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Settings shared by every backend's compilation step.
///
/// Matrix packing and optimisation are not configurable: generated code
/// assumes column-major matrices and every compile runs at full optimisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Embed debug information in the bytecode.
    pub debug_info: bool,
    /// Treat compiler warnings as failures.
    pub warnings_as_errors: bool,
    /// Path or name of the `fxc` executable used by the Direct3D backends.
    pub fxc_path: PathBuf,
    /// GLSL version emitted by the OpenGL backend (440, 450 or 460).
    pub glsl_version: u32,
    /// When set, every generated source is written to this directory before compiling.
    pub dump_dir: Option<PathBuf>,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            debug_info: false,
            warnings_as_errors: false,
            fxc_path: PathBuf::from("fxc"),
            glsl_version: 450,
            dump_dir: None,
        }
    }
}

/// An error raised while loading [`CompilerSettings`].
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),
    /// The file is not valid RON for [`CompilerSettings`].
    InvalidFormat(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Failed to read compiler settings: {e}"),
            SettingsError::InvalidFormat(msg) => write!(f, "Invalid compiler settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::InvalidFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl CompilerSettings {
    /// Parses settings from RON text. Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        ron::from_str(text).map_err(|e| SettingsError::InvalidFormat(e.to_string()))
    }

    /// Reads settings from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_ron_str(&text)?;
        log::debug!("Loaded compiler settings from {}", path.display());
        Ok(settings)
    }

    /// Serializes the settings as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty_config)
            .map_err(|e| SettingsError::InvalidFormat(e.to_string()))
    }
}
