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

use prism_core::error::ShaderError;
use prism_core::shader::{ShaderProfile, ShaderStage};
use std::fmt;

/// GLSL language versions the OpenGL backend targets.
///
/// A version applies to every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum GlslVersion {
    /// GLSL 4.40.
    V440,
    /// GLSL 4.50.
    #[default]
    V450,
    /// GLSL 4.60.
    V460,
}

impl GlslVersion {
    /// The version written in `#version` directives, e.g. `450`.
    pub const fn number(self) -> u32 {
        match self {
            GlslVersion::V440 => 440,
            GlslVersion::V450 => 450,
            GlslVersion::V460 => 460,
        }
    }

    /// The version with the given number.
    pub fn from_number(number: u32) -> Result<Self, ShaderError> {
        Self::ALL
            .iter()
            .copied()
            .find(|version| version.number() == number)
            .ok_or_else(|| ShaderError::InvalidProfile {
                stage: None,
                profile: number.to_string(),
            })
    }
}

impl ShaderProfile for GlslVersion {
    const ALL: &'static [Self] = &[GlslVersion::V440, GlslVersion::V450, GlslVersion::V460];

    fn stage(self) -> Option<ShaderStage> {
        None
    }

    fn as_str(self) -> &'static str {
        match self {
            GlslVersion::V440 => "440",
            GlslVersion::V450 => "450",
            GlslVersion::V460 => "460",
        }
    }
}

impl fmt::Display for GlslVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
