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

use prism_core::shader::{ShaderProfile, ShaderStage};
use std::fmt;

/// HLSL shader model 4 and 5 compilation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum D3d11Profile {
    Vs4_0,
    Vs4_1,
    Vs5_0,
    Ps4_0,
    Ps4_1,
    Ps5_0,
    Gs4_0,
    Gs4_1,
    Gs5_0,
    Hs5_0,
    Ds5_0,
    Cs4_0,
    Cs4_1,
    Cs5_0,
}

impl D3d11Profile {
    /// The shader model 5 profile of a stage, used when a reflection names no profile.
    pub const fn latest(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => D3d11Profile::Vs5_0,
            ShaderStage::Hull => D3d11Profile::Hs5_0,
            ShaderStage::Domain => D3d11Profile::Ds5_0,
            ShaderStage::Geometry => D3d11Profile::Gs5_0,
            ShaderStage::Pixel => D3d11Profile::Ps5_0,
            ShaderStage::Compute => D3d11Profile::Cs5_0,
        }
    }

    /// Whether the profile belongs to shader model 5.
    pub const fn is_shader_model_5(self) -> bool {
        matches!(
            self,
            D3d11Profile::Vs5_0
                | D3d11Profile::Ps5_0
                | D3d11Profile::Gs5_0
                | D3d11Profile::Hs5_0
                | D3d11Profile::Ds5_0
                | D3d11Profile::Cs5_0
        )
    }
}

impl ShaderProfile for D3d11Profile {
    const ALL: &'static [Self] = &[
        D3d11Profile::Vs4_0,
        D3d11Profile::Vs4_1,
        D3d11Profile::Vs5_0,
        D3d11Profile::Ps4_0,
        D3d11Profile::Ps4_1,
        D3d11Profile::Ps5_0,
        D3d11Profile::Gs4_0,
        D3d11Profile::Gs4_1,
        D3d11Profile::Gs5_0,
        D3d11Profile::Hs5_0,
        D3d11Profile::Ds5_0,
        D3d11Profile::Cs4_0,
        D3d11Profile::Cs4_1,
        D3d11Profile::Cs5_0,
    ];

    fn stage(self) -> Option<ShaderStage> {
        Some(match self {
            D3d11Profile::Vs4_0 | D3d11Profile::Vs4_1 | D3d11Profile::Vs5_0 => ShaderStage::Vertex,
            D3d11Profile::Ps4_0 | D3d11Profile::Ps4_1 | D3d11Profile::Ps5_0 => ShaderStage::Pixel,
            D3d11Profile::Gs4_0 | D3d11Profile::Gs4_1 | D3d11Profile::Gs5_0 => {
                ShaderStage::Geometry
            }
            D3d11Profile::Hs5_0 => ShaderStage::Hull,
            D3d11Profile::Ds5_0 => ShaderStage::Domain,
            D3d11Profile::Cs4_0 | D3d11Profile::Cs4_1 | D3d11Profile::Cs5_0 => {
                ShaderStage::Compute
            }
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            D3d11Profile::Vs4_0 => "vs_4_0",
            D3d11Profile::Vs4_1 => "vs_4_1",
            D3d11Profile::Vs5_0 => "vs_5_0",
            D3d11Profile::Ps4_0 => "ps_4_0",
            D3d11Profile::Ps4_1 => "ps_4_1",
            D3d11Profile::Ps5_0 => "ps_5_0",
            D3d11Profile::Gs4_0 => "gs_4_0",
            D3d11Profile::Gs4_1 => "gs_4_1",
            D3d11Profile::Gs5_0 => "gs_5_0",
            D3d11Profile::Hs5_0 => "hs_5_0",
            D3d11Profile::Ds5_0 => "ds_5_0",
            D3d11Profile::Cs4_0 => "cs_4_0",
            D3d11Profile::Cs4_1 => "cs_4_1",
            D3d11Profile::Cs5_0 => "cs_5_0",
        }
    }
}

impl fmt::Display for D3d11Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
