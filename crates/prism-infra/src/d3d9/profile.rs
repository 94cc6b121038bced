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

/// HLSL shader model 2 and 3 compilation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum D3d9Profile {
    Vs2_0,
    Vs2_a,
    Vs3_0,
    Ps2_0,
    Ps2_a,
    Ps2_b,
    Ps3_0,
}

impl D3d9Profile {
    /// The shader model 3 profile of a vertex or pixel shader.
    pub const fn shader_model_3(stage: ShaderStage) -> Option<Self> {
        match stage {
            ShaderStage::Vertex => Some(D3d9Profile::Vs3_0),
            ShaderStage::Pixel => Some(D3d9Profile::Ps3_0),
            _ => None,
        }
    }
}

impl ShaderProfile for D3d9Profile {
    const ALL: &'static [Self] = &[
        D3d9Profile::Vs2_0,
        D3d9Profile::Vs2_a,
        D3d9Profile::Vs3_0,
        D3d9Profile::Ps2_0,
        D3d9Profile::Ps2_a,
        D3d9Profile::Ps2_b,
        D3d9Profile::Ps3_0,
    ];

    fn stage(self) -> Option<ShaderStage> {
        Some(match self {
            D3d9Profile::Vs2_0 | D3d9Profile::Vs2_a | D3d9Profile::Vs3_0 => ShaderStage::Vertex,
            D3d9Profile::Ps2_0 | D3d9Profile::Ps2_a | D3d9Profile::Ps2_b | D3d9Profile::Ps3_0 => {
                ShaderStage::Pixel
            }
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            D3d9Profile::Vs2_0 => "vs_2_0",
            D3d9Profile::Vs2_a => "vs_2_a",
            D3d9Profile::Vs3_0 => "vs_3_0",
            D3d9Profile::Ps2_0 => "ps_2_0",
            D3d9Profile::Ps2_a => "ps_2_a",
            D3d9Profile::Ps2_b => "ps_2_b",
            D3d9Profile::Ps3_0 => "ps_3_0",
        }
    }
}

impl fmt::Display for D3d9Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
