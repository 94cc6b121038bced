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

//! In-process GLSL compilation: naga's GLSL front-end, its validator, and the
//! SPIR-V writer.

use naga::back::spv;
use naga::front::glsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};
use prism_core::shader::{
    CompileFlags, CompileOutput, CompileRequest, MatrixPacking, ShaderBytecode, ShaderCompiler,
    ShaderStage,
};
use thiserror::Error;

/// Failures of one naga compilation.
#[derive(Debug, Error)]
pub enum NagaError {
    /// naga has no entry point kind for the stage.
    #[error("naga cannot compile {0} shaders from GLSL")]
    Stage(ShaderStage),
    /// The GLSL front-end rejected the source.
    #[error("GLSL parse error:\n{0}")]
    Parse(String),
    /// The module parsed but failed validation.
    #[error("validation error:\n{0}")]
    Validation(String),
    /// The SPIR-V writer failed.
    #[error("SPIR-V output error: {0}")]
    Output(#[from] spv::Error),
}

/// Compiles GLSL 4.x to SPIR-V with naga.
#[derive(Debug, Clone, Copy, Default)]
pub struct NagaGlslCompiler;

impl NagaGlslCompiler {
    /// Creates the compiler.
    pub fn new() -> Self {
        Self
    }

    fn naga_stage(stage: ShaderStage) -> Result<naga::ShaderStage, NagaError> {
        match stage {
            ShaderStage::Vertex => Ok(naga::ShaderStage::Vertex),
            ShaderStage::Pixel => Ok(naga::ShaderStage::Fragment),
            ShaderStage::Compute => Ok(naga::ShaderStage::Compute),
            other => Err(NagaError::Stage(other)),
        }
    }

    /// Parses, validates and writes one shader as SPIR-V words.
    pub fn compile_to_words(
        &self,
        request: &CompileRequest<'_>,
        flags: &CompileFlags,
    ) -> Result<Vec<u32>, NagaError> {
        let stage = Self::naga_stage(request.stage)?;
        if flags.matrix_packing == MatrixPacking::RowMajor {
            log::warn!(
                "'{}': GLSL blocks are always column-major, ignoring row-major packing",
                request.shader_name
            );
        }

        let mut frontend = glsl::Frontend::default();
        let module = frontend
            .parse(&glsl::Options::from(stage), request.source)
            .map_err(|errors| NagaError::Parse(errors.emit_to_string(request.source)))?;

        let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
        let info = validator
            .validate(&module)
            .map_err(|error| NagaError::Validation(error.emit_to_string(request.source)))?;

        let mut options = spv::Options::default();
        if flags.debug_info {
            options.flags |= spv::WriterFlags::DEBUG;
        }
        let words = spv::write_vec(&module, &info, &options, None)?;
        log::trace!(
            "'{}': naga wrote {} SPIR-V words",
            request.shader_name,
            words.len()
        );
        Ok(words)
    }
}

impl ShaderCompiler for NagaGlslCompiler {
    fn name(&self) -> &str {
        "naga"
    }

    fn compile(
        &self,
        request: &CompileRequest<'_>,
        flags: &CompileFlags,
    ) -> Result<CompileOutput, String> {
        let words = self
            .compile_to_words(request, flags)
            .map_err(|e| e.to_string())?;
        Ok(CompileOutput {
            bytecode: ShaderBytecode::new(bytemuck::cast_slice(&words).to_vec()),
            warnings: Vec::new(),
        })
    }
}
