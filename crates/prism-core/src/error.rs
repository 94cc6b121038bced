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

//! Defines the error types shared by the shader pipeline and the device layer.

use crate::device::{BackendKind, ShaderId};
use crate::format::PrimitiveTopology;
use crate::shader::ShaderStage;
use std::fmt;

/// An error raised while describing, generating, compiling or binding a shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The shader description text could not be parsed.
    Parse {
        /// One-based line number of the offending line.
        line: usize,
        /// What went wrong on that line.
        message: String,
    },
    /// The reflection is internally inconsistent or lacks metadata its stage needs.
    MalformedReflection {
        /// Logical name of the shader.
        shader: String,
        /// Description of the inconsistency.
        reason: String,
    },
    /// The active backend has no native pipeline stage for this shader.
    StageUnsupported {
        /// The backend that rejected the stage.
        backend: BackendKind,
        /// The rejected stage.
        stage: ShaderStage,
    },
    /// The native compiler rejected the generated source.
    CompilationFailed {
        /// Logical name of the shader.
        shader_name: String,
        /// The complete generated source that was handed to the compiler.
        source_text: String,
        /// The compiler's own diagnostic output.
        diagnostic: String,
    },
    /// A profile string is not part of the known set for the stage.
    InvalidProfile {
        /// The stage the profile was requested for, if any.
        stage: Option<ShaderStage>,
        /// The rejected profile string.
        profile: String,
    },
    /// A vertex layout does not provide exactly one element per required input element.
    LayoutLengthMismatch {
        /// Logical name of the vertex shader.
        shader: String,
        /// Number of layout elements the shader inputs require.
        expected: usize,
        /// Number of layout elements supplied by the caller.
        actual: usize,
    },
    /// An engine-level value has no equivalent on the backend.
    UnsupportedValue {
        /// The backend that has no mapping.
        backend: BackendKind,
        /// Human readable description of the value.
        value: String,
    },
}

impl ShaderError {
    /// Shorthand for a [`ShaderError::MalformedReflection`].
    pub fn malformed(shader: impl Into<String>, reason: impl Into<String>) -> Self {
        ShaderError::MalformedReflection {
            shader: shader.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ShaderError::UnsupportedValue`] built from any debug-printable value.
    pub fn unsupported(backend: BackendKind, value: impl fmt::Debug) -> Self {
        ShaderError::UnsupportedValue {
            backend,
            value: format!("{value:?}"),
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Parse { line, message } => {
                write!(f, "Shader description parse error at line {line}: {message}")
            }
            ShaderError::MalformedReflection { shader, reason } => {
                write!(f, "Malformed reflection for shader '{shader}': {reason}")
            }
            ShaderError::StageUnsupported { backend, stage } => {
                write!(f, "The {backend} backend does not support {stage:?} shaders")
            }
            ShaderError::CompilationFailed {
                shader_name,
                source_text,
                diagnostic,
            } => {
                writeln!(f, "Shader compilation failed for '{shader_name}': {diagnostic}")?;
                writeln!(f, "--- generated source ---")?;
                for (index, line) in source_text.lines().enumerate() {
                    writeln!(f, "{:>4} | {line}", index + 1)?;
                }
                Ok(())
            }
            ShaderError::InvalidProfile {
                stage: Some(stage),
                profile,
            } => write!(f, "Invalid profile '{profile}' for {stage:?} shaders"),
            ShaderError::InvalidProfile {
                stage: None,
                profile,
            } => write!(f, "Invalid profile '{profile}'"),
            ShaderError::LayoutLengthMismatch {
                shader,
                expected,
                actual,
            } => write!(
                f,
                "Vertex layout for shader '{shader}' has {actual} elements, but its inputs require {expected}"
            ),
            ShaderError::UnsupportedValue { backend, value } => {
                write!(f, "Value {value} is not supported by the {backend} backend")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error raised by the device context while validating or flushing pipeline state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A shader-level error occurred.
    Shader(ShaderError),
    /// The shader id does not refer to a live shader on the device.
    UnknownShader(ShaderId),
    /// The shader was bound to a stage it was not compiled for.
    StageMismatch {
        /// The shader that was bound.
        id: ShaderId,
        /// The stage the shader was compiled for.
        expected: ShaderStage,
        /// The stage it was bound to.
        bound_to: ShaderStage,
    },
    /// A draw or dispatch needs a shader on a stage where none is bound.
    NoShaderBound(ShaderStage),
    /// The input assembler topology cannot feed the bound shader stages.
    IncompatibleTopology {
        /// The topology set on the input assembler.
        topology: PrimitiveTopology,
        /// Why the topology is rejected.
        reason: String,
    },
    /// An indexed draw was issued without an index buffer.
    NoIndexBuffer,
    /// A binding slot lies outside the capacity of its binding group.
    SlotOutOfRange {
        /// The binding group (`"vertex buffers"`, `"samplers"`, ...).
        group: &'static str,
        /// First slot past the end of the write.
        end: usize,
        /// Number of slots the group has.
        capacity: usize,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::Shader(err) => write!(f, "Shader error: {err}"),
            ContextError::UnknownShader(id) => write!(f, "Unknown shader ID: {id:?}"),
            ContextError::StageMismatch {
                id,
                expected,
                bound_to,
            } => write!(
                f,
                "Shader {id:?} was compiled for the {expected:?} stage but bound to {bound_to:?}"
            ),
            ContextError::NoShaderBound(stage) => {
                write!(f, "No shader is bound to the {stage:?} stage")
            }
            ContextError::IncompatibleTopology { topology, reason } => {
                write!(f, "Topology {topology:?} is incompatible: {reason}")
            }
            ContextError::NoIndexBuffer => write!(f, "Indexed draw without an index buffer"),
            ContextError::SlotOutOfRange {
                group,
                end,
                capacity,
            } => write!(
                f,
                "Binding {group} up to slot {end} exceeds the capacity of {capacity}"
            ),
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContextError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ContextError {
    fn from(err: ShaderError) -> Self {
        ContextError::Shader(err)
    }
}
