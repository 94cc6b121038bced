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

//! The contract between code generation and native shader compilers.

use super::stage::ShaderStage;
use crate::error::ShaderError;
use crate::settings::CompilerSettings;

/// Storage order of matrices in uniform buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixPacking {
    /// Each column occupies one 16-byte register.
    ColumnMajor,
    /// Each row occupies one 16-byte register.
    RowMajor,
}

/// Optimisation level handed to the native compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptimizationLevel {
    /// Skip optimisation entirely.
    Skip,
    /// Lowest optimisation level.
    Level0,
    /// Level 1.
    Level1,
    /// Level 2.
    Level2,
    /// Maximum optimisation.
    #[default]
    Level3,
}

/// Flags the driver passes to every compiler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileFlags {
    /// Always [`MatrixPacking::ColumnMajor`] when called through [`compile_shader`].
    pub matrix_packing: MatrixPacking,
    /// Optimisation level.
    pub optimization: OptimizationLevel,
    /// Whether to embed debug information.
    pub debug_info: bool,
}

/// One generated shader ready to be compiled.
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    /// The complete generated source text.
    pub source: &'a str,
    /// Name of the entry point function.
    pub entry_point: &'a str,
    /// Native profile or target string.
    pub profile: &'a str,
    /// Pipeline stage the source is written for.
    pub stage: ShaderStage,
    /// Logical shader name, used in diagnostics.
    pub shader_name: &'a str,
}

/// Native shader bytecode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderBytecode(Vec<u8>);

impl ShaderBytecode {
    /// Wraps raw bytecode.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The bytecode bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bytecode is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The successful result of a compiler invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    /// Compiled bytecode.
    pub bytecode: ShaderBytecode,
    /// Warnings the compiler printed while succeeding.
    pub warnings: Vec<String>,
}

/// A native shader compiler.
///
/// Implementations live in `prism-infra` and wrap a platform tool (`fxc`) or a
/// library (`naga`). Tests substitute a recording implementation.
pub trait ShaderCompiler {
    /// A short name for log output.
    fn name(&self) -> &str;

    /// Compiles one shader.
    ///
    /// # Arguments
    ///
    /// * `request`: The generated source with its entry point and profile.
    /// * `flags`: Packing and optimisation flags chosen by the driver.
    ///
    /// # Returns
    ///
    /// The bytecode and any warnings, or the compiler's diagnostic text on failure.
    fn compile(&self, request: &CompileRequest<'_>, flags: &CompileFlags)
        -> Result<CompileOutput, String>;
}

/// A closed set of profile strings for one backend.
pub trait ShaderProfile: Copy + Sized + 'static {
    /// Every profile, in ascending order.
    const ALL: &'static [Self];

    /// The stage the profile is restricted to, `None` when it applies to every stage.
    fn stage(self) -> Option<ShaderStage>;

    /// The exact profile string.
    fn as_str(self) -> &'static str;

    /// Parses a profile string that must be valid for `stage`. Matching is exact
    /// and case-sensitive.
    fn parse_for_stage(stage: ShaderStage, profile: &str) -> Result<Self, ShaderError> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == profile && p.stage().is_none_or(|s| s == stage))
            .ok_or_else(|| ShaderError::InvalidProfile {
                stage: Some(stage),
                profile: profile.to_string(),
            })
    }
}

/// Compiles generated source through `compiler`.
///
/// Matrices are always packed column-major and optimisation is always at
/// [`OptimizationLevel::Level3`]; debug information and warning policy come
/// from `settings`. A failure is reported as
/// [`ShaderError::CompilationFailed`] carrying the full source text.
pub fn compile_shader(
    compiler: &dyn ShaderCompiler,
    request: &CompileRequest<'_>,
    settings: &CompilerSettings,
) -> Result<ShaderBytecode, ShaderError> {
    let flags = CompileFlags {
        matrix_packing: MatrixPacking::ColumnMajor,
        optimization: OptimizationLevel::Level3,
        debug_info: settings.debug_info,
    };
    log::debug!(
        "{}: compiling '{}' ({}, entry '{}')",
        compiler.name(),
        request.shader_name,
        request.profile,
        request.entry_point
    );

    let failed = |diagnostic: String| ShaderError::CompilationFailed {
        shader_name: request.shader_name.to_string(),
        source_text: request.source.to_string(),
        diagnostic,
    };

    let output = compiler.compile(request, &flags).map_err(failed)?;
    for warning in &output.warnings {
        log::warn!("{} ({}): {warning}", request.shader_name, compiler.name());
    }
    if settings.warnings_as_errors && !output.warnings.is_empty() {
        return Err(failed(output.warnings.join("\n")));
    }
    Ok(output.bytecode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        flags: RefCell<Vec<CompileFlags>>,
        result: Option<Result<CompileOutput, String>>,
    }

    impl ShaderCompiler for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn compile(
            &self,
            _request: &CompileRequest<'_>,
            flags: &CompileFlags,
        ) -> Result<CompileOutput, String> {
            self.flags.borrow_mut().push(*flags);
            self.result.clone().unwrap_or_else(|| Ok(CompileOutput::default()))
        }
    }

    fn request(source: &str) -> CompileRequest<'_> {
        CompileRequest {
            source,
            entry_point: "main",
            profile: "ps_4_0",
            stage: ShaderStage::Pixel,
            shader_name: "Blit",
        }
    }

    #[test]
    fn driver_forces_column_major_and_maximum_optimization() {
        let compiler = Recording::default();
        compile_shader(&compiler, &request("void main() {}"), &CompilerSettings::default())
            .unwrap();
        let flags = compiler.flags.borrow();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].matrix_packing, MatrixPacking::ColumnMajor);
        assert_eq!(flags[0].optimization, OptimizationLevel::Level3);
    }

    #[test]
    fn debug_settings_keep_maximum_optimization() {
        let compiler = Recording::default();
        let settings = CompilerSettings {
            debug_info: true,
            ..Default::default()
        };
        compile_shader(&compiler, &request("void main() {}"), &settings).unwrap();
        let flags = compiler.flags.borrow();
        assert_eq!(flags[0].optimization, OptimizationLevel::Level3);
        assert!(flags[0].debug_info);
        assert_eq!(flags[0].matrix_packing, MatrixPacking::ColumnMajor);
    }

    #[test]
    fn diagnostics_are_wrapped_with_source() {
        let compiler = Recording {
            result: Some(Err("error X3000: syntax error".into())),
            ..Default::default()
        };
        let error = compile_shader(&compiler, &request("broken"), &CompilerSettings::default())
            .unwrap_err();
        assert_eq!(
            error,
            ShaderError::CompilationFailed {
                shader_name: "Blit".into(),
                source_text: "broken".into(),
                diagnostic: "error X3000: syntax error".into(),
            }
        );
    }

    #[test]
    fn warnings_can_be_promoted_to_errors() {
        let compiler = Recording {
            result: Some(Ok(CompileOutput {
                bytecode: ShaderBytecode::new(vec![1, 2, 3]),
                warnings: vec!["warning X3206: implicit truncation".into()],
            })),
            ..Default::default()
        };
        let lenient = compile_shader(&compiler, &request("x"), &CompilerSettings::default());
        assert_eq!(lenient.unwrap().len(), 3);

        let strict = CompilerSettings {
            warnings_as_errors: true,
            ..Default::default()
        };
        let error = compile_shader(&compiler, &request("x"), &strict).unwrap_err();
        assert!(matches!(error, ShaderError::CompilationFailed { .. }));
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum TestProfile {
        Vs,
        Any,
    }

    impl ShaderProfile for TestProfile {
        const ALL: &'static [Self] = &[TestProfile::Vs, TestProfile::Any];

        fn stage(self) -> Option<ShaderStage> {
            match self {
                TestProfile::Vs => Some(ShaderStage::Vertex),
                TestProfile::Any => None,
            }
        }

        fn as_str(self) -> &'static str {
            match self {
                TestProfile::Vs => "vs_test",
                TestProfile::Any => "any",
            }
        }
    }

    #[test]
    fn profiles_parse_per_stage() {
        assert_eq!(
            TestProfile::parse_for_stage(ShaderStage::Vertex, "vs_test").unwrap(),
            TestProfile::Vs
        );
        assert!(TestProfile::parse_for_stage(ShaderStage::Pixel, "vs_test").is_err());
        assert!(TestProfile::parse_for_stage(ShaderStage::Vertex, "VS_TEST").is_err());
        assert_eq!(
            TestProfile::parse_for_stage(ShaderStage::Compute, "any").unwrap(),
            TestProfile::Any
        );
    }
}
