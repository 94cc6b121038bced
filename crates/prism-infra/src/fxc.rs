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

//! Out-of-process HLSL compilation through the DirectX effect compiler.
//!
//! Both Direct3D backends hand their generated source to `fxc`. The source is
//! written to a scratch directory, the tool is spawned with the profile, entry
//! point and packing flags, and the object file is read back as bytecode.

use prism_core::settings::CompilerSettings;
use prism_core::shader::{
    CompileFlags, CompileOutput, CompileRequest, MatrixPacking, OptimizationLevel,
    ShaderBytecode, ShaderCompiler,
};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// File names inside the per-compilation scratch directory.
const SCRATCH_SOURCE: &str = "shader.hlsl";
const SCRATCH_OBJECT: &str = "shader.cso";

/// Failures of one `fxc` invocation.
#[derive(Debug, Error)]
pub enum FxcError {
    /// The scratch directory or source file could not be written.
    #[error("failed to prepare scratch files: {0}")]
    Scratch(#[source] io::Error),
    /// The executable could not be started.
    #[error("failed to launch '{}': {source}", path.display())]
    Launch {
        /// The executable that was spawned.
        path: PathBuf,
        /// The spawn error.
        #[source]
        source: io::Error,
    },
    /// The tool ran and rejected the source.
    #[error("fxc exited with {status}:\n{diagnostic}")]
    Rejected {
        /// The exit status of the process.
        status: ExitStatus,
        /// Everything the tool printed.
        diagnostic: String,
    },
    /// The object file could not be read back.
    #[error("failed to read the compiled object: {0}")]
    Output(#[source] io::Error),
}

/// Compiles HLSL by spawning `fxc`.
#[derive(Debug, Clone)]
pub struct FxcCompiler {
    executable: PathBuf,
}

impl FxcCompiler {
    /// Creates a compiler that spawns `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Creates a compiler using the executable named in `settings`.
    pub fn from_settings(settings: &CompilerSettings) -> Self {
        Self::new(settings.fxc_path.clone())
    }

    /// The executable this compiler spawns.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Builds the command line for one compilation.
    ///
    /// # Arguments
    ///
    /// * `request`: Profile and entry point of the shader.
    /// * `flags`: Matrix packing, optimisation and debug information.
    /// * `source`: Path of the HLSL file to compile.
    /// * `object`: Path the object file is written to.
    pub fn arguments(
        request: &CompileRequest<'_>,
        flags: &CompileFlags,
        source: &Path,
        object: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "/nologo".into(),
            "/T".into(),
            request.profile.into(),
            "/E".into(),
            request.entry_point.into(),
        ];
        args.push(
            match flags.matrix_packing {
                MatrixPacking::ColumnMajor => "/Zpc",
                MatrixPacking::RowMajor => "/Zpr",
            }
            .into(),
        );
        args.push(
            match flags.optimization {
                OptimizationLevel::Skip => "/Od",
                OptimizationLevel::Level0 => "/O0",
                OptimizationLevel::Level1 => "/O1",
                OptimizationLevel::Level2 => "/O2",
                OptimizationLevel::Level3 => "/O3",
            }
            .into(),
        );
        if flags.debug_info {
            args.push("/Zi".into());
        }
        args.push("/Fo".into());
        args.push(object.into());
        args.push(source.into());
        args
    }

    fn run(
        &self,
        request: &CompileRequest<'_>,
        flags: &CompileFlags,
    ) -> Result<CompileOutput, FxcError> {
        let scratch = tempfile::tempdir().map_err(FxcError::Scratch)?;
        let source = scratch.path().join(SCRATCH_SOURCE);
        let object = scratch.path().join(SCRATCH_OBJECT);
        std::fs::write(&source, request.source).map_err(FxcError::Scratch)?;

        let output = Command::new(&self.executable)
            .args(Self::arguments(request, flags, &source, &object))
            .output()
            .map_err(|source| FxcError::Launch {
                path: self.executable.clone(),
                source,
            })?;

        let printed = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        if !output.status.success() {
            return Err(FxcError::Rejected {
                status: output.status,
                diagnostic: printed.trim().to_string(),
            });
        }

        let bytes = std::fs::read(&object).map_err(FxcError::Output)?;
        Ok(CompileOutput {
            bytecode: ShaderBytecode::new(bytes),
            warnings: warning_lines(&printed),
        })
    }
}

impl Default for FxcCompiler {
    fn default() -> Self {
        Self::new("fxc")
    }
}

impl ShaderCompiler for FxcCompiler {
    fn name(&self) -> &str {
        "fxc"
    }

    fn compile(
        &self,
        request: &CompileRequest<'_>,
        flags: &CompileFlags,
    ) -> Result<CompileOutput, String> {
        self.run(request, flags).map_err(|e| e.to_string())
    }
}

/// Lines of compiler output that report a warning (`file(1,2): warning X3206: ...`).
fn warning_lines(printed: &str) -> Vec<String> {
    printed
        .lines()
        .filter(|line| line.contains(": warning "))
        .map(|line| line.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::shader::ShaderStage;

    fn request() -> CompileRequest<'static> {
        CompileRequest {
            source: "float4 main() : SV_Target { return 0; }",
            entry_point: "main",
            profile: "ps_4_0",
            stage: ShaderStage::Pixel,
            shader_name: "Blit",
        }
    }

    #[test]
    fn command_line_carries_profile_packing_and_optimization() {
        let flags = CompileFlags {
            matrix_packing: MatrixPacking::ColumnMajor,
            optimization: OptimizationLevel::Level3,
            debug_info: false,
        };
        let args = FxcCompiler::arguments(
            &request(),
            &flags,
            Path::new("in.hlsl"),
            Path::new("out.cso"),
        );
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            ["/nologo", "/T", "ps_4_0", "/E", "main", "/Zpc", "/O3", "/Fo", "out.cso", "in.hlsl"]
        );
    }

    #[test]
    fn skipped_optimization_and_debug_info_map_to_switches() {
        let flags = CompileFlags {
            matrix_packing: MatrixPacking::ColumnMajor,
            optimization: OptimizationLevel::Skip,
            debug_info: true,
        };
        let args = FxcCompiler::arguments(&request(), &flags, Path::new("a"), Path::new("b"));
        assert!(args.contains(&OsString::from("/Od")));
        assert!(args.contains(&OsString::from("/Zi")));
    }

    #[test]
    fn missing_executable_is_a_launch_error() {
        let compiler = FxcCompiler::new("/nonexistent/prism-fxc");
        let flags = CompileFlags {
            matrix_packing: MatrixPacking::ColumnMajor,
            optimization: OptimizationLevel::Level3,
            debug_info: false,
        };
        let error = compiler.run(&request(), &flags).unwrap_err();
        assert!(matches!(error, FxcError::Launch { .. }));
        assert!(compiler
            .compile(&request(), &flags)
            .unwrap_err()
            .contains("/nonexistent/prism-fxc"));
    }

    #[test]
    fn shader_names_never_become_paths() {
        let compiler = FxcCompiler::new("/nonexistent/prism-fxc");
        let flags = CompileFlags {
            matrix_packing: MatrixPacking::ColumnMajor,
            optimization: OptimizationLevel::Level3,
            debug_info: false,
        };
        for shader_name in ["effects/blit", "../../blit", ""] {
            let request = CompileRequest {
                shader_name,
                ..request()
            };
            let error = compiler.run(&request, &flags).unwrap_err();
            assert!(matches!(error, FxcError::Launch { .. }), "{shader_name}: {error}");
        }
    }

    #[test]
    fn warnings_are_picked_from_output() {
        let printed = "in.hlsl(3,5): warning X3206: implicit truncation\ncompilation succeeded\n";
        assert_eq!(
            warning_lines(printed),
            ["in.hlsl(3,5): warning X3206: implicit truncation"]
        );
    }
}
