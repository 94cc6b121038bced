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

//! `prismc`: generates and compiles shaders from Prism descriptions.
//!
//! ```bash
//! # Print the HLSL a Direct3D 11 device would compile
//! prismc generate --backend d3d11 blit.shader
//!
//! # Compile to SPIR-V with a settings file
//! prismc compile --backend opengl blit.shader -o blit.spv --config settings.ron
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prism_core::device::{Device, GraphicsBackend, ShaderId};
use prism_core::error::ShaderError;
use prism_core::settings::CompilerSettings;
use prism_core::shader::{parse_shader_description, ShaderReflection, ShaderStage};
use prism_infra::d3d11::D3d11Backend;
use prism_infra::d3d9::D3d9Backend;
use prism_infra::opengl::OpenGlBackend;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "prismc", version, about = "Prism shader cross-compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the source generated for a backend
    Generate {
        /// Target backend
        #[arg(short, long, value_enum)]
        backend: Backend,

        /// Shader description file
        file: PathBuf,

        /// Compiler settings in RON
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate and compile a shader, writing its bytecode
    Compile {
        /// Target backend
        #[arg(short, long, value_enum)]
        backend: Backend,

        /// Shader description file
        file: PathBuf,

        /// Bytecode output path (defaults to the description path with a backend extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compiler settings in RON
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    #[value(name = "d3d9")]
    D3d9,
    #[value(name = "d3d11")]
    D3d11,
    #[value(name = "opengl")]
    OpenGl,
}

impl Backend {
    fn bytecode_extension(self) -> &'static str {
        match self {
            Backend::D3d9 | Backend::D3d11 => "cso",
            Backend::OpenGl => "spv",
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("naga", log::LevelFilter::Warn)
        .init();

    match Cli::parse().command {
        Command::Generate {
            backend,
            file,
            config,
        } => {
            let settings = load_settings(config.as_deref())?;
            let reflection = load_description(&file)?;
            let source = match backend {
                Backend::D3d9 => generate(&D3d9Backend::from_settings(&settings), &reflection),
                Backend::D3d11 => generate(&D3d11Backend::from_settings(&settings), &reflection),
                Backend::OpenGl => generate(&OpenGlBackend::from_settings(&settings)?, &reflection),
            }?;
            print!("{source}");
        }
        Command::Compile {
            backend,
            file,
            output,
            config,
        } => {
            let settings = load_settings(config.as_deref())?;
            let reflection = load_description(&file)?;
            let output =
                output.unwrap_or_else(|| file.with_extension(backend.bytecode_extension()));
            let bytecode = match backend {
                Backend::D3d9 => compile(
                    D3d9Backend::from_settings(&settings),
                    settings,
                    reflection,
                ),
                Backend::D3d11 => compile(
                    D3d11Backend::from_settings(&settings),
                    settings,
                    reflection,
                ),
                Backend::OpenGl => compile(
                    OpenGlBackend::from_settings(&settings)?,
                    settings,
                    reflection,
                ),
            }?;
            fs::write(&output, &bytecode)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            log::info!("Wrote {} bytes to {}", bytecode.len(), output.display());
        }
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<CompilerSettings> {
    match path {
        Some(path) => CompilerSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(CompilerSettings::default()),
    }
}

fn load_description(path: &Path) -> Result<Arc<ShaderReflection>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let reflection = parse_shader_description(&text)
        .with_context(|| format!("Invalid shader description {}", path.display()))?;
    Ok(Arc::new(reflection))
}

fn generate<B: GraphicsBackend>(backend: &B, reflection: &ShaderReflection) -> Result<String> {
    backend.generate(reflection).with_context(|| {
        format!(
            "{} cannot generate '{}'",
            backend.backend(),
            reflection.name()
        )
    })
}

/// Runs the full device path and returns the shader's bytecode.
fn compile<B: GraphicsBackend>(
    backend: B,
    settings: CompilerSettings,
    reflection: Arc<ShaderReflection>,
) -> Result<Vec<u8>> {
    let name = reflection.name().to_string();
    let mut device = Device::new(backend, settings);
    let id = create_shader(&mut device, reflection)
        .with_context(|| format!("{} failed to compile '{name}'", device.kind()))?;
    let shader = device
        .shader(id)
        .with_context(|| format!("'{name}' is missing from the device"))?;
    log::info!("Compiled '{name}' with profile {}", shader.profile);
    Ok(shader.bytecode.as_bytes().to_vec())
}

fn create_shader<B: GraphicsBackend>(
    device: &mut Device<B>,
    reflection: Arc<ShaderReflection>,
) -> Result<ShaderId, ShaderError> {
    match reflection.stage() {
        ShaderStage::Vertex => device.create_vertex_shader(reflection),
        ShaderStage::Pixel => device.create_pixel_shader(reflection),
        ShaderStage::Geometry => device.create_geometry_shader(reflection),
        ShaderStage::Hull => device.create_hull_shader(reflection),
        ShaderStage::Domain => device.create_domain_shader(reflection),
        ShaderStage::Compute => device.create_compute_shader(reflection),
    }
}
