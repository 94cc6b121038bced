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

//! Pipeline stages and the stage-specific enumerations carried in shader metadata.

use std::fmt;
use std::str::FromStr;

/// Defines the programmable stage in the graphics pipeline a shader is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    /// The vertex shader stage.
    Vertex,
    /// The hull (tessellation control) stage.
    Hull,
    /// The domain (tessellation evaluation) stage.
    Domain,
    /// The geometry shader stage.
    Geometry,
    /// The pixel (fragment) shader stage.
    Pixel,
    /// The compute shader stage.
    Compute,
}

impl ShaderStage {
    /// Every stage, in pipeline order.
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Geometry,
        ShaderStage::Pixel,
        ShaderStage::Compute,
    ];

    /// The two-letter prefix used by HLSL-style profile strings (`vs`, `hs`, ...).
    pub const fn profile_prefix(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Hull => "hs",
            ShaderStage::Domain => "ds",
            ShaderStage::Geometry => "gs",
            ShaderStage::Pixel => "ps",
            ShaderStage::Compute => "cs",
        }
    }

    /// Recovers the stage from the prefix of a profile string such as `ps_4_0`.
    pub fn from_profile(profile: &str) -> Option<ShaderStage> {
        let prefix = profile.split('_').next()?;
        ShaderStage::ALL
            .into_iter()
            .find(|stage| stage.profile_prefix() == prefix)
    }

    /// Short prefix used for the names of generated IO structures (`VS`, `HS`, ...).
    pub fn struct_prefix(self) -> String {
        self.profile_prefix().to_uppercase()
    }

    /// Index of the stage inside per-stage state arrays.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for ShaderStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Vertex" => Ok(ShaderStage::Vertex),
            "Hull" => Ok(ShaderStage::Hull),
            "Domain" => Ok(ShaderStage::Domain),
            "Geometry" => Ok(ShaderStage::Geometry),
            "Pixel" => Ok(ShaderStage::Pixel),
            "Compute" => Ok(ShaderStage::Compute),
            other => Err(format!("unknown shader stage '{other}'")),
        }
    }
}

/// The patch domain a hull shader emits and a domain shader consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TessellationDomain {
    /// Isoline patches: two outer factors, no inner factor.
    Isoline,
    /// Triangle patches: three outer factors, one inner factor.
    Triangle,
    /// Quad patches: four outer factors, two inner factors.
    Quad,
}

impl TessellationDomain {
    /// Every domain.
    pub const ALL: [TessellationDomain; 3] = [
        TessellationDomain::Isoline,
        TessellationDomain::Triangle,
        TessellationDomain::Quad,
    ];

    /// Length of the `SV_TessFactor` array for this domain.
    pub const fn outer_factor_count(self) -> u32 {
        match self {
            TessellationDomain::Isoline => 2,
            TessellationDomain::Triangle => 3,
            TessellationDomain::Quad => 4,
        }
    }

    /// Length of the `SV_InsideTessFactor` array for this domain.
    ///
    /// Zero for isolines, in which case the variable is not emitted at all.
    pub const fn inner_factor_count(self) -> u32 {
        match self {
            TessellationDomain::Isoline => 0,
            TessellationDomain::Triangle => 1,
            TessellationDomain::Quad => 2,
        }
    }

    /// The name used by the `[domain("...")]` attribute.
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            TessellationDomain::Isoline => "isoline",
            TessellationDomain::Triangle => "tri",
            TessellationDomain::Quad => "quad",
        }
    }
}

impl FromStr for TessellationDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Isoline" => Ok(TessellationDomain::Isoline),
            "Triangle" => Ok(TessellationDomain::Triangle),
            "Quad" => Ok(TessellationDomain::Quad),
            other => Err(format!("unknown tessellation domain '{other}'")),
        }
    }
}

/// The tessellator partitioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partitioning {
    /// Integer partitioning.
    Integer,
    /// Fractional even partitioning.
    FractionalEven,
    /// Fractional odd partitioning.
    FractionalOdd,
    /// Power of two partitioning.
    Pow2,
}

impl Partitioning {
    /// The name used by the `[partitioning("...")]` attribute.
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            Partitioning::Integer => "integer",
            Partitioning::FractionalEven => "fractional_even",
            Partitioning::FractionalOdd => "fractional_odd",
            Partitioning::Pow2 => "pow2",
        }
    }
}

impl FromStr for Partitioning {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Integer" => Ok(Partitioning::Integer),
            "FractionalEven" => Ok(Partitioning::FractionalEven),
            "FractionalOdd" => Ok(Partitioning::FractionalOdd),
            "Pow2" => Ok(Partitioning::Pow2),
            other => Err(format!("unknown partitioning '{other}'")),
        }
    }
}

/// The primitives the tessellator outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputTopology {
    /// Points.
    Point,
    /// Lines.
    Line,
    /// Clockwise wound triangles.
    TriangleCw,
    /// Counter-clockwise wound triangles.
    TriangleCcw,
}

impl OutputTopology {
    /// The name used by the `[outputtopology("...")]` attribute.
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            OutputTopology::Point => "point",
            OutputTopology::Line => "line",
            OutputTopology::TriangleCw => "triangle_cw",
            OutputTopology::TriangleCcw => "triangle_ccw",
        }
    }
}

impl FromStr for OutputTopology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(OutputTopology::Point),
            "Line" => Ok(OutputTopology::Line),
            "TriangleCW" | "TriangleCw" => Ok(OutputTopology::TriangleCw),
            "TriangleCCW" | "TriangleCcw" => Ok(OutputTopology::TriangleCcw),
            other => Err(format!("unknown output topology '{other}'")),
        }
    }
}

/// The primitive type a geometry shader receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryPrimitive {
    /// A single point.
    Point,
    /// A line segment.
    Line,
    /// A triangle.
    Triangle,
    /// A line segment with adjacency.
    LineAdj,
    /// A triangle with adjacency.
    TriangleAdj,
}

impl GeometryPrimitive {
    /// Every primitive type.
    pub const ALL: [GeometryPrimitive; 5] = [
        GeometryPrimitive::Point,
        GeometryPrimitive::Line,
        GeometryPrimitive::Triangle,
        GeometryPrimitive::LineAdj,
        GeometryPrimitive::TriangleAdj,
    ];

    /// The number of vertices in the geometry shader input array.
    pub const fn input_vertex_count(self) -> u32 {
        match self {
            GeometryPrimitive::Point => 1,
            GeometryPrimitive::Line => 2,
            GeometryPrimitive::Triangle => 3,
            GeometryPrimitive::LineAdj => 4,
            GeometryPrimitive::TriangleAdj => 6,
        }
    }

    /// The HLSL primitive keyword for the input parameter.
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            GeometryPrimitive::Point => "point",
            GeometryPrimitive::Line => "line",
            GeometryPrimitive::Triangle => "triangle",
            GeometryPrimitive::LineAdj => "lineadj",
            GeometryPrimitive::TriangleAdj => "triangleadj",
        }
    }
}

impl FromStr for GeometryPrimitive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(GeometryPrimitive::Point),
            "Line" => Ok(GeometryPrimitive::Line),
            "Triangle" => Ok(GeometryPrimitive::Triangle),
            "LineAdj" => Ok(GeometryPrimitive::LineAdj),
            "TriangleAdj" => Ok(GeometryPrimitive::TriangleAdj),
            other => Err(format!("unknown geometry primitive '{other}'")),
        }
    }
}

/// The primitive topology of a geometry shader output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamTopology {
    /// Point list output.
    Point,
    /// Line strip output.
    Line,
    /// Triangle strip output.
    Triangle,
}

impl StreamTopology {
    /// The HLSL stream-output object wrapping this topology.
    pub const fn hlsl_stream_type(self) -> &'static str {
        match self {
            StreamTopology::Point => "PointStream",
            StreamTopology::Line => "LineStream",
            StreamTopology::Triangle => "TriangleStream",
        }
    }
}

impl FromStr for StreamTopology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(StreamTopology::Point),
            "Line" => Ok(StreamTopology::Line),
            "Triangle" => Ok(StreamTopology::Triangle),
            other => Err(format!("unknown stream topology '{other}'")),
        }
    }
}
