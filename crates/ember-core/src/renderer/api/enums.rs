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

//! Enumerations describing fixed-function state and draw parameters.

/// A piece of fixed-function state that can be enabled or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Depth testing against the bound depth buffer.
    DepthTest,
    /// Stencil testing against the bound stencil buffer.
    StencilTest,
    /// Color blending.
    Blend,
    /// Back- or front-face culling.
    CullFace,
    /// Rejection of fragments outside the scissor rectangle.
    ScissorTest,
    /// Linear-to-sRGB conversion on framebuffer writes.
    FramebufferSrgb,
    /// Depth/polygon offset for filled polygons.
    PolygonOffsetFill,
    /// Seamless filtering across cube map faces.
    TextureCubeMapSeamless,
}

/// Comparison function used for depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    /// Never passes.
    Never,
    /// Passes if the incoming value is less than the stored value.
    Less,
    /// Passes if the values are equal.
    Equal,
    /// Passes if the incoming value is less than or equal to the stored value.
    LessEqual,
    /// Passes if the incoming value is greater than the stored value.
    Greater,
    /// Passes if the values differ.
    NotEqual,
    /// Passes if the incoming value is greater than or equal to the stored value.
    GreaterEqual,
    /// Always passes.
    Always,
}

/// Blend factor applied to the source or destination color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// `0`.
    Zero,
    /// `1`.
    One,
    /// Source alpha.
    SrcAlpha,
    /// `1 - source alpha`.
    OneMinusSrcAlpha,
    /// Destination alpha.
    DstAlpha,
    /// `1 - destination alpha`.
    OneMinusDstAlpha,
    /// Source color.
    SrcColor,
    /// Destination color.
    DstColor,
}

/// Polygon face selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Front-facing polygons.
    Front,
    /// Back-facing polygons.
    Back,
    /// Both faces.
    FrontAndBack,
}

/// Rasterization mode for polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonMode {
    /// Filled polygons.
    Fill,
    /// Polygon edges only.
    Line,
    /// Polygon vertices only.
    Point,
}

/// Framebuffer binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferTarget {
    /// Binding used by draw and clear operations.
    Draw,
    /// Binding used by read-back and blit sources.
    Read,
    /// Both bindings at once.
    Both,
}

/// Indexed buffer binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Uniform block binding.
    Uniform,
    /// Shader storage block binding.
    ShaderStorage,
    /// Atomic counter binding.
    AtomicCounter,
    /// Transform feedback output binding.
    TransformFeedback,
}

/// Primitive assembly mode for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Independent points.
    PointList,
    /// Independent line segments.
    LineList,
    /// Connected line strip.
    LineStrip,
    /// Independent triangles.
    TriangleList,
    /// Connected triangle strip.
    TriangleStrip,
}

/// Width of the indices in an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// 16-bit unsigned indices.
    Uint16,
    /// 32-bit unsigned indices.
    Uint32,
}

/// Pixel layout of client-side image data uploaded to a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Four 8-bit normalized channels.
    Rgba8,
    /// Four 16-bit float channels.
    Rgba16Float,
    /// Four 32-bit float channels.
    Rgba32Float,
    /// One 32-bit float channel.
    R32Float,
    /// 32-bit float depth.
    Depth32Float,
}

/// The kind of measurement a query object performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTarget {
    /// GPU time elapsed between begin and end, in nanoseconds.
    TimeElapsed,
    /// Number of samples that passed the depth test.
    SamplesPassed,
    /// Whether any sample passed the depth test.
    AnySamplesPassed,
    /// Number of primitives emitted by the geometry stages.
    PrimitivesGenerated,
}

/// An integer device limit or state value that can be read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerParameter {
    /// Maximum length of an object debug label.
    MaxLabelLength,
    /// Maximum size in bytes of a uniform block.
    MaxUniformBlockSize,
    /// Maximum number of invocations in one compute work group.
    MaxComputeWorkGroupInvocations,
    /// Maximum size in bytes of compute shared memory.
    MaxComputeSharedMemorySize,
    /// Dedicated video memory in KiB, if the driver reports it.
    DedicatedVideoMemoryKib,
    /// Currently available video memory in KiB, if the driver reports it.
    AvailableVideoMemoryKib,
}
