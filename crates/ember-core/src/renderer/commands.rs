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

//! The table of deferrable device operations.
//!
//! Every operation a command list can record is listed exactly once below, as
//!
//! ```text
//! Variant => method(arg: Type, ...; slice_arg: [Elem]);
//! ```
//!
//! Plain arguments must be `Copy`; they are stored inline in the recorded packet.
//! The optional trailing slice argument (after `;`) is copied out-of-line into the
//! command list's parameter arena at record time, so its element type must be
//! [`bytemuck::Pod`].
//!
//! The table is consumed through a callback macro: `render_command_table!(cb)`
//! expands to `cb! { <entries> }`. This is how [`RenderDevice`] is declared here,
//! how `ember-rhi` generates its packet enum and recording methods, and how
//! `ember-infra` generates the call log of its headless device. Adding an operation
//! therefore only requires a new line here and an implementation in each device.
//!
//! [`RenderDevice`]: crate::renderer::RenderDevice

/// Expands the device operation table into the given callback macro.
///
/// See the [module documentation](crate::renderer::commands) for the entry syntax.
#[macro_export]
macro_rules! render_command_table {
    ($callback:ident) => {
        $callback! {
            // --- Fixed-function state ---

            /// Sets the viewport rectangle in framebuffer pixels.
            Viewport => viewport(x: i32, y: i32, width: u32, height: u32);
            /// Sets the scissor rectangle in framebuffer pixels.
            Scissor => scissor(x: i32, y: i32, width: u32, height: u32);
            /// Enables a piece of fixed-function state.
            Enable => enable(capability: $crate::renderer::Capability);
            /// Disables a piece of fixed-function state.
            Disable => disable(capability: $crate::renderer::Capability);
            /// Sets the color used by subsequent color clears.
            ClearColor => clear_color(r: f32, g: f32, b: f32, a: f32);
            /// Sets the value used by subsequent depth clears.
            ClearDepth => clear_depth(depth: f32);
            /// Sets the value used by subsequent stencil clears.
            ClearStencil => clear_stencil(value: i32);
            /// Clears the selected attachments of the bound draw framebuffer.
            Clear => clear(mask: $crate::renderer::ClearFlags);
            /// Sets the depth test comparison.
            DepthFunc => depth_func(func: $crate::renderer::CompareFunction);
            /// Enables or disables depth writes.
            DepthMask => depth_mask(write: bool);
            /// Enables or disables writes to each color channel.
            ColorMask => color_mask(r: bool, g: bool, b: bool, a: bool);
            /// Sets the source and destination blend factors.
            BlendFunc => blend_func(src: $crate::renderer::BlendFactor, dst: $crate::renderer::BlendFactor);
            /// Selects which faces are culled.
            CullFace => cull_face(face: $crate::renderer::Face);
            /// Sets the polygon rasterization mode.
            PolygonMode => polygon_mode(face: $crate::renderer::Face, mode: $crate::renderer::PolygonMode);
            /// Sets the depth offset applied to filled polygons.
            PolygonOffset => polygon_offset(factor: f32, units: f32);

            // --- Object binding ---

            /// Makes a shader program current.
            UseProgram => use_program(program: $crate::renderer::ProgramId);
            /// Binds a vertex array object.
            BindVertexArray => bind_vertex_array(vertex_array: $crate::renderer::VertexArrayId);
            /// Binds a framebuffer to the given target.
            BindFramebuffer => bind_framebuffer(target: $crate::renderer::FramebufferTarget, framebuffer: $crate::renderer::FramebufferId);
            /// Binds a texture to a texture unit.
            BindTextureUnit => bind_texture_unit(unit: u32, texture: $crate::renderer::TextureId);
            /// Binds a sampler to a texture unit.
            BindSampler => bind_sampler(unit: u32, sampler: $crate::renderer::SamplerId);
            /// Binds a whole buffer to an indexed binding point.
            BindBufferBase => bind_buffer_base(target: $crate::renderer::BufferTarget, index: u32, buffer: $crate::renderer::BufferId);
            /// Binds a buffer range to an indexed binding point.
            BindBufferRange => bind_buffer_range(target: $crate::renderer::BufferTarget, index: u32, buffer: $crate::renderer::BufferId, offset: u64, size: u64);

            // --- Uniforms ---

            /// Sets an `int` (or sampler) uniform of the current program.
            Uniform1i => uniform_1i(location: i32, value: i32);
            /// Sets a `uint` uniform of the current program.
            Uniform1ui => uniform_1ui(location: i32, value: u32);
            /// Sets a `float` uniform of the current program.
            Uniform1f => uniform_1f(location: i32, value: f32);
            /// Sets a `vec2` uniform of the current program.
            Uniform2f => uniform_2f(location: i32, x: f32, y: f32);
            /// Sets a `vec3` uniform of the current program.
            Uniform3f => uniform_3f(location: i32, x: f32, y: f32, z: f32);
            /// Sets a `vec4` uniform of the current program.
            Uniform4f => uniform_4f(location: i32, x: f32, y: f32, z: f32, w: f32);
            /// Sets an `int[]` uniform of the current program.
            Uniform1iv => uniform_1iv(location: i32; values: [i32]);
            /// Sets a `float[]` uniform of the current program.
            Uniform1fv => uniform_1fv(location: i32; values: [f32]);
            /// Sets a `vec3[]` uniform of the current program (three floats per element).
            Uniform3fv => uniform_3fv(location: i32; values: [f32]);
            /// Sets a `vec4[]` uniform of the current program (four floats per element).
            Uniform4fv => uniform_4fv(location: i32; values: [f32]);
            /// Sets a `mat4[]` uniform of the current program (sixteen floats per element).
            UniformMatrix4fv => uniform_matrix_4fv(location: i32, transpose: bool; values: [f32]);

            // --- Resource updates ---

            /// Overwrites part of a buffer's contents.
            NamedBufferSubData => named_buffer_sub_data(buffer: $crate::renderer::BufferId, offset: u64; data: [u8]);
            /// Copies a byte range from one buffer to another on the device.
            CopyNamedBufferSubData => copy_named_buffer_sub_data(source: $crate::renderer::BufferId, destination: $crate::renderer::BufferId, source_offset: u64, destination_offset: u64, size: u64);
            /// Uploads a rectangle of pixels into one mip level of a 2D texture.
            TextureSubImage2d => texture_sub_image_2d(texture: $crate::renderer::TextureId, level: u32, x: i32, y: i32, width: u32, height: u32, format: $crate::renderer::PixelFormat; pixels: [u8]);
            /// Regenerates the mip chain of a texture from its base level.
            GenerateTextureMipmap => generate_texture_mipmap(texture: $crate::renderer::TextureId);

            // --- Draws and dispatches ---

            /// Draws non-indexed primitives.
            DrawArrays => draw_arrays(topology: $crate::renderer::PrimitiveTopology, first: u32, count: u32);
            /// Draws instanced, non-indexed primitives.
            DrawArraysInstanced => draw_arrays_instanced(topology: $crate::renderer::PrimitiveTopology, first: u32, count: u32, instance_count: u32);
            /// Draws indexed primitives from the bound index buffer.
            DrawElements => draw_elements(topology: $crate::renderer::PrimitiveTopology, count: u32, format: $crate::renderer::IndexFormat, offset: u64);
            /// Draws instanced, indexed primitives from the bound index buffer.
            DrawElementsInstanced => draw_elements_instanced(topology: $crate::renderer::PrimitiveTopology, count: u32, format: $crate::renderer::IndexFormat, offset: u64, instance_count: u32);
            /// Launches compute work groups.
            DispatchCompute => dispatch_compute(groups_x: u32, groups_y: u32, groups_z: u32);
            /// Orders memory accesses of the selected kinds after prior shader writes.
            MemoryBarrier => memory_barrier(barriers: $crate::renderer::BarrierFlags);

            // --- Queries ---

            /// Starts a query of the given kind.
            BeginQuery => begin_query(target: $crate::renderer::QueryTarget, query: $crate::renderer::QueryId);
            /// Ends the active query of the given kind.
            EndQuery => end_query(target: $crate::renderer::QueryTarget);
            /// Records a GPU timestamp into a query object.
            QueryCounter => query_counter(query: $crate::renderer::QueryId);

            // --- Debugging and synchronization ---

            /// Opens a named debug group shown by graphics debuggers.
            PushDebugGroup => push_debug_group(id: u32; message: [u8]);
            /// Closes the innermost debug group.
            PopDebugGroup => pop_debug_group();
            /// Blocks until all previously submitted device work has completed.
            Finish => finish();
        }
    };
}
