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

use crate::renderer::{BufferId, IntegerParameter, QueryId, SamplerId, TextureId};
use std::fmt::Debug;

macro_rules! define_render_device {
    ($( $(#[$meta:meta])* $variant:ident => $method:ident ( $($arg:ident : $ty:ty),* $(; $slice:ident : [$elem:ty])? ); )*) => {
        /// A trait representing the graphics device that recorded commands are replayed
        /// against.
        ///
        /// A `RenderDevice` is the only thing in the engine allowed to touch the native
        /// graphics API. Command lists never call it at record time: they store a packet
        /// per operation and invoke the matching method of this trait when the packets
        /// are executed on the render thread.
        ///
        /// The deferrable operations are declared once in
        /// [`render_command_table!`](crate::render_command_table) and expanded here, so
        /// this trait, the packet enum of the command list and the headless device can
        /// never disagree on an operation's arguments. Slice arguments arrive as
        /// borrows of the command list's parameter arena and are only valid for the
        /// duration of the call.
        ///
        /// Implementors must be `Send + Sync` since the device is shared between the
        /// threads recording commands and the render thread executing them.
        pub trait RenderDevice: Send + Sync + Debug + 'static {
            $(
                $(#[$meta])*
                fn $method(&self, $($arg: $ty,)* $($slice: &[$elem])?);
            )*

            // --- Readback ---

            /// Reads the 64-bit result of a finished query.
            ///
            /// ## Arguments
            ///
            /// * `query` - The query object whose result is read.
            ///
            /// ## Returns
            ///
            /// The query result. Backends wait for the result to become available.
            fn get_query_result_u64(&self, query: QueryId) -> u64;

            /// Reads an implementation-defined integer from the device.
            fn get_integer(&self, parameter: IntegerParameter) -> i32;

            // --- Object lifetime ---

            /// Creates `count` buffer objects.
            fn create_buffers(&self, count: usize) -> Vec<BufferId>;

            /// Creates `count` texture objects.
            fn create_textures(&self, count: usize) -> Vec<TextureId>;

            /// Creates `count` sampler objects.
            fn create_samplers(&self, count: usize) -> Vec<SamplerId>;

            /// Creates `count` query objects.
            fn create_queries(&self, count: usize) -> Vec<QueryId>;

            /// Deletes a batch of buffers.
            ///
            /// Command lists call this once per flush with every buffer whose deletion
            /// was deferred during that cycle.
            fn delete_buffers(&self, buffers: &[BufferId]);

            /// Deletes a batch of textures.
            fn delete_textures(&self, textures: &[TextureId]);

            /// Deletes a batch of samplers.
            fn delete_samplers(&self, samplers: &[SamplerId]);
        }
    };
}

crate::render_command_table!(define_render_device);
