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

//! Flag masks passed to clear and synchronization commands.

crate::ember_flags! {
    /// The framebuffer attachments affected by a clear.
    pub struct ClearFlags: u32 {
        /// The color attachments.
        const COLOR = 1 << 0;
        /// The depth attachment.
        const DEPTH = 1 << 1;
        /// The stencil attachment.
        const STENCIL = 1 << 2;
        /// Every attachment.
        const ALL = 0b111;
    }
}

crate::ember_flags! {
    /// Memory accesses that must observe writes issued before a memory barrier.
    pub struct BarrierFlags: u32 {
        /// Vertex attribute fetches.
        const VERTEX_ATTRIB_ARRAY = 1 << 0;
        /// Index fetches.
        const ELEMENT_ARRAY = 1 << 1;
        /// Uniform block reads.
        const UNIFORM = 1 << 2;
        /// Texture sampling.
        const TEXTURE_FETCH = 1 << 3;
        /// Image load/store.
        const SHADER_IMAGE_ACCESS = 1 << 4;
        /// Indirect draw and dispatch parameters.
        const COMMAND = 1 << 5;
        /// Buffer reads and writes through the API.
        const BUFFER_UPDATE = 1 << 6;
        /// Framebuffer attachment reads and writes.
        const FRAMEBUFFER = 1 << 7;
        /// Shader storage block access.
        const SHADER_STORAGE = 1 << 8;
        /// Every kind of access.
        const ALL = 0x1ff;
    }
}
