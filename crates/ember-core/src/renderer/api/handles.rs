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

//! Opaque handles to device-side objects.
//!
//! Handles are plain names allocated by the device. The value `0` is reserved for
//! "no object" (or the default framebuffer), mirroring the convention of the
//! underlying graphics APIs.

macro_rules! device_handle {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
            pub struct $name(pub u32);

            impl $name {
                /// The reserved "no object" handle.
                pub const NONE: Self = Self(0);

                /// Returns `true` if this is the reserved "no object" handle.
                pub const fn is_none(self) -> bool {
                    self.0 == 0
                }
            }
        )*
    };
}

device_handle! {
    /// A GPU buffer (vertex, index, uniform or storage data).
    BufferId;
    /// A GPU texture.
    TextureId;
    /// A sampler state object.
    SamplerId;
    /// A linked shader program.
    ProgramId;
    /// A vertex array object describing vertex input layout.
    VertexArrayId;
    /// A framebuffer object. [`FramebufferId::NONE`] is the default backbuffer.
    FramebufferId;
    /// A query object (timers, occlusion).
    QueryId;
}

impl FramebufferId {
    /// The window-system provided framebuffer.
    pub const BACKBUFFER: Self = Self::NONE;
}
