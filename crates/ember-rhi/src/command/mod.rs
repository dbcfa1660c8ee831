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

//! Deferred command recording.
//!
//! The central type is [`RenderCommandList`]. Its packets ([`RenderCommand`]) and
//! their argument storage ([`ParamRef`]) are exposed for inspection and tests; the
//! recording methods are the only way to create them.

mod cleanup;
mod debug_group;
mod list;
mod packet;
mod params;
mod readback;
mod stats;

pub use debug_group::ScopedDebugGroup;
pub use list::RenderCommandList;
pub use packet::{DeviceCommand, HookCallback, HookCommand, ReadbackCommand, RenderCommand};
pub use params::ParamRef;
pub use readback::ReadbackSlot;
pub use stats::CommandListStats;
