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

//! # Ember RHI
//!
//! Deferred command recording and replay for the Ember renderer.
//!
//! Producers on any thread record device operations into a
//! [`RenderCommandList`]; the render thread later replays them, in recording order,
//! against a [`RenderDevice`](ember_core::RenderDevice) and releases the resources
//! whose deletion was deferred until the packets that use them have run.
//!
//! [`RenderContexts`] groups the lists a renderer works with and implements the
//! cross-thread entry points (`enqueue_render_command`, `flush_render_command`).

pub mod command;
pub mod config;
pub mod context;
pub mod error;

pub use command::{
    CommandListStats, ParamRef, ReadbackSlot, RenderCommandList, ScopedDebugGroup,
};
pub use config::{CommandListConfig, ConfigError, RenderContextsConfig};
pub use context::RenderContexts;
pub use error::CommandListError;
