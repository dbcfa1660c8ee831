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

//! Resources whose release waits for the end of the next flush.

use ember_core::renderer::{BufferId, SamplerId, TextureId};
use ember_core::RenderDevice;
use std::any::Any;

/// The four deferred cleanup queues of a command list.
#[derive(Default)]
pub(crate) struct DeferredCleanupQueues {
    pub(crate) memory: Vec<Box<dyn Any + Send>>,
    pub(crate) buffers: Vec<BufferId>,
    pub(crate) textures: Vec<TextureId>,
    pub(crate) samplers: Vec<SamplerId>,
}

impl DeferredCleanupQueues {
    pub(crate) fn len(&self) -> usize {
        self.memory.len() + self.buffers.len() + self.textures.len() + self.samplers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases everything queued: heap allocations are dropped first, then every
    /// non-empty handle kind is deleted with one batched device call.
    ///
    /// Returns the number of entries released.
    pub(crate) fn release(self, device: &dyn RenderDevice) -> usize {
        let released = self.len();
        drop(self.memory);
        if !self.buffers.is_empty() {
            device.delete_buffers(&self.buffers);
        }
        if !self.textures.is_empty() {
            device.delete_textures(&self.textures);
        }
        if !self.samplers.is_empty() {
            device.delete_samplers(&self.samplers);
        }
        released
    }
}

impl std::fmt::Debug for DeferredCleanupQueues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredCleanupQueues")
            .field("memory", &self.memory.len())
            .field("buffers", &self.buffers)
            .field("textures", &self.textures)
            .field("samplers", &self.samplers)
            .finish()
    }
}
