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

//! The set of command lists a renderer records into, and the cross-thread entry
//! points built on them.

use crate::command::RenderCommandList;
use crate::config::{CommandListConfig, RenderContextsConfig};
use crate::error::{fatal, CommandListError};
use ember_core::memory::arena_reserved_bytes;
use ember_core::RenderDevice;
use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

/// The four command lists of a renderer.
///
/// * `early` - flushed first every frame, before any rendering.
/// * `immediate` - the render thread's own list.
/// * `deferred` - receives hooks enqueued from other threads; flushed after the frame.
/// * `hook` - the secondary list bound to both `immediate` and `deferred`.
#[derive(Debug)]
pub struct RenderContexts {
    early: Arc<RenderCommandList>,
    immediate: Arc<RenderCommandList>,
    deferred: Arc<RenderCommandList>,
    hook: Arc<RenderCommandList>,
    render_thread: OnceLock<ThreadId>,
}

impl RenderContexts {
    /// Creates and wires the lists described by `config`.
    pub fn new(device: Arc<dyn RenderDevice>, config: &RenderContextsConfig) -> Self {
        let list = |list_config: &CommandListConfig| {
            Arc::new(RenderCommandList::new(Arc::clone(&device), list_config))
        };
        let contexts = Self {
            early: list(&config.early),
            immediate: list(&config.immediate),
            deferred: list(&config.deferred),
            hook: list(&config.hook),
            render_thread: OnceLock::new(),
        };
        contexts.immediate.set_hook_command_list(Arc::clone(&contexts.hook));
        contexts.deferred.set_hook_command_list(Arc::clone(&contexts.hook));

        log::info!(
            "Render contexts ready: '{}', '{}', '{}' (hook list '{}')",
            contexts.early.debug_name(),
            contexts.immediate.debug_name(),
            contexts.deferred.debug_name(),
            contexts.hook.debug_name()
        );
        contexts
    }

    /// The list flushed at the start of every frame.
    pub fn early(&self) -> &Arc<RenderCommandList> {
        &self.early
    }

    /// The render thread's own list.
    pub fn immediate(&self) -> &Arc<RenderCommandList> {
        &self.immediate
    }

    /// The list collecting work enqueued from other threads.
    pub fn deferred(&self) -> &Arc<RenderCommandList> {
        &self.deferred
    }

    /// The shared hook list.
    pub fn hook(&self) -> &Arc<RenderCommandList> {
        &self.hook
    }

    /// Marks the calling thread as the render thread.
    ///
    /// Returns `false` (and changes nothing) if another thread was bound earlier.
    pub fn bind_render_thread(&self) -> bool {
        let current = thread::current().id();
        let bound = *self.render_thread.get_or_init(|| current);
        if bound != current {
            log::warn!("Render thread already bound to {bound:?}, ignoring {current:?}");
        }
        bound == current
    }

    /// Returns `true` if the calling thread is the bound render thread.
    pub fn is_in_render_thread(&self) -> bool {
        self.render_thread.get() == Some(&thread::current().id())
    }

    /// Runs `command` against the list appropriate for the calling thread.
    ///
    /// On the render thread `command` runs immediately with the `immediate` list.
    /// Elsewhere it is registered as a hook on the `deferred` list and runs with the
    /// hook list when the render thread flushes `deferred`.
    pub fn enqueue_render_command<F>(&self, command: F)
    where
        F: Fn(&RenderCommandList) + Send + Sync + 'static,
    {
        if self.is_in_render_thread() {
            command(self.immediate.as_ref());
        } else {
            self.deferred.register_hook(command);
        }
    }

    /// Blocks until the render thread has flushed the `deferred` list up to this
    /// point.
    ///
    /// With `wait_for_gpu`, the device is also asked to finish all submitted work
    /// before the caller is released.
    ///
    /// ## Panics
    ///
    /// Fatal when called from the render thread, which would wait on itself.
    pub fn flush_render_command(&self, wait_for_gpu: bool) {
        if self.is_in_render_thread() {
            fatal(CommandListError::FlushFromRenderThread);
        }

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        self.deferred.register_hook(move |hook_list| {
            if wait_for_gpu {
                hook_list.device().finish();
            }
            if done_tx.try_send(()).is_err() {
                log::warn!("flush_render_command: the waiting thread is gone");
            }
        });

        if done_rx.recv().is_err() {
            log::warn!("flush_render_command: deferred list dropped before reaching the flush point");
        }
    }

    /// Flushes `early`, `immediate` and `deferred`, in that order.
    ///
    /// Called once per frame by the render thread.
    pub fn flush_frame(&self) {
        self.early.flush_all_commands();
        self.immediate.flush_all_commands();
        self.deferred.flush_all_commands();
    }

    /// Logs the counters of every list, and the bytes reserved by all live arenas,
    /// at `info` level.
    pub fn log_stats_summary(&self) {
        log::info!(
            "Command arenas reserve {:.1} MiB",
            arena_reserved_bytes() as f64 / (1024.0 * 1024.0)
        );
        for list in [&self.early, &self.immediate, &self.deferred, &self.hook] {
            let stats = list.stats();
            log::info!(
                "'{}': {} flushes, {} packets ({:.1}/flush), peak {} packets / {} parameter bytes, {} deferred cleanups",
                list.debug_name(),
                stats.flush_count,
                stats.packets_executed,
                stats.average_packets_per_flush(),
                stats.peak_packets,
                stats.peak_parameter_bytes,
                stats.deferred_cleanups
            );
        }
    }
}
