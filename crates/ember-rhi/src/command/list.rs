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

//! The recording and replay engine.

use super::cleanup::DeferredCleanupQueues;
use super::packet::{HookCommand, ReadbackCommand, RenderCommand};
use super::params::{ParamRef, ParameterArena};
use super::{CommandListStats, ReadbackSlot};
use crate::config::CommandListConfig;
use crate::error::{fatal, CommandListError};
use ember_core::memory::{ArenaError, SlotArena};
use ember_core::renderer::{BufferId, IntegerParameter, QueryId, SamplerId, TextureId};
use ember_core::RenderDevice;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

thread_local! {
    /// Addresses of the command lists the current thread is executing, innermost last.
    static ACTIVE_LISTS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a list as being executed by the current thread until dropped.
struct ActiveListGuard {
    address: usize,
}

impl ActiveListGuard {
    fn enter(address: usize) -> Self {
        ACTIVE_LISTS.with(|lists| lists.borrow_mut().push(address));
        Self { address }
    }
}

impl Drop for ActiveListGuard {
    fn drop(&mut self) {
        ACTIVE_LISTS.with(|lists| {
            let mut lists = lists.borrow_mut();
            if let Some(position) = lists.iter().rposition(|&a| a == self.address) {
                lists.remove(position);
            }
        });
    }
}

struct RecordState {
    packets: SlotArena<RenderCommand>,
    params: ParameterArena,
    flush_depth: u32,
}

/// A thread-safe, arena-backed queue of device operations.
///
/// Any thread may record into a list through its recording methods (one per
/// [`RenderDevice`] operation, plus [`register_hook`](Self::register_hook) and the
/// readback commands). Nothing reaches the device until the render thread calls
/// [`flush_all_commands`](Self::flush_all_commands), which replays every packet in
/// recording order, resets both arenas and then releases the resources registered
/// for deferred cleanup.
///
/// Recording copies slice arguments into the list's parameter arena, so callers may
/// reuse their buffers as soon as the recording method returns.
///
/// A list may be bound to a *hook list*. A hook packet hands the hook list to a
/// callback while the outer list is being executed, then flushes the hook list.
/// This is how code running on the render thread records work that must execute
/// in the middle of another list's replay.
///
/// Every invariant violation (arena exhaustion, nested flush, hook misuse) is fatal
/// and panics with a [`CommandListError`] message naming the list.
pub struct RenderCommandList {
    debug_name: String,
    device: Arc<dyn RenderDevice>,
    state: Mutex<RecordState>,
    num_commands: AtomicUsize,
    debug_current_command: AtomicUsize,
    hook: OnceLock<Arc<RenderCommandList>>,
    cleanup: Mutex<DeferredCleanupQueues>,
    stats: Mutex<CommandListStats>,
}

impl RenderCommandList {
    /// Creates an empty list replaying into `device`.
    ///
    /// ## Arguments
    ///
    /// * `device` - The device the packets are dispatched to.
    /// * `config` - The debug name and the arena budgets of the list.
    pub fn new(device: Arc<dyn RenderDevice>, config: &CommandListConfig) -> Self {
        let packets = SlotArena::from_byte_budget(config.packet_arena_bytes);
        let params = ParameterArena::new(config.parameter_arena_bytes);
        log::debug!(
            "Created command list '{}' ({} packet slots, {} parameter bytes)",
            config.debug_name,
            packets.capacity(),
            params.capacity_bytes()
        );
        Self {
            debug_name: config.debug_name.clone(),
            device,
            state: Mutex::new(RecordState {
                packets,
                params,
                flush_depth: 0,
            }),
            num_commands: AtomicUsize::new(0),
            debug_current_command: AtomicUsize::new(0),
            hook: OnceLock::new(),
            cleanup: Mutex::new(DeferredCleanupQueues::default()),
            stats: Mutex::new(CommandListStats::default()),
        }
    }

    /// The name used in logs and error messages.
    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// The device this list replays into.
    pub fn device(&self) -> &Arc<dyn RenderDevice> {
        &self.device
    }

    // --- Hook protocol ---

    /// Binds the list that hook packets recorded into this list will hand out.
    ///
    /// ## Panics
    ///
    /// Binding is fatal if `hook_list` is this list, if a hook list is already
    /// bound, or if `hook_list` (directly or through its own hook lists) is already
    /// hooked to this list.
    pub fn set_hook_command_list(&self, hook_list: Arc<RenderCommandList>) {
        if std::ptr::eq(self, Arc::as_ptr(&hook_list)) {
            fatal(CommandListError::SelfHook {
                list: self.debug_name.clone(),
            });
        }

        let mut next = hook_list.hook.get();
        while let Some(list) = next {
            if std::ptr::eq(self, Arc::as_ptr(list)) {
                fatal(CommandListError::HookCycle {
                    list: self.debug_name.clone(),
                    hook: hook_list.debug_name.clone(),
                });
            }
            next = list.hook.get();
        }

        let hook_name = hook_list.debug_name.clone();
        if self.hook.set(hook_list).is_err() {
            let existing = self
                .hook
                .get()
                .map(|list| list.debug_name.clone())
                .unwrap_or_default();
            fatal(CommandListError::HookAlreadyBound {
                list: self.debug_name.clone(),
                existing,
            });
        }
        log::debug!("Command list '{}' hooked to '{}'", self.debug_name, hook_name);
    }

    /// The bound hook list, if any.
    pub fn hook_command_list(&self) -> Option<&Arc<RenderCommandList>> {
        self.hook.get()
    }

    /// Records a hook packet.
    ///
    /// When the packet executes, `callback` receives the hook list and may record
    /// into it; the hook list is flushed right after the callback returns, so those
    /// commands run between the packets recorded before and after the hook.
    ///
    /// ## Panics
    ///
    /// Fatal if no hook list is bound.
    pub fn register_hook<F>(&self, callback: F)
    where
        F: Fn(&RenderCommandList) + Send + Sync + 'static,
    {
        let Some(hook_list) = self.hook.get() else {
            fatal(CommandListError::MissingHookList {
                list: self.debug_name.clone(),
            });
        };
        let hook_list = Arc::clone(hook_list);
        self.record_with(move |_| {
            Ok(RenderCommand::Hook(HookCommand {
                callback: Box::new(callback),
                hook_list,
            }))
        });
    }

    // --- Readback ---

    /// Records a read of the result of `query`, published into `slot` on execution.
    pub fn get_query_result_u64(&self, query: QueryId, slot: &ReadbackSlot<u64>) {
        let slot = slot.clone();
        self.record_with(move |_| {
            Ok(RenderCommand::Readback(ReadbackCommand::QueryResultU64 { query, slot }))
        });
    }

    /// Records a read of a device integer, published into `slot` on execution.
    pub fn get_integer(&self, parameter: IntegerParameter, slot: &ReadbackSlot<i32>) {
        let slot = slot.clone();
        self.record_with(move |_| {
            Ok(RenderCommand::Readback(ReadbackCommand::Integer { parameter, slot }))
        });
    }

    // --- Single-frame memory ---

    /// Reserves `bytes` bytes of scratch memory in the parameter arena.
    ///
    /// The block stays valid until the list is next cleared; using the returned
    /// reference after that is fatal.
    pub fn allocate_single_frame_memory(&self, bytes: usize) -> ParamRef<u8> {
        self.ensure_not_executing();
        let mut state = self.lock_state();
        match state.params.reserve_bytes(bytes) {
            Ok(block) => block,
            Err(source) => fatal(CommandListError::ParameterArenaExhausted {
                list: self.debug_name.clone(),
                source,
            }),
        }
    }

    /// Copies `data` to the start of a single-frame block.
    pub fn write_single_frame_memory(&self, block: ParamRef<u8>, data: &[u8]) {
        self.ensure_not_executing();
        let mut state = self.lock_state();
        self.ensure_current(&state, block);
        if data.len() > block.len() {
            fatal(CommandListError::FrameMemoryOverrun {
                list: self.debug_name.clone(),
                requested: data.len(),
                available: block.len(),
            });
        }
        state.params.resolve_mut(block)[..data.len()].copy_from_slice(data);
    }

    /// Returns a copy of a single-frame block.
    pub fn read_single_frame_memory(&self, block: ParamRef<u8>) -> Vec<u8> {
        self.ensure_not_executing();
        let state = self.lock_state();
        self.ensure_current(&state, block);
        state.params.resolve(block).to_vec()
    }

    // --- Execution ---

    /// Dispatches every recorded packet in order without clearing the list.
    ///
    /// Most callers want [`flush_all_commands`](Self::flush_all_commands) instead.
    pub fn execute_all_commands(&self) {
        self.ensure_not_flushing();
        let _active = ActiveListGuard::enter(self.address());
        let state = self.lock_state();
        self.execute_locked(&state);
    }

    /// Drops every recorded packet without executing it and resets both arenas.
    pub fn clear_all_commands(&self) {
        self.ensure_not_flushing();
        let mut state = self.lock_state();
        self.clear_locked(&mut state);
    }

    /// Executes every recorded packet, clears the list and releases the resources
    /// queued for deferred cleanup.
    ///
    /// The list lock is held for the whole flush, so producers on other threads
    /// block until it completes. Must not be called on a list the current thread
    /// is already flushing.
    pub fn flush_all_commands(&self) {
        self.ensure_not_flushing();
        let _active = ActiveListGuard::enter(self.address());
        let mut state = self.lock_state();

        state.flush_depth += 1;
        // Backstop: ensure_not_flushing above already rejects same-thread nesting and
        // other threads are held off by the lock.
        if state.flush_depth != 1 {
            fatal(CommandListError::NestedFlush {
                list: self.debug_name.clone(),
            });
        }

        let executed = self.execute_locked(&state);
        let peak_parameter_bytes = state.params.peak_bytes();
        self.clear_locked(&mut state);
        let released = self.perform_deferred_cleanup();

        {
            let mut stats = self.lock_stats();
            stats.flush_count += 1;
            stats.packets_executed += executed as u64;
            stats.last_flush_packets = executed;
            stats.peak_packets = stats.peak_packets.max(state.packets.peak_len());
            stats.peak_parameter_bytes = stats.peak_parameter_bytes.max(peak_parameter_bytes);
            stats.deferred_cleanups += released as u64;
        }

        state.flush_depth -= 1;
        log::trace!(
            "Flushed command list '{}': {} packets, {} deferred cleanups",
            self.debug_name,
            executed,
            released
        );
    }

    // --- Deferred cleanup ---

    /// Keeps `value` alive until the end of the next flush.
    ///
    /// Use it for CPU memory that recorded packets (or the device) may still read.
    pub fn register_deferred_cleanup<T: Send + 'static>(&self, value: T) {
        self.lock_cleanup().memory.push(Box::new(value) as Box<dyn Any + Send>);
    }

    /// Deletes `buffer` at the end of the next flush.
    pub fn register_deferred_buffer_cleanup(&self, buffer: BufferId) {
        self.lock_cleanup().buffers.push(buffer);
    }

    /// Deletes `texture` at the end of the next flush.
    pub fn register_deferred_texture_cleanup(&self, texture: TextureId) {
        self.lock_cleanup().textures.push(texture);
    }

    /// Deletes `sampler` at the end of the next flush.
    pub fn register_deferred_sampler_cleanup(&self, sampler: SamplerId) {
        self.lock_cleanup().samplers.push(sampler);
    }

    /// The number of entries waiting for the next flush's cleanup pass.
    pub fn pending_deferred_cleanups(&self) -> usize {
        self.lock_cleanup().len()
    }

    // --- Introspection ---

    /// The number of recorded packets not yet flushed.
    pub fn num_commands(&self) -> usize {
        self.num_commands.load(Ordering::Acquire)
    }

    /// Returns `true` if no packet is pending.
    pub fn is_empty(&self) -> bool {
        self.num_commands() == 0
    }

    /// Index of the packet currently (or most recently) dispatched.
    ///
    /// Lock-free, so device debug callbacks can report which packet failed.
    pub fn debug_current_command_index(&self) -> usize {
        self.debug_current_command.load(Ordering::Relaxed)
    }

    /// A snapshot of the list's counters.
    pub fn stats(&self) -> CommandListStats {
        *self.lock_stats()
    }

    // --- Internals ---

    /// Allocates one packet slot and stores the packet built by `build`.
    ///
    /// `build` receives the parameter arena to store slice arguments in.
    pub(crate) fn record_with<F>(&self, build: F)
    where
        F: FnOnce(&mut ParameterArena) -> Result<RenderCommand, ArenaError>,
    {
        self.ensure_not_executing();
        let mut state = self.lock_state();
        let packet = match build(&mut state.params) {
            Ok(packet) => packet,
            Err(source) => fatal(CommandListError::ParameterArenaExhausted {
                list: self.debug_name.clone(),
                source,
            }),
        };
        if state.packets.push(packet).is_err() {
            fatal(CommandListError::PacketArenaExhausted {
                list: self.debug_name.clone(),
                capacity: state.packets.capacity(),
            });
        }
        self.num_commands.store(state.packets.len(), Ordering::Release);
    }

    fn execute_locked(&self, state: &RecordState) -> usize {
        let expected = state.packets.len();
        let mut index = 0;
        while index < state.packets.len() {
            self.debug_current_command.store(index, Ordering::Relaxed);
            if let Some(packet) = state.packets.get(index) {
                packet.execute(self.device.as_ref(), &state.params);
            }
            index += 1;
        }
        // Backstop: the lock keeps other producers out and record_with rejects
        // recording from this thread, so the count cannot change here.
        if state.packets.len() != expected {
            fatal(CommandListError::GrowthDuringExecution {
                list: self.debug_name.clone(),
                expected,
                actual: state.packets.len(),
            });
        }
        expected
    }

    fn clear_locked(&self, state: &mut RecordState) {
        state.packets.clear();
        state.params.clear();
        self.num_commands.store(0, Ordering::Release);
    }

    /// Releases everything queued for deferred cleanup. Only called from a flush,
    /// after the packets have executed.
    fn perform_deferred_cleanup(&self) -> usize {
        let queues = mem::take(&mut *self.lock_cleanup());
        if queues.is_empty() {
            return 0;
        }
        log::debug!(
            "Command list '{}': releasing {} memory blocks, {} buffers, {} textures, {} samplers",
            self.debug_name,
            queues.memory.len(),
            queues.buffers.len(),
            queues.textures.len(),
            queues.samplers.len()
        );
        queues.release(self.device.as_ref())
    }

    fn ensure_current(&self, state: &RecordState, block: ParamRef<u8>) {
        if !state.params.is_current(block) {
            fatal(CommandListError::StaleFrameMemory {
                list: self.debug_name.clone(),
            });
        }
        if !state.params.contains(block) {
            fatal(CommandListError::ForeignFrameMemory {
                list: self.debug_name.clone(),
                len: block.len(),
                capacity: state.params.capacity_bytes(),
            });
        }
    }

    fn address(&self) -> usize {
        self as *const Self as usize
    }

    fn is_active_on_this_thread(&self) -> bool {
        let address = self.address();
        ACTIVE_LISTS.with(|lists| lists.borrow().contains(&address))
    }

    /// Taking the state lock while this thread executes the list would deadlock.
    fn ensure_not_executing(&self) {
        if self.is_active_on_this_thread() {
            fatal(CommandListError::RecordDuringExecution {
                list: self.debug_name.clone(),
            });
        }
    }

    fn ensure_not_flushing(&self) {
        if self.is_active_on_this_thread() {
            fatal(CommandListError::NestedFlush {
                list: self.debug_name.clone(),
            });
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RecordState> {
        self.state
            .lock()
            .expect("command list state lock poisoned by a previous fatal error")
    }

    fn lock_cleanup(&self) -> MutexGuard<'_, DeferredCleanupQueues> {
        self.cleanup
            .lock()
            .expect("command list cleanup lock poisoned by a previous fatal error")
    }

    fn lock_stats(&self) -> MutexGuard<'_, CommandListStats> {
        self.stats
            .lock()
            .expect("command list stats lock poisoned by a previous fatal error")
    }
}

impl fmt::Debug for RenderCommandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCommandList")
            .field("debug_name", &self.debug_name)
            .field("num_commands", &self.num_commands())
            .field("hook", &self.hook.get().map(|list| list.debug_name()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_infra::HeadlessDevice;

    fn small_list(name: &str) -> RenderCommandList {
        let config = CommandListConfig::named(name).with_arena_bytes(4096, 4096);
        RenderCommandList::new(Arc::new(HeadlessDevice::new()), &config)
    }

    fn active_lists() -> Vec<usize> {
        ACTIVE_LISTS.with(|lists| lists.borrow().clone())
    }

    #[test]
    fn active_list_guards_nest() {
        let outer = ActiveListGuard::enter(1);
        {
            let _inner = ActiveListGuard::enter(2);
            assert_eq!(active_lists(), vec![1, 2]);
        }
        assert_eq!(active_lists(), vec![1]);
        drop(outer);
        assert!(active_lists().is_empty());
    }

    #[test]
    fn flush_leaves_no_active_list_behind() {
        let list = small_list("guarded");
        list.finish();
        list.flush_all_commands();

        assert!(!list.is_active_on_this_thread());
        assert!(active_lists().is_empty());
    }

    #[test]
    fn num_commands_follows_records_and_clears() {
        let list = small_list("counting");
        assert!(list.is_empty());

        list.enable(ember_core::renderer::Capability::DepthTest);
        list.depth_func(ember_core::renderer::CompareFunction::LessEqual);
        assert_eq!(list.num_commands(), 2);

        list.clear_all_commands();
        assert_eq!(list.num_commands(), 0);
    }

    #[test]
    fn debug_output_names_the_hook_list() {
        let list = small_list("main");
        list.set_hook_command_list(Arc::new(small_list("secondary")));

        let debug = format!("{list:?}");
        assert!(debug.contains("\"main\""));
        assert!(debug.contains("secondary"));
    }
}
