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

//! Arena allocators used for per-frame command recording.
//!
//! Both allocators hand out storage sequentially from a budget fixed at
//! construction time and are reset in O(1). Nothing is ever freed individually:
//! a frame's worth of allocations is reclaimed at once when the owner clears
//! the arena.
//!
//! The module also keeps a global counter of the bytes reserved by live arenas so
//! diagnostics overlays can report the recording budget without walking every
//! command list.

mod error;
mod slot_arena;
mod stack_arena;

pub use error::ArenaError;
pub use slot_arena::SlotArena;
pub use stack_arena::{StackArena, MAX_ARENA_ALIGN};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Total number of bytes currently reserved by all live [`StackArena`]s and
/// [`SlotArena`]s.
pub static ARENA_RESERVED_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Returns the number of bytes currently reserved by all live arenas.
pub fn arena_reserved_bytes() -> usize {
    ARENA_RESERVED_BYTES.load(Ordering::Relaxed)
}

pub(crate) fn track_reserve(bytes: usize) {
    ARENA_RESERVED_BYTES.fetch_add(bytes, Ordering::Relaxed);
}

pub(crate) fn track_release(bytes: usize) {
    let result = ARENA_RESERVED_BYTES.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        current.checked_sub(bytes)
    });
    if result.is_err() {
        log::error!("Arena reservation counter underflowed while releasing {bytes} bytes");
    }
}
