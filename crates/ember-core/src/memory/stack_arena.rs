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

//! A bump allocator over a fixed byte budget.

use super::{track_release, track_reserve, ArenaError};
use std::fmt;

/// The strictest alignment a [`StackArena`] can honour.
///
/// The backing storage is made of `u64` words, so every offset that is a multiple
/// of an alignment up to 8 is also correctly aligned in memory.
pub const MAX_ARENA_ALIGN: usize = std::mem::align_of::<u64>();

const WORD_BYTES: usize = std::mem::size_of::<u64>();

/// A stack (bump) allocator handing out byte ranges from a fixed-size pool.
///
/// Allocations are identified by their byte offset from the start of the pool.
/// [`clear`](StackArena::clear) resets the arena in O(1); the backing memory is
/// kept and reused by the next cycle.
pub struct StackArena {
    storage: Box<[u64]>,
    capacity: usize,
    used: usize,
    peak: usize,
}

impl StackArena {
    /// Creates an arena able to hold `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        let words = capacity.div_ceil(WORD_BYTES);
        track_reserve(capacity);
        Self {
            storage: vec![0u64; words].into_boxed_slice(),
            capacity,
            used: 0,
            peak: 0,
        }
    }

    /// Reserves `size` bytes aligned to `align` and returns their offset.
    ///
    /// ## Errors
    /// * [`ArenaError::UnsupportedAlignment`] if `align` is not a power of two or
    ///   exceeds [`MAX_ARENA_ALIGN`].
    /// * [`ArenaError::OutOfMemory`] if the arena cannot fit the request.
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<usize, ArenaError> {
        if !align.is_power_of_two() || align > MAX_ARENA_ALIGN {
            return Err(ArenaError::UnsupportedAlignment {
                align,
                max: MAX_ARENA_ALIGN,
            });
        }

        let start = (self.used + align - 1) & !(align - 1);
        let end = start
            .checked_add(size)
            .filter(|&end| end <= self.capacity)
            .ok_or(ArenaError::OutOfMemory {
                requested: size,
                remaining: self.remaining_bytes(),
                capacity: self.capacity,
            })?;

        self.used = end;
        self.peak = self.peak.max(end);
        Ok(start)
    }

    /// Returns the `len` bytes starting at `offset`.
    ///
    /// # Panics
    /// Panics if the range lies outside the arena.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        let bytes: &[u8] = bytemuck::cast_slice(&self.storage);
        &bytes[offset..offset + len]
    }

    /// Returns the `len` bytes starting at `offset` for writing.
    ///
    /// # Panics
    /// Panics if the range lies outside the arena.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.storage);
        &mut bytes[offset..offset + len]
    }

    /// Releases every allocation at once. Previously returned offsets become invalid.
    pub fn clear(&mut self) {
        self.used = 0;
    }

    /// The total capacity in bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.capacity
    }

    /// The number of bytes handed out since the last clear, including alignment padding.
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    /// The number of bytes still available.
    pub fn remaining_bytes(&self) -> usize {
        self.capacity - self.used
    }

    /// The highest [`used_bytes`](StackArena::used_bytes) value observed over the
    /// arena's lifetime.
    pub fn peak_bytes(&self) -> usize {
        self.peak
    }
}

impl Drop for StackArena {
    fn drop(&mut self) {
        track_release(self.capacity);
    }
}

impl fmt::Debug for StackArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackArena")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .field("peak", &self.peak)
            .finish()
    }
}
