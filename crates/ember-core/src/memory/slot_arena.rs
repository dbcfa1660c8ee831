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

//! A fixed-capacity arena of equally sized slots.

use super::{track_release, track_reserve, ArenaError};
use std::mem;

/// A bump allocator whose unit of allocation is one `T`.
///
/// The capacity is fixed at construction and the backing vector never grows, so
/// every slot costs exactly `size_of::<T>()` bytes regardless of which variant of
/// `T` it holds. Slots are addressed by index in allocation order.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<T>,
    capacity: usize,
    peak: usize,
}

impl<T> SlotArena<T> {
    /// Creates an arena with room for exactly `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        track_reserve(capacity * mem::size_of::<T>());
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            peak: 0,
        }
    }

    /// Creates an arena holding as many values as fit in `budget_bytes`.
    pub fn from_byte_budget(budget_bytes: usize) -> Self {
        Self::with_capacity(budget_bytes / mem::size_of::<T>().max(1))
    }

    /// Stores `value` in the next free slot and returns its index.
    ///
    /// ## Errors
    /// Returns [`ArenaError::OutOfSlots`] when every slot is in use; `value` is
    /// dropped in that case.
    pub fn push(&mut self, value: T) -> Result<usize, ArenaError> {
        if self.slots.len() == self.capacity {
            return Err(ArenaError::OutOfSlots {
                capacity: self.capacity,
            });
        }
        let index = self.slots.len();
        self.slots.push(value);
        self.peak = self.peak.max(self.slots.len());
        Ok(index)
    }

    /// Returns the value stored at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Drops every stored value and makes all slots available again.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The highest number of simultaneously occupied slots observed.
    pub fn peak_len(&self) -> usize {
        self.peak
    }
}

impl<T> Drop for SlotArena<T> {
    fn drop(&mut self) {
        track_release(self.capacity * mem::size_of::<T>());
    }
}
