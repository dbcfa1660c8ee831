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

use thiserror::Error;

/// An allocation request that an arena could not satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The byte arena does not have enough space left for the request.
    #[error("arena exhausted: requested {requested} bytes, {remaining} of {capacity} bytes left")]
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes still available before the request.
        remaining: usize,
        /// Total capacity of the arena in bytes.
        capacity: usize,
    },
    /// Every slot of a slot arena is in use.
    #[error("arena exhausted: all {capacity} slots are in use")]
    OutOfSlots {
        /// Total number of slots of the arena.
        capacity: usize,
    },
    /// The requested alignment is not a power of two or exceeds [`MAX_ARENA_ALIGN`].
    ///
    /// [`MAX_ARENA_ALIGN`]: super::MAX_ARENA_ALIGN
    #[error("unsupported alignment {align} (maximum is {max})")]
    UnsupportedAlignment {
        /// The requested alignment.
        align: usize,
        /// The strictest alignment the arena supports.
        max: usize,
    },
}
