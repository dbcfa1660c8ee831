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

//! Out-of-line storage for slice arguments.

use bytemuck::Pod;
use ember_core::memory::{ArenaError, StackArena};
use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// A typed reference to a slice stored in a command list's parameter arena.
///
/// A `ParamRef` is only meaningful for the list that produced it and only until
/// that list is next cleared. Every clear starts a new epoch, which lets the list
/// reject references that outlived their frame.
pub struct ParamRef<T> {
    offset: u32,
    len: u32,
    epoch: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ParamRef<T> {
    /// The number of elements referenced.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if the reference covers no element.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Clone for ParamRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ParamRef<T> {}

impl<T> PartialEq for ParamRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.len == other.len && self.epoch == other.epoch
    }
}

impl<T> fmt::Debug for ParamRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRef")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// The parameter arena of a command list: a [`StackArena`] plus the epoch that
/// stamps every reference handed out since the last clear.
#[derive(Debug)]
pub(crate) struct ParameterArena {
    arena: StackArena,
    epoch: u32,
}

impl ParameterArena {
    pub(crate) fn new(capacity: usize) -> Self {
        // References store 32-bit offsets.
        let capacity = capacity.min(u32::MAX as usize);
        Self {
            arena: StackArena::new(capacity),
            epoch: 0,
        }
    }

    /// Copies `values` into the arena.
    pub(crate) fn store_parameter<T: Pod>(&mut self, values: &[T]) -> Result<ParamRef<T>, ArenaError> {
        let bytes: &[u8] = bytemuck::cast_slice(values);
        let offset = self.arena.alloc(bytes.len(), mem::align_of::<T>())?;
        self.arena.bytes_mut(offset, bytes.len()).copy_from_slice(bytes);
        Ok(self.make_ref(offset, values.len()))
    }

    /// Reserves `len` bytes of scratch space. The contents are unspecified until written.
    pub(crate) fn reserve_bytes(&mut self, len: usize) -> Result<ParamRef<u8>, ArenaError> {
        let offset = self.arena.alloc(len, ember_core::memory::MAX_ARENA_ALIGN)?;
        Ok(self.make_ref(offset, len))
    }

    /// Returns the slice behind `param`.
    ///
    /// `param` must come from this arena's current epoch.
    pub(crate) fn resolve<T: Pod>(&self, param: ParamRef<T>) -> &[T] {
        debug_assert!(self.is_current(param));
        let bytes = self
            .arena
            .bytes(param.offset as usize, param.len() * mem::size_of::<T>());
        bytemuck::cast_slice(bytes)
    }

    pub(crate) fn resolve_mut<T: Pod>(&mut self, param: ParamRef<T>) -> &mut [T] {
        debug_assert!(self.is_current(param));
        let bytes = self
            .arena
            .bytes_mut(param.offset as usize, param.len() * mem::size_of::<T>());
        bytemuck::cast_slice_mut(bytes)
    }

    pub(crate) fn is_current<T>(&self, param: ParamRef<T>) -> bool {
        param.epoch == self.epoch
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Returns `true` if the byte range of `param` lies inside the arena.
    pub(crate) fn contains<T>(&self, param: ParamRef<T>) -> bool {
        param
            .len()
            .checked_mul(mem::size_of::<T>())
            .and_then(|bytes| bytes.checked_add(param.offset as usize))
            .is_some_and(|end| end <= self.arena.capacity_bytes())
    }

    pub(crate) fn capacity_bytes(&self) -> usize {
        self.arena.capacity_bytes()
    }

    pub(crate) fn peak_bytes(&self) -> usize {
        self.arena.peak_bytes()
    }

    fn make_ref<T>(&self, offset: usize, len: usize) -> ParamRef<T> {
        ParamRef {
            offset: offset as u32,
            len: len as u32,
            epoch: self.epoch,
            _marker: PhantomData,
        }
    }
}
