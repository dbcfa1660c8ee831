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

use std::sync::{Arc, Mutex, MutexGuard};

/// A single value produced by the render thread and read by whoever recorded the
/// command that produces it.
///
/// Cloning a slot yields another handle to the same value.
#[derive(Debug)]
pub struct ReadbackSlot<T> {
    value: Arc<Mutex<Option<T>>>,
}

impl<T> ReadbackSlot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns `true` once a value has been published and not yet taken.
    pub fn is_ready(&self) -> bool {
        self.lock().is_some()
    }

    /// Removes and returns the published value.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub(crate) fn publish(&self, value: T) {
        *self.lock() = Some(value);
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.value
            .lock()
            .expect("readback slot lock poisoned by a previous fatal error")
    }
}

impl<T: Copy> ReadbackSlot<T> {
    /// Returns the published value, leaving it in the slot.
    pub fn get(&self) -> Option<T> {
        *self.lock()
    }
}

impl<T> Clone for ReadbackSlot<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> Default for ReadbackSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let slot = ReadbackSlot::new();
        let producer = slot.clone();
        assert!(!slot.is_ready());

        producer.publish(7u64);
        assert!(slot.is_ready());
        assert_eq!(slot.get(), Some(7));
        assert_eq!(slot.take(), Some(7));
        assert_eq!(producer.get(), None);
    }

    #[test]
    #[should_panic(expected = "readback slot lock poisoned")]
    fn poisoned_slot_names_the_cause() {
        let slot = ReadbackSlot::<u64>::new();
        let shared = slot.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.value.lock().unwrap();
            panic!("render thread failed while publishing");
        })
        .join();

        slot.is_ready();
    }
}
