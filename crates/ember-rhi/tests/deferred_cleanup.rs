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

mod common;

use common::{draw_tags, headless_list, hooked_lists, tagged_draw};
use ember_core::renderer::{BufferId, SamplerId, TextureId};
use ember_infra::DeviceCall;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sets its flag when dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_buffer_is_deleted_after_the_packets_that_use_it() {
    let (device, list) = headless_list("buffer_timing");

    list.bind_vertex_array(ember_core::renderer::VertexArrayId(1));
    tagged_draw(&list, 0);
    list.register_deferred_buffer_cleanup(BufferId(42));
    assert_eq!(device.call_count(), 0, "registration must not delete anything");

    list.flush_all_commands();

    let calls = device.calls();
    let draw = calls.iter().position(|c| c.name() == "draw_arrays").unwrap();
    let delete = calls.iter().position(|c| c.name() == "delete_buffers").unwrap();
    assert!(draw < delete);
    assert_eq!(calls[delete], DeviceCall::DeleteBuffers(vec![BufferId(42)]));
    assert_eq!(list.pending_deferred_cleanups(), 0);
}

#[test]
fn test_handles_of_one_kind_are_deleted_in_one_batch() {
    let (device, list) = headless_list("batched");

    for id in 1..=3 {
        list.register_deferred_buffer_cleanup(BufferId(id));
    }
    list.register_deferred_texture_cleanup(TextureId(7));
    list.register_deferred_sampler_cleanup(SamplerId(8));
    assert_eq!(list.pending_deferred_cleanups(), 5);

    list.flush_all_commands();

    assert_eq!(
        device.calls(),
        vec![
            DeviceCall::DeleteBuffers(vec![BufferId(1), BufferId(2), BufferId(3)]),
            DeviceCall::DeleteTextures(vec![TextureId(7)]),
            DeviceCall::DeleteSamplers(vec![SamplerId(8)]),
        ]
    );
    assert_eq!(list.stats().deferred_cleanups, 5);
}

#[test]
fn test_empty_kinds_are_not_sent_to_the_device() {
    let (device, list) = headless_list("textures_only");

    list.register_deferred_texture_cleanup(TextureId(3));
    list.flush_all_commands();

    assert_eq!(device.calls(), vec![DeviceCall::DeleteTextures(vec![TextureId(3)])]);
}

#[test]
fn test_heap_memory_lives_until_the_flush() {
    let (_device, list) = headless_list("memory");
    let dropped = Arc::new(AtomicBool::new(false));

    list.register_deferred_cleanup(DropFlag(Arc::clone(&dropped)));
    tagged_draw(&list, 0);
    assert!(!dropped.load(Ordering::SeqCst));

    list.flush_all_commands();
    assert!(dropped.load(Ordering::SeqCst));
}

#[test]
fn test_cleanups_registered_during_execution_run_in_the_same_flush() {
    let (device, list, _hook) = hooked_lists("late_cleanup");

    let outer = Arc::clone(&list);
    list.register_hook(move |hook_list| {
        tagged_draw(hook_list, 1);
        outer.register_deferred_buffer_cleanup(BufferId(5));
    });
    list.flush_all_commands();

    let calls = device.calls();
    assert_eq!(draw_tags(&calls), vec![1]);
    assert_eq!(calls.last(), Some(&DeviceCall::DeleteBuffers(vec![BufferId(5)])));
}

#[test]
fn test_cleanup_is_consumed_exactly_once() {
    let (device, list) = headless_list("once");

    list.register_deferred_buffer_cleanup(BufferId(1));
    list.flush_all_commands();
    list.flush_all_commands();

    assert_eq!(device.calls(), vec![DeviceCall::DeleteBuffers(vec![BufferId(1)])]);
}
