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

use common::{draw_tags, headless_list, tagged_draw};
use ember_core::renderer::{
    BufferId, ClearFlags, IntegerParameter, PrimitiveTopology, QueryId, QueryTarget,
};
use ember_infra::{DeviceCall, HeadlessDevice};
use ember_rhi::command::RenderCommand;
use ember_rhi::{CommandListConfig, ReadbackSlot, RenderCommandList, ScopedDebugGroup};
use std::sync::Arc;
use std::thread;

#[test]
fn test_recording_does_not_touch_the_device() {
    let (device, list) = headless_list("recording");

    list.clear_color(0.1, 0.2, 0.3, 1.0);
    list.clear(ClearFlags::ALL);
    tagged_draw(&list, 0);

    assert_eq!(list.num_commands(), 3);
    assert_eq!(device.call_count(), 0, "nothing may reach the device before a flush");
}

#[test]
fn test_flush_dispatches_in_recording_order() {
    let (device, list) = headless_list("ordering");

    for tag in 0..100 {
        tagged_draw(&list, tag);
    }
    list.flush_all_commands();

    assert_eq!(draw_tags(&device.calls()), (0..100).collect::<Vec<_>>());
}

#[test]
fn test_every_packet_runs_exactly_once() {
    let (device, list) = headless_list("once");

    tagged_draw(&list, 7);
    list.flush_all_commands();
    list.flush_all_commands();

    assert_eq!(draw_tags(&device.calls()), vec![7]);
}

#[test]
fn test_list_is_empty_after_flush() {
    let (_device, list) = headless_list("empty_after");

    list.uniform_1i(0, 1);
    list.dispatch_compute(8, 8, 1);
    assert!(!list.is_empty());

    list.flush_all_commands();

    assert_eq!(list.num_commands(), 0);
    assert!(list.is_empty());
}

#[test]
fn test_flushing_an_empty_list_does_nothing() {
    let (device, list) = headless_list("idle");

    list.flush_all_commands();
    list.flush_all_commands();

    assert_eq!(device.call_count(), 0);
    assert_eq!(list.stats().flush_count, 2);
}

#[test]
fn test_slice_arguments_are_copied_at_record_time() {
    let (device, list) = headless_list("slices");

    let mut matrix = [0.0f32; 16];
    matrix[0] = 1.0;
    list.uniform_matrix_4fv(3, false, &matrix);
    matrix[0] = 99.0;

    let payload = vec![1u8, 2, 3, 4, 5];
    list.named_buffer_sub_data(BufferId(9), 16, &payload);
    drop(payload);

    list.flush_all_commands();

    let calls = device.calls();
    let mut expected_matrix = vec![0.0f32; 16];
    expected_matrix[0] = 1.0;
    assert_eq!(
        calls[0],
        DeviceCall::UniformMatrix4fv {
            location: 3,
            transpose: false,
            values: expected_matrix
        }
    );
    assert_eq!(
        calls[1],
        DeviceCall::NamedBufferSubData {
            buffer: BufferId(9),
            offset: 16,
            data: vec![1, 2, 3, 4, 5]
        }
    );
}

#[test]
fn test_execute_without_clear_keeps_packets() {
    let (device, list) = headless_list("execute_only");

    tagged_draw(&list, 1);
    list.execute_all_commands();
    assert_eq!(list.num_commands(), 1);

    list.clear_all_commands();
    assert!(list.is_empty());
    list.flush_all_commands();

    assert_eq!(draw_tags(&device.calls()), vec![1]);
}

#[test]
fn test_concurrent_producers_keep_their_own_order() {
    let (device, list) = headless_list("producers");

    let producers: Vec<_> = (0..4u32)
        .map(|producer| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for i in 0..250 {
                    tagged_draw(&list, producer * 1000 + i);
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(list.num_commands(), 1000);
    list.flush_all_commands();

    let tags = draw_tags(&device.calls());
    assert_eq!(tags.len(), 1000);
    for producer in 0..4u32 {
        let own: Vec<_> = tags.iter().copied().filter(|tag| tag / 1000 == producer).collect();
        assert_eq!(own, (0..250).map(|i| producer * 1000 + i).collect::<Vec<_>>());
    }
}

#[test]
fn test_readback_publishes_after_flush() {
    let (device, list) = headless_list("readback");
    device.set_query_result(QueryId(5), 16_000);
    device.set_integer(IntegerParameter::AvailableVideoMemoryKib, 2048);

    let elapsed = ReadbackSlot::new();
    let vram = ReadbackSlot::new();
    list.begin_query(QueryTarget::TimeElapsed, QueryId(5));
    tagged_draw(&list, 0);
    list.end_query(QueryTarget::TimeElapsed);
    list.get_query_result_u64(QueryId(5), &elapsed);
    list.get_integer(IntegerParameter::AvailableVideoMemoryKib, &vram);

    assert!(!elapsed.is_ready());
    list.flush_all_commands();

    assert_eq!(elapsed.get(), Some(16_000));
    assert_eq!(vram.take(), Some(2048));
    assert!(!vram.is_ready());
}

#[test]
fn test_debug_group_wraps_recorded_commands() {
    let (device, list) = headless_list("debug_group");

    {
        let _group = ScopedDebugGroup::new(&list, "shadow pass");
        tagged_draw(&list, 0);
    }
    list.flush_all_commands();

    let names: Vec<_> = device.calls().iter().map(DeviceCall::name).collect();
    assert_eq!(names, vec!["push_debug_group", "draw_arrays", "pop_debug_group"]);
    assert_eq!(
        device.calls()[0],
        DeviceCall::PushDebugGroup {
            id: 0,
            message: b"shadow pass".to_vec()
        }
    );
}

#[test]
fn test_stats_track_flushes() {
    let (_device, list) = headless_list("stats");

    for tag in 0..3 {
        tagged_draw(&list, tag);
    }
    list.uniform_4fv(0, &[1.0; 8]);
    list.flush_all_commands();
    tagged_draw(&list, 3);
    list.flush_all_commands();

    let stats = list.stats();
    assert_eq!(stats.flush_count, 2);
    assert_eq!(stats.packets_executed, 5);
    assert_eq!(stats.last_flush_packets, 1);
    assert_eq!(stats.peak_packets, 4);
    assert_eq!(stats.peak_parameter_bytes, 32);
    assert_eq!(list.debug_current_command_index(), 0);
}

#[test]
fn test_single_frame_memory_round_trips_until_clear() {
    let (_device, list) = headless_list("frame_memory");

    let block = list.allocate_single_frame_memory(8);
    assert_eq!(block.len(), 8);
    list.write_single_frame_memory(block, &[1, 2, 3]);

    assert_eq!(&list.read_single_frame_memory(block)[..3], &[1, 2, 3]);
}

#[test]
#[should_panic(expected = "used after the list was cleared")]
fn test_single_frame_memory_is_invalidated_by_flush() {
    let (_device, list) = headless_list("stale_memory");

    let block = list.allocate_single_frame_memory(4);
    list.flush_all_commands();
    list.write_single_frame_memory(block, &[0; 4]);
}

#[test]
#[should_panic(expected = "lies outside the 16-byte parameter arena")]
fn test_single_frame_memory_from_another_list_is_fatal() {
    let device = Arc::new(HeadlessDevice::new());
    let large = RenderCommandList::new(
        device.clone(),
        &CommandListConfig::named("large").with_arena_bytes(4096, 4096),
    );
    let small = RenderCommandList::new(device, &CommandListConfig::named("small").with_arena_bytes(4096, 16));

    let block = large.allocate_single_frame_memory(64);
    small.read_single_frame_memory(block);
}

#[test]
#[should_panic(expected = "packet arena exhausted")]
fn test_packet_arena_exhaustion_is_fatal() {
    let device = Arc::new(HeadlessDevice::new());
    let config = CommandListConfig::named("tiny_packets")
        .with_arena_bytes(2 * std::mem::size_of::<RenderCommand>(), 64);
    let list = RenderCommandList::new(device, &config);

    tagged_draw(&list, 0);
    tagged_draw(&list, 1);
    tagged_draw(&list, 2);
}

#[test]
#[should_panic(expected = "parameter arena exhausted")]
fn test_parameter_arena_exhaustion_is_fatal() {
    let device = Arc::new(HeadlessDevice::new());
    let config = CommandListConfig::named("tiny_params").with_arena_bytes(4096, 16);
    let list = RenderCommandList::new(device, &config);

    list.uniform_4fv(0, &[0.0; 8]);
}

#[test]
fn test_fatal_messages_name_the_list() {
    let device = Arc::new(HeadlessDevice::new());
    let config = CommandListConfig::named("named_list").with_arena_bytes(4096, 0);
    let list = RenderCommandList::new(device, &config);

    let panic = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        list.push_debug_group(0, b"label");
    }))
    .unwrap_err();
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("'named_list'"), "unexpected message: {message}");
}

#[test]
fn test_draw_variants_carry_their_arguments() {
    let (device, list) = headless_list("draws");

    list.draw_elements_instanced(
        PrimitiveTopology::TriangleStrip,
        36,
        ember_core::renderer::IndexFormat::Uint16,
        128,
        10,
    );
    list.flush_all_commands();

    assert_eq!(
        device.calls(),
        vec![DeviceCall::DrawElementsInstanced {
            topology: PrimitiveTopology::TriangleStrip,
            count: 36,
            format: ember_core::renderer::IndexFormat::Uint16,
            offset: 128,
            instance_count: 10
        }]
    );
}
