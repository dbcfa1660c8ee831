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
use ember_rhi::{CommandListConfig, RenderCommandList};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_hook_commands_run_between_surrounding_packets() {
    // --- 1. ARRANGE ---
    let (device, list, _hook) = hooked_lists("sandwich");

    tagged_draw(&list, 1);
    list.register_hook(|hook_list| {
        tagged_draw(hook_list, 2);
        tagged_draw(hook_list, 3);
    });
    tagged_draw(&list, 4);

    // --- 2. ACT ---
    list.flush_all_commands();

    // --- 3. ASSERT ---
    assert_eq!(draw_tags(&device.calls()), vec![1, 2, 3, 4]);
}

#[test]
fn test_hook_list_is_empty_after_hook_dispatch() {
    let (_device, list, hook) = hooked_lists("drained");

    let observed = Arc::new(AtomicUsize::new(usize::MAX));
    list.register_hook(|hook_list| tagged_draw(hook_list, 0));
    {
        let hook = Arc::clone(&hook);
        let observed = Arc::clone(&observed);
        list.register_hook(move |_| {
            observed.store(hook.num_commands(), Ordering::SeqCst);
        });
    }
    list.flush_all_commands();

    assert_eq!(observed.load(Ordering::SeqCst), 0, "the first hook must have flushed its list");
    assert!(hook.is_empty());
}

#[test]
fn test_hook_callback_runs_once_per_registration() {
    let (_device, list, _hook) = hooked_lists("counted");
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        list.register_hook(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    list.flush_all_commands();
    list.flush_all_commands();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_hook_list_can_chain_to_its_own_hook() {
    let (device, outer, middle) = hooked_lists("outer");
    let inner = Arc::new(RenderCommandList::new(
        device.clone(),
        &CommandListConfig::hook("inner").with_arena_bytes(4096, 4096),
    ));
    middle.set_hook_command_list(inner);

    outer.register_hook(|middle| {
        tagged_draw(middle, 1);
        middle.register_hook(|inner| tagged_draw(inner, 2));
        tagged_draw(middle, 3);
    });
    outer.flush_all_commands();

    assert_eq!(draw_tags(&device.calls()), vec![1, 2, 3]);
}

#[test]
#[should_panic(expected = "without a hook command list")]
fn test_register_hook_without_hook_list_is_fatal() {
    let (_device, list) = headless_list("unhooked");
    list.register_hook(|_| {});
}

#[test]
#[should_panic(expected = "cannot be its own hook command list")]
fn test_binding_a_list_to_itself_is_fatal() {
    let (_device, list) = headless_list("narcissus");
    list.set_hook_command_list(Arc::clone(&list));
}

#[test]
#[should_panic(expected = "would create a hook cycle")]
fn test_hook_cycles_are_rejected_at_bind_time() {
    let (device, a) = headless_list("a");
    let b = Arc::new(RenderCommandList::new(device.clone(), &CommandListConfig::hook("b")));
    let c = Arc::new(RenderCommandList::new(device, &CommandListConfig::hook("c")));

    a.set_hook_command_list(Arc::clone(&b));
    b.set_hook_command_list(Arc::clone(&c));
    c.set_hook_command_list(Arc::clone(&a));
}

#[test]
#[should_panic(expected = "already bound to 'first_hook'")]
fn test_second_hook_binding_is_fatal() {
    let (device, list) = headless_list("bound_twice");
    let first = Arc::new(RenderCommandList::new(device.clone(), &CommandListConfig::hook("first_hook")));
    let second = Arc::new(RenderCommandList::new(device, &CommandListConfig::hook("second_hook")));

    list.set_hook_command_list(first);
    list.set_hook_command_list(second);
}

#[test]
#[should_panic(expected = "already being flushed")]
fn test_nested_flush_of_the_same_list_is_fatal() {
    let (_device, list, _hook) = hooked_lists("reentrant");

    let this = Arc::clone(&list);
    list.register_hook(move |_| this.flush_all_commands());
    list.flush_all_commands();
}

#[test]
#[should_panic(expected = "recorded into or accessed from its own execution")]
fn test_recording_into_the_executing_list_is_fatal() {
    let (_device, list, _hook) = hooked_lists("self_feeding");

    let this = Arc::clone(&list);
    list.register_hook(move |_| tagged_draw(&this, 0));
    list.flush_all_commands();
}
