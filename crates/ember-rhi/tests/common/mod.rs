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

//! Shared fixtures for the command list integration tests.

#![allow(dead_code)]

use ember_core::renderer::PrimitiveTopology;
use ember_infra::{DeviceCall, HeadlessDevice};
use ember_rhi::{CommandListConfig, RenderCommandList};
use std::sync::Arc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A headless device and a list replaying into it.
pub fn headless_list(name: &str) -> (Arc<HeadlessDevice>, Arc<RenderCommandList>) {
    init_logger();
    let device = Arc::new(HeadlessDevice::new());
    let config = CommandListConfig::named(name).with_arena_bytes(64 * 1024, 64 * 1024);
    let list = Arc::new(RenderCommandList::new(device.clone(), &config));
    (device, list)
}

/// A list with a hook list bound, both replaying into the same device.
pub fn hooked_lists(
    name: &str,
) -> (Arc<HeadlessDevice>, Arc<RenderCommandList>, Arc<RenderCommandList>) {
    let (device, list) = headless_list(name);
    let hook = Arc::new(RenderCommandList::new(
        device.clone(),
        &CommandListConfig::hook(format!("{name}_hook")).with_arena_bytes(16 * 1024, 16 * 1024),
    ));
    list.set_hook_command_list(hook.clone());
    (device, list, hook)
}

/// Records a draw whose `first` vertex doubles as a tag identifying it.
pub fn tagged_draw(list: &RenderCommandList, tag: u32) {
    list.draw_arrays(PrimitiveTopology::TriangleList, tag, 3);
}

/// The tags of the tagged draws in `calls`, in order.
pub fn draw_tags(calls: &[DeviceCall]) -> Vec<u32> {
    calls
        .iter()
        .filter_map(|call| match call {
            DeviceCall::DrawArrays { first, .. } => Some(*first),
            _ => None,
        })
        .collect()
}
