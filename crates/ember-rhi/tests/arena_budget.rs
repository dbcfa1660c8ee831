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

//! Kept in its own test binary: the arena counter is process-wide, so no other test
//! may create command lists concurrently.

use ember_core::memory::arena_reserved_bytes;
use ember_infra::HeadlessDevice;
use ember_rhi::command::RenderCommand;
use ember_rhi::{CommandListConfig, RenderCommandList};
use std::mem;
use std::sync::Arc;

#[test]
fn test_list_lifetime_moves_the_reserved_counter() {
    let baseline = arena_reserved_bytes();
    let slot = mem::size_of::<RenderCommand>();

    let list = RenderCommandList::new(
        Arc::new(HeadlessDevice::new()),
        &CommandListConfig::named("budgeted").with_arena_bytes(4096, 2048),
    );
    assert_eq!(arena_reserved_bytes(), baseline + (4096 / slot) * slot + 2048);

    drop(list);
    assert_eq!(arena_reserved_bytes(), baseline);
}
