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

use super::RenderCommandList;

/// Records a debug group around the commands recorded during its lifetime.
///
/// `push_debug_group` is recorded on creation and `pop_debug_group` when the
/// guard is dropped, so groups stay balanced even on early returns.
///
/// ```ignore
/// {
///     let _group = ScopedDebugGroup::new(&list, "shadow pass");
///     list.draw_arrays(PrimitiveTopology::TriangleList, 0, 3);
/// }
/// ```
#[must_use = "the debug group is closed as soon as the guard is dropped"]
pub struct ScopedDebugGroup<'a> {
    list: &'a RenderCommandList,
}

impl<'a> ScopedDebugGroup<'a> {
    /// Opens a debug group labelled `label` on `list`.
    pub fn new(list: &'a RenderCommandList, label: &str) -> Self {
        list.push_debug_group(0, label.as_bytes());
        Self { list }
    }
}

impl Drop for ScopedDebugGroup<'_> {
    fn drop(&mut self) {
        self.list.pop_debug_group();
    }
}
