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

//! Invariant violations of the command recording layer.
//!
//! None of these are ever returned to the caller. A command list that detects one
//! logs it and panics with its `Display` text, so every crash report names the
//! offending list and the rule that was broken.

use ember_core::memory::ArenaError;
use thiserror::Error;

/// A programming error detected by a [`RenderCommandList`](crate::RenderCommandList).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandListError {
    #[error("command list '{list}': packet arena exhausted ({capacity} packets)")]
    PacketArenaExhausted { list: String, capacity: usize },

    #[error("command list '{list}': parameter arena exhausted: {source}")]
    ParameterArenaExhausted {
        list: String,
        #[source]
        source: ArenaError,
    },

    #[error("command list '{list}': flush_all_commands called while the list is already being flushed")]
    NestedFlush { list: String },

    #[error("command list '{list}': packet count changed during execution (expected {expected}, found {actual})")]
    GrowthDuringExecution {
        list: String,
        expected: usize,
        actual: usize,
    },

    #[error("command list '{list}': recorded into or accessed from its own execution")]
    RecordDuringExecution { list: String },

    #[error("command list '{list}': cannot be its own hook command list")]
    SelfHook { list: String },

    #[error("command list '{list}': binding hook list '{hook}' would create a hook cycle")]
    HookCycle { list: String, hook: String },

    #[error("command list '{list}': hook command list already bound to '{existing}'")]
    HookAlreadyBound { list: String, existing: String },

    #[error("command list '{list}': register_hook called without a hook command list")]
    MissingHookList { list: String },

    #[error("command list '{list}': single-frame memory used after the list was cleared")]
    StaleFrameMemory { list: String },

    #[error("command list '{list}': single-frame block of {len} bytes lies outside the {capacity}-byte parameter arena")]
    ForeignFrameMemory {
        list: String,
        len: usize,
        capacity: usize,
    },

    #[error("command list '{list}': wrote {requested} bytes into a {available}-byte single-frame block")]
    FrameMemoryOverrun {
        list: String,
        requested: usize,
        available: usize,
    },

    #[error("flush_render_command called from the render thread")]
    FlushFromRenderThread,
}

/// Logs `error` and aborts the current operation by panicking with its message.
#[cold]
#[track_caller]
pub(crate) fn fatal(error: CommandListError) -> ! {
    log::error!("{error}");
    panic!("{error}");
}
