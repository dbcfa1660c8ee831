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

/// Counters describing the activity of a command list since its creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandListStats {
    /// Number of completed `flush_all_commands` calls.
    pub flush_count: u64,
    /// Total number of packets dispatched.
    pub packets_executed: u64,
    /// Number of packets dispatched by the most recent flush.
    pub last_flush_packets: usize,
    /// Highest number of packets pending at once.
    pub peak_packets: usize,
    /// Highest parameter arena usage in bytes.
    pub peak_parameter_bytes: usize,
    /// Total number of deferred cleanup entries released.
    pub deferred_cleanups: u64,
}

impl CommandListStats {
    /// Average number of packets per flush, or `0.0` before the first flush.
    pub fn average_packets_per_flush(&self) -> f64 {
        if self.flush_count == 0 {
            0.0
        } else {
            self.packets_executed as f64 / self.flush_count as f64
        }
    }
}
