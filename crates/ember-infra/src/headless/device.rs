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

use ember_core::renderer::{BufferId, IntegerParameter, QueryId, SamplerId, TextureId};
use ember_core::RenderDevice;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

macro_rules! define_headless_device {
    ($( $(#[$meta:meta])* $variant:ident => $method:ident ( $($arg:ident : $ty:ty),* $(; $slice:ident : [$elem:ty])? ); )*) => {
        /// One call received by a [`HeadlessDevice`], with owned copies of its
        /// arguments.
        #[derive(Debug, Clone, PartialEq)]
        pub enum DeviceCall {
            $(
                $variant { $($arg: $ty,)* $($slice: Vec<$elem>,)? },
            )*
            GetQueryResultU64 { query: QueryId },
            GetInteger { parameter: IntegerParameter },
            CreateBuffers { count: usize },
            CreateTextures { count: usize },
            CreateSamplers { count: usize },
            CreateQueries { count: usize },
            DeleteBuffers(Vec<BufferId>),
            DeleteTextures(Vec<TextureId>),
            DeleteSamplers(Vec<SamplerId>),
        }

        impl DeviceCall {
            /// The name of the device method that produced this call.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant { .. } => stringify!($method),)*
                    Self::GetQueryResultU64 { .. } => "get_query_result_u64",
                    Self::GetInteger { .. } => "get_integer",
                    Self::CreateBuffers { .. } => "create_buffers",
                    Self::CreateTextures { .. } => "create_textures",
                    Self::CreateSamplers { .. } => "create_samplers",
                    Self::CreateQueries { .. } => "create_queries",
                    Self::DeleteBuffers(_) => "delete_buffers",
                    Self::DeleteTextures(_) => "delete_textures",
                    Self::DeleteSamplers(_) => "delete_samplers",
                }
            }
        }

        impl RenderDevice for HeadlessDevice {
            $(
                fn $method(&self, $($arg: $ty,)* $($slice: &[$elem])?) {
                    self.push(DeviceCall::$variant { $($arg,)* $($slice: $slice.to_vec(),)? });
                }
            )*

            fn get_query_result_u64(&self, query: QueryId) -> u64 {
                self.push(DeviceCall::GetQueryResultU64 { query });
                self.query_results.lock().unwrap().get(&query).copied().unwrap_or(0)
            }

            fn get_integer(&self, parameter: IntegerParameter) -> i32 {
                self.push(DeviceCall::GetInteger { parameter });
                self.integers
                    .lock()
                    .unwrap()
                    .get(&parameter)
                    .copied()
                    .unwrap_or_else(|| default_integer(parameter))
            }

            fn create_buffers(&self, count: usize) -> Vec<BufferId> {
                self.push(DeviceCall::CreateBuffers { count });
                (0..count).map(|_| BufferId(self.next_handle())).collect()
            }

            fn create_textures(&self, count: usize) -> Vec<TextureId> {
                self.push(DeviceCall::CreateTextures { count });
                (0..count).map(|_| TextureId(self.next_handle())).collect()
            }

            fn create_samplers(&self, count: usize) -> Vec<SamplerId> {
                self.push(DeviceCall::CreateSamplers { count });
                (0..count).map(|_| SamplerId(self.next_handle())).collect()
            }

            fn create_queries(&self, count: usize) -> Vec<QueryId> {
                self.push(DeviceCall::CreateQueries { count });
                (0..count).map(|_| QueryId(self.next_handle())).collect()
            }

            fn delete_buffers(&self, buffers: &[BufferId]) {
                self.push(DeviceCall::DeleteBuffers(buffers.to_vec()));
            }

            fn delete_textures(&self, textures: &[TextureId]) {
                self.push(DeviceCall::DeleteTextures(textures.to_vec()));
            }

            fn delete_samplers(&self, samplers: &[SamplerId]) {
                self.push(DeviceCall::DeleteSamplers(samplers.to_vec()));
            }
        }
    };
}

ember_core::render_command_table!(define_headless_device);

/// Limits reported when no value was configured with [`HeadlessDevice::set_integer`].
fn default_integer(parameter: IntegerParameter) -> i32 {
    match parameter {
        IntegerParameter::MaxLabelLength => 256,
        IntegerParameter::MaxUniformBlockSize => 65_536,
        IntegerParameter::MaxComputeWorkGroupInvocations => 1024,
        IntegerParameter::MaxComputeSharedMemorySize => 32_768,
        IntegerParameter::DedicatedVideoMemoryKib | IntegerParameter::AvailableVideoMemoryKib => 0,
    }
}

/// A [`RenderDevice`] with no GPU behind it.
///
/// Every call is appended to an in-memory log that can be inspected with
/// [`calls`](Self::calls) or drained with [`take_calls`](Self::take_calls). Object
/// creation hands out increasing non-zero handles, and readback returns the values
/// configured with [`set_query_result`](Self::set_query_result) and
/// [`set_integer`](Self::set_integer).
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    calls: Mutex<Vec<DeviceCall>>,
    next_handle: AtomicU32,
    query_results: Mutex<HashMap<QueryId, u64>>,
    integers: Mutex<HashMap<IntegerParameter, i32>>,
}

impl HeadlessDevice {
    /// Creates a device with an empty call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every call received so far, in order.
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns and clears the call log.
    pub fn take_calls(&self) -> Vec<DeviceCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// The number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Sets the value returned when `query` is read back.
    pub fn set_query_result(&self, query: QueryId, value: u64) {
        self.query_results.lock().unwrap().insert(query, value);
    }

    /// Sets the value returned when `parameter` is read back.
    pub fn set_integer(&self, parameter: IntegerParameter, value: i32) {
        self.integers.lock().unwrap().insert(parameter, value);
    }

    fn push(&self, call: DeviceCall) {
        log::trace!("headless device: {}", call.name());
        self.calls.lock().unwrap().push(call);
    }

    fn next_handle(&self) -> u32 {
        self.next_handle.fetch_add(1, Ordering::Relaxed) + 1
    }
}
