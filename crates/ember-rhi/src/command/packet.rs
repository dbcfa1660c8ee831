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

//! The packets stored in a command list's packet arena.
//!
//! A [`RenderCommand`] is the "union" of everything a list can record: one variant
//! per device operation (generated from [`render_command_table!`]), the readback
//! commands, and the hook packet. Every packet occupies one slot of the same
//! size, `size_of::<RenderCommand>()`.
//!
//! [`render_command_table!`]: ember_core::render_command_table

use super::params::{ParamRef, ParameterArena};
use super::{ReadbackSlot, RenderCommandList};
use ember_core::renderer::{IntegerParameter, QueryId};
use ember_core::RenderDevice;
use std::fmt;
use std::sync::Arc;

macro_rules! define_device_commands {
    ($( $(#[$meta:meta])* $variant:ident => $method:ident ( $($arg:ident : $ty:ty),* $(; $slice:ident : [$elem:ty])? ); )*) => {
        /// A recorded call to one [`RenderDevice`] operation.
        ///
        /// Plain arguments are stored inline; the slice argument, if any, is stored
        /// in the parameter arena and referenced through a [`ParamRef`].
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum DeviceCommand {
            $(
                $(#[$meta])*
                $variant { $($arg: $ty,)* $($slice: ParamRef<$elem>,)? },
            )*
        }

        impl DeviceCommand {
            /// The name of the device method this command calls.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant { .. } => stringify!($method),)*
                }
            }

            pub(crate) fn execute(&self, device: &dyn RenderDevice, params: &ParameterArena) {
                match *self {
                    $(
                        Self::$variant { $($arg,)* $($slice,)? } => {
                            device.$method($($arg,)* $(params.resolve($slice),)?)
                        }
                    )*
                }
            }
        }

        impl RenderCommandList {
            $(
                $(#[$meta])*
                ///
                /// Recorded into the list; the device is called when the list is
                /// executed.
                #[allow(unused_variables)]
                pub fn $method(&self, $($arg: $ty,)* $($slice: &[$elem])?) {
                    self.record_with(|params| {
                        Ok(RenderCommand::Device(DeviceCommand::$variant {
                            $($arg,)*
                            $($slice: params.store_parameter($slice)?,)?
                        }))
                    });
                }
            )*
        }
    };
}

ember_core::render_command_table!(define_device_commands);

/// A command that reads a value back from the device when executed.
#[derive(Debug, Clone)]
pub enum ReadbackCommand {
    /// Reads the 64-bit result of a query.
    QueryResultU64 {
        /// The query to read.
        query: QueryId,
        /// Where the result is published.
        slot: ReadbackSlot<u64>,
    },
    /// Reads an implementation-defined integer.
    Integer {
        /// The parameter to read.
        parameter: IntegerParameter,
        /// Where the value is published.
        slot: ReadbackSlot<i32>,
    },
}

impl ReadbackCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::QueryResultU64 { .. } => "get_query_result_u64",
            Self::Integer { .. } => "get_integer",
        }
    }

    fn execute(&self, device: &dyn RenderDevice) {
        match self {
            Self::QueryResultU64 { query, slot } => slot.publish(device.get_query_result_u64(*query)),
            Self::Integer { parameter, slot } => slot.publish(device.get_integer(*parameter)),
        }
    }
}

/// The callback stored in a hook packet.
pub type HookCallback = Box<dyn Fn(&RenderCommandList) + Send + Sync>;

/// A packet that hands the hook list to a callback and then flushes it.
pub struct HookCommand {
    pub(crate) callback: HookCallback,
    pub(crate) hook_list: Arc<RenderCommandList>,
}

impl HookCommand {
    fn execute(&self) {
        (self.callback)(&self.hook_list);
        self.hook_list.flush_all_commands();
    }
}

impl fmt::Debug for HookCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookCommand")
            .field("hook_list", &self.hook_list.debug_name())
            .finish_non_exhaustive()
    }
}

/// One recorded packet.
#[derive(Debug)]
pub enum RenderCommand {
    /// A device operation.
    Device(DeviceCommand),
    /// A device readback.
    Readback(ReadbackCommand),
    /// A hook invocation.
    Hook(HookCommand),
}

impl RenderCommand {
    /// A short name for logs and device error callbacks.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Device(command) => command.name(),
            Self::Readback(command) => command.name(),
            Self::Hook(_) => "hook",
        }
    }

    pub(crate) fn execute(&self, device: &dyn RenderDevice, params: &ParameterArena) {
        match self {
            Self::Device(command) => command.execute(device, params),
            Self::Readback(command) => command.execute(device),
            Self::Hook(command) => command.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::renderer::{BufferId, PrimitiveTopology};
    use std::mem;

    #[test]
    fn packets_are_fixed_size() {
        assert!(mem::size_of::<DeviceCommand>() <= mem::size_of::<RenderCommand>());
        assert!(mem::size_of::<RenderCommand>() <= 64, "packet slots should stay compact");
    }

    #[test]
    fn names_match_device_methods() {
        let draw = DeviceCommand::DrawArrays {
            topology: PrimitiveTopology::TriangleList,
            first: 0,
            count: 3,
        };
        assert_eq!(draw.name(), "draw_arrays");
        assert_eq!(DeviceCommand::Finish {}.name(), "finish");

        let mut params = ParameterArena::new(64);
        let upload = DeviceCommand::NamedBufferSubData {
            buffer: BufferId(1),
            offset: 0,
            data: params.store_parameter(&[1u8, 2]).unwrap(),
        };
        assert_eq!(RenderCommand::Device(upload).name(), "named_buffer_sub_data");
    }
}
