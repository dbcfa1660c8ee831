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

//! Provides the backend-agnostic rendering contracts of the Ember engine.
//!
//! This module defines the "common language" spoken between code that records
//! render commands and the device that eventually executes them: resource handles,
//! state enums, flag masks, and the [`RenderDevice`] trait. The list of device
//! operations lives in a single table ([`render_command_table!`]) from which the
//! device trait, the recorded packet types and the headless device are generated.
//!
//! [`render_command_table!`]: crate::render_command_table

pub mod api;
pub mod commands;
pub mod traits;

pub use self::api::*;
pub use self::traits::RenderDevice;
