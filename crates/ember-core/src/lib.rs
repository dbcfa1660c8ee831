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

//! # Ember Core
//!
//! Foundational crate containing the render device contract, the resource handles
//! exchanged with it, and the arena allocators the command recording layer is
//! built on.
//!
//! Nothing in this crate records or executes commands; it only defines the
//! vocabulary that `ember-rhi` (recording and replay) and `ember-infra`
//! (concrete devices) agree on.

#![warn(missing_docs)]

pub mod memory;
pub mod renderer;
pub mod utils;

pub use renderer::RenderDevice;
