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

//! Concrete [`RenderDevice`](ember_core::RenderDevice) implementations.
//!
//! Only the headless device lives here for now: it performs no rendering and
//! records every call it receives, which makes it the backend of choice for tests,
//! benchmarks and servers.

pub mod headless;

pub use headless::{DeviceCall, HeadlessDevice};
