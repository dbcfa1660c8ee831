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

//! Construction-time configuration of command lists.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default packet arena budget of the main command lists.
pub const DEFAULT_PACKET_ARENA_BYTES: usize = 32 * 1024 * 1024;
/// Default parameter arena budget of the main command lists.
pub const DEFAULT_PARAMETER_ARENA_BYTES: usize = 16 * 1024 * 1024;
/// Default packet arena budget of the hook list.
pub const DEFAULT_HOOK_PACKET_ARENA_BYTES: usize = 4 * 1024 * 1024;
/// Default parameter arena budget of the hook list.
pub const DEFAULT_HOOK_PARAMETER_ARENA_BYTES: usize = 2 * 1024 * 1024;

/// An error raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for the expected schema.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration parsed but describes an unusable setup.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration of a single [`RenderCommandList`](crate::RenderCommandList).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandListConfig {
    /// Name used in logs and fatal error messages.
    pub debug_name: String,
    /// Size in bytes of the packet arena. Each recorded operation takes one
    /// fixed-size packet slot out of this budget.
    pub packet_arena_bytes: usize,
    /// Size in bytes of the arena holding slice arguments and single-frame memory.
    pub parameter_arena_bytes: usize,
}

impl CommandListConfig {
    /// Creates a configuration with the default budgets and the given name.
    pub fn named(debug_name: impl Into<String>) -> Self {
        Self {
            debug_name: debug_name.into(),
            ..Self::default()
        }
    }

    /// Creates the default configuration of a hook list.
    pub fn hook(debug_name: impl Into<String>) -> Self {
        Self {
            debug_name: debug_name.into(),
            packet_arena_bytes: DEFAULT_HOOK_PACKET_ARENA_BYTES,
            parameter_arena_bytes: DEFAULT_HOOK_PARAMETER_ARENA_BYTES,
        }
    }

    /// Overrides both arena budgets.
    pub fn with_arena_bytes(mut self, packet_arena_bytes: usize, parameter_arena_bytes: usize) -> Self {
        self.packet_arena_bytes = packet_arena_bytes;
        self.parameter_arena_bytes = parameter_arena_bytes;
        self
    }

    /// Checks that the configuration can back a working command list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debug_name.is_empty() {
            return Err(ConfigError::Invalid("command list debug_name is empty".into()));
        }
        if self.packet_arena_bytes == 0 {
            return Err(ConfigError::Invalid(format!(
                "command list '{}' has an empty packet arena",
                self.debug_name
            )));
        }
        Ok(())
    }
}

impl Default for CommandListConfig {
    fn default() -> Self {
        Self {
            debug_name: "command_list".to_string(),
            packet_arena_bytes: DEFAULT_PACKET_ARENA_BYTES,
            parameter_arena_bytes: DEFAULT_PARAMETER_ARENA_BYTES,
        }
    }
}

/// Fields of one list present in a [`RenderContextsConfig`] document.
#[derive(Debug, Default, Deserialize)]
struct CommandListOverrides {
    debug_name: Option<String>,
    packet_arena_bytes: Option<usize>,
    parameter_arena_bytes: Option<usize>,
}

impl CommandListOverrides {
    fn apply(self, base: CommandListConfig) -> CommandListConfig {
        CommandListConfig {
            debug_name: self.debug_name.unwrap_or(base.debug_name),
            packet_arena_bytes: self.packet_arena_bytes.unwrap_or(base.packet_arena_bytes),
            parameter_arena_bytes: self
                .parameter_arena_bytes
                .unwrap_or(base.parameter_arena_bytes),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenderContextsOverrides {
    early: CommandListOverrides,
    immediate: CommandListOverrides,
    deferred: CommandListOverrides,
    hook: CommandListOverrides,
}

impl From<RenderContextsOverrides> for RenderContextsConfig {
    fn from(overrides: RenderContextsOverrides) -> Self {
        let defaults = Self::default();
        Self {
            early: overrides.early.apply(defaults.early),
            immediate: overrides.immediate.apply(defaults.immediate),
            deferred: overrides.deferred.apply(defaults.deferred),
            hook: overrides.hook.apply(defaults.hook),
        }
    }
}

/// Configuration of the lists owned by [`RenderContexts`](crate::RenderContexts).
///
/// When deserialized, every missing field takes the default of the list it belongs
/// to, so `{ "hook": { "packet_arena_bytes": 1024 } }` keeps the hook list's name
/// and parameter budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RenderContextsOverrides")]
pub struct RenderContextsConfig {
    /// Commands flushed at the start of a frame, before any rendering.
    pub early: CommandListConfig,
    /// The render thread's own list.
    pub immediate: CommandListConfig,
    /// Work enqueued from other threads, flushed after the frame.
    pub deferred: CommandListConfig,
    /// The secondary list shared by `immediate` and `deferred` for hooks.
    pub hook: CommandListConfig,
}

impl Default for RenderContextsConfig {
    fn default() -> Self {
        Self {
            early: CommandListConfig::named("early"),
            immediate: CommandListConfig::named("immediate"),
            deferred: CommandListConfig::named("deferred"),
            hook: CommandListConfig::hook("hook"),
        }
    }
}

impl RenderContextsConfig {
    /// Loads a configuration from a JSON string. Missing fields take the default
    /// values of their list.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Saves the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validates every list configuration and checks that debug names are unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = [&self.early, &self.immediate, &self.deferred, &self.hook];
        for (i, list) in lists.iter().enumerate() {
            list.validate()?;
            if lists[..i].iter().any(|other| other.debug_name == list.debug_name) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate command list name '{}'",
                    list.debug_name
                )));
            }
        }
        Ok(())
    }
}
