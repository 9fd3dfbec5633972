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

//! Errors raised by the configuration surfaces of the render-node subsystem.
//!
//! Runtime operations on a render node never fail; they degrade and log.
//! Only loading settings and persisting configurations can return an error.

use thiserror::Error;

/// An error raised while reading or writing a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid RON or does not match the expected shape.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    /// The configuration could not be written out.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<ron::Error> for ConfigError {
    fn from(err: ron::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}
