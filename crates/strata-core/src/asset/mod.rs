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

//! Primitive asset types shared by every asset consumer.
//!
//! This module only names and references assets; it knows nothing about how
//! they are loaded or streamed. Loading is the job of an asset system that
//! lives outside this crate and reports back through events.

mod handle;
mod id;
mod uuid;

pub use handle::*;
pub use id::*;
pub use uuid::*;

use serde::{Deserialize, Serialize};

/// A marker trait for types that can be managed by the asset system.
///
/// `Send + Sync + 'static` lets a loaded asset be produced on a loader thread
/// and handed over to the thread that owns its consumers.
///
/// # Examples
///
/// ```
/// use strata_core::asset::Asset;
///
/// struct Texture;
/// impl Asset for Texture {}
/// ```
pub trait Asset: Send + Sync + 'static {}

/// How eagerly the asset system should fetch an asset once it is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssetLoadBehavior {
    /// Load as soon as the owning object is created.
    PreLoad,
    /// Queue the load when the asset is first requested.
    #[default]
    QueueLoad,
    /// Never load automatically; the owner triggers loads itself.
    NoLoad,
}
