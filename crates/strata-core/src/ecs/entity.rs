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

//! Defines the opaque entity id render nodes hold on to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for an entity in the host world.
///
/// The index can be recycled by the host once an entity is despawned; the
/// generation is bumped each time so a stale id never matches the new entity.
/// Render nodes only keep this id for lookups and never own the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    /// Slot index in the host's entity table.
    pub index: u32,
    /// Generation counter of the slot.
    pub generation: u32,
}

impl EntityId {
    /// Creates an id from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
