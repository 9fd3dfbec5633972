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

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A globally unique, persistent identifier for a logical asset.
///
/// The id names the asset independently of where its data lives, so assets
/// can move on disk without breaking references held by scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetUUID(Uuid);

impl AssetUUID {
    /// The nil id, used as "no asset".
    pub const NIL: Self = Self(Uuid::nil());

    /// Creates a new, random (version 4) `AssetUUID`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic (version 5) id from a source path.
    pub fn new_v5(path: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, path.as_bytes()))
    }

    /// Returns `true` for [`AssetUUID::NIL`].
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for AssetUUID {
    /// Creates a new, random (version 4) `AssetUUID`.
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetUUID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v5_is_deterministic() {
        assert_eq!(
            AssetUUID::new_v5("objects/crate.cgf"),
            AssetUUID::new_v5("objects/crate.cgf")
        );
        assert_ne!(
            AssetUUID::new_v5("objects/crate.cgf"),
            AssetUUID::new_v5("objects/barrel.cgf")
        );
    }

    #[test]
    fn nil_is_nil() {
        assert!(AssetUUID::NIL.is_nil());
        assert!(!AssetUUID::new().is_nil());
    }
}
