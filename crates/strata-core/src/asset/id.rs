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

use super::uuid::AssetUUID;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric tag naming the kind of data an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetTypeId(pub u32);

/// A typed reference to an asset: its stable id plus the kind of data expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId {
    /// The stable id of the asset.
    pub uuid: AssetUUID,
    /// The kind of data the asset is expected to contain.
    pub asset_type: AssetTypeId,
}

impl AssetId {
    /// Creates a new typed asset reference.
    pub const fn new(uuid: AssetUUID, asset_type: AssetTypeId) -> Self {
        Self { uuid, asset_type }
    }

    /// An id with a nil uuid. Never resolves to anything.
    pub const fn invalid(asset_type: AssetTypeId) -> Self {
        Self::new(AssetUUID::NIL, asset_type)
    }

    /// An id is valid when its uuid is not nil.
    pub fn is_valid(&self) -> bool {
        !self.uuid.is_nil()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.asset_type.0, self.uuid)
    }
}
