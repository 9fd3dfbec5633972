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

//! Binding between a node and its mesh asset.
//!
//! The binding is a small state machine:
//!
//! ```text
//! Unbound -> Loading -> Ready -> (reload -> Ready)* -> Unbound
//! ```
//!
//! Geometry is held only in the `Ready` state. Ready notifications are
//! matched against the pending id, so a load that completes after the node
//! moved on to another asset (or let go of its asset) is ignored.

use crate::geometry::{MeshGeometry, MeshKind};
use strata_core::asset::{AssetHandle, AssetId, AssetLoadBehavior};

/// Observable state of an [`AssetBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Loading,
    Ready,
}

/// What a binding transition means for the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingEvent {
    /// Geometry became available.
    MeshCreated,
    /// Geometry was released.
    MeshDestroyed,
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Unbound,
    Loading {
        id: AssetId,
        behavior: AssetLoadBehavior,
    },
    Ready {
        id: AssetId,
        behavior: AssetLoadBehavior,
        geometry: AssetHandle<MeshGeometry>,
    },
}

/// Reference from a node to a mesh asset and, once loaded, its geometry.
#[derive(Debug)]
pub struct AssetBinding {
    slot: Slot,
    kind: MeshKind,
}

impl AssetBinding {
    /// Creates an unbound binding for meshes of the given kind.
    pub fn new(kind: MeshKind) -> Self {
        Self {
            slot: Slot::Unbound,
            kind,
        }
    }

    pub fn state(&self) -> BindingState {
        match self.slot {
            Slot::Unbound => BindingState::Unbound,
            Slot::Loading { .. } => BindingState::Loading,
            Slot::Ready { .. } => BindingState::Ready,
        }
    }

    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    /// The bound or pending asset id.
    pub fn asset_id(&self) -> Option<AssetId> {
        match &self.slot {
            Slot::Unbound => None,
            Slot::Loading { id, .. } | Slot::Ready { id, .. } => Some(*id),
        }
    }

    pub fn load_behavior(&self) -> Option<AssetLoadBehavior> {
        match &self.slot {
            Slot::Unbound => None,
            Slot::Loading { behavior, .. } | Slot::Ready { behavior, .. } => Some(*behavior),
        }
    }

    /// The geometry, present only while `Ready`.
    pub fn geometry(&self) -> Option<&AssetHandle<MeshGeometry>> {
        match &self.slot {
            Slot::Ready { geometry, .. } => Some(geometry),
            _ => None,
        }
    }

    /// Starts loading `id`.
    ///
    /// An invalid id leaves the binding untouched. Binding the id that is
    /// already pending or ready is a no-op; binding another id releases the
    /// current one first, which is reported through the returned event.
    pub fn bind(&mut self, id: AssetId, behavior: AssetLoadBehavior) -> Option<BindingEvent> {
        if !id.is_valid() {
            log::warn!("Ignoring bind to invalid asset id {}.", id);
            return None;
        }
        if self.asset_id() == Some(id) {
            return None;
        }

        let released = self.unbind();
        log::debug!("Binding asset {} ({:?}).", id, behavior);
        self.slot = Slot::Loading { id, behavior };
        released
    }

    /// Accepts loaded geometry if `id` is the pending one.
    pub fn on_asset_ready(
        &mut self,
        id: AssetId,
        geometry: &AssetHandle<MeshGeometry>,
    ) -> Option<BindingEvent> {
        let behavior = match &self.slot {
            Slot::Loading {
                id: pending,
                behavior,
            } if *pending == id => *behavior,
            _ => {
                log::trace!("Ignoring ready notification for asset {}.", id);
                return None;
            }
        };

        log::debug!("Asset {} ready.", id);
        self.slot = Slot::Ready {
            id,
            behavior,
            geometry: self.instantiate(geometry),
        };
        Some(BindingEvent::MeshCreated)
    }

    /// Swaps in new geometry for the bound asset.
    ///
    /// Accepted while `Ready`, or while `Loading` the same id (the reload
    /// then doubles as the first load). The swap is a single replacement of
    /// the slot, so the binding is never observed without geometry.
    pub fn reload(
        &mut self,
        id: AssetId,
        geometry: &AssetHandle<MeshGeometry>,
    ) -> Option<BindingEvent> {
        if self.asset_id() != Some(id) {
            log::trace!("Ignoring reload of asset {}.", id);
            return None;
        }
        if self.state() == BindingState::Loading {
            return self.on_asset_ready(id, geometry);
        }

        log::debug!("Asset {} reloaded.", id);
        let behavior = self.load_behavior().unwrap_or_default();
        self.slot = Slot::Ready {
            id,
            behavior,
            geometry: self.instantiate(geometry),
        };
        Some(BindingEvent::MeshCreated)
    }

    /// Releases everything. Reports `MeshDestroyed` only when geometry was held.
    pub fn unbind(&mut self) -> Option<BindingEvent> {
        match std::mem::take(&mut self.slot) {
            Slot::Unbound => None,
            Slot::Loading { id, .. } => {
                log::debug!("Cancelled pending load of asset {}.", id);
                None
            }
            Slot::Ready { id, .. } => {
                log::debug!("Released asset {}.", id);
                Some(BindingEvent::MeshDestroyed)
            }
        }
    }

    /// Whether bound geometry must be a private copy.
    pub fn requires_unique_instance(&self, geometry: &MeshGeometry) -> bool {
        geometry.has_deformable_data || self.kind == MeshKind::Skinned
    }

    fn instantiate(&self, geometry: &AssetHandle<MeshGeometry>) -> AssetHandle<MeshGeometry> {
        if self.requires_unique_instance(geometry) {
            geometry.deep_clone()
        } else {
            geometry.clone()
        }
    }
}
