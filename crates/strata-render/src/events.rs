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

//! Messages exchanged between render nodes and the rest of the engine.
//!
//! Asset notifications may be produced on a loader thread. They travel over
//! an [`EventBus`] and are applied on the thread that owns the nodes by
//! [`dispatch_asset_events`].

use crate::{context::RenderContext, geometry::MeshGeometry, render_node::RenderNode};
use strata_core::{
    asset::{AssetHandle, AssetId},
    ecs::EntityId,
    event::EventBus,
};

/// Outcome of an asset load reported by the asset system.
#[derive(Debug, Clone)]
pub enum AssetEvent {
    /// First successful load of `id`.
    Ready {
        id: AssetId,
        geometry: AssetHandle<MeshGeometry>,
    },
    /// The source of `id` changed and was loaded again.
    Reloaded {
        id: AssetId,
        geometry: AssetHandle<MeshGeometry>,
    },
    /// Loading `id` failed.
    Error { id: AssetId, reason: String },
}

impl AssetEvent {
    /// The asset the event is about.
    pub fn asset_id(&self) -> AssetId {
        match self {
            AssetEvent::Ready { id, .. }
            | AssetEvent::Reloaded { id, .. }
            | AssetEvent::Error { id, .. } => *id,
        }
    }
}

/// Kind of a [`MeshNotification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshNotificationKind {
    /// Geometry became available on the entity.
    MeshCreated,
    /// Geometry was released.
    MeshDestroyed,
    /// Bounds or shape changed; cached ray intersections are stale.
    GeometryChanged,
}

/// Lifecycle notification about the mesh of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshNotification {
    pub entity: EntityId,
    pub kind: MeshNotificationKind,
}

impl MeshNotification {
    pub const fn new(entity: EntityId, kind: MeshNotificationKind) -> Self {
        Self { entity, kind }
    }
}

/// Applies every queued asset event to every node, in arrival order.
///
/// Each node filters by its own pending or bound asset id. Returns the number
/// of events processed.
pub fn dispatch_asset_events(
    bus: &EventBus<AssetEvent>,
    nodes: &mut [RenderNode],
    ctx: &mut RenderContext<'_>,
) -> usize {
    let events = bus.drain();
    for event in &events {
        log::trace!("Dispatching asset event for {}.", event.asset_id());
        for node in nodes.iter_mut() {
            node.handle_asset_event(ctx, event);
        }
    }
    events.len()
}
