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

//! Interfaces of the engine systems a render node talks to.
//!
//! None of these are implemented here. The host engine provides them through
//! a [`RenderContext`](crate::context::RenderContext) passed to every node
//! operation that needs them.

use crate::{
    context::RenderContext,
    frame_lod::FrameLodInfo,
    geometry::{Material, MeshGeometry},
    lod_selector::LodValue,
    render_flags::{ObjectFlags, RenderFlags},
    render_node::RenderNodeId,
};
use strata_core::{
    asset::{AssetHandle, AssetId, AssetLoadBehavior},
    ecs::EntityId,
    math::{Aabb, AffineTransform, Vec3},
};

/// Camera data of the pass being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPassInfo {
    /// World-space camera position.
    pub camera_position: Vec3,
    /// Multiplier applied to camera distances (narrow fields of view zoom in).
    pub zoom_factor: f32,
    /// `false` for shadow, reflection and other auxiliary passes.
    pub general_pass: bool,
}

impl RenderPassInfo {
    /// A general pass seen from `camera_position` with no zoom.
    pub fn general(camera_position: Vec3) -> Self {
        Self {
            camera_position,
            zoom_factor: 1.0,
            general_pass: true,
        }
    }

    /// Distance used for LOD decisions: from the camera to the box, zoom applied.
    pub fn entity_distance(&self, world_aabb: &Aabb) -> f32 {
        if world_aabb.is_empty() {
            return f32::INFINITY;
        }
        world_aabb.distance_squared_to_point(self.camera_position).sqrt() * self.zoom_factor
    }
}

/// Everything the renderer needs to draw one node this frame.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub node: RenderNodeId,
    pub entity: EntityId,
    pub geometry: AssetHandle<MeshGeometry>,
    pub material: Option<AssetHandle<Material>>,
    pub lod: LodValue,
    pub alpha: f32,
    pub render_flags: RenderFlags,
    pub object_flags: ObjectFlags,
    pub world_transform: AffineTransform,
}

/// The query surface a registered node exposes to the renderer.
pub trait Renderable {
    /// Registry key of the node.
    fn node_id(&self) -> RenderNodeId;

    /// Entity the node is attached to.
    fn entity(&self) -> Option<EntityId>;

    /// World-space bounds.
    fn bounding_box(&self) -> Aabb;

    /// Bounds in the mesh's own space.
    fn local_bounds(&self) -> Aabb;

    /// Material used for drawing: the override if resolved, else the authored one.
    fn material(&self) -> Option<AssetHandle<Material>>;

    /// Registration-time render flags.
    fn render_flags(&self) -> RenderFlags;

    /// View distance past which the node is culled.
    fn max_view_distance(&self) -> f32;

    /// Per-frame draw callback.
    fn render(&mut self, ctx: &mut RenderContext<'_>, pass: &RenderPassInfo);
}

/// Loads assets on behalf of nodes. Results come back as asset events.
pub trait AssetSystem: std::fmt::Debug {
    /// Asks for `id` to be loaded according to `behavior`.
    fn request_load(&mut self, id: AssetId, behavior: AssetLoadBehavior);
}

/// The renderer's table of drawable nodes.
pub trait RendererRegistry: std::fmt::Debug {
    /// Adds a node. Its flags and bounds are read during the call.
    fn register(&mut self, node: &dyn Renderable);

    /// Removes a node.
    fn unregister(&mut self, node: RenderNodeId);

    /// Tells the renderer a registered node moved.
    fn update_bounds(&mut self, node: RenderNodeId, world_aabb: Aabb);

    /// Frame-global LOD parameters.
    fn frame_lod_info(&self) -> FrameLodInfo;

    /// Queues a draw.
    fn submit(&mut self, draw: DrawCall);
}

/// Source of entity transforms and their change notifications.
pub trait TransformProvider: std::fmt::Debug {
    /// Current world transform of `entity`, if it has one.
    fn world_transform(&self, entity: EntityId) -> Option<AffineTransform>;

    /// Whether `entity` is flagged as never moving.
    fn is_static(&self, entity: EntityId) -> bool;

    /// Starts delivering transform changes of `entity` to `node`.
    fn subscribe(&mut self, entity: EntityId, node: RenderNodeId);

    /// Stops delivering transform changes of `entity` to `node`.
    fn unsubscribe(&mut self, entity: EntityId, node: RenderNodeId);
}

/// Spatial index keeping per-entity bounds unions.
pub trait SpatialIndex: std::fmt::Debug {
    /// Recomputes the union of every bound attached to `entity`.
    fn refresh_bounds_union(&mut self, entity: EntityId);
}

/// Global illumination voxelizer.
pub trait GlobalIllumination: std::fmt::Debug {
    /// Inserts or updates the contribution of `entity`.
    fn upsert(
        &mut self,
        entity: EntityId,
        transform: &AffineTransform,
        world_aabb: &Aabb,
        geometry: &AssetHandle<MeshGeometry>,
        material: Option<&AssetHandle<Material>>,
    );

    /// Removes the contribution of `entity`.
    fn remove(&mut self, entity: EntityId);
}

/// Resolves material paths.
pub trait MaterialLibrary: std::fmt::Debug {
    /// Loads the material at `path`.
    fn load(&self, path: &str) -> Option<AssetHandle<Material>>;

    /// The fallback material used when a path does not resolve to real content.
    fn default_material(&self) -> AssetHandle<Material>;
}
