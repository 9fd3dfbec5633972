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

//! Recording stand-ins for the engine services a render node talks to.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use strata_core::{
    asset::{AssetHandle, AssetId, AssetLoadBehavior, AssetUUID},
    ecs::EntityId,
    event::EventBus,
    math::{Aabb, AffineTransform, Vec3},
};
use strata_render::{
    geometry::STATIC_MESH_ASSET_TYPE, AssetSystem, DrawCall, FrameLodInfo, GlobalIllumination,
    Material, MaterialLibrary, MeshGeometry, MeshLod, MeshLodInfo, MeshNotification,
    RenderContext, RenderFlags, RenderNodeId, RenderNodeSettings, Renderable, RendererRegistry,
    SpatialIndex, TransformProvider,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn entity(index: u32) -> EntityId {
    EntityId::new(index, 0)
}

pub fn mesh_id(path: &str) -> AssetId {
    AssetId::new(AssetUUID::new_v5(path), STATIC_MESH_ASSET_TYPE)
}

/// A unit cube centered on the origin with four resident LODs.
pub fn unit_cube_mesh() -> AssetHandle<MeshGeometry> {
    AssetHandle::new(
        MeshGeometry::new(Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5)))
            .with_submesh(MeshLodInfo::new(100.0, 12))
            .with_lods((0..4).map(|_| MeshLod::loaded(12)).collect()),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RendererCall {
    Register(RenderNodeId, RenderFlags),
    Unregister(RenderNodeId),
    UpdateBounds(RenderNodeId, Aabb),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Registration {
    pub flags: RenderFlags,
    pub bounds: Aabb,
    pub max_view_distance: f32,
}

#[derive(Debug, Default)]
pub struct MockRenderer {
    pub registered: HashMap<RenderNodeId, Registration>,
    pub calls: Vec<RendererCall>,
    pub draws: Vec<DrawCall>,
    pub frame: FrameLodInfo,
}

impl RendererRegistry for MockRenderer {
    fn register(&mut self, node: &dyn Renderable) {
        let id = node.node_id();
        self.registered.insert(
            id,
            Registration {
                flags: node.render_flags(),
                bounds: node.bounding_box(),
                max_view_distance: node.max_view_distance(),
            },
        );
        self.calls.push(RendererCall::Register(id, node.render_flags()));
    }

    fn unregister(&mut self, node: RenderNodeId) {
        self.registered.remove(&node);
        self.calls.push(RendererCall::Unregister(node));
    }

    fn update_bounds(&mut self, node: RenderNodeId, world_aabb: Aabb) {
        if let Some(registration) = self.registered.get_mut(&node) {
            registration.bounds = world_aabb;
        }
        self.calls.push(RendererCall::UpdateBounds(node, world_aabb));
    }

    fn frame_lod_info(&self) -> FrameLodInfo {
        self.frame
    }

    fn submit(&mut self, draw: DrawCall) {
        self.draws.push(draw);
    }
}

#[derive(Debug, Default)]
pub struct MockAssets {
    pub requests: Vec<(AssetId, AssetLoadBehavior)>,
}

impl AssetSystem for MockAssets {
    fn request_load(&mut self, id: AssetId, behavior: AssetLoadBehavior) {
        self.requests.push((id, behavior));
    }
}

#[derive(Debug, Default)]
pub struct MockTransforms {
    pub transforms: HashMap<EntityId, AffineTransform>,
    pub statics: HashSet<EntityId>,
    pub subscriptions: HashSet<(EntityId, RenderNodeId)>,
}

impl TransformProvider for MockTransforms {
    fn world_transform(&self, entity: EntityId) -> Option<AffineTransform> {
        self.transforms.get(&entity).copied()
    }

    fn is_static(&self, entity: EntityId) -> bool {
        self.statics.contains(&entity)
    }

    fn subscribe(&mut self, entity: EntityId, node: RenderNodeId) {
        self.subscriptions.insert((entity, node));
    }

    fn unsubscribe(&mut self, entity: EntityId, node: RenderNodeId) {
        self.subscriptions.remove(&(entity, node));
    }
}

#[derive(Debug, Default)]
pub struct MockSpatial {
    pub refreshed: Vec<EntityId>,
}

impl SpatialIndex for MockSpatial {
    fn refresh_bounds_union(&mut self, entity: EntityId) {
        self.refreshed.push(entity);
    }
}

#[derive(Debug, Default)]
pub struct MockGi {
    pub entries: HashMap<EntityId, Aabb>,
    pub upserts: usize,
    pub removals: usize,
}

impl GlobalIllumination for MockGi {
    fn upsert(
        &mut self,
        entity: EntityId,
        _transform: &AffineTransform,
        world_aabb: &Aabb,
        _geometry: &AssetHandle<MeshGeometry>,
        _material: Option<&AssetHandle<Material>>,
    ) {
        self.entries.insert(entity, *world_aabb);
        self.upserts += 1;
    }

    fn remove(&mut self, entity: EntityId) {
        self.entries.remove(&entity);
        self.removals += 1;
    }
}

#[derive(Debug)]
pub struct MockMaterials {
    pub materials: HashMap<String, AssetHandle<Material>>,
    pub default: AssetHandle<Material>,
}

impl Default for MockMaterials {
    fn default() -> Self {
        Self {
            materials: HashMap::new(),
            default: AssetHandle::new(Material::new("engine/default.mtl")),
        }
    }
}

impl MockMaterials {
    pub fn add(&mut self, path: &str) -> AssetHandle<Material> {
        let material = AssetHandle::new(Material::new(path));
        self.materials.insert(path.to_string(), material.clone());
        material
    }

    /// Makes `path` resolve to the default material.
    pub fn alias_default(&mut self, path: &str) {
        self.materials.insert(path.to_string(), self.default.clone());
    }
}

impl MaterialLibrary for MockMaterials {
    fn load(&self, path: &str) -> Option<AssetHandle<Material>> {
        self.materials.get(path).cloned()
    }

    fn default_material(&self) -> AssetHandle<Material> {
        self.default.clone()
    }
}

/// Owns every mock and lends them out as a [`RenderContext`].
#[derive(Default)]
pub struct Harness {
    pub renderer: MockRenderer,
    pub assets: MockAssets,
    pub transforms: MockTransforms,
    pub spatial: MockSpatial,
    pub gi: MockGi,
    pub materials: MockMaterials,
    pub settings: RenderNodeSettings,
    pub notifications: EventBus<MeshNotification>,
}

impl Harness {
    pub fn new() -> Self {
        init_logging();
        Self::default()
    }

    pub fn ctx(&mut self) -> RenderContext<'_> {
        RenderContext {
            renderer: &mut self.renderer,
            assets: &mut self.assets,
            transforms: &mut self.transforms,
            spatial: &mut self.spatial,
            gi: &mut self.gi,
            materials: &self.materials,
            settings: &self.settings,
            notifications: Some(&self.notifications),
        }
    }

    pub fn registration_calls(&self, node: RenderNodeId) -> Vec<RendererCall> {
        self.renderer
            .calls
            .iter()
            .copied()
            .filter(|call| match call {
                RendererCall::Register(id, _)
                | RendererCall::Unregister(id)
                | RendererCall::UpdateBounds(id, _) => *id == node,
            })
            .collect()
    }
}
