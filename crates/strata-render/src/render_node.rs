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

//! The mesh render node: composition root of the subsystem.
//!
//! A [`RenderNode`] ties one entity to one mesh asset. It owns the render
//! options, the asset binding, the bounds and the LOD selector, and keeps the
//! renderer registry, the spatial index and the GI voxelizer in sync with
//! them. Every operation that reaches outside the node takes a
//! [`RenderContext`].

use crate::{
    asset_binding::{AssetBinding, BindingEvent, BindingState},
    bounding_volume::BoundingVolume,
    collaborators::{DrawCall, RenderPassInfo, Renderable},
    config::MeshRenderConfig,
    context::RenderContext,
    events::{AssetEvent, MeshNotification, MeshNotificationKind},
    geometry::{Material, MeshGeometry, MeshKind},
    lod_selector::{LodSelector, LodValue},
    render_flags::{AuxiliaryFlags, ObjectFlags, RenderFlags},
    render_options::RenderOptions,
    settings::RenderNodeSettings,
};
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};
use strata_core::{
    asset::{AssetHandle, AssetId, AssetLoadBehavior},
    ecs::EntityId,
    math::{Aabb, AffineTransform},
};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique key of a render node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderNodeId(u64);

impl RenderNodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RenderNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenderNode#{}", self.0)
    }
}

/// Lifecycle stage of a node, derived from its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Not attached to an entity.
    Detached,
    /// Attached, no mesh requested.
    AttachedNoMesh,
    /// Attached, waiting for the asset.
    MeshLoading,
    /// Geometry bound and known to the renderer.
    Registered,
    /// Geometry bound but not in the renderer's table.
    Unregistered,
}

/// A mesh drawn on behalf of one entity.
#[derive(Debug)]
pub struct RenderNode {
    id: RenderNodeId,
    entity: Option<EntityId>,
    mesh_asset: Option<AssetId>,
    load_behavior: AssetLoadBehavior,
    material_override_path: Option<String>,
    material_override: Option<AssetHandle<Material>>,
    options: RenderOptions,
    options_dirty: Arc<AtomicBool>,
    binding: AssetBinding,
    bounds: BoundingVolume,
    lod: LodSelector,
    visible: bool,
    registered: bool,
    render_flags: RenderFlags,
    auxiliary: AuxiliaryFlags,
    object_moved: bool,
    in_gi: bool,
    last_lod: Option<LodValue>,
}

impl RenderNode {
    /// Creates an inert node: no entity, no asset.
    pub fn new(kind: MeshKind, settings: &RenderNodeSettings) -> Self {
        let options_dirty = Arc::new(AtomicBool::new(false));
        let mut options = RenderOptions::new(settings);
        let dirty = options_dirty.clone();
        options.set_change_callback(move |_| dirty.store(true, Ordering::Relaxed));

        let node = Self {
            id: RenderNodeId::next(),
            entity: None,
            mesh_asset: None,
            load_behavior: AssetLoadBehavior::default(),
            material_override_path: None,
            material_override: None,
            options,
            options_dirty,
            binding: AssetBinding::new(kind),
            bounds: BoundingVolume::new(),
            lod: LodSelector::new(),
            visible: true,
            registered: false,
            render_flags: RenderFlags::EMPTY,
            auxiliary: AuxiliaryFlags::default(),
            object_moved: false,
            in_gi: false,
            last_lod: None,
        };
        log::debug!("Created {} ({:?}).", node.id, kind);
        node
    }

    /// Creates an inert node from a saved configuration.
    pub fn from_config(config: &MeshRenderConfig, settings: &RenderNodeSettings) -> Self {
        let mut node = Self::new(config.kind, settings);
        node.mesh_asset = config.mesh_asset;
        node.load_behavior = config.load_behavior;
        node.material_override_path = config.material_override.clone();
        node.visible = config.visible;
        node.options.assign_from(&config.render_options);
        node.options_dirty.store(false, Ordering::Relaxed);
        node
    }

    /// The configuration to persist for this node.
    pub fn config(&self) -> MeshRenderConfig {
        let mut render_options = self.options.clone();
        render_options.clear_change_callback();
        MeshRenderConfig {
            mesh_asset: self.mesh_asset,
            load_behavior: self.load_behavior,
            material_override: self.material_override_path.clone(),
            visible: self.visible,
            kind: self.binding.kind(),
            render_options,
        }
    }

    pub fn id(&self) -> RenderNodeId {
        self.id
    }

    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub fn kind(&self) -> MeshKind {
        self.binding.kind()
    }

    pub fn mesh_asset(&self) -> Option<AssetId> {
        self.mesh_asset
    }

    pub fn material_override_path(&self) -> Option<&str> {
        self.material_override_path.as_deref()
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn binding(&self) -> &AssetBinding {
        &self.binding
    }

    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    pub fn lod_selector(&self) -> &LodSelector {
        &self.lod
    }

    /// Bound geometry, if ready.
    pub fn geometry(&self) -> Option<&AssetHandle<MeshGeometry>> {
        self.binding.geometry()
    }

    pub fn world_transform(&self) -> AffineTransform {
        self.bounds.transform()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Whether the node currently feeds the GI voxelizer.
    pub fn contributes_to_gi(&self) -> bool {
        self.in_gi
    }

    pub fn auxiliary_render_flags(&self) -> RenderFlags {
        self.auxiliary.current()
    }

    /// LOD picked by the last draw.
    pub fn last_lod(&self) -> Option<LodValue> {
        self.last_lod
    }

    pub fn state(&self) -> NodeState {
        if self.entity.is_none() {
            return NodeState::Detached;
        }
        match self.binding.state() {
            BindingState::Unbound => NodeState::AttachedNoMesh,
            BindingState::Loading => NodeState::MeshLoading,
            BindingState::Ready if self.registered => NodeState::Registered,
            BindingState::Ready => NodeState::Unregistered,
        }
    }

    /// Attaches the node to `entity`, or detaches it with `None`.
    ///
    /// Detaching destroys the mesh. Attaching subscribes to the entity's
    /// transform, pulls its current value and refreshes the entity's bounds
    /// union in the spatial index.
    pub fn attach_to_entity(&mut self, ctx: &mut RenderContext<'_>, entity: Option<EntityId>) {
        let Some(entity) = entity else {
            self.destroy_mesh(ctx);
            if let Some(previous) = self.entity.take() {
                ctx.transforms.unsubscribe(previous, self.id);
                log::debug!("{} detached from entity {}.", self.id, previous);
            }
            return;
        };

        if let Some(previous) = self.entity {
            self.release_external(ctx);
            ctx.transforms.unsubscribe(previous, self.id);
        }

        self.entity = Some(entity);
        ctx.transforms.subscribe(entity, self.id);

        let transform = ctx.transforms.world_transform(entity).unwrap_or_else(|| {
            log::debug!("Entity {} has no transform; using identity.", entity);
            AffineTransform::IDENTITY
        });
        self.options
            .set_has_static_transform(ctx.transforms.is_static(entity));
        self.bounds.recompute_world(transform);
        ctx.spatial.refresh_bounds_union(entity);
        log::debug!("{} attached to entity {}.", self.id, entity);

        if self.binding.geometry().is_some() {
            self.register_with_renderer(ctx);
            self.update_gi(ctx);
        }
    }

    /// Changes the mesh asset. A live mesh is destroyed and the new one requested.
    pub fn set_mesh_asset(
        &mut self,
        ctx: &mut RenderContext<'_>,
        asset: Option<AssetId>,
        behavior: AssetLoadBehavior,
    ) {
        if self.mesh_asset == asset && self.load_behavior == behavior {
            return;
        }
        let had_mesh = self.binding.state() != BindingState::Unbound;
        self.destroy_mesh(ctx);
        self.mesh_asset = asset;
        self.load_behavior = behavior;
        if had_mesh {
            self.create_mesh(ctx);
        }
    }

    /// Starts loading the configured asset. No-op if a mesh is already bound.
    pub fn create_mesh(&mut self, ctx: &mut RenderContext<'_>) {
        if self.binding.state() != BindingState::Unbound {
            return;
        }
        let Some(asset) = self.mesh_asset.filter(AssetId::is_valid) else {
            log::warn!(
                "{} on entity {}: no valid mesh asset configured.",
                self.id,
                self.entity_label()
            );
            return;
        };

        self.binding.bind(asset, self.load_behavior);
        ctx.assets.request_load(asset, self.load_behavior);
    }

    /// Unregisters, releases the geometry and reports the destruction.
    pub fn destroy_mesh(&mut self, ctx: &mut RenderContext<'_>) {
        self.release_external(ctx);
        let event = self.binding.unbind();
        self.bounds.reset();
        self.material_override = None;
        self.last_lod = None;

        if event == Some(BindingEvent::MeshDestroyed) {
            if let Some(entity) = self.entity {
                ctx.spatial.refresh_bounds_union(entity);
                ctx.notify(MeshNotification::new(
                    entity,
                    MeshNotificationKind::MeshDestroyed,
                ));
            }
        }
    }

    /// Applies a new world transform.
    pub fn on_transform_changed(&mut self, ctx: &mut RenderContext<'_>, world: AffineTransform) {
        if !world.is_valid() {
            log::warn!(
                "{} on entity {}: ignoring non-finite world transform.",
                self.id,
                self.entity_label()
            );
            return;
        }

        self.bounds.recompute_world(world);
        self.object_moved = true;
        if self.registered {
            ctx.renderer.update_bounds(self.id, self.bounds.world());
        }
        if self.in_gi {
            self.update_gi(ctx);
        }
    }

    /// First load of the bound asset completed.
    pub fn on_asset_ready(
        &mut self,
        ctx: &mut RenderContext<'_>,
        id: AssetId,
        geometry: &AssetHandle<MeshGeometry>,
    ) {
        if self.binding.on_asset_ready(id, geometry).is_some() {
            self.on_geometry_bound(ctx);
        }
    }

    /// The bound asset was loaded again after its source changed.
    pub fn on_asset_reloaded(
        &mut self,
        ctx: &mut RenderContext<'_>,
        id: AssetId,
        geometry: &AssetHandle<MeshGeometry>,
    ) {
        if self.binding.reload(id, geometry).is_some() {
            self.on_geometry_bound(ctx);
        }
    }

    /// Loading the bound asset failed. The binding keeps waiting.
    pub fn on_asset_error(&self, id: AssetId, reason: &str) {
        if self.binding.state() == BindingState::Loading && self.binding.asset_id() == Some(id) {
            log::warn!(
                "Failed to load mesh asset {} for entity {}: {}",
                id,
                self.entity_label(),
                reason
            );
        }
    }

    /// Routes one asset event to the matching handler.
    pub fn handle_asset_event(&mut self, ctx: &mut RenderContext<'_>, event: &AssetEvent) {
        match event {
            AssetEvent::Ready { id, geometry } => self.on_asset_ready(ctx, *id, geometry),
            AssetEvent::Reloaded { id, geometry } => self.on_asset_reloaded(ctx, *id, geometry),
            AssetEvent::Error { id, reason } => self.on_asset_error(*id, reason),
        }
    }

    /// Shows or hides the node.
    pub fn set_visible(&mut self, ctx: &mut RenderContext<'_>, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.refresh_registration(ctx);
    }

    /// Changes the material override and resolves it if geometry is bound.
    pub fn set_material_override(&mut self, ctx: &mut RenderContext<'_>, path: Option<String>) {
        if self.material_override_path == path {
            return;
        }
        self.material_override_path = path;
        if self.binding.geometry().is_some() {
            self.resolve_material(ctx);
            self.refresh_registration(ctx);
            self.update_gi(ctx);
        }
    }

    /// Edits the render options and refreshes everything derived from them.
    pub fn modify_render_options(
        &mut self,
        ctx: &mut RenderContext<'_>,
        edit: impl FnOnce(&mut RenderOptions),
    ) {
        self.options_dirty.store(false, Ordering::Relaxed);
        let bounds_based = self.options.lod_bounding_box_based();
        edit(&mut self.options);
        if !self.options_dirty.swap(false, Ordering::Relaxed) {
            return;
        }

        let frame = ctx.renderer.frame_lod_info();
        match self.binding.geometry() {
            Some(geometry) if bounds_based != self.options.lod_bounding_box_based() => {
                self.lod.update_lod_distance(
                    geometry,
                    self.options.lod_bounding_box_based(),
                    self.options.lod_ratio(),
                    &frame,
                );
            }
            _ => {
                self.lod.sync(self.options.lod_ratio(), &frame);
            }
        }
        self.refresh_registration(ctx);
        self.update_gi(ctx);
    }

    /// Sets the externally owned render flags and re-derives the full mask.
    pub fn set_auxiliary_render_flags(&mut self, ctx: &mut RenderContext<'_>, flags: RenderFlags) {
        self.auxiliary.set(flags);
        self.refresh_registration(ctx);
    }

    /// Per-frame draw. Does nothing without geometry or resident LODs.
    pub fn render(&mut self, ctx: &mut RenderContext<'_>, pass: &RenderPassInfo) {
        let (Some(entity), Some(geometry)) = (self.entity, self.binding.geometry()) else {
            return;
        };

        let frame = ctx.renderer.frame_lod_info();
        self.lod.sync(self.options.lod_ratio(), &frame);

        let distance = pass.entity_distance(&self.bounds.world());
        let requested = self.lod.lod_for_distance(distance);
        let Some(lod) = self.lod.compute_lod(
            requested,
            distance,
            pass.general_pass,
            geometry,
            &frame,
            ctx.settings,
            self.options.effective_max_view_distance(),
        ) else {
            log::trace!("{}: no resident LOD, skipping draw.", self.id);
            return;
        };

        let alpha = self.options.opacity();
        let mut object_flags = ObjectFlags::EMPTY;
        object_flags.set(ObjectFlags::DYNAMIC_OBJECT, self.object_moved);
        object_flags.set(
            ObjectFlags::DISSOLVE,
            lod.next_lod.is_some() && lod.dissolve_ratio > 0,
        );
        object_flags.set(ObjectFlags::TRANSLUCENT, alpha < 1.0);
        object_flags.set(ObjectFlags::SKINNED, self.binding.kind() == MeshKind::Skinned);

        let draw = DrawCall {
            node: self.id,
            entity,
            geometry: geometry.clone(),
            material: self.material(),
            lod,
            alpha,
            render_flags: self.render_flags,
            object_flags,
            world_transform: self.bounds.transform(),
        };
        log::trace!("{} draws LOD {:?}.", self.id, lod);
        ctx.renderer.submit(draw);

        self.object_moved = false;
        self.last_lod = Some(lod);
    }

    fn on_geometry_bound(&mut self, ctx: &mut RenderContext<'_>) {
        let Some(geometry) = self.binding.geometry().cloned() else {
            return;
        };

        self.resolve_material(ctx);
        self.bounds.recompute_local(geometry.local_aabb);
        let frame = ctx.renderer.frame_lod_info();
        self.lod.update_lod_distance(
            &geometry,
            self.options.lod_bounding_box_based(),
            self.options.lod_ratio(),
            &frame,
        );

        let Some(entity) = self.entity else {
            log::debug!("{}: geometry ready before attachment.", self.id);
            return;
        };

        if self.registered {
            self.refresh_registration(ctx);
        } else {
            self.register_with_renderer(ctx);
        }
        self.update_gi(ctx);
        ctx.spatial.refresh_bounds_union(entity);
        ctx.notify(MeshNotification::new(entity, MeshNotificationKind::MeshCreated));
        ctx.notify(MeshNotification::new(
            entity,
            MeshNotificationKind::GeometryChanged,
        ));
    }

    fn resolve_material(&mut self, ctx: &RenderContext<'_>) {
        self.material_override = None;
        let Some(path) = self.material_override_path.as_deref() else {
            return;
        };

        match ctx.materials.load(path) {
            Some(material) => {
                if AssetHandle::ptr_eq(&material, &ctx.materials.default_material()) {
                    log::warn!(
                        "Material '{}' on entity {} resolved to the default material; check the path.",
                        path,
                        self.entity_label()
                    );
                }
                self.material_override = Some(material);
            }
            None => {
                log::warn!(
                    "Material '{}' on entity {} could not be loaded; using the mesh material.",
                    path,
                    self.entity_label()
                );
            }
        }
    }

    fn apply_render_options(&mut self) {
        self.render_flags = self
            .auxiliary
            .rebuild(self.render_flags, &self.options, self.visible);
    }

    fn register_with_renderer(&mut self, ctx: &mut RenderContext<'_>) {
        if self.registered || self.entity.is_none() || self.binding.geometry().is_none() {
            return;
        }
        self.apply_render_options();
        ctx.renderer.register(&*self);
        self.registered = true;
        log::debug!("{} registered ({:?}).", self.id, self.render_flags);
    }

    fn unregister_with_renderer(&mut self, ctx: &mut RenderContext<'_>) {
        if !self.registered {
            return;
        }
        ctx.renderer.unregister(self.id);
        self.registered = false;
        log::debug!("{} unregistered.", self.id);
    }

    /// Re-derives the flags; a registered node is removed and added again so
    /// the renderer reads them afresh.
    fn refresh_registration(&mut self, ctx: &mut RenderContext<'_>) {
        if self.registered {
            self.unregister_with_renderer(ctx);
            self.register_with_renderer(ctx);
        } else {
            self.apply_render_options();
        }
    }

    fn release_external(&mut self, ctx: &mut RenderContext<'_>) {
        self.unregister_with_renderer(ctx);
        if self.in_gi {
            if let Some(entity) = self.entity {
                ctx.gi.remove(entity);
            }
            self.in_gi = false;
        }
    }

    fn update_gi(&mut self, ctx: &mut RenderContext<'_>) {
        let contributes = self.registered
            && self.options.affects_global_illumination()
            && self.binding.kind() == MeshKind::Static;

        let (Some(entity), Some(geometry), true) =
            (self.entity, self.binding.geometry(), contributes)
        else {
            if self.in_gi {
                if let Some(entity) = self.entity {
                    ctx.gi.remove(entity);
                }
                self.in_gi = false;
            }
            return;
        };

        let transform = self.bounds.transform();
        debug_assert!(
            transform.has_uniform_scale(),
            "GI contribution requires a uniformly scaled transform"
        );
        if !transform.has_uniform_scale() {
            log::warn!(
                "Entity {} contributes to GI with a non-uniform scale.",
                entity
            );
        }

        let material = self.material_override.as_ref().or(geometry.material.as_ref());
        ctx.gi
            .upsert(entity, &transform, &self.bounds.world(), geometry, material);
        self.in_gi = true;
    }

    fn entity_label(&self) -> String {
        self.entity
            .map(|e| e.to_string())
            .unwrap_or_else(|| "<detached>".to_string())
    }
}

impl Renderable for RenderNode {
    fn node_id(&self) -> RenderNodeId {
        self.id
    }

    fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds.world()
    }

    fn local_bounds(&self) -> Aabb {
        self.bounds.local()
    }

    fn material(&self) -> Option<AssetHandle<Material>> {
        self.material_override
            .clone()
            .or_else(|| self.binding.geometry().and_then(|g| g.material.clone()))
    }

    fn render_flags(&self) -> RenderFlags {
        self.render_flags
    }

    fn max_view_distance(&self) -> f32 {
        self.options.effective_max_view_distance()
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, pass: &RenderPassInfo) {
        RenderNode::render(self, ctx, pass);
    }
}
