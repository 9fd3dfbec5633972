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

//! # Strata Render
//!
//! Mesh render nodes: the per-entity objects that make a loaded mesh asset
//! visible, LOD-correct and correctly flagged in a 3D scene.
//!
//! A [`RenderNode`] is driven by its host through a [`RenderContext`], which
//! lends it the renderer registry, the asset system, the transform provider
//! and the other engine services it talks to. Asset loads finish
//! asynchronously and come back as [`AssetEvent`]s.

pub mod asset_binding;
pub mod bounding_volume;
pub mod collaborators;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod frame_lod;
pub mod geometry;
pub mod lod_selector;
pub mod render_flags;
pub mod render_node;
pub mod render_options;
pub mod settings;

pub use asset_binding::{AssetBinding, BindingEvent, BindingState};
pub use bounding_volume::BoundingVolume;
pub use collaborators::{
    AssetSystem, DrawCall, GlobalIllumination, MaterialLibrary, RenderPassInfo, Renderable,
    RendererRegistry, SpatialIndex, TransformProvider,
};
pub use config::MeshRenderConfig;
pub use context::RenderContext;
pub use error::ConfigError;
pub use events::{dispatch_asset_events, AssetEvent, MeshNotification, MeshNotificationKind};
pub use frame_lod::{FrameLodInfo, MeshLodInfo, MAX_LOD_COUNT};
pub use geometry::{Material, MeshGeometry, MeshKind, MeshLod};
pub use lod_selector::{LodSelector, LodValue};
pub use render_flags::{AuxiliaryFlags, ObjectFlags, RenderFlags};
pub use render_node::{NodeState, RenderNode, RenderNodeId};
pub use render_options::{RenderOptionField, RenderOptions};
pub use settings::RenderNodeSettings;
