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

//! In-memory geometry and material resources referenced by render nodes.

use crate::frame_lod::{MeshLodInfo, MAX_LOD_COUNT};
use serde::{Deserialize, Serialize};
use strata_core::{
    asset::{Asset, AssetHandle, AssetTypeId},
    math::Aabb,
};

/// Asset type of static mesh geometry.
pub const STATIC_MESH_ASSET_TYPE: AssetTypeId = AssetTypeId(0x5354_4d48);
/// Asset type of skinned character geometry.
pub const SKINNED_MESH_ASSET_TYPE: AssetTypeId = AssetTypeId(0x534b_4e44);

/// The flavour of mesh a node renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeshKind {
    /// Rigid geometry, shared between instances when possible.
    #[default]
    Static,
    /// Skinned geometry. Every instance poses its own vertices.
    Skinned,
}

impl MeshKind {
    /// The asset type a node of this kind loads.
    pub fn asset_type(self) -> AssetTypeId {
        match self {
            MeshKind::Static => STATIC_MESH_ASSET_TYPE,
            MeshKind::Skinned => SKINNED_MESH_ASSET_TYPE,
        }
    }
}

/// A surface material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Path the material was loaded from.
    pub path: String,
}

impl Material {
    /// Creates a material named after its source path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Asset for Material {}

/// One level of detail of a geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshLod {
    /// Whether the streaming system made this LOD resident.
    pub loaded: bool,
    /// Triangle count, informative only.
    pub face_count: u32,
}

impl MeshLod {
    /// A resident LOD.
    pub fn loaded(face_count: u32) -> Self {
        Self {
            loaded: true,
            face_count,
        }
    }

    /// A LOD that exists but is not resident.
    pub fn unloaded(face_count: u32) -> Self {
        Self {
            loaded: false,
            face_count,
        }
    }
}

/// Loaded mesh geometry.
///
/// Instances are shared read-only between nodes unless they carry deformable
/// vertex data, in which case each node works on its own copy.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    /// Bounds in the mesh's own space.
    pub local_aabb: Aabb,
    /// Size metric of each sub-mesh.
    pub submeshes: Vec<MeshLodInfo>,
    /// Available LODs, finest first.
    pub lods: Vec<MeshLod>,
    /// Per-vertex cloth or morph data mutated per instance.
    pub has_deformable_data: bool,
    /// Authored material.
    pub material: Option<AssetHandle<Material>>,
}

impl Asset for MeshGeometry {}

impl MeshGeometry {
    /// A single-LOD mesh with the given bounds.
    pub fn new(local_aabb: Aabb) -> Self {
        Self {
            local_aabb,
            submeshes: Vec::new(),
            lods: vec![MeshLod::loaded(0)],
            has_deformable_data: false,
            material: None,
        }
    }

    /// Replaces the LOD list. Extra LODs past the supported count are dropped.
    pub fn with_lods(mut self, mut lods: Vec<MeshLod>) -> Self {
        if lods.len() > MAX_LOD_COUNT {
            log::warn!(
                "Mesh has {} LODs, only the first {} are used.",
                lods.len(),
                MAX_LOD_COUNT
            );
            lods.truncate(MAX_LOD_COUNT);
        }
        self.lods = lods;
        self
    }

    /// Adds a sub-mesh size metric.
    pub fn with_submesh(mut self, info: MeshLodInfo) -> Self {
        self.submeshes.push(info);
        self
    }

    /// Flags the geometry as carrying deformable vertex data.
    pub fn with_deformable_data(mut self, deformable: bool) -> Self {
        self.has_deformable_data = deformable;
        self
    }

    /// Sets the authored material.
    pub fn with_material(mut self, material: AssetHandle<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Number of LODs, resident or not.
    pub fn lod_count(&self) -> usize {
        self.lods.len()
    }

    /// Whether `lod` exists and is resident.
    pub fn is_lod_loaded(&self, lod: usize) -> bool {
        self.lods.get(lod).is_some_and(|l| l.loaded)
    }

    /// Finest resident LOD.
    pub fn min_usable_lod(&self) -> Option<usize> {
        self.lods.iter().position(|l| l.loaded)
    }

    /// The merged size metric of all sub-meshes.
    pub fn lod_info(&self) -> MeshLodInfo {
        MeshLodInfo::merged(&self.submeshes)
    }
}
