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

//! User-facing render options of a mesh node.
//!
//! [`RenderOptions`] is a plain value holder. Every setter compares the new
//! value with the current one and, on a transition, reports which field
//! changed to the registered change callback. The owning node uses that to
//! re-derive its render flags.

use crate::settings::RenderNodeSettings;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Names one field of [`RenderOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderOptionField {
    Opacity,
    MaxViewDistance,
    ViewDistanceMultiplier,
    LodRatio,
    UseVisAreas,
    CastShadows,
    LodBoundingBoxBased,
    RainOccluder,
    AffectNavmesh,
    AffectDynamicWater,
    AcceptDecals,
    ReceiveWind,
    VisibilityOccluder,
    DynamicMesh,
    AffectGlobalIllumination,
    HasStaticTransform,
}

/// Signature of the callback invoked when an option changes.
pub type OptionsChangedFn = dyn Fn(RenderOptionField) + Send + Sync;

/// Holder for the optional change callback.
///
/// Callbacks are not data: they never serialize and never take part in
/// comparisons.
#[derive(Clone, Default)]
pub struct ChangeCallback(Option<Arc<OptionsChangedFn>>);

impl fmt::Debug for ChangeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => write!(f, "ChangeCallback(set)"),
            None => write!(f, "ChangeCallback(none)"),
        }
    }
}

impl PartialEq for ChangeCallback {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Visual and physical options of a mesh render node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    opacity: f32,
    max_view_distance: f32,
    view_distance_multiplier: f32,
    lod_ratio: u32,
    use_vis_areas: bool,
    cast_shadows: bool,
    lod_bounding_box_based: bool,
    rain_occluder: bool,
    affect_navmesh: bool,
    affect_dynamic_water: bool,
    accept_decals: bool,
    receive_wind: bool,
    visibility_occluder: bool,
    dynamic_mesh: bool,
    affect_gi: bool,
    #[serde(skip)]
    has_static_transform: bool,
    #[serde(skip)]
    on_changed: ChangeCallback,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(&RenderNodeSettings::default())
    }
}

macro_rules! option_accessors {
    ($(
        $(#[$doc:meta])*
        $field:ident, $setter:ident: $ty:ty => $variant:ident;
    )*) => {
        impl RenderOptions {
            $(
                #[doc = concat!("Current `", stringify!($field), "` value.")]
                #[inline]
                pub fn $field(&self) -> $ty {
                    self.$field
                }

                $(#[$doc])*
                pub fn $setter(&mut self, value: $ty) {
                    if self.$field != value {
                        self.$field = value;
                        self.notify(RenderOptionField::$variant);
                    }
                }
            )*
        }
    };
}

option_accessors! {
    /// Sets the opacity. Values outside `[0, 1]` are kept as given.
    opacity, set_opacity: f32 => Opacity;
    /// Sets the maximum view distance, in meters.
    max_view_distance, set_max_view_distance: f32 => MaxViewDistance;
    /// Sets the multiplier applied to the maximum view distance.
    view_distance_multiplier, set_view_distance_multiplier: f32 => ViewDistanceMultiplier;
    /// Sets the LOD ratio, a percentage. `0` disables distance-based switching.
    lod_ratio, set_lod_ratio: u32 => LodRatio;
    /// Sets whether the node is culled by vis areas.
    use_vis_areas, set_use_vis_areas: bool => UseVisAreas;
    /// Sets shadow casting.
    cast_shadows, set_cast_shadows: bool => CastShadows;
    /// Sets whether LOD switches on the bounding box rather than the mesh metric.
    lod_bounding_box_based, set_lod_bounding_box_based: bool => LodBoundingBoxBased;
    /// Sets whether the node occludes rain.
    rain_occluder, set_rain_occluder: bool => RainOccluder;
    /// Sets whether the node is part of the navigation mesh.
    affect_navmesh, set_affect_navmesh: bool => AffectNavmesh;
    affect_dynamic_water, set_affect_dynamic_water: bool => AffectDynamicWater;
    accept_decals, set_accept_decals: bool => AcceptDecals;
    /// Sets whether the node is bent by wind. Windy nodes are never static.
    receive_wind, set_receive_wind: bool => ReceiveWind;
    visibility_occluder, set_visibility_occluder: bool => VisibilityOccluder;
    /// Marks the mesh as deformed at runtime. Dynamic meshes are never static.
    dynamic_mesh, set_dynamic_mesh: bool => DynamicMesh;
    /// Sets the user request to contribute to global illumination.
    affect_gi, set_affect_gi: bool => AffectGlobalIllumination;
    /// Records whether the owning entity's transform is static.
    ///
    /// Derived from the entity, never user-set and never persisted.
    has_static_transform, set_has_static_transform: bool => HasStaticTransform;
}

impl RenderOptions {
    /// Creates options with the engine-wide default view distance.
    pub fn new(settings: &RenderNodeSettings) -> Self {
        Self {
            opacity: 1.0,
            max_view_distance: settings.default_max_view_distance,
            view_distance_multiplier: 1.0,
            lod_ratio: 100,
            use_vis_areas: true,
            cast_shadows: true,
            lod_bounding_box_based: false,
            rain_occluder: false,
            affect_navmesh: true,
            affect_dynamic_water: false,
            accept_decals: true,
            receive_wind: false,
            visibility_occluder: false,
            dynamic_mesh: false,
            affect_gi: true,
            has_static_transform: false,
            on_changed: ChangeCallback::default(),
        }
    }

    /// Installs the callback notified on every field transition.
    pub fn set_change_callback(
        &mut self,
        callback: impl Fn(RenderOptionField) + Send + Sync + 'static,
    ) {
        self.on_changed = ChangeCallback(Some(Arc::new(callback)));
    }

    /// Removes the change callback.
    pub fn clear_change_callback(&mut self) {
        self.on_changed = ChangeCallback::default();
    }

    /// The node never moves, never deforms and is not animated by wind.
    pub fn is_static(&self) -> bool {
        self.has_static_transform && !self.dynamic_mesh && !self.receive_wind
    }

    /// The node is static and asked to contribute to global illumination.
    pub fn affects_global_illumination(&self) -> bool {
        self.affect_gi && self.is_static()
    }

    /// `lod_ratio` as a factor, `100` being `1.0`.
    pub fn normalized_lod_ratio(&self) -> f32 {
        self.lod_ratio as f32 / 100.0
    }

    /// View distance once the multiplier is applied.
    pub fn effective_max_view_distance(&self) -> f32 {
        self.max_view_distance * self.view_distance_multiplier
    }

    /// Copies every user-set value of `other`, notifying each transition.
    ///
    /// `has_static_transform` and the callback are left untouched.
    pub fn assign_from(&mut self, other: &RenderOptions) {
        self.set_opacity(other.opacity);
        self.set_max_view_distance(other.max_view_distance);
        self.set_view_distance_multiplier(other.view_distance_multiplier);
        self.set_lod_ratio(other.lod_ratio);
        self.set_use_vis_areas(other.use_vis_areas);
        self.set_cast_shadows(other.cast_shadows);
        self.set_lod_bounding_box_based(other.lod_bounding_box_based);
        self.set_rain_occluder(other.rain_occluder);
        self.set_affect_navmesh(other.affect_navmesh);
        self.set_affect_dynamic_water(other.affect_dynamic_water);
        self.set_accept_decals(other.accept_decals);
        self.set_receive_wind(other.receive_wind);
        self.set_visibility_occluder(other.visibility_occluder);
        self.set_dynamic_mesh(other.dynamic_mesh);
        self.set_affect_gi(other.affect_gi);
    }

    fn notify(&self, field: RenderOptionField) {
        log::trace!("Render option {:?} changed.", field);
        if let Some(callback) = &self.on_changed.0 {
            callback(field);
        }
    }
}
