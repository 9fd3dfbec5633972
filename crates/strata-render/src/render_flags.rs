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

//! Bitmasks handed to the renderer.

use crate::render_options::RenderOptions;

strata_core::strata_bitflags! {
    /// Registration-time flags of a render node.
    ///
    /// Most bits are derived from [`RenderOptions`]; the remaining ones are
    /// auxiliary bits owned by external callers such as editor overlays.
    pub struct RenderFlags: u32 {
        /// Culled when the camera is inside a vis area.
        const OUTDOOR_ONLY = 1 << 0;
        const CAST_SHADOW_MAPS = 1 << 1;
        const RAIN_OCCLUDER = 1 << 2;
        /// Ignored when building the navigation mesh.
        const EXCLUDE_FROM_NAVMESH = 1 << 3;
        /// Used as an occluder by the visibility system.
        const GOOD_OCCLUDER = 1 << 4;
        const NO_DYNAMIC_WATER = 1 << 5;
        const NO_DECALS = 1 << 6;
        const RECEIVE_WIND = 1 << 7;
        /// LOD switches on the bounding box size.
        const LOD_BBOX_BASED = 1 << 8;
        /// Never moves nor deforms.
        const STATIC = 1 << 9;
        const GI_CONTRIBUTOR = 1 << 10;
        const HIDDEN = 1 << 11;
        /// Editor selection overlay.
        const SELECTED = 1 << 16;
        /// Hidden by the editor, independent of the node's own visibility.
        const EDITOR_HIDDEN = 1 << 17;
        /// Drawn with a highlight outline.
        const HIGHLIGHTED = 1 << 18;
    }
}

strata_core::strata_bitflags! {
    /// Per-draw flags attached to a draw call.
    pub struct ObjectFlags: u32 {
        /// The object moved since its previous draw.
        const DYNAMIC_OBJECT = 1 << 0;
        /// The draw blends between two LODs.
        const DISSOLVE = 1 << 1;
        /// Alpha below one.
        const TRANSLUCENT = 1 << 2;
        const SKINNED = 1 << 3;
    }
}

impl RenderFlags {
    /// Writes every option-derived bit onto `self`, leaving other bits as they are.
    pub fn with_options(mut self, options: &RenderOptions, visible: bool) -> Self {
        self.set(RenderFlags::OUTDOOR_ONLY, !options.use_vis_areas());
        self.set(RenderFlags::CAST_SHADOW_MAPS, options.cast_shadows());
        self.set(RenderFlags::RAIN_OCCLUDER, options.rain_occluder());
        self.set(RenderFlags::EXCLUDE_FROM_NAVMESH, !options.affect_navmesh());
        self.set(RenderFlags::GOOD_OCCLUDER, options.visibility_occluder());
        self.set(RenderFlags::NO_DYNAMIC_WATER, !options.affect_dynamic_water());
        self.set(RenderFlags::NO_DECALS, !options.accept_decals());
        self.set(RenderFlags::RECEIVE_WIND, options.receive_wind());
        self.set(RenderFlags::LOD_BBOX_BASED, options.lod_bounding_box_based());
        self.set(RenderFlags::STATIC, options.is_static());
        self.set(
            RenderFlags::GI_CONTRIBUTOR,
            options.affects_global_illumination(),
        );
        self.set(RenderFlags::HIDDEN, !visible);
        self
    }
}

/// Tracks auxiliary render flags set from outside the node.
///
/// `history` is the union of every auxiliary bit ever set. A rebuild clears
/// all of those bits, re-derives the option bits, then layers the current
/// auxiliary bits back on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuxiliaryFlags {
    current: RenderFlags,
    history: RenderFlags,
}

impl AuxiliaryFlags {
    /// Replaces the current auxiliary bits.
    pub fn set(&mut self, flags: RenderFlags) {
        self.current = flags;
        self.history |= flags;
    }

    /// The auxiliary bits currently requested.
    pub fn current(&self) -> RenderFlags {
        self.current
    }

    /// Every auxiliary bit ever requested.
    pub fn history(&self) -> RenderFlags {
        self.history
    }

    /// Recomputes the full mask from the previously registered one.
    pub fn rebuild(
        &self,
        previous: RenderFlags,
        options: &RenderOptions,
        visible: bool,
    ) -> RenderFlags {
        (previous & !self.history).with_options(options, visible) | self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_from_defaults() {
        let options = RenderOptions::default();
        let flags = RenderFlags::EMPTY.with_options(&options, true);

        assert!(flags.contains(RenderFlags::CAST_SHADOW_MAPS | RenderFlags::NO_DYNAMIC_WATER));
        assert!(!flags.intersects(
            RenderFlags::OUTDOOR_ONLY
                | RenderFlags::EXCLUDE_FROM_NAVMESH
                | RenderFlags::NO_DECALS
                | RenderFlags::HIDDEN
                | RenderFlags::STATIC
        ));
    }

    #[test]
    fn derive_inverted_options() {
        let mut options = RenderOptions::default();
        options.set_use_vis_areas(false);
        options.set_affect_navmesh(false);
        options.set_accept_decals(false);
        options.set_affect_dynamic_water(true);
        options.set_has_static_transform(true);

        let flags = RenderFlags::EMPTY.with_options(&options, false);
        assert!(flags.contains(
            RenderFlags::OUTDOOR_ONLY
                | RenderFlags::EXCLUDE_FROM_NAVMESH
                | RenderFlags::NO_DECALS
                | RenderFlags::HIDDEN
                | RenderFlags::STATIC
                | RenderFlags::GI_CONTRIBUTOR
        ));
        assert!(!flags.contains(RenderFlags::NO_DYNAMIC_WATER));
    }

    #[test]
    fn derivation_overwrites_stale_bits() {
        let options = RenderOptions::default();
        let stale = RenderFlags::HIDDEN | RenderFlags::NO_DECALS;
        let flags = stale.with_options(&options, true);
        assert!(!flags.intersects(stale));
    }

    #[test]
    fn auxiliary_bits_are_layered_and_cleared() {
        let options = RenderOptions::default();
        let mut aux = AuxiliaryFlags::default();

        aux.set(RenderFlags::SELECTED | RenderFlags::EDITOR_HIDDEN);
        let flags = aux.rebuild(RenderFlags::EMPTY, &options, true);
        assert!(flags.contains(RenderFlags::SELECTED | RenderFlags::EDITOR_HIDDEN));

        aux.set(RenderFlags::SELECTED);
        let flags = aux.rebuild(flags, &options, true);
        assert!(flags.contains(RenderFlags::SELECTED));
        assert!(!flags.contains(RenderFlags::EDITOR_HIDDEN));
        assert_eq!(
            aux.history(),
            RenderFlags::SELECTED | RenderFlags::EDITOR_HIDDEN
        );
    }

    #[test]
    fn auxiliary_hidden_does_not_mask_derived_hidden() {
        let options = RenderOptions::default();
        let mut aux = AuxiliaryFlags::default();
        aux.set(RenderFlags::HIDDEN);
        aux.set(RenderFlags::EMPTY);

        let flags = aux.rebuild(RenderFlags::HIDDEN, &options, false);
        assert!(flags.contains(RenderFlags::HIDDEN));
        let flags = aux.rebuild(flags, &options, true);
        assert!(!flags.contains(RenderFlags::HIDDEN));
    }
}
