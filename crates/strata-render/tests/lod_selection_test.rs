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

mod common;

use approx::assert_relative_eq;
use common::{entity, mesh_id, unit_cube_mesh, Harness};
use strata_core::{asset::AssetLoadBehavior, math::Vec3};
use strata_render::{
    FrameLodInfo, LodSelector, LodValue, MeshKind, ObjectFlags, RenderNode, RenderNodeSettings,
    RenderPassInfo,
};

fn ready_node(h: &mut Harness) -> RenderNode {
    let id = mesh_id("objects/tree.mesh");
    let mut node = RenderNode::new(MeshKind::Static, &h.settings);
    node.set_mesh_asset(&mut h.ctx(), Some(id), AssetLoadBehavior::QueueLoad);
    node.attach_to_entity(&mut h.ctx(), Some(entity(1)));
    node.create_mesh(&mut h.ctx());
    node.on_asset_ready(&mut h.ctx(), id, &unit_cube_mesh());
    node
}

#[test]
fn test_lod_never_decreases_with_distance() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);

    let mut previous = 0;
    let mut x = 0.5;
    while x < 120.0 {
        node.render(&mut h.ctx(), &RenderPassInfo::general(Vec3::new(x, 0.0, 0.0)));
        let lod = node.last_lod().map(|value| value.lod).unwrap_or_default();
        assert!(
            lod >= previous,
            "LOD went from {previous} to {lod} at camera x = {x}"
        );
        previous = lod;
        x += 0.25;
    }
    assert_eq!(previous, 3);
}

#[test]
fn test_saturated_dissolve_jumps_to_next_lod() {
    let geometry = unit_cube_mesh();
    let mut selector = LodSelector::new();
    selector.update_lod_distance(&geometry, false, 100, &FrameLodInfo::default());
    let settings = RenderNodeSettings::default();
    let frame = FrameLodInfo::default();

    let fading = selector
        .compute_lod(1, 19.0, true, &geometry, &frame, &settings, 8000.0)
        .unwrap();
    assert_eq!(fading.lod, 1);
    assert_eq!(fading.next_lod, Some(2));
    assert!(fading.dissolve_ratio > 0 && fading.dissolve_ratio < u8::MAX);

    let saturated = selector
        .compute_lod(1, 20.0, true, &geometry, &frame, &settings, 8000.0)
        .unwrap();
    assert_eq!(saturated, LodValue::single(2));
}

#[test]
fn test_dissolve_sets_object_flag() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);

    // LOD 0 leaves at 10m; the fade band is 7.5m wide for an 8km view distance.
    node.render(&mut h.ctx(), &RenderPassInfo::general(Vec3::new(9.0, 0.0, 0.0)));
    let draw = &h.renderer.draws[0];
    assert_eq!(draw.lod.lod, 0);
    assert_eq!(draw.lod.next_lod, Some(1));
    assert!(draw.object_flags.contains(ObjectFlags::DISSOLVE));
}

#[test]
fn test_disabled_dissolve_never_blends() {
    let mut h = Harness::new();
    h.settings.dissolve_enabled = false;
    let mut node = ready_node(&mut h);

    node.render(&mut h.ctx(), &RenderPassInfo::general(Vec3::new(9.0, 0.0, 0.0)));
    assert_eq!(h.renderer.draws[0].lod, LodValue::single(0));
}

#[test]
fn test_shadow_pass_never_blends() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);

    let pass = RenderPassInfo {
        general_pass: false,
        ..RenderPassInfo::general(Vec3::new(9.0, 0.0, 0.0))
    };
    node.render(&mut h.ctx(), &pass);
    assert_eq!(h.renderer.draws[0].lod, LodValue::single(0));
}

#[test]
fn test_zero_ratio_keeps_finest_lod() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);
    node.modify_render_options(&mut h.ctx(), |options| options.set_lod_ratio(0));

    assert!(node
        .lod_selector()
        .lod_distances()
        .iter()
        .all(|distance| distance.is_infinite()));
    node.render(&mut h.ctx(), &RenderPassInfo::general(Vec3::new(5000.0, 0.0, 0.0)));
    assert_eq!(h.renderer.draws[0].lod.lod, 0);
}

#[test]
fn test_frame_target_size_rescales() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);
    assert_relative_eq!(node.lod_selector().scale(), 1.0);

    h.renderer.frame = FrameLodInfo {
        id: 1,
        target_size: 2.0,
        ..FrameLodInfo::default()
    };
    node.render(&mut h.ctx(), &RenderPassInfo::general(Vec3::new(3.0, 0.0, 0.0)));
    assert_relative_eq!(node.lod_selector().scale(), 0.5);
    assert_relative_eq!(node.lod_selector().base_lod_distance(), 10.0);
}

#[test]
fn test_frame_lod_window_clamps_request() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);
    h.renderer.frame = FrameLodInfo {
        id: 2,
        min_lod: 2,
        ..FrameLodInfo::default()
    };

    let pass = RenderPassInfo {
        general_pass: false,
        ..RenderPassInfo::general(Vec3::new(1.0, 0.0, 0.0))
    };
    node.render(&mut h.ctx(), &pass);
    assert_eq!(h.renderer.draws[0].lod, LodValue::single(2));
}

#[test]
fn test_zoom_shrinks_distance() {
    let mut h = Harness::new();
    let mut node = ready_node(&mut h);
    let pass = RenderPassInfo {
        zoom_factor: 0.1,
        general_pass: false,
        ..RenderPassInfo::general(Vec3::new(50.5, 0.0, 0.0))
    };

    node.render(&mut h.ctx(), &pass);
    assert_eq!(h.renderer.draws[0].lod.lod, 0);
}
