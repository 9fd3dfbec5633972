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

//! The engine services handed to render nodes.

use crate::{
    collaborators::{
        AssetSystem, GlobalIllumination, MaterialLibrary, RendererRegistry, SpatialIndex,
        TransformProvider,
    },
    events::MeshNotification,
    settings::RenderNodeSettings,
};
use strata_core::event::EventBus;

/// Borrowed engine services, passed explicitly to every node operation that
/// reaches outside the node.
///
/// The context is rebuilt by the host for each batch of operations; nodes
/// never keep a reference to it.
pub struct RenderContext<'a> {
    pub renderer: &'a mut dyn RendererRegistry,
    pub assets: &'a mut dyn AssetSystem,
    pub transforms: &'a mut dyn TransformProvider,
    pub spatial: &'a mut dyn SpatialIndex,
    pub gi: &'a mut dyn GlobalIllumination,
    pub materials: &'a dyn MaterialLibrary,
    pub settings: &'a RenderNodeSettings,
    /// Where mesh lifecycle notifications go, if anyone listens.
    pub notifications: Option<&'a EventBus<MeshNotification>>,
}

impl RenderContext<'_> {
    /// Publishes a notification if a bus is attached.
    pub fn notify(&self, notification: MeshNotification) {
        if let Some(bus) = self.notifications {
            bus.publish(notification);
        }
    }
}
