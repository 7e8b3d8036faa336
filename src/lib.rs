pub mod controller;
pub mod physics;

pub use controller::ControllerPlugin;
pub use physics::PhysicsPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics and the locomotion controller.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<ControllerPlugin>() {
            app.add_plugins(ControllerPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::controller::{
        spawn_locomotion_body, BodyState, ConfigError, ControllerPlugin, Grounding, InputSpace,
        JumpKind, LocomotionBody, LocomotionConfig, LocomotionController, LocomotionError,
        LocomotionMessage, PendingConfig, StepReport,
    };
    pub use crate::physics::{
        GameLayer, GroundProbe, PhysicsPlugin, ProbeHit, SurfaceClass, SurfaceClassifier,
    };
    pub use crate::LocomotionPlugin;
}
