use avian3d::prelude::*;
use bevy::prelude::*;

/// Default gravity magnitude in m/s^2
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Plugin that sets up the Avian3D physics engine
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            PhysicsPlugins::default()
                .with_length_unit(1.0), // 1 unit = 1 meter
        );

        // Jump speeds are derived from this, so keep it downward
        app.insert_resource(Gravity(Vec3::NEG_Y * DEFAULT_GRAVITY));
    }
}
