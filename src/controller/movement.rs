use avian3d::prelude::*;
use bevy::prelude::*;

use super::input::{InputSpace, JumpPressed, MoveInput};
use super::messages::{emit_step_messages, LocomotionMessage};
use super::state::{BodyState, LocomotionController};
use crate::physics::SpatialProbe;

/// Moves `current` toward `target` by at most `max_delta`
#[inline]
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Flattens a direction onto the horizontal plane
#[inline]
fn horizontal(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

impl LocomotionController {
    /// Records the latest player intent. Axes are clamped to unit length so
    /// diagonals are not faster; jump requests stick until a physics step
    /// consumes them.
    ///
    /// Without an input space the horizontal axis maps to +X and the
    /// vertical axis to Bevy's forward (-Z).
    pub fn input_tick(
        &mut self,
        axes: Vec2,
        jump_pressed: bool,
        input_space: Option<&GlobalTransform>,
    ) {
        let axes = axes.clamp_length_max(1.0);
        let (right, forward) = match input_space {
            Some(space) => (
                horizontal(space.right().as_vec3()),
                horizontal(space.forward().as_vec3()),
            ),
            None => (Vec3::X, Vec3::NEG_Z),
        };

        self.desired_velocity = (right * axes.x + forward * axes.y) * self.config.max_speed;
        self.desired_jump |= jump_pressed;
    }

    #[inline]
    fn project_on_contact_plane(&self, vector: Vec3) -> Vec3 {
        vector - self.contact_normal * vector.dot(self.contact_normal)
    }

    /// Accelerates the velocity toward the desired velocity along the world
    /// X and Z axes projected onto the contact plane. Each axis changes by at
    /// most `acceleration * dt`.
    pub fn steer_velocity(&mut self, dt: f32) {
        // Degenerate projections become zero axes and contribute nothing
        let x_axis = self.project_on_contact_plane(Vec3::X).normalize_or_zero();
        let z_axis = self.project_on_contact_plane(Vec3::Z).normalize_or_zero();

        let current_x = self.velocity.dot(x_axis);
        let current_z = self.velocity.dot(z_axis);

        let acceleration = if self.on_ground() {
            self.config.max_acceleration
        } else {
            self.config.max_air_acceleration
        };
        let max_speed_change = acceleration * dt;

        let new_x = move_towards(current_x, self.desired_velocity.x, max_speed_change);
        let new_z = move_towards(current_z, self.desired_velocity.z, max_speed_change);

        self.velocity += x_axis * (new_x - current_x) + z_axis * (new_z - current_z);
    }
}

/// Input tick: turns the latest move input into a desired velocity
pub fn update_desired_velocity(
    mut query: Query<(
        &MoveInput,
        &mut JumpPressed,
        Option<&InputSpace>,
        &mut LocomotionController,
    )>,
    spaces: Query<&GlobalTransform>,
) {
    for (input, mut jump_pressed, input_space, mut controller) in &mut query {
        let space = input_space.and_then(|space| spaces.get(space.0).ok());
        controller.input_tick(input.0, jump_pressed.0, space);
        jump_pressed.0 = false;
    }
}

/// Physics tick: resolves ground state, steers, jumps and writes the new
/// velocity back to the body
pub fn run_physics_tick(
    spatial_query: SpatialQuery,
    mut bodies: Query<(
        Entity,
        &Position,
        &mut LinearVelocity,
        &mut LocomotionController,
    )>,
    layers: Query<&CollisionLayers>,
    gravity: Res<Gravity>,
    time: Res<Time>,
    mut writer: MessageWriter<LocomotionMessage>,
) {
    let dt = time.delta_secs();

    for (entity, position, mut velocity, mut controller) in &mut bodies {
        let classifier = controller.config().surface_classifier();
        let probe = SpatialProbe::new(
            &spatial_query,
            entity,
            controller.config().probe_mask,
            |hit| classifier.classify(layers.get(hit).ok()),
        );

        let body = BodyState {
            position: position.0,
            velocity: velocity.0,
        };
        let report = controller.physics_tick(body, gravity.0, dt, &probe);
        velocity.0 = report.velocity;

        emit_step_messages(entity, &report, body.velocity, &mut writer);
    }
}
