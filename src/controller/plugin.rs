use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use thiserror::Error;

use super::config::{ConfigError, LocomotionConfig};
use super::contact::accumulate_contacts;
use super::input::{
    handle_jump_start, handle_move_end, handle_move_input, JumpAction, JumpPressed, MoveAction,
    MoveInput,
};
use super::messages::LocomotionMessage;
use super::movement::{run_physics_tick, update_desired_velocity};
use super::state::LocomotionController;
use crate::physics::GameLayer;

/// Radius of the spawned sphere collider
pub const BODY_RADIUS: f32 = 0.5;

#[derive(Debug, Error)]
pub enum LocomotionError {
    #[error("invalid locomotion config: {0}")]
    Config(#[from] ConfigError),
    #[error("{0:?}: locomotion controller without a dynamic rigid body")]
    MissingBody(Vec<Entity>),
}

/// Marker component for controlled bodies (also used as input context)
#[derive(Component, Default)]
pub struct LocomotionBody;

/// Replacement tuning, applied on the next physics step
#[derive(Component, Clone, Copy, Debug)]
pub struct PendingConfig(pub LocomotionConfig);

/// Plugin for the contact-driven locomotion controller
pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EnhancedInputPlugin>() {
            app.add_plugins(EnhancedInputPlugin);
        }

        app.add_input_context::<LocomotionBody>();
        app.add_message::<LocomotionMessage>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_jump_start);

        // Input tick runs at frame rate
        app.add_systems(Update, update_desired_velocity);

        // Physics tick: contacts from the last step are complete here
        app.add_systems(
            FixedUpdate,
            (
                check_controlled_bodies,
                apply_pending_configs,
                accumulate_contacts,
                run_physics_tick,
            )
                .chain(),
        );
    }
}

/// A controller without a rigid body to drive is a setup error.
pub fn check_controlled_bodies(
    query: Query<(Entity, Option<&RigidBody>), Added<LocomotionController>>,
) -> bevy::ecs::error::Result {
    let missing: Vec<Entity> = query
        .iter()
        .filter(|(_, body)| *body != Some(&RigidBody::Dynamic))
        .map(|(entity, _)| entity)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LocomotionError::MissingBody(missing).into())
    }
}

/// Applies queued tuning changes, keeping the old tuning when the new one
/// is invalid.
pub fn apply_pending_configs(
    mut commands: Commands,
    mut query: Query<(Entity, &PendingConfig, &mut LocomotionController)>,
) {
    for (entity, pending, mut controller) in &mut query {
        if let Err(err) = controller.set_config(pending.0) {
            warn!("{entity}: rejected locomotion config update: {err}");
        }
        commands.entity(entity).remove::<PendingConfig>();
    }
}

/// Spawns a controlled sphere with all required components
pub fn spawn_locomotion_body(
    commands: &mut Commands,
    config: LocomotionConfig,
    position: Vec3,
) -> Result<Entity, LocomotionError> {
    let controller = LocomotionController::new(config)?;

    let entity = commands
        .spawn((LocomotionBody, controller))
        .insert((
            // Input state
            MoveInput::default(),
            JumpPressed::default(),
        ))
        .insert((
            // Physics - Dynamic body; gravity and collisions stay with Avian
            RigidBody::Dynamic,
            Collider::sphere(BODY_RADIUS),
            CollisionLayers::new(GameLayer::Player, [GameLayer::World, GameLayer::Stairs]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0).with_combine_rule(CoefficientCombine::Min),
            Restitution::new(0.0),
        ))
        .insert((
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(LocomotionBody[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
            ]),
        )
        .id();

    info!("spawned locomotion body {entity} at {position}");
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn pending_config_is_applied_and_removed() {
        let mut world = World::new();
        let controller = LocomotionController::new(LocomotionConfig::default()).unwrap();
        let entity = world
            .spawn((
                controller,
                PendingConfig(LocomotionConfig::default().with_max_speed(4.0)),
            ))
            .id();

        world.run_system_once(apply_pending_configs).unwrap();

        let controller = world.get::<LocomotionController>(entity).unwrap();
        assert_eq!(controller.config().max_speed, 4.0);
        assert!(world.get::<PendingConfig>(entity).is_none());
    }

    #[test]
    fn invalid_pending_config_is_dropped() {
        let mut world = World::new();
        let controller = LocomotionController::new(LocomotionConfig::default()).unwrap();
        let entity = world
            .spawn((
                controller,
                PendingConfig(LocomotionConfig::default().with_max_speed(500.0)),
            ))
            .id();

        world.run_system_once(apply_pending_configs).unwrap();

        let controller = world.get::<LocomotionController>(entity).unwrap();
        assert_eq!(controller.config().max_speed, 10.0);
        assert!(world.get::<PendingConfig>(entity).is_none());
    }

    #[test]
    fn controller_without_body_is_rejected() {
        let mut world = World::new();
        let controller = LocomotionController::new(LocomotionConfig::default()).unwrap();
        world.spawn(controller);

        let output = world.run_system_once::<_, bevy::ecs::error::Result, _>(check_controlled_bodies).unwrap();
        assert!(output.is_err());
    }

    #[test]
    fn every_bodiless_controller_is_reported() {
        let mut world = World::new();
        let controller = LocomotionController::new(LocomotionConfig::default()).unwrap();
        let first = world.spawn(controller.clone()).id();
        let second = world.spawn(controller).id();

        let err = world
            .run_system_once::<_, bevy::ecs::error::Result, _>(check_controlled_bodies)
            .unwrap()
            .unwrap_err();
        match err.downcast_ref::<LocomotionError>() {
            Some(LocomotionError::MissingBody(entities)) => {
                assert_eq!(entities.len(), 2);
                assert!(entities.contains(&first));
                assert!(entities.contains(&second));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
