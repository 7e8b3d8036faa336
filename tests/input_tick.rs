use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use rolling_locomotion::controller::{update_desired_velocity, JumpPressed, MoveInput};
use rolling_locomotion::prelude::*;

fn spawn_body(world: &mut World, axes: Vec2, jump: bool) -> Entity {
    let config = LocomotionConfig::default().with_max_speed(6.0);
    let controller = LocomotionController::new(config).unwrap();
    world
        .spawn((controller, MoveInput(axes), JumpPressed(jump)))
        .id()
}

#[test]
fn input_tick_sets_desired_velocity_and_consumes_press() {
    let mut world = World::new();
    let body = spawn_body(&mut world, Vec2::X, true);

    world.run_system_once(update_desired_velocity).unwrap();

    let controller = world.get::<LocomotionController>(body).unwrap();
    assert!((controller.desired_velocity() - Vec3::new(6.0, 0.0, 0.0)).length() < 1e-5);
    assert!(controller.jump_requested());
    assert!(!world.get::<JumpPressed>(body).unwrap().0);
}

#[test]
fn input_space_entity_turns_input() {
    let mut world = World::new();
    let camera = world
        .spawn(GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_y(
            std::f32::consts::PI,
        ))))
        .id();
    let body = spawn_body(&mut world, Vec2::Y, false);
    world.entity_mut(body).insert(InputSpace(camera));

    world.run_system_once(update_desired_velocity).unwrap();

    // Camera faces +Z, so forward input rolls toward +Z
    let controller = world.get::<LocomotionController>(body).unwrap();
    assert!((controller.desired_velocity() - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-4);
    assert!(!controller.jump_requested());
}

#[test]
fn missing_input_space_falls_back_to_world_axes() {
    let mut world = World::new();
    let body = spawn_body(&mut world, Vec2::Y, false);
    let stale = world.spawn_empty().id();
    world.despawn(stale);
    world.entity_mut(body).insert(InputSpace(stale));

    world.run_system_once(update_desired_velocity).unwrap();

    let controller = world.get::<LocomotionController>(body).unwrap();
    assert!((controller.desired_velocity() - Vec3::new(0.0, 0.0, -6.0)).length() < 1e-5);
}
