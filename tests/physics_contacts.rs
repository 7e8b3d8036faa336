use std::time::Duration;

use avian3d::prelude::*;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rolling_locomotion::controller::{accumulate_contacts, MoveInput, BODY_RADIUS};
use rolling_locomotion::prelude::*;

const SLOPE_DEGREES: f32 = 40.0;

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        bevy::scene::ScenePlugin,
        bevy::input::InputPlugin,
    ))
    .init_asset::<Mesh>()
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 64.0)))
    .add_plugins(LocomotionPlugin);

    app.finish();
    app.cleanup();
    app
}

/// Static slab whose top face passes through the origin, tilted about Z.
fn spawn_slab(app: &mut App, degrees: f32, layer: GameLayer) -> Vec3 {
    let rotation = Quat::from_rotation_z(degrees.to_radians());
    let normal = rotation * Vec3::Y;
    app.world_mut().spawn((
        RigidBody::Static,
        Collider::cuboid(20.0, 1.0, 6.0),
        CollisionLayers::new(layer, [GameLayer::Player]),
        Transform::from_translation(-normal * 0.5).with_rotation(rotation),
    ));
    normal
}

/// Body resting on the slab, sunk in slightly so it touches from the first step.
fn spawn_body_on(app: &mut App, normal: Vec3) -> Entity {
    let world = app.world_mut();
    let mut commands = world.commands();
    let body = spawn_locomotion_body(
        &mut commands,
        LocomotionConfig::default(),
        normal * (BODY_RADIUS - 0.01),
    )
    .unwrap();
    world.flush();
    body
}

fn run_updates(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

/// Feeds the contacts from the latest physics step into the controllers and
/// returns the body's controller before the next physics tick clears it.
fn accumulated(app: &mut App, body: Entity) -> LocomotionController {
    app.world_mut().run_system_once(accumulate_contacts).unwrap();
    app.world().get::<LocomotionController>(body).unwrap().clone()
}

#[test]
fn flat_floor_contact_points_toward_body() {
    let mut app = headless_app();
    let normal = spawn_slab(&mut app, 0.0, GameLayer::World);
    let body = spawn_body_on(&mut app, normal);

    run_updates(&mut app, 4);

    let controller = accumulated(&mut app, body);
    assert!(controller.on_ground());
    assert!(!controller.on_steep());
    assert!((controller.contact_normal().normalize() - Vec3::Y).length() < 1e-2);
}

#[test]
fn stairs_layer_slope_counts_as_ground() {
    let mut app = headless_app();
    let normal = spawn_slab(&mut app, SLOPE_DEGREES, GameLayer::Stairs);
    let body = spawn_body_on(&mut app, normal);

    run_updates(&mut app, 4);

    let controller = accumulated(&mut app, body);
    assert!(controller.on_ground());
    assert!(!controller.on_steep());
    assert!((controller.contact_normal().normalize() - normal).length() < 1e-2);
}

#[test]
fn world_layer_slope_of_same_angle_is_steep() {
    let mut app = headless_app();
    let normal = spawn_slab(&mut app, SLOPE_DEGREES, GameLayer::World);
    let body = spawn_body_on(&mut app, normal);

    run_updates(&mut app, 4);

    let controller = accumulated(&mut app, body);
    assert!(!controller.on_ground());
    assert!(controller.on_steep());
}

#[test]
fn steered_velocity_is_written_to_the_body() {
    let mut app = headless_app();
    let normal = spawn_slab(&mut app, 0.0, GameLayer::World);
    let body = spawn_body_on(&mut app, normal);
    app.world_mut().get_mut::<MoveInput>(body).unwrap().0 = Vec2::X;

    run_updates(&mut app, 16);

    let world = app.world();
    let controller = world.get::<LocomotionController>(body).unwrap();
    let velocity = world.get::<LinearVelocity>(body).unwrap();

    assert_eq!(controller.steps_since_last_grounded(), 0);
    assert!(controller.velocity().x > 0.0);
    assert!(controller.velocity().x <= controller.config().max_speed);
    // Frictionless floor leaves the steered horizontal velocity untouched
    assert!((velocity.x - controller.velocity().x).abs() < 1e-3);
    assert!(velocity.z.abs() < 1e-3);
}
