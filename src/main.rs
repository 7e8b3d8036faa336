use avian3d::prelude::*;
use bevy::prelude::*;
use rolling_locomotion::prelude::*;

/// Follow camera for the demo body
#[derive(Component)]
struct FollowCamera {
    offset: Vec3,
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rolling Locomotion".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(LocomotionPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (follow_body, log_messages))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    let offset = Vec3::new(0.0, 6.0, 10.0);
    let camera = commands
        .spawn((
            FollowCamera { offset },
            Camera3d::default(),
            Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground = materials.add(Color::srgb(0.55, 0.62, 0.5));
    let stairs = materials.add(Color::srgb(0.6, 0.5, 0.4));

    let mut solid = |commands: &mut Commands,
                     size: Vec3,
                     transform: Transform,
                     layer: GameLayer,
                     material: &Handle<StandardMaterial>| {
        commands.spawn((
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            CollisionLayers::new(layer, [GameLayer::Player]),
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(material.clone()),
            transform,
        ));
    };

    // Floor
    solid(
        &mut commands,
        Vec3::new(60.0, 1.0, 60.0),
        Transform::from_xyz(0.0, -0.5, 0.0),
        GameLayer::World,
        &ground,
    );

    // Walkable 20 degree ramp
    solid(
        &mut commands,
        Vec3::new(8.0, 0.5, 4.0),
        Transform::from_xyz(8.0, 1.0, 0.0)
            .with_rotation(Quat::from_rotation_z(20.0_f32.to_radians())),
        GameLayer::World,
        &ground,
    );

    // Too steep as ground, fine as stairs
    for step in 0..8 {
        let height = 0.3 * (step + 1) as f32;
        solid(
            &mut commands,
            Vec3::new(0.4, height, 4.0),
            Transform::from_xyz(-6.0 - 0.4 * step as f32, height / 2.0, 0.0),
            GameLayer::Stairs,
            &stairs,
        );
    }

    // V-shaped crevice of two 40 degree walls
    for side in [-1.0_f32, 1.0] {
        solid(
            &mut commands,
            Vec3::new(4.0, 0.5, 6.0),
            Transform::from_xyz(side * 1.6, 1.3, -10.0)
                .with_rotation(Quat::from_rotation_z(side * 40.0_f32.to_radians())),
            GameLayer::World,
            &ground,
        );
    }

    let config = LocomotionConfig::default().with_jump(2.0, 1);
    let body = spawn_locomotion_body(&mut commands, config, Vec3::new(0.0, 2.0, 0.0))?;
    commands.entity(body).insert((
        InputSpace(camera),
        Mesh3d(meshes.add(Sphere::new(rolling_locomotion::controller::BODY_RADIUS))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.3, 0.2))),
    ));

    Ok(())
}

fn follow_body(
    body: Query<&Transform, (With<LocomotionBody>, Without<FollowCamera>)>,
    mut camera: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok(body) = body.single() else {
        return;
    };

    for (mut transform, follow) in &mut camera {
        let target = body.translation;
        *transform =
            Transform::from_translation(target + follow.offset).looking_at(target, Vec3::Y);
    }
}

fn log_messages(mut reader: MessageReader<LocomotionMessage>) {
    for msg in reader.read() {
        info!("{msg:?}");
    }
}
