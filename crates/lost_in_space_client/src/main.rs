use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use lost_in_space_simulation::{load_config, SimulationPlugin};
use std::path::Path;

mod audio;
mod camera;
mod logging;
mod rendering;

use audio::RocketAudioPlugin;
use camera::{CameraPlugin, FollowCamera};
use rendering::RenderingSyncPlugin;

fn main() {
    // Simulation logger → bevy_log
    logging::install_bevy_logger();

    let config = load_config(Path::new("game.toml"));

    let mut app = App::new();
    app
        // Bevy defaults (rendering, input, audio, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Lost in Space".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics (rocket body, коллизии)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (headless ECS logic), keyboard читается внутри
        .add_plugins(SimulationPlugin::new(config))
        // Simulation → visuals / audio
        .add_plugins((RenderingSyncPlugin, RocketAudioPlugin))
        // Camera follow
        .add_plugins(CameraPlugin)
        .add_systems(Startup, setup_scene);

    #[cfg(feature = "debug-render")]
    app.add_plugins(RapierDebugRenderPlugin::default());

    app.run();
}

/// Lights + камера. Уровень спавнит LevelPlugin.
fn setup_scene(mut commands: Commands) {
    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    commands.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 6.0, 30.0).looking_at(Vec3::new(0.0, 2.0, 0.0), Vec3::Y),
        FollowCamera::default(),
    ));
}
