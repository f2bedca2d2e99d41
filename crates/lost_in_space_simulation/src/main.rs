//! Headless симуляция Lost in Space
//!
//! Запускает Bevy App без рендера: Rapier + autopilot, который
//! держит тягу и заваливается вправо. Полезно для проверки
//! flight/level цикла без клиента.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::path::Path;

use lost_in_space_simulation::logger::{log_info, log_warning};
use lost_in_space_simulation::{
    create_headless_app, load_config, ActiveLevel, FlightEnded, FlightInput, FlightState, Rocket,
    SimulationPlugin, SimulationSet,
};

const TICKS: u32 = 1800;

/// Autopilot: 3 секунды тяги, 3 секунды свободного падения, лёгкий крен вправо
fn autopilot(mut rockets: Query<(&mut FlightInput, &FlightState)>, mut tick: Local<u32>) {
    *tick += 1;

    for (mut input, state) in rockets.iter_mut() {
        if !state.is_alive() {
            continue;
        }

        let phase = *tick % 360;
        input.thrust = phase < 180;
        input.rotate_right = phase % 30 < 3;
        input.rotate_left = false;
    }
}

fn report_flight_endings(mut endings: EventReader<FlightEnded>) {
    for ending in endings.read() {
        log_info(&format!(
            "Flight ended: {:?} → {:?}, next level {}",
            ending.rocket, ending.state, ending.next_level
        ));
    }
}

fn main() {
    let mut app = create_headless_app();
    let config = load_config(Path::new("game.toml"));

    app.add_plugins((
        bevy::transform::TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
        SimulationPlugin::new(config),
    ))
    .add_systems(
        FixedUpdate,
        (autopilot.in_set(SimulationSet::Input), report_flight_endings.after(SimulationSet::Flight)),
    );

    log_info(&format!("Starting Lost in Space headless simulation ({} ticks)", TICKS));

    for tick in 0..TICKS {
        app.update();

        if tick % 120 == 0 {
            let world = app.world_mut();
            let level = *world.resource::<ActiveLevel>();
            let mut rockets = world.query_filtered::<(&Transform, &FlightState), With<Rocket>>();

            match rockets.iter(world).next() {
                Some((transform, state)) => log_info(&format!(
                    "Tick {}: level {} (loads: {}), rocket {:?} at {:.2?}",
                    tick, level.index, level.loads, state, transform.translation
                )),
                None => log_warning(&format!("Tick {}: no rocket in level {}", tick, level.index)),
            }
        }
    }

    log_info("Simulation complete!");
}
