//! Тесты детерминизма
//!
//! Одинаковый скрипт input'а даёт идентичные результаты
//! (manual time strategy, без Rapier).

use bevy::prelude::*;
use lost_in_space_simulation::*;

/// Скрипт: (тик начала, input)
const SCRIPT: &[(usize, FlightInput)] = &[
    (
        0,
        FlightInput {
            thrust: true,
            rotate_left: false,
            rotate_right: false,
        },
    ),
    (
        40,
        FlightInput {
            thrust: true,
            rotate_left: true,
            rotate_right: false,
        },
    ),
    (
        90,
        FlightInput {
            thrust: false,
            rotate_left: false,
            rotate_right: true,
        },
    ),
];

/// Snapshot всех ракет и осцилляторов (сортировка по Entity index)
fn world_snapshot(world: &mut World) -> Vec<String> {
    let mut rockets = world.query_filtered::<(Entity, &Transform, &FlightState), With<Rocket>>();
    let mut entries: Vec<_> = rockets
        .iter(world)
        .map(|(entity, transform, state)| {
            (entity.index(), format!("{:?} {:?}", transform, state))
        })
        .collect();

    let mut oscillators = world.query::<(Entity, &Transform, &OscillatorAnchor)>();
    entries.extend(
        oscillators
            .iter(world)
            .map(|(entity, transform, anchor)| {
                (entity.index(), format!("{:?} {:?}", transform, anchor))
            }),
    );

    entries.sort_by_key(|(index, _)| *index);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

fn run_scripted(tick_count: usize) -> Vec<String> {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin::new(GameConfig {
        levels: vec![LevelLayout::second()],
        ..default()
    }));
    app.update();

    for tick in 0..tick_count {
        if let Some((_, input)) = SCRIPT.iter().rev().find(|(start, _)| *start <= tick) {
            let world = app.world_mut();
            let mut inputs = world.query::<&mut FlightInput>();
            for mut flight_input in inputs.iter_mut(world) {
                *flight_input = *input;
            }
        }

        app.update();
    }

    world_snapshot(app.world_mut())
}

#[test]
fn test_determinism_same_script() {
    const TICKS: usize = 240;

    let snapshot1 = run_scripted(TICKS);
    let snapshot2 = run_scripted(TICKS);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Одинаковый input скрипт дал разные результаты!"
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const TICKS: usize = 120;

    let snapshots: Vec<_> = (0..3).map(|_| run_scripted(TICKS)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}
