//! Level flow integration тесты
//!
//! Полный цикл: стартовый уровень → crash/finish → teardown → новый уровень.
//! Плюс осцилляторы внутри загруженного уровня.

use bevy::prelude::*;
use lost_in_space_simulation::*;

const DELAY_TICKS: usize = 120;

/// Helper: App со стартовым уровнем из каталога
fn create_level_app(config: GameConfig) -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin::new(config));

    // Стартовое время + первый tick (Startup запрос → загрузка уровня 0)
    app.update();
    app.update();
    app
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn rockets(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Rocket>>();
    query.iter(world).collect()
}

fn blocks_with_tag(app: &mut App, wanted: &Tag) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &Tag)>();
    query
        .iter(world)
        .filter(|(_, tag)| *tag == wanted)
        .map(|(entity, _)| entity)
        .collect()
}

fn block_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Block>();
    query.iter(world).count()
}

fn only_rocket(app: &mut App) -> Entity {
    let rockets = rockets(app);
    assert_eq!(rockets.len(), 1, "expected exactly one rocket");
    rockets[0]
}

#[test]
fn test_start_level_is_loaded() {
    let mut app = create_level_app(GameConfig::default());

    let active = *app.world().resource::<ActiveLevel>();
    assert_eq!(active.index, FIRST_LEVEL);
    assert_eq!(active.loads, 1);

    only_rocket(&mut app);
    assert_eq!(block_count(&mut app), LevelLayout::first().blocks.len());
    assert_eq!(blocks_with_tag(&mut app, &Tag::Finish).len(), 1);
}

#[test]
fn test_rocket_spawns_at_layout_position() {
    let mut app = create_level_app(GameConfig::default());
    let rocket = only_rocket(&mut app);

    let translation = app.world().get::<Transform>(rocket).unwrap().translation;
    assert_eq!(translation, Vec3::from_array(LevelLayout::first().rocket_spawn));
}

#[test]
fn test_crash_restarts_first_level_with_fresh_rocket() {
    let mut app = create_level_app(GameConfig::default());
    let rocket = only_rocket(&mut app);
    let obstacle = blocks_with_tag(&mut app, &Tag::from("Obstacle"))[0];

    app.world_mut().send_event(RocketContact {
        rocket,
        other: obstacle,
    });
    run_ticks(&mut app, DELAY_TICKS + 10);

    let active = *app.world().resource::<ActiveLevel>();
    assert_eq!(active.index, FIRST_LEVEL);
    assert_eq!(active.loads, 2);

    let new_rocket = only_rocket(&mut app);
    assert_ne!(new_rocket, rocket);
    assert_eq!(
        *app.world().get::<FlightState>(new_rocket).unwrap(),
        FlightState::Alive
    );
    assert!(!app.world().entities().contains(obstacle));
    assert_eq!(block_count(&mut app), LevelLayout::first().blocks.len());
}

#[test]
fn test_finish_advances_to_next_level() {
    let mut app = create_level_app(GameConfig::default());
    let rocket = only_rocket(&mut app);
    let pad = blocks_with_tag(&mut app, &Tag::Finish)[0];

    app.world_mut().send_event(RocketContact { rocket, other: pad });
    run_ticks(&mut app, DELAY_TICKS + 10);

    let active = *app.world().resource::<ActiveLevel>();
    assert_eq!(active.index, NEXT_LEVEL);
    assert_eq!(active.loads, 2);
    assert_eq!(block_count(&mut app), LevelLayout::second().blocks.len());
    only_rocket(&mut app);
}

#[test]
fn test_friendly_pad_keeps_level() {
    let mut app = create_level_app(GameConfig::default());
    let rocket = only_rocket(&mut app);
    let pad = blocks_with_tag(&mut app, &Tag::Friendly)[0];

    app.world_mut().send_event(RocketContact { rocket, other: pad });
    run_ticks(&mut app, DELAY_TICKS + 10);

    assert_eq!(app.world().resource::<ActiveLevel>().loads, 1);
    assert_eq!(only_rocket(&mut app), rocket);
}

#[test]
fn test_missing_level_leaves_world_empty() {
    let config = GameConfig {
        levels: vec![LevelLayout::first()],
        ..default()
    };
    let mut app = create_level_app(config);
    let rocket = only_rocket(&mut app);
    let pad = blocks_with_tag(&mut app, &Tag::Finish)[0];

    app.world_mut().send_event(RocketContact { rocket, other: pad });
    run_ticks(&mut app, DELAY_TICKS + 10);

    let active = *app.world().resource::<ActiveLevel>();
    assert_eq!(active.index, NEXT_LEVEL);
    assert_eq!(active.loads, 2);
    assert!(rockets(&mut app).is_empty());
    assert_eq!(block_count(&mut app), 0);
}

#[test]
fn test_configured_rocket_template_is_used() {
    let config = GameConfig {
        rocket: Rocket {
            main_thrust: 42.0,
            ..default()
        },
        ..default()
    };
    let mut app = create_level_app(config);
    let rocket = only_rocket(&mut app);

    assert_eq!(app.world().get::<Rocket>(rocket).unwrap().main_thrust, 42.0);
}

#[test]
fn test_oscillating_block_moves_in_second_level() {
    let config = GameConfig {
        levels: vec![LevelLayout::second()],
        ..default()
    };
    let mut app = create_level_app(config);

    let world = app.world_mut();
    let mut query = world.query::<(Entity, &Oscillator)>();
    let (block, oscillator) = query
        .iter(world)
        .map(|(entity, oscillator)| (entity, *oscillator))
        .next()
        .expect("second level has an oscillating block");

    // Anchor захвачен в тике спавна+1
    run_ticks(&mut app, 1);
    let anchor = *app.world().get::<OscillatorAnchor>(block).unwrap();

    // Четверть периода спустя — близко к пику
    let quarter_ticks = (oscillator.period * 60.0 / 4.0) as usize;
    let elapsed_before = anchor.elapsed;
    run_ticks(&mut app, quarter_ticks);

    let anchor = *app.world().get::<OscillatorAnchor>(block).unwrap();
    assert!(anchor.elapsed > elapsed_before);

    let translation = app.world().get::<Transform>(block).unwrap().translation;
    let expected = anchor.starting_position + oscillator.offset(anchor.elapsed).unwrap();
    assert!(translation.abs_diff_eq(expected, 1e-4));
    assert_ne!(translation, anchor.starting_position);
}
