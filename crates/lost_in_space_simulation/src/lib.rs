//! Lost in Space Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: ракета, осциллирующие препятствия, уровни.
//!
//! Разделение ответственности:
//! - ECS = game state (FlightState, таймеры, audio/партиклы как состояние)
//! - Rapier = физика тела ракеты и коллизии
//! - Client = рендер, микширование звука, клавиатура

use bevy::prelude::*;
use std::time::Duration;

pub mod config;
pub mod flight;
pub mod level;
pub mod logger;
pub mod oscillator;

pub use config::{load_config, try_load_config, ConfigError, GameConfig};
pub use flight::{
    AudioCommand, ContactOutcome, FlightEnded, FlightInput, FlightPlugin, FlightState,
    ParticleEffect, Rocket, RocketAudio, RocketContact, RocketEffects, SoundClips, SoundCue, Tag,
};
pub use level::{
    spawn_level, spawn_rocket, ActiveLevel, Block, LevelCatalog, LevelEntity, LevelLayout,
    LevelLoadRequested, LevelPlugin, PendingLevelLoad, StartLevel, FIRST_LEVEL, NEXT_LEVEL,
};
pub use oscillator::{Oscillator, OscillatorAnchor, OscillatorPlugin};

/// Частота simulation tick
pub const TICK_HZ: f64 = 60.0;

/// Фазы FixedUpdate (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Keyboard → FlightInput
    Input,
    /// Осцилляторы
    Motion,
    /// Тяга, поворот, коллизии
    Flight,
    /// Отложенные загрузки + teardown/спавн уровня
    Level,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: GameConfig,
    /// `None` → StartLevel по умолчанию (первый уровень)
    pub start_level: Option<StartLevel>,
}

impl SimulationPlugin {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            start_level: None,
        }
    }

    /// Без стартового уровня (мир пустой, entity спавнит вызывающий)
    pub fn empty_world() -> Self {
        Self {
            config: GameConfig::default(),
            start_level: Some(StartLevel(None)),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .insert_resource(self.config.sound)
            .insert_resource(self.config.level_catalog())
            .insert_resource(self.start_level.unwrap_or_default())
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Motion,
                    SimulationSet::Flight,
                    SimulationSet::Level,
                )
                    .chain(),
            )
            .add_plugins((OscillatorPlugin, FlightPlugin, LevelPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: каждый `app.update()` = ровно один fixed tick,
/// результаты не зависят от скорости машины.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(tick_duration()));

    app
}

/// Длительность одного simulation tick
pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}
