//! Oscillator: периодическое смещение платформ/препятствий
//!
//! Позиция = starting_position + movement × factor, где
//! factor = sin(elapsed / period × TAU) / 2 + 0.5 ∈ [0, 1].
//!
//! - starting_position захватывается один раз при активации
//! - elapsed накапливается каждый тик и никогда не сбрасывается
//! - period ≈ 0 → позиция не меняется (без деления на ноль)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Параметры осцилляции (задаются в layout уровня)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Oscillator {
    /// Полное смещение по каждой оси (factor = 1 → starting_position + movement)
    pub movement: Vec3,
    /// Секунд на полный цикл
    pub period: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            movement: Vec3::splat(10.0),
            period: 2.0,
        }
    }
}

impl Oscillator {
    pub fn new(movement: Vec3, period: f32) -> Self {
        Self { movement, period }
    }

    /// Смещение относительно starting_position для данного elapsed.
    ///
    /// `None` если period вырожденный.
    pub fn offset(&self, elapsed: f32) -> Option<Vec3> {
        oscillation_factor(elapsed, self.period).map(|factor| self.movement * factor)
    }
}

/// Состояние осциллятора (создаётся системой `capture_oscillator_anchors`)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct OscillatorAnchor {
    pub starting_position: Vec3,
    /// Секунды с момента активации
    pub elapsed: f32,
}

impl OscillatorAnchor {
    pub fn new(starting_position: Vec3) -> Self {
        Self {
            starting_position,
            elapsed: 0.0,
        }
    }
}

/// Serde-описание осциллятора для game.toml
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorLayout {
    pub movement: [f32; 3],
    pub period: f32,
}

impl Default for OscillatorLayout {
    fn default() -> Self {
        let oscillator = Oscillator::default();
        Self {
            movement: oscillator.movement.to_array(),
            period: oscillator.period,
        }
    }
}

impl From<OscillatorLayout> for Oscillator {
    fn from(layout: OscillatorLayout) -> Self {
        Oscillator::new(Vec3::from_array(layout.movement), layout.period)
    }
}

/// Нормализованный фактор смещения: 0 — на месте, 1 — полностью смещён.
///
/// `elapsed = 0` → 0.5 (середина хода).
pub fn oscillation_factor(elapsed: f32, period: f32) -> Option<f32> {
    if period <= f32::EPSILON {
        return None;
    }

    let cycles = elapsed / period;
    let raw_sin_wave = (cycles * TAU).sin();

    Some(raw_sin_wave / 2.0 + 0.5)
}

/// Система: захват starting_position для новых осцилляторов
pub fn capture_oscillator_anchors(
    mut commands: Commands,
    query: Query<(Entity, &Transform), (Added<Oscillator>, Without<OscillatorAnchor>)>,
) {
    for (entity, transform) in query.iter() {
        commands
            .entity(entity)
            .insert(OscillatorAnchor::new(transform.translation));
    }
}

/// Система: применить смещение ко всем осцилляторам
///
/// Работает в FixedUpdate, elapsed растёт на fixed delta.
pub fn oscillate(
    mut query: Query<(&Oscillator, &mut OscillatorAnchor, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (oscillator, mut anchor, mut transform) in query.iter_mut() {
        anchor.elapsed += delta;

        if let Some(offset) = oscillator.offset(anchor.elapsed) {
            transform.translation = anchor.starting_position + offset;
        }
    }
}

/// Oscillator Plugin
///
/// Порядок: capture → oscillate (chain, чтобы новый anchor применился в тот же тик).
pub struct OscillatorPlugin;

impl Plugin for OscillatorPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Oscillator>()
            .register_type::<OscillatorAnchor>()
            .add_systems(
                FixedUpdate,
                (capture_oscillator_anchors, oscillate)
                    .chain()
                    .in_set(crate::SimulationSet::Motion),
            );
    }
}
