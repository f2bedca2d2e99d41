//! Flight компоненты: Rocket, FlightState, FlightInput, Tag

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};
use serde::{Deserialize, Serialize};

use super::audio::RocketAudio;
use super::effects::RocketEffects;

/// Ракета (управляемый игроком корабль)
///
/// Параметры тяги и задержки перехода между уровнями.
/// Автоматически добавляет FlightState, FlightInput, RocketAudio, RocketEffects,
/// а также Transform/ExternalImpulse/Velocity, через которые работают тяга и поворот.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(
    FlightState,
    FlightInput,
    RocketAudio,
    RocketEffects,
    Transform,
    ExternalImpulse,
    Velocity
)]
#[serde(default)]
pub struct Rocket {
    /// Скорость поворота (градусы/сек)
    pub rotation_thrust: f32,
    /// Основная тяга (импульс/сек вдоль local up)
    pub main_thrust: f32,
    /// Задержка перед загрузкой уровня после crash/finish (секунды)
    pub level_load_delay: f32,
}

impl Default for Rocket {
    fn default() -> Self {
        Self {
            rotation_thrust: 100.0,
            main_thrust: 10.0,
            level_load_delay: 2.0,
        }
    }
}

/// Lifecycle ракеты
///
/// Alive → Dying | Transcending, переходы однонаправленные.
/// Dying и Transcending терминальны: input и коллизии игнорируются.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum FlightState {
    #[default]
    Alive,
    /// Разбились, ждём перезагрузки первого уровня
    Dying,
    /// Долетели до Finish, ждём следующего уровня
    Transcending,
}

impl FlightState {
    pub fn is_alive(&self) -> bool {
        matches!(self, FlightState::Alive)
    }

    /// Единственный guard переходов: только из Alive и только в терминальное состояние.
    ///
    /// Возвращает true если переход произошёл.
    pub fn try_transition(&mut self, next: FlightState) -> bool {
        if !self.is_alive() || next.is_alive() {
            return false;
        }

        *self = next;
        true
    }
}

/// Input ракеты на текущий тик
///
/// Для headless тестов — mock input через этот компонент.
/// Для игры — заполняется из ButtonInput<KeyCode> (см. `read_keyboard_input`).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct FlightInput {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl FlightInput {
    /// Знак поворота вокруг local Z: left = +1, right = -1.
    ///
    /// Left проверяется первым, одновременное нажатие = поворот влево.
    pub fn rotation_sign(&self) -> Option<f32> {
        if self.rotate_left {
            Some(1.0)
        } else if self.rotate_right {
            Some(-1.0)
        } else {
            None
        }
    }
}

/// Категория объекта для коллизий с ракетой
///
/// Entity без Tag считается `Other` (смертельно).
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(from = "String", into = "String")]
pub enum Tag {
    /// Стартовая площадка и прочее безопасное
    Friendly,
    /// Посадочная площадка
    Finish,
    /// Всё остальное (название сохраняется для логов)
    Other(String),
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Friendly => "Friendly",
            Tag::Finish => "Finish",
            Tag::Other(name) => name,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        match name {
            "Friendly" => Tag::Friendly,
            "Finish" => Tag::Finish,
            other => Tag::Other(other.to_string()),
        }
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag::from(name.as_str())
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.as_str().to_string()
    }
}
