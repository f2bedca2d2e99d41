//! Keyboard → FlightInput
//!
//! Работает только если в мире есть ButtonInput<KeyCode> (клиент с InputPlugin).
//! Headless тесты пишут FlightInput напрямую.

use bevy::prelude::*;

use super::components::{FlightInput, Rocket};

/// Раскладка управления
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct FlightKeyBindings {
    pub thrust: Vec<KeyCode>,
    pub rotate_left: Vec<KeyCode>,
    pub rotate_right: Vec<KeyCode>,
}

impl Default for FlightKeyBindings {
    fn default() -> Self {
        Self {
            thrust: vec![KeyCode::Space, KeyCode::KeyW],
            rotate_left: vec![KeyCode::KeyA],
            rotate_right: vec![KeyCode::KeyD],
        }
    }
}

impl FlightKeyBindings {
    pub fn read(&self, keyboard: &ButtonInput<KeyCode>) -> FlightInput {
        FlightInput {
            thrust: keyboard.any_pressed(self.thrust.iter().copied()),
            rotate_left: keyboard.any_pressed(self.rotate_left.iter().copied()),
            rotate_right: keyboard.any_pressed(self.rotate_right.iter().copied()),
        }
    }
}

/// Система: опрос клавиатуры раз в тик для всех ракет
pub fn read_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<FlightKeyBindings>,
    mut rockets: Query<&mut FlightInput, With<Rocket>>,
) {
    let input = bindings.read(&keyboard);

    for mut flight_input in rockets.iter_mut() {
        flight_input.set_if_neq(input);
    }
}
