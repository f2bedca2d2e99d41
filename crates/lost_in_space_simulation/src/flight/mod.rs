//! Flight Controller: управление ракетой
//!
//! ECS ответственность:
//! - FlightState lifecycle (Alive → Dying | Transcending)
//! - тяга/поворот по FlightInput
//! - классификация коллизий по Tag
//! - audio/партиклы как состояние + AudioCommand события
//!
//! Rapier ответственность:
//! - интеграция импульсов, коллизии (CollisionEvent)

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

pub mod audio;
pub mod collision;
pub mod components;
pub mod effects;
pub mod input;
pub mod systems;

pub use audio::{tick_rocket_audio, AudioCommand, RocketAudio, SoundClips, SoundCue};
pub use collision::{
    forward_rapier_collisions, handle_rocket_contacts, ContactOutcome, FlightEnded, RocketContact,
};
pub use components::{FlightInput, FlightState, Rocket, Tag};
pub use effects::{ParticleEffect, RocketEffects};
pub use input::{read_keyboard_input, FlightKeyBindings};
pub use systems::{respond_to_rotate_input, respond_to_thrust_input};

/// Flight Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. read_keyboard_input — только при наличии ButtonInput<KeyCode>
/// 2. tick_rocket_audio — таймеры клипов
/// 3. respond_to_thrust_input / respond_to_rotate_input
/// 4. forward_rapier_collisions → handle_rocket_contacts
pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        // CollisionEvent регистрирует RapierPhysicsPlugin; add_event идемпотентен,
        // headless сборка без Rapier тоже работает
        app.add_event::<CollisionEvent>()
            .add_event::<RocketContact>()
            .add_event::<FlightEnded>()
            .add_event::<AudioCommand>()
            .init_resource::<SoundClips>()
            .init_resource::<FlightKeyBindings>()
            .register_type::<Rocket>()
            .register_type::<FlightState>()
            .register_type::<FlightInput>()
            .register_type::<Tag>()
            .register_type::<RocketAudio>()
            .register_type::<RocketEffects>();

        app.add_systems(
            FixedUpdate,
            read_keyboard_input
                .run_if(resource_exists::<ButtonInput<KeyCode>>)
                .in_set(crate::SimulationSet::Input),
        );

        app.add_systems(
            FixedUpdate,
            (
                tick_rocket_audio,
                respond_to_thrust_input,
                respond_to_rotate_input,
                forward_rapier_collisions,
                handle_rocket_contacts,
            )
                .chain()
                .in_set(crate::SimulationSet::Flight),
        );
    }
}
