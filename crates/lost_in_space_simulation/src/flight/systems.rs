//! Per-tick управление ракетой: тяга и поворот
//!
//! Обе системы работают только пока FlightState::Alive.
//! Тяга и поворот независимы (можно тянуть и поворачивать одновременно).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};

use super::audio::{AudioCommand, RocketAudio, SoundClips, SoundCue};
use super::components::{FlightInput, FlightState, Rocket};
use super::effects::{ParticleEffect, RocketEffects};

/// Импульс тяги за тик (world space, вдоль local up ракеты)
pub fn thrust_impulse(transform: &Transform, main_thrust: f32, delta: f32) -> Vec3 {
    *transform.up() * main_thrust * delta
}

/// Угол поворота за тик (радианы, вокруг local Z)
pub fn rotation_step(rotation_thrust: f32, sign: f32, delta: f32) -> f32 {
    (sign * rotation_thrust * delta).to_radians()
}

/// Система: тяга + звук/партиклы двигателя
///
/// - thrust нажат: импульс вдоль local up, engine клип (если источник молчит), engine партиклы
/// - thrust отпущен: stop источника и engine партиклов
pub fn respond_to_thrust_input(
    mut rockets: Query<(
        Entity,
        &Rocket,
        &FlightState,
        &FlightInput,
        &Transform,
        &mut ExternalImpulse,
        &mut RocketAudio,
        &mut RocketEffects,
    )>,
    clips: Res<SoundClips>,
    mut audio_commands: EventWriter<AudioCommand>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, rocket, state, input, transform, mut impulse, mut audio, mut effects) in
        rockets.iter_mut()
    {
        if !state.is_alive() {
            continue;
        }

        if input.thrust {
            impulse.impulse += thrust_impulse(transform, rocket.main_thrust, delta);

            // Не наслаиваем engine клипы друг на друга
            if !audio.is_playing() {
                audio.play_one_shot(SoundCue::MainEngine, clips.length(SoundCue::MainEngine));
                audio_commands.write(AudioCommand::PlayOneShot {
                    source: entity,
                    cue: SoundCue::MainEngine,
                });
            }

            if !effects.is_playing(ParticleEffect::Engine) {
                effects.play(ParticleEffect::Engine);
            }
        } else {
            if audio.is_playing() {
                audio.stop();
                audio_commands.write(AudioCommand::Stop { source: entity });
            }

            if effects.is_playing(ParticleEffect::Engine) {
                effects.stop(ParticleEffect::Engine);
            }
        }
    }
}

/// Система: поворот вокруг local forward (Z)
///
/// Пока игрок поворачивает, ручной контроль важнее физики: угловая
/// скорость от столкновений сбрасывается, после тика Rapier снова
/// управляет вращением.
pub fn respond_to_rotate_input(
    mut rockets: Query<(
        &Rocket,
        &FlightState,
        &FlightInput,
        &mut Transform,
        Option<&mut Velocity>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (rocket, state, input, mut transform, velocity) in rockets.iter_mut() {
        if !state.is_alive() {
            continue;
        }

        let Some(sign) = input.rotation_sign() else {
            continue;
        };

        if let Some(mut velocity) = velocity {
            velocity.angvel = Vec3::ZERO;
        }

        transform.rotate_local_z(rotation_step(rocket.rotation_thrust, sign, delta));
    }
}
