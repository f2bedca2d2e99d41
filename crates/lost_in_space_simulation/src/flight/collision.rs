//! Обработка коллизий ракеты
//!
//! Rapier CollisionEvent::Started → RocketContact → классификация по Tag:
//! - Friendly: ничего
//! - Finish: Transcending, загрузка следующего уровня
//! - всё остальное: Dying, перезагрузка первого уровня
//!
//! Коллизии не в Alive игнорируются (переход ровно один раз).

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use super::audio::{AudioCommand, RocketAudio, SoundClips, SoundCue};
use super::components::{FlightState, Rocket, Tag};
use super::effects::{ParticleEffect, RocketEffects};
use crate::level::{PendingLevelLoad, FIRST_LEVEL, NEXT_LEVEL};

/// Событие: ракета коснулась другого entity
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RocketContact {
    pub rocket: Entity,
    pub other: Entity,
}

/// Событие: ракета перешла в терминальное состояние
///
/// Для UI/статистики, сам переход уже применён.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightEnded {
    pub rocket: Entity,
    pub state: FlightState,
    pub next_level: usize,
}

/// Результат касания
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Ignore,
    Success,
    Crash,
}

impl ContactOutcome {
    /// Любой тег кроме Friendly/Finish (и отсутствие тега) — crash
    pub fn classify(tag: Option<&Tag>) -> Self {
        match tag {
            Some(Tag::Friendly) => ContactOutcome::Ignore,
            Some(Tag::Finish) => ContactOutcome::Success,
            _ => ContactOutcome::Crash,
        }
    }
}

/// Параметры терминальной последовательности
struct TerminalSequence {
    state: FlightState,
    cue: SoundCue,
    effect: ParticleEffect,
    level: usize,
}

impl TerminalSequence {
    fn for_outcome(outcome: ContactOutcome) -> Option<Self> {
        match outcome {
            ContactOutcome::Ignore => None,
            ContactOutcome::Success => Some(Self {
                state: FlightState::Transcending,
                cue: SoundCue::NextLevel,
                effect: ParticleEffect::Success,
                level: NEXT_LEVEL,
            }),
            ContactOutcome::Crash => Some(Self {
                state: FlightState::Dying,
                cue: SoundCue::Crash,
                effect: ParticleEffect::Crash,
                level: FIRST_LEVEL,
            }),
        }
    }
}

/// Система: Rapier CollisionEvent → RocketContact
///
/// Rapier не гарантирует порядок пары, поэтому проверяем обе стороны.
pub fn forward_rapier_collisions(
    mut collisions: EventReader<CollisionEvent>,
    rockets: Query<(), With<Rocket>>,
    mut contacts: EventWriter<RocketContact>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(first, second, _) = collision else {
            continue;
        };

        if rockets.contains(*first) {
            contacts.write(RocketContact {
                rocket: *first,
                other: *second,
            });
        } else if rockets.contains(*second) {
            contacts.write(RocketContact {
                rocket: *second,
                other: *first,
            });
        }
    }
}

/// Система: классификация касаний и запуск success/death последовательности
pub fn handle_rocket_contacts(
    mut commands: Commands,
    mut contacts: EventReader<RocketContact>,
    mut rockets: Query<(
        &Rocket,
        &mut FlightState,
        &mut RocketAudio,
        &mut RocketEffects,
    )>,
    tags: Query<&Tag>,
    clips: Res<SoundClips>,
    mut audio_commands: EventWriter<AudioCommand>,
    mut flight_ended: EventWriter<FlightEnded>,
) {
    for contact in contacts.read() {
        let Ok((rocket, mut state, mut audio, mut effects)) = rockets.get_mut(contact.rocket)
        else {
            crate::logger::log_warning(&format!(
                "RocketContact: entity {:?} is not a rocket",
                contact.rocket
            ));
            continue;
        };

        // Мёртвые/улетающие ракеты коллизии не обрабатывают
        if !state.is_alive() {
            continue;
        }

        let tag = tags.get(contact.other).ok();
        let outcome = ContactOutcome::classify(tag);
        let Some(sequence) = TerminalSequence::for_outcome(outcome) else {
            continue;
        };

        if !state.try_transition(sequence.state) {
            continue;
        }

        effects.stop(ParticleEffect::Engine);
        if audio.stop() {
            audio_commands.write(AudioCommand::Stop {
                source: contact.rocket,
            });
        }

        audio.play_one_shot(sequence.cue, clips.length(sequence.cue));
        audio_commands.write(AudioCommand::PlayOneShot {
            source: contact.rocket,
            cue: sequence.cue,
        });
        effects.play(sequence.effect);

        commands
            .entity(contact.rocket)
            .insert(PendingLevelLoad::new(rocket.level_load_delay, sequence.level));

        flight_ended.write(FlightEnded {
            rocket: contact.rocket,
            state: sequence.state,
            next_level: sequence.level,
        });

        crate::logger::log_info(&format!(
            "Rocket {:?} hit {:?} (tag: {}) → {:?}, level {} in {:.1}s",
            contact.rocket,
            contact.other,
            tag.map(Tag::as_str).unwrap_or("<untagged>"),
            sequence.state,
            sequence.level,
            rocket.level_load_delay
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_tags() {
        assert_eq!(
            ContactOutcome::classify(Some(&Tag::Friendly)),
            ContactOutcome::Ignore
        );
        assert_eq!(
            ContactOutcome::classify(Some(&Tag::Finish)),
            ContactOutcome::Success
        );
    }

    #[test]
    fn test_classify_unknown_is_fatal() {
        assert_eq!(
            ContactOutcome::classify(Some(&Tag::Other("Obstacle".into()))),
            ContactOutcome::Crash
        );
        assert_eq!(ContactOutcome::classify(None), ContactOutcome::Crash);
    }

    #[test]
    fn test_terminal_sequences() {
        assert!(TerminalSequence::for_outcome(ContactOutcome::Ignore).is_none());

        let success = TerminalSequence::for_outcome(ContactOutcome::Success).unwrap();
        assert_eq!(success.state, FlightState::Transcending);
        assert_eq!(success.level, NEXT_LEVEL);
        assert_eq!(success.cue, SoundCue::NextLevel);

        let crash = TerminalSequence::for_outcome(ContactOutcome::Crash).unwrap();
        assert_eq!(crash.state, FlightState::Dying);
        assert_eq!(crash.level, FIRST_LEVEL);
        assert_eq!(crash.effect, ParticleEffect::Crash);
    }
}
