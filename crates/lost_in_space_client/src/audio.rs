//! AudioCommand → реальные клипы Bevy audio
//!
//! Каждый one-shot — дочерний entity ракеты с AudioPlayer, деспавнится
//! по окончании клипа. Stop деспавнит все звуки ракеты.

use bevy::prelude::*;
use lost_in_space_simulation::{AudioCommand, SoundCue};

pub struct RocketAudioPlugin;

impl Plugin for RocketAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_rocket_sounds)
            .add_systems(Update, play_audio_commands);
    }
}

#[derive(Resource)]
pub struct RocketSounds {
    pub main_engine: Handle<AudioSource>,
    pub crash: Handle<AudioSource>,
    pub next_level: Handle<AudioSource>,
}

impl RocketSounds {
    fn clip(&self, cue: SoundCue) -> Handle<AudioSource> {
        match cue {
            SoundCue::MainEngine => self.main_engine.clone(),
            SoundCue::Crash => self.crash.clone(),
            SoundCue::NextLevel => self.next_level.clone(),
        }
    }
}

/// Маркер: звук, принадлежащий ракете
#[derive(Component)]
pub struct RocketSound;

fn load_rocket_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(RocketSounds {
        main_engine: asset_server.load("audio/main_engine.ogg"),
        crash: asset_server.load("audio/crash.ogg"),
        next_level: asset_server.load("audio/next_level.ogg"),
    });
}

fn play_audio_commands(
    mut commands: Commands,
    mut audio_commands: EventReader<AudioCommand>,
    sounds: Option<Res<RocketSounds>>,
    children: Query<&Children>,
    playing: Query<(), With<RocketSound>>,
) {
    let Some(sounds) = sounds else {
        audio_commands.clear();
        return;
    };

    for command in audio_commands.read() {
        match *command {
            AudioCommand::PlayOneShot { source, cue } => {
                // Ракета могла быть снесена reload'ом уровня
                let Ok(mut rocket) = commands.get_entity(source) else {
                    continue;
                };

                rocket.with_children(|parent| {
                    parent.spawn((
                        RocketSound,
                        AudioPlayer::new(sounds.clip(cue)),
                        PlaybackSettings::DESPAWN,
                    ));
                });
            }
            AudioCommand::Stop { source } => {
                let Ok(rocket_children) = children.get(source) else {
                    continue;
                };

                let rocket_children: &[Entity] = rocket_children;
                for &child in rocket_children {
                    if playing.contains(child) {
                        commands.entity(child).despawn();
                    }
                }
            }
        }
    }
}
