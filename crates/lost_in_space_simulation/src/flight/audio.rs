//! Audio модель ракеты
//!
//! Симуляция не микширует звук. RocketAudio хранит состояние источника
//! (что играет и сколько осталось), каждый play/stop уходит в
//! AudioCommand — клиент проигрывает реальные клипы.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Клипы ракеты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SoundCue {
    MainEngine,
    Crash,
    NextLevel,
}

/// Длительности клипов (секунды)
///
/// Нужны для `is_playing`: one-shot клип "играет" пока не истечёт длительность.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundClips {
    pub main_engine: f32,
    pub crash: f32,
    pub next_level: f32,
}

impl Default for SoundClips {
    fn default() -> Self {
        Self {
            main_engine: 1.0,
            crash: 1.5,
            next_level: 2.0,
        }
    }
}

impl SoundClips {
    pub fn length(&self, cue: SoundCue) -> f32 {
        match cue {
            SoundCue::MainEngine => self.main_engine,
            SoundCue::Crash => self.crash,
            SoundCue::NextLevel => self.next_level,
        }
    }
}

/// Событие: команда audio источнику ракеты
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    PlayOneShot { source: Entity, cue: SoundCue },
    Stop { source: Entity },
}

/// Состояние audio источника ракеты
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RocketAudio {
    /// Последний запущенный клип
    pub cue: Option<SoundCue>,
    /// Секунд до конца самого длинного из играющих клипов
    pub remaining: f32,
}

impl RocketAudio {
    pub fn is_playing(&self) -> bool {
        self.remaining > 0.0
    }

    /// One-shot не прерывает уже играющие клипы
    pub fn play_one_shot(&mut self, cue: SoundCue, length: f32) {
        self.cue = Some(cue);
        self.remaining = self.remaining.max(length);
    }

    /// Возвращает true если что-то играло
    pub fn stop(&mut self) -> bool {
        let was_playing = self.is_playing();
        self.cue = None;
        self.remaining = 0.0;
        was_playing
    }

    pub fn tick(&mut self, delta: f32) {
        if !self.is_playing() {
            return;
        }

        self.remaining = (self.remaining - delta).max(0.0);
        if self.remaining == 0.0 {
            self.cue = None;
        }
    }
}

/// Система: продвинуть таймеры клипов
pub fn tick_rocket_audio(mut query: Query<&mut RocketAudio>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut audio in query.iter_mut() {
        audio.tick(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_plays_for_clip_length() {
        let mut audio = RocketAudio::default();
        assert!(!audio.is_playing());

        audio.play_one_shot(SoundCue::MainEngine, 1.0);
        assert!(audio.is_playing());

        audio.tick(0.6);
        assert!(audio.is_playing());

        audio.tick(0.6);
        assert!(!audio.is_playing());
        assert_eq!(audio.cue, None);
    }

    #[test]
    fn test_stop_reports_previous_state() {
        let mut audio = RocketAudio::default();
        assert!(!audio.stop());

        audio.play_one_shot(SoundCue::Crash, 1.5);
        assert!(audio.stop());
        assert!(!audio.is_playing());
    }

    #[test]
    fn test_one_shot_keeps_longest_clip() {
        let mut audio = RocketAudio::default();
        audio.play_one_shot(SoundCue::NextLevel, 2.0);
        audio.play_one_shot(SoundCue::MainEngine, 0.5);

        audio.tick(1.0);
        assert!(audio.is_playing());
        assert!((audio.remaining - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_lengths() {
        let clips = SoundClips::default();
        assert_eq!(clips.length(SoundCue::MainEngine), 1.0);
        assert_eq!(clips.length(SoundCue::Crash), 1.5);
        assert_eq!(clips.length(SoundCue::NextLevel), 2.0);
    }
}
