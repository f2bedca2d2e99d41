//! Визуальные эффекты ракеты (состояние частиц)
//!
//! Клиент синхронизирует видимость партиклов по Changed<RocketEffects>.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ParticleEffect {
    Engine,
    Crash,
    Success,
}

impl ParticleEffect {
    pub const ALL: [ParticleEffect; 3] = [
        ParticleEffect::Engine,
        ParticleEffect::Crash,
        ParticleEffect::Success,
    ];
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct RocketEffects {
    pub engine: bool,
    pub crash: bool,
    pub success: bool,
}

impl RocketEffects {
    fn slot(&mut self, effect: ParticleEffect) -> &mut bool {
        match effect {
            ParticleEffect::Engine => &mut self.engine,
            ParticleEffect::Crash => &mut self.crash,
            ParticleEffect::Success => &mut self.success,
        }
    }

    pub fn is_playing(&self, effect: ParticleEffect) -> bool {
        match effect {
            ParticleEffect::Engine => self.engine,
            ParticleEffect::Crash => self.crash,
            ParticleEffect::Success => self.success,
        }
    }

    pub fn play(&mut self, effect: ParticleEffect) {
        *self.slot(effect) = true;
    }

    pub fn stop(&mut self, effect: ParticleEffect) {
        *self.slot(effect) = false;
    }
}
