//! Загрузка уровней
//!
//! - PendingLevelLoad: отложенный one-shot таймер на ракете
//! - LevelLoadRequested: запрос загрузки (index 0 = первый, 1 = следующий)
//! - apply_level_loads: teardown всех LevelEntity + спавн layout из каталога
//!
//! Таймер отменяется только teardown'ом уровня (ракета деспавнится вместе с ним).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::layout::{BlockLayout, LevelCatalog, LevelLayout};
use crate::flight::Rocket;
use crate::oscillator::Oscillator;

/// Первый уровень (retry после crash)
pub const FIRST_LEVEL: usize = 0;
/// "Следующий" уровень после Finish. Адресуемых уровней только два.
pub const NEXT_LEVEL: usize = 1;

/// Маркер: entity принадлежит текущему уровню (деспавнится при загрузке)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LevelEntity;

/// Блок уровня (для визуализации в клиенте)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Block {
    pub half_extents: Vec3,
}

/// Отложенная загрузка уровня
///
/// Один на ракету: вставляется при терминальном переходе, который
/// случается ровно один раз.
#[derive(Component, Debug, Clone)]
pub struct PendingLevelLoad {
    pub timer: Timer,
    pub level: usize,
}

impl PendingLevelLoad {
    pub fn new(delay_secs: f32, level: usize) -> Self {
        Self {
            timer: Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once),
            level,
        }
    }
}

/// Событие: загрузить уровень по индексу
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLoadRequested {
    pub index: usize,
}

/// Текущий уровень
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveLevel {
    pub index: usize,
    /// Сколько раз уровень загружался (для тестов/статистики)
    pub loads: u32,
}

/// Уровень, загружаемый на Startup (`None` — пустой мир, тесты спавнят сами)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLevel(pub Option<usize>);

impl Default for StartLevel {
    fn default() -> Self {
        Self(Some(FIRST_LEVEL))
    }
}

/// Система (Startup): запросить стартовый уровень
pub fn request_start_level(
    start: Res<StartLevel>,
    mut requests: EventWriter<LevelLoadRequested>,
) {
    if let Some(index) = start.0 {
        requests.write(LevelLoadRequested { index });
    }
}

/// Система: тикать отложенные загрузки, по истечении — LevelLoadRequested
///
/// Тик, в котором таймер добавлен, не считается: отсчёт начинается со следующего.
pub fn tick_pending_level_loads(
    mut commands: Commands,
    mut pending: Query<(Entity, &mut PendingLevelLoad)>,
    mut requests: EventWriter<LevelLoadRequested>,
    time: Res<Time<Fixed>>,
) {
    for (entity, mut load) in pending.iter_mut() {
        if load.is_added() {
            continue;
        }

        load.timer.tick(time.delta());

        if load.timer.just_finished() {
            requests.write(LevelLoadRequested { index: load.level });
            commands.entity(entity).remove::<PendingLevelLoad>();
        }
    }
}

/// Система: teardown текущего уровня и спавн запрошенного
///
/// Несколько запросов за тик — применяется последний.
pub fn apply_level_loads(
    mut commands: Commands,
    mut requests: EventReader<LevelLoadRequested>,
    level_entities: Query<Entity, With<LevelEntity>>,
    catalog: Res<LevelCatalog>,
    mut active: ResMut<ActiveLevel>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let mut despawned = 0;
    for entity in level_entities.iter() {
        commands.entity(entity).despawn();
        despawned += 1;
    }

    active.index = request.index;
    active.loads += 1;

    match catalog.get(request.index) {
        Some(layout) => {
            spawn_level(&mut commands, layout, catalog.rocket);
            crate::logger::log_info(&format!(
                "Loaded level {} ({} blocks, {} entities torn down)",
                request.index,
                layout.blocks.len(),
                despawned
            ));
        }
        None => {
            crate::logger::log_error(&format!(
                "Level {} not found in catalog ({} levels), world left empty",
                request.index,
                catalog.len()
            ));
        }
    }
}

/// Спавн всех entity уровня. Возвращает entity ракеты.
pub fn spawn_level(commands: &mut Commands, layout: &LevelLayout, rocket: Rocket) -> Entity {
    for block in &layout.blocks {
        spawn_block(commands, block);
    }

    spawn_rocket(commands, Vec3::from_array(layout.rocket_spawn), rocket)
}

/// Спавн ракеты с физическим телом
///
/// FlightState/FlightInput/RocketAudio/RocketEffects/ExternalImpulse/Velocity
/// добавляются через Required Components.
pub fn spawn_rocket(commands: &mut Commands, position: Vec3, rocket: Rocket) -> Entity {
    commands
        .spawn((
            rocket,
            Transform::from_translation(position),
            LevelEntity,
            RigidBody::Dynamic,
            Collider::cuboid(0.5, 1.0, 0.5),
            // 2.5D: движение в XY, вращение только вокруг Z
            LockedAxes::TRANSLATION_LOCKED_Z
                | LockedAxes::ROTATION_LOCKED_X
                | LockedAxes::ROTATION_LOCKED_Y,
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

pub fn spawn_block(commands: &mut Commands, block: &BlockLayout) -> Entity {
    let half_extents = Vec3::from_array(block.half_extents);

    let mut entity = commands.spawn((
        Block { half_extents },
        block.tag.clone(),
        Transform::from_translation(Vec3::from_array(block.center)),
        LevelEntity,
        Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
    ));

    match block.oscillator {
        Some(layout) => {
            entity.insert((Oscillator::from(layout), RigidBody::KinematicPositionBased));
        }
        None => {
            entity.insert(RigidBody::Fixed);
        }
    }

    entity.id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_load_fires_once() {
        let mut pending = PendingLevelLoad::new(2.0, NEXT_LEVEL);

        pending.timer.tick(std::time::Duration::from_secs_f32(1.5));
        assert!(!pending.timer.just_finished());

        pending.timer.tick(std::time::Duration::from_secs_f32(0.6));
        assert!(pending.timer.just_finished());

        pending.timer.tick(std::time::Duration::from_secs_f32(1.0));
        assert!(!pending.timer.just_finished());
    }

    #[test]
    fn test_negative_delay_is_clamped() {
        let pending = PendingLevelLoad::new(-1.0, FIRST_LEVEL);
        assert_eq!(pending.timer.duration(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_start_level_default() {
        assert_eq!(StartLevel::default(), StartLevel(Some(FIRST_LEVEL)));
    }
}
