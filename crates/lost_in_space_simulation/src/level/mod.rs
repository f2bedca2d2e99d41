//! Level module: layout уровней и их загрузка
//!
//! Scene-loading в терминах ECS: уровень = все entity с LevelEntity.
//! Загрузка = teardown + спавн layout из LevelCatalog.

use bevy::prelude::*;

pub mod layout;
pub mod loading;

pub use layout::{default_levels, BlockLayout, LevelCatalog, LevelLayout};
pub use loading::{
    apply_level_loads, request_start_level, spawn_block, spawn_level, spawn_rocket,
    tick_pending_level_loads, ActiveLevel, Block, LevelEntity, LevelLoadRequested,
    PendingLevelLoad, StartLevel, FIRST_LEVEL, NEXT_LEVEL,
};

/// Level Plugin
///
/// Порядок: tick_pending_level_loads → apply_level_loads (последними в тике,
/// чтобы teardown не ломал flight системы).
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LevelLoadRequested>()
            .init_resource::<LevelCatalog>()
            .init_resource::<ActiveLevel>()
            .init_resource::<StartLevel>()
            .register_type::<LevelEntity>()
            .register_type::<Block>()
            .add_systems(Startup, request_start_level)
            .add_systems(
                FixedUpdate,
                (tick_pending_level_loads, apply_level_loads)
                    .chain()
                    .in_set(crate::SimulationSet::Level),
            );
    }
}
