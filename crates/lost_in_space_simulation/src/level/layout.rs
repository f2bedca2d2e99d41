//! Layout уровней (что спавнить при загрузке)
//!
//! Уровни живут в XY плоскости (2.5D): ракета летит вверх по Y,
//! Z заблокирован через LockedAxes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::flight::{Rocket, Tag};
use crate::oscillator::OscillatorLayout;

/// Блок уровня (площадка, стена, препятствие)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockLayout {
    pub center: [f32; 3],
    pub half_extents: [f32; 3],
    pub tag: Tag,
    /// Движущийся блок (kinematic body)
    #[serde(default)]
    pub oscillator: Option<OscillatorLayout>,
}

impl BlockLayout {
    pub fn new(center: Vec3, half_extents: Vec3, tag: Tag) -> Self {
        Self {
            center: center.to_array(),
            half_extents: half_extents.to_array(),
            tag,
            oscillator: None,
        }
    }

    pub fn oscillating(mut self, movement: Vec3, period: f32) -> Self {
        self.oscillator = Some(OscillatorLayout {
            movement: movement.to_array(),
            period,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub rocket_spawn: [f32; 3],
    #[serde(default)]
    pub blocks: Vec<BlockLayout>,
}

impl LevelLayout {
    /// Уровень 0: стартовая площадка, стена посередине, посадочная площадка справа
    pub fn first() -> Self {
        let obstacle = || Tag::from("Obstacle");

        Self {
            rocket_spawn: [0.0, 2.0, 0.0],
            blocks: vec![
                BlockLayout::new(Vec3::new(15.0, -1.0, 0.0), Vec3::new(25.0, 1.0, 2.0), obstacle()),
                BlockLayout::new(Vec3::new(0.0, 0.25, 0.0), Vec3::new(2.0, 0.25, 2.0), Tag::Friendly),
                BlockLayout::new(Vec3::new(15.0, 6.0, 0.0), Vec3::new(1.0, 6.0, 2.0), obstacle()),
                BlockLayout::new(Vec3::new(30.0, 0.25, 0.0), Vec3::new(2.0, 0.25, 2.0), Tag::Finish),
            ],
        }
    }

    /// Уровень 1: проход через движущееся препятствие
    pub fn second() -> Self {
        let obstacle = || Tag::from("Obstacle");

        Self {
            rocket_spawn: [0.0, 2.0, 0.0],
            blocks: vec![
                BlockLayout::new(Vec3::new(15.0, -1.0, 0.0), Vec3::new(25.0, 1.0, 2.0), obstacle()),
                BlockLayout::new(Vec3::new(0.0, 0.25, 0.0), Vec3::new(2.0, 0.25, 2.0), Tag::Friendly),
                BlockLayout::new(Vec3::new(12.0, 4.0, 0.0), Vec3::new(1.0, 4.0, 2.0), obstacle()),
                BlockLayout::new(Vec3::new(18.0, 4.0, 0.0), Vec3::new(1.0, 1.0, 2.0), obstacle())
                    .oscillating(Vec3::new(0.0, 8.0, 0.0), 4.0),
                BlockLayout::new(Vec3::new(30.0, 0.25, 0.0), Vec3::new(2.0, 0.25, 2.0), Tag::Finish),
            ],
        }
    }
}

/// Каталог уровней + шаблон ракеты для спавна
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    pub levels: Vec<LevelLayout>,
    pub rocket: Rocket,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::new(default_levels(), Rocket::default())
    }
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelLayout>, rocket: Rocket) -> Self {
        Self { levels, rocket }
    }

    pub fn get(&self, index: usize) -> Option<&LevelLayout> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

pub fn default_levels() -> Vec<LevelLayout> {
    vec![LevelLayout::first(), LevelLayout::second()]
}
