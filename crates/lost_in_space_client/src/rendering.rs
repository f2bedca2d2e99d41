use bevy::prelude::*;
use lost_in_space_simulation::{Block, ParticleEffect, Rocket, RocketEffects, Tag};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (
            attach_block_visuals,
            attach_rocket_visuals,
            sync_effect_visibility,
        ).chain());
    }
}

/// Партикл-заглушка ракеты (светящаяся сфера вместо particle system)
#[derive(Component)]
pub struct EffectVisual {
    pub effect: ParticleEffect,
}

/// Mesh для новых блоков уровня (цвет по тегу)
fn attach_block_visuals(
    mut commands: Commands,
    query: Query<(Entity, &Block, &Tag), Added<Block>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, block, tag) in query.iter() {
        let size = block.half_extents * 2.0;

        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: tag_color(tag),
                ..default()
            })),
        ));
    }
}

/// Mesh + партикл-заглушки для новых ракет
fn attach_rocket_visuals(
    mut commands: Commands,
    query: Query<Entity, Added<Rocket>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(1.0, 2.0, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.95))),
        ));

        let effect_mesh = meshes.add(Sphere::new(0.4));

        commands.entity(entity).with_children(|parent| {
            for effect in ParticleEffect::ALL {
                let (offset, color) = effect_placement(effect);
                parent.spawn((
                    EffectVisual { effect },
                    Mesh3d(effect_mesh.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: color,
                        emissive: color.to_linear() * 4.0,
                        ..default()
                    })),
                    Transform::from_translation(offset),
                    Visibility::Hidden,
                ));
            }
        });
    }
}

/// RocketEffects → видимость заглушек
fn sync_effect_visibility(
    rockets: Query<(&RocketEffects, &Children), Changed<RocketEffects>>,
    mut visuals: Query<(&EffectVisual, &mut Visibility)>,
) {
    for (effects, children) in rockets.iter() {
        let children: &[Entity] = children;
        for &child in children {
            let Ok((visual, mut visibility)) = visuals.get_mut(child) else {
                continue;
            };

            *visibility = if effects.is_playing(visual.effect) {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

fn effect_placement(effect: ParticleEffect) -> (Vec3, Color) {
    match effect {
        ParticleEffect::Engine => (Vec3::new(0.0, -1.3, 0.0), Color::srgb(1.0, 0.5, 0.1)),
        ParticleEffect::Crash => (Vec3::new(0.0, 0.0, 0.8), Color::srgb(0.9, 0.1, 0.1)),
        ParticleEffect::Success => (Vec3::new(0.0, 1.3, 0.0), Color::srgb(0.2, 0.9, 0.3)),
    }
}

fn tag_color(tag: &Tag) -> Color {
    match tag {
        Tag::Friendly => Color::srgb(0.3, 0.6, 0.3),
        Tag::Finish => Color::srgb(0.2, 0.4, 0.9),
        Tag::Other(_) => Color::srgb(0.45, 0.4, 0.4),
    }
}
