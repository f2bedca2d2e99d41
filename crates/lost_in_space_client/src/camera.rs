use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use lost_in_space_simulation::Rocket;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (
            follow_camera_zoom,
            follow_rocket,
        ).chain());
    }
}

/// Камера сбоку от плоскости уровня, следует за ракетой
#[derive(Component)]
pub struct FollowCamera {
    pub distance: f32,
    pub height: f32,
    /// Скорость догона (1/сек)
    pub stiffness: f32,
    pub zoom_speed: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            distance: 30.0,
            height: 4.0,
            stiffness: 4.0,
            zoom_speed: 1.0,
        }
    }
}

/// Mouse wheel: zoom
fn follow_camera_zoom(
    mut query: Query<&mut FollowCamera>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(10.0, 80.0);
    }
}

/// Плавно тянем камеру к ракете (после reload уровня ракета новая — просто догоняем)
fn follow_rocket(
    rockets: Query<&Transform, (With<Rocket>, Without<FollowCamera>)>,
    mut cameras: Query<(&FollowCamera, &mut Transform)>,
    time: Res<Time>,
) {
    let Some(rocket) = rockets.iter().next() else {
        return;
    };

    for (camera, mut transform) in cameras.iter_mut() {
        let focus = rocket.translation;
        let target = focus + Vec3::new(0.0, camera.height, camera.distance);
        let blend = (camera.stiffness * time.delta_secs()).min(1.0);

        transform.translation = transform.translation.lerp(target, blend);
        transform.look_at(focus, Vec3::Y);
    }
}
