use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;

/// Standing eye height used for the simulated device.
const EYE_HEIGHT: f32 = 1.6;

#[derive(Resource)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub move_speed: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 2.5),
            pitch: -0.6,
            yaw: 0.0,
            move_speed: 1.5,
        }
    }
}

impl ViewportCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }
}

pub fn spawn_viewport_camera(mut commands: Commands, viewport: Res<ViewportCamera>) {
    commands.spawn((Camera3d::default(), viewport.transform()));
}

/// Right-drag to look around, WASD to walk, Q/E to crouch or rise.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        viewport.yaw -= mouse_delta.x * 0.0035;
        viewport.pitch = (viewport.pitch - mouse_delta.y * 0.0030).clamp(-1.55, 1.55);
    }

    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        move_input.y -= 1.0;
    }

    if move_input != Vec3::ZERO {
        // Walk in the horizontal plane regardless of pitch.
        let heading = Quat::from_rotation_y(viewport.yaw);
        let forward = heading * Vec3::Z;
        let right = heading * Vec3::X;
        let world_delta = right * move_input.x + Vec3::Y * move_input.y + forward * move_input.z;
        let step = world_delta.normalize() * viewport.move_speed * time.delta_secs();
        viewport.position += step;
    }

    *camera_transform = viewport.transform();
}
