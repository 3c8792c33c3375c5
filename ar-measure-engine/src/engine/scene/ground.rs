use crate::engine::config::MeasureSettings;
use bevy::prelude::*;

#[derive(Component)]
pub struct GroundPlane;

const GROUND_EXTENT: f32 = 20.0;

pub fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<MeasureSettings>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_EXTENT, GROUND_EXTENT))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.22, 0.24, 0.26),
            perceptual_roughness: 1.0,
            ..default()
        })),
        // Sit marginally below the hit plane so markers never z-fight with it.
        Transform::from_xyz(0.0, settings.ground_height - 0.001, 0.0),
        GroundPlane,
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

/// Keep the plane aligned with the hit-test height after settings load.
pub fn sync_ground_height(
    settings: Res<MeasureSettings>,
    mut ground: Query<&mut Transform, With<GroundPlane>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut transform in &mut ground {
        transform.translation.y = settings.ground_height - 0.001;
    }
}
