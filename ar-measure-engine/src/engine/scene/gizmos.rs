use crate::engine::config::MeasureSettings;
use crate::measurement::HitTargetTracker;
use bevy::prelude::*;
use constants::render_settings::RETICLE_COLOUR;

#[derive(Component)]
pub struct ReticleGizmo;

/// Ring lying flat in its local XZ plane, oriented by the target pose.
pub fn create_reticle_gizmo(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<MeasureSettings>,
) {
    commands.spawn((
        Mesh3d(meshes.add(reticle_annulus(settings.reticle_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: RETICLE_COLOUR,
            emissive: RETICLE_COLOUR.to_linear(),
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        ReticleGizmo,
    ));
}

pub fn reticle_annulus(outer_radius: f32) -> Annulus {
    Annulus::new(outer_radius * 0.75, outer_radius)
}

/// Rebuild the ring once loaded settings change its size.
pub fn sync_reticle_size(
    settings: Res<MeasureSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut gizmo_query: Query<&mut Mesh3d, With<ReticleGizmo>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut mesh in &mut gizmo_query {
        let previous = mesh.0.clone();
        mesh.0 = meshes.add(reticle_annulus(settings.reticle_size));
        meshes.remove(&previous);
    }
}

/// Annulus meshes are built in XY; this turns them face-up.
fn reticle_base_rotation() -> Quat {
    Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

pub fn update_reticle_gizmo(
    tracker: Res<HitTargetTracker>,
    mut gizmo_query: Query<(&mut Transform, &mut Visibility), With<ReticleGizmo>>,
) {
    let Ok((mut gizmo_transform, mut gizmo_visibility)) = gizmo_query.single_mut() else {
        return;
    };

    match tracker.current_target() {
        Some(pose) => {
            let target = pose.to_transform();
            gizmo_transform.translation = target.translation;
            gizmo_transform.rotation = target.rotation * reticle_base_rotation();
            *gizmo_visibility = Visibility::Visible;
        }
        None => {
            *gizmo_visibility = Visibility::Hidden;
        }
    }
}
