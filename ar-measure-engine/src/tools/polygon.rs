use crate::engine::config::MeasureSettings;
use crate::measurement::{MeasurementSnapshot, Point3, PolygonMeasurement};
use crate::tools::tool_manager::{MeasureSet, MeasurementChanged};
use bevy::prelude::*;
use constants::measurement::AREA_UNDEFINED_LABEL;
use constants::render_settings::{
    HUD_FONT_SIZE, HUD_TEXT_COLOUR, MIN_DRAWN_SEGMENT_LENGTH, OUTLINE_COLOUR, VERTEX_COLOUR,
};

/// Marker sphere drawn at a committed point.
#[derive(Component)]
pub struct PolygonPoints;

/// Segment of the closed outline.
#[derive(Component)]
pub struct PolygonLines;

/// Text node showing point count and area.
#[derive(Component)]
pub struct MeasureHudText;

/// Overlay drawing for the measured polygon.
///
/// Geometry is rebuilt when a `MeasurementChanged` event arrives or the
/// settings change marker sizes; the engine never touches entities itself.
pub struct PolygonOverlayPlugin;

impl Plugin for PolygonOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_measure_hud).add_systems(
            Update,
            (update_polygon_render, update_measure_hud).in_set(MeasureSet::Present),
        );
    }
}

fn spawn_measure_hud(
    mut commands: Commands,
    measurement: Res<PolygonMeasurement>,
    settings: Res<MeasureSettings>,
) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(hud_text(&measurement.snapshot(), settings.area_decimals)),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(HUD_TEXT_COLOUR),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                MeasureHudText,
            ));
        });
}

/// Readout shown in the HUD, e.g. `Points: 4 | Area: 4.000 m²`.
pub fn hud_text(snapshot: &MeasurementSnapshot, decimals: usize) -> String {
    let area = snapshot
        .area_display(decimals)
        .unwrap_or_else(|| AREA_UNDEFINED_LABEL.to_string());
    format!("Points: {} | Area: {}", snapshot.point_count, area)
}

pub fn update_measure_hud(
    mut events: EventReader<MeasurementChanged>,
    settings: Res<MeasureSettings>,
    measurement: Res<PolygonMeasurement>,
    mut query: Query<&mut Text, With<MeasureHudText>>,
) {
    let latest = events.read().last().map(|event| event.0.clone());
    let snapshot = match latest {
        Some(snapshot) => snapshot,
        None if settings.is_changed() => measurement.snapshot(),
        None => return,
    };

    for mut text in &mut query {
        text.0 = hud_text(&snapshot, settings.area_decimals);
    }
}

/// Redraw markers and the closed outline from the latest snapshot.
pub fn update_polygon_render(
    mut commands: Commands,
    mut events: EventReader<MeasurementChanged>,
    measurement: Res<PolygonMeasurement>,
    settings: Res<MeasureSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, Or<(With<PolygonPoints>, With<PolygonLines>)>>,
) {
    let snapshot = match events.read().last() {
        Some(MeasurementChanged(snapshot)) => snapshot.clone(),
        None if settings.is_changed() => measurement.snapshot(),
        None => return,
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    if snapshot.markers.is_empty() {
        return;
    }

    let vertex_material = materials.add(overlay_material(VERTEX_COLOUR));
    let vertex_mesh = meshes.add(Sphere::new(settings.vertex_size));
    for point in &snapshot.markers {
        commands.spawn((
            Mesh3d(vertex_mesh.clone()),
            MeshMaterial3d(vertex_material.clone()),
            Transform::from_translation(point.position().as_vec3()),
            PolygonPoints,
        ));
    }

    let Some(outline) = &snapshot.outline else {
        return;
    };

    let line_material = materials.add(overlay_material(OUTLINE_COLOUR));
    for (start, end) in outline_segments(outline) {
        let direction = end - start;
        let distance = direction.length();
        if distance <= MIN_DRAWN_SEGMENT_LENGTH {
            continue;
        }

        let midpoint = (start + end) * 0.5;
        let rotation = Quat::from_rotation_arc(Vec3::X, direction / distance);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(
                distance,
                settings.line_width,
                settings.line_width,
            ))),
            MeshMaterial3d(line_material.clone()),
            Transform::from_translation(midpoint).with_rotation(rotation),
            PolygonLines,
        ));
    }
}

/// Consecutive vertex pairs of an already closed outline, in render precision.
pub fn outline_segments(outline: &[Point3]) -> Vec<(Vec3, Vec3)> {
    outline
        .windows(2)
        .map(|pair| (pair[0].position().as_vec3(), pair[1].position().as_vec3()))
        .collect()
}

fn overlay_material(colour: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        emissive: colour.to_linear(),
        unlit: true,
        ..default()
    }
}
