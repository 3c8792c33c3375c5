use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::config::{MeasureSettings, SettingsLoader, load_settings_system};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::gizmos::{create_reticle_gizmo, sync_reticle_size, update_reticle_gizmo};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::polygon::PolygonOverlayPlugin;
use crate::tools::tool_manager::{
    MeasureSet, MeasurementPlugin, handle_measure_keyboard_shortcuts,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::{
    camera::hit_test::{DesktopSession, desktop_hit_test_system, update_desktop_session},
    camera::viewport_camera::{ViewportCamera, camera_controller, spawn_viewport_camera},
    scene::ground::{spawn_ground, sync_ground_height},
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(JsonAssetPlugin::<MeasureSettings>::new(&["settings.json"]))
        .init_resource::<MeasureSettings>()
        .init_resource::<SettingsLoader>()
        .add_plugins(MeasurementPlugin)
        .add_plugins(PolygonOverlayPlugin)
        .add_plugins(WebRpcPlugin)
        .add_systems(Startup, create_reticle_gizmo)
        .add_systems(
            Update,
            (
                load_settings_system,
                handle_measure_keyboard_shortcuts.in_set(MeasureSet::Platform),
                (sync_reticle_size, update_reticle_gizmo).in_set(MeasureSet::Present),
            ),
        );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.init_resource::<ViewportCamera>()
            .init_resource::<DesktopSession>()
            .add_systems(Startup, (spawn_viewport_camera, spawn_ground))
            .add_systems(
                Update,
                (
                    camera_controller.before(MeasureSet::Platform),
                    (update_desktop_session, desktop_hit_test_system)
                        .chain()
                        .after(handle_measure_keyboard_shortcuts)
                        .in_set(MeasureSet::Platform),
                    sync_ground_height,
                ),
            );
    }

    #[cfg(target_arch = "wasm32")]
    {
        // The host page supplies the view; this camera only frames the overlay.
        app.insert_resource(ClearColor(Color::NONE))
            .add_systems(Startup, spawn_overlay_camera);
    }

    app
}

#[cfg(target_arch = "wasm32")]
fn spawn_overlay_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.6, 0.0).looking_at(Vec3::new(0.0, 0.0, -1.5), Vec3::Y),
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
