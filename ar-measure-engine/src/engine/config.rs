use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::measurement::AREA_DISPLAY_DECIMALS;
use constants::render_settings::{
    DEFAULT_GROUND_HEIGHT, DRAW_LINE_WIDTH, DRAW_VERTEX_SIZE, RETICLE_SIZE,
};
use serde::Deserialize;

pub const SETTINGS_PATH: &str = "measure.settings.json";

/// Runtime-tunable presentation settings.
///
/// Compiled-in defaults apply until the JSON asset has loaded, and stay in
/// place if it is missing or malformed.
#[derive(Asset, TypePath, Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MeasureSettings {
    pub area_decimals: usize,
    pub vertex_size: f32,
    pub line_width: f32,
    pub reticle_size: f32,
    /// Height of the desktop stand-in ground plane.
    pub ground_height: f32,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self {
            area_decimals: AREA_DISPLAY_DECIMALS,
            vertex_size: DRAW_VERTEX_SIZE,
            line_width: DRAW_LINE_WIDTH,
            reticle_size: RETICLE_SIZE,
            ground_height: DEFAULT_GROUND_HEIGHT,
        }
    }
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<MeasureSettings>>,
    finished: bool,
}

/// Load the settings JSON and promote it to a resource once available.
pub fn load_settings_system(
    mut loader: ResMut<SettingsLoader>,
    mut settings: ResMut<MeasureSettings>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<MeasureSettings>>,
) {
    if loader.finished {
        return;
    }

    let Some(handle) = loader.handle.clone() else {
        info!("Loading measure settings from: {}", SETTINGS_PATH);
        loader.handle = Some(asset_server.load(SETTINGS_PATH));
        return;
    };

    if let Some(loaded) = settings_assets.get(&handle) {
        info!("Measure settings loaded: {:?}", loaded);
        *settings = loaded.clone();
        loader.finished = true;
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
        warn!("Measure settings unavailable, using defaults: {}", err);
        loader.finished = true;
    }
}
