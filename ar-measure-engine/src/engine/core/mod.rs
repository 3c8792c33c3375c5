//! Core application setup.
//!
//! Assembles the Bevy app for native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Registers the measurement pipeline, overlay, RPC bridge and, on native
/// builds, the desktop stand-ins for the AR platform.
pub mod app_setup;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
