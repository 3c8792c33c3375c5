//! Shared constants for the AR measurement workspace.

pub mod coordinate_system;
pub mod measurement;
pub mod render_settings;
