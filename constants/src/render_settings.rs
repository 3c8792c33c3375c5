use bevy::color::Color;

/// Radius of the sphere drawn at each committed point.
pub const DRAW_VERTEX_SIZE: f32 = 0.02;

/// Cross-section of the cuboids drawn for outline segments.
pub const DRAW_LINE_WIDTH: f32 = 0.008;

/// Outer radius of the reticle ring shown under the current hit target.
pub const RETICLE_SIZE: f32 = 0.06;

/// Segments shorter than this are not drawn.
pub const MIN_DRAWN_SEGMENT_LENGTH: f32 = 0.002;

/// Height of the flat ground plane used by the desktop hit-test stand-in.
pub const DEFAULT_GROUND_HEIGHT: f32 = 0.0;

pub const VERTEX_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const OUTLINE_COLOUR: Color = Color::srgb(0.0, 1.0, 0.0);
pub const RETICLE_COLOUR: Color = Color::srgb(1.0, 0.27, 0.0);
pub const HUD_TEXT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);

/// HUD font size for the count and area readout.
pub const HUD_FONT_SIZE: f32 = 18.0;
