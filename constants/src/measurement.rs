/// Minimum committed points before a closed outline exists.
pub const MIN_OUTLINE_POINTS: usize = 2;

/// Minimum committed points before an area exists.
pub const MIN_AREA_POINTS: usize = 3;

/// Decimal places used when an area is shown to the user.
pub const AREA_DISPLAY_DECIMALS: usize = 3;

/// Unit suffix for displayed areas (square metres).
pub const AREA_UNIT_LABEL: &str = "m²";

/// Placeholder shown while no area is defined.
pub const AREA_UNDEFINED_LABEL: &str = "--";
