/// World frame convention shared by the AR host and the engine:
/// Y is up and the measurement plane is spanned by X and Z.
///
/// Axis pair (a, b) used for horizontal projection, in shoelace order.
pub const HORIZONTAL_AXES: (usize, usize) = (0, 2);

/// Project a world coordinate onto the horizontal measurement plane.
/// The up component is dropped, not flattened to a reference height.
pub fn project_horizontal(position: [f64; 3]) -> (f64, f64) {
    (position[HORIZONTAL_AXES.0], position[HORIZONTAL_AXES.1])
}
