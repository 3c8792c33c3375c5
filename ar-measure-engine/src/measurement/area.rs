use super::point::Point3;
use constants::coordinate_system::project_horizontal;
use constants::measurement::{AREA_UNIT_LABEL, MIN_AREA_POINTS, MIN_OUTLINE_POINTS};

/// Closed loop for drawing the polygon boundary: every point followed by
/// the first point again. `None` below two points.
pub fn build_outline(points: &[Point3]) -> Option<Vec<Point3>> {
    if points.len() < MIN_OUTLINE_POINTS {
        return None;
    }

    let mut outline = Vec::with_capacity(points.len() + 1);
    outline.extend_from_slice(points);
    outline.push(points[0]);
    Some(outline)
}

/// Shoelace area of the polygon projected onto the horizontal plane.
///
/// The up axis is ignored, so the points need not be exactly coplanar; the
/// result is the area of their footprint. Winding direction and starting
/// vertex do not change the result. Self-intersecting input is not
/// detected: opposite lobes cancel and the value undercounts.
pub fn compute_planar_area(points: &[Point3]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;

    for i in 0..n {
        let (a_i, b_i) = project_horizontal(points[i].to_array());
        let (a_next, b_next) = project_horizontal(points[(i + 1) % n].to_array());
        sum += a_i * b_next - a_next * b_i;
    }

    sum.abs() / 2.0
}

/// Area for the given points, absent until a polygon can enclose anything.
pub fn planar_area(points: &[Point3]) -> Option<f64> {
    (points.len() >= MIN_AREA_POINTS).then(|| compute_planar_area(points))
}

/// Presentation string for a stored area; rounding happens only here.
pub fn format_area(area: f64, decimals: usize) -> String {
    format!("{area:.decimals$} {AREA_UNIT_LABEL}")
}
