use super::area::{build_outline, format_area, planar_area};
use super::point::{Point3, TargetPose};
use bevy::prelude::*;
use constants::measurement::{AREA_DISPLAY_DECIMALS, MIN_AREA_POINTS};
use serde::{Deserialize, Serialize};

/// Progress of the polygon being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementState {
    /// No points placed.
    Empty,
    /// One or two points; an outline may exist but no area.
    Open,
    /// Three or more points; area is defined.
    Measurable,
}

impl MeasurementState {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            n if n < MIN_AREA_POINTS => Self::Open,
            _ => Self::Measurable,
        }
    }
}

/// Owned copy of everything the presentation layer reads after a change.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSnapshot {
    pub point_count: usize,
    pub state: MeasurementState,
    pub markers: Vec<Point3>,
    pub outline: Option<Vec<Point3>>,
    pub area: Option<f64>,
}

impl MeasurementSnapshot {
    pub fn area_display(&self, decimals: usize) -> Option<String> {
        self.area.map(|area| format_area(area, decimals))
    }

    /// Wire form used by RPC notifications and responses.
    pub fn to_json(&self) -> serde_json::Value {
        let to_arrays =
            |points: &[Point3]| points.iter().map(Point3::to_array).collect::<Vec<_>>();

        serde_json::json!({
            "point_count": self.point_count,
            "state": self.state,
            "markers": to_arrays(&self.markers),
            "outline": self.outline.as_deref().map(to_arrays),
            "area": self.area,
            "area_display": self.area_display(AREA_DISPLAY_DECIMALS),
        })
    }
}

/// Callback invoked with the fresh snapshot after every recompute.
pub type MeasurementListener = Box<dyn FnMut(&MeasurementSnapshot) + Send + Sync>;

/// Incremental polygon measurement over committed surface points.
///
/// Points are append-only until `reset`. Outline and area are derived and
/// rebuilt from the full point list after every mutation, never patched.
#[derive(Resource, Default)]
pub struct PolygonMeasurement {
    points: Vec<Point3>,
    outline: Option<Vec<Point3>>,
    area: Option<f64>,
    listeners: Vec<MeasurementListener>,
}

impl PolygonMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit the target's position as the next vertex.
    ///
    /// Returns `false` without touching any state when there is no target;
    /// that is the normal "nothing under the reticle" case, not an error.
    pub fn place_point(&mut self, target: Option<TargetPose>) -> bool {
        let Some(pose) = target else {
            return false;
        };

        self.points.push(pose.to_point());
        self.recompute();
        true
    }

    /// Drop every point and return to `Empty`.
    pub fn reset(&mut self) {
        self.points.clear();
        self.recompute();
    }

    /// Register an observer called after each recompute.
    pub fn subscribe(&mut self, listener: MeasurementListener) {
        self.listeners.push(listener);
    }

    fn recompute(&mut self) {
        self.outline = build_outline(&self.points);
        self.area = planar_area(&self.points);

        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Marker positions, one per committed point, in placement order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn outline(&self) -> Option<&[Point3]> {
        self.outline.as_deref()
    }

    /// Full-precision area in square metres.
    pub fn area(&self) -> Option<f64> {
        self.area
    }

    pub fn state(&self) -> MeasurementState {
        MeasurementState::from_count(self.points.len())
    }

    pub fn snapshot(&self) -> MeasurementSnapshot {
        MeasurementSnapshot {
            point_count: self.points.len(),
            state: self.state(),
            markers: self.points.clone(),
            outline: self.outline.clone(),
            area: self.area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::math::DVec3;
    use std::sync::{Arc, Mutex};

    fn target(x: f64, y: f64, z: f64) -> Option<TargetPose> {
        Some(TargetPose::from_position(DVec3::new(x, y, z)))
    }

    fn assert_consistent(engine: &PolygonMeasurement) {
        let count = engine.point_count();
        match engine.outline() {
            None => assert!(count < 2),
            Some(outline) => {
                assert_eq!(outline.len(), count + 1);
                assert_eq!(outline[0], outline[count]);
            }
        }
        match engine.area() {
            None => assert!(count < 3),
            Some(area) => {
                assert!(count >= 3);
                assert!(area >= 0.0);
            }
        }
    }

    #[test]
    fn square_scenario() {
        let mut engine = PolygonMeasurement::new();
        for (x, z) in [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)] {
            assert!(engine.place_point(target(x, 0.0, z)));
            assert_consistent(&engine);
        }

        assert_eq!(engine.point_count(), 4);
        assert_relative_eq!(engine.area().unwrap(), 4.0);
        assert_eq!(engine.state(), MeasurementState::Measurable);
    }

    #[test]
    fn single_point_has_no_outline_or_area() {
        let mut engine = PolygonMeasurement::new();
        engine.place_point(target(1.0, 0.0, 1.0));

        assert_eq!(engine.point_count(), 1);
        assert!(engine.outline().is_none());
        assert!(engine.area().is_none());
        assert_eq!(engine.state(), MeasurementState::Open);
    }

    #[test]
    fn missing_target_is_ignored() {
        let mut engine = PolygonMeasurement::new();
        engine.place_point(target(1.0, 0.0, 1.0));
        engine.place_point(target(2.0, 0.0, 1.0));
        let before = engine.snapshot();

        assert!(!engine.place_point(None));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn triangle_then_reset() {
        let mut engine = PolygonMeasurement::new();
        engine.place_point(target(0.0, 0.0, 0.0));
        engine.place_point(target(4.0, 0.0, 0.0));
        engine.place_point(target(0.0, 0.0, 3.0));
        assert_relative_eq!(engine.area().unwrap(), 6.0);

        engine.reset();
        assert_eq!(engine.point_count(), 0);
        assert!(engine.outline().is_none());
        assert!(engine.area().is_none());
        assert_eq!(engine.state(), MeasurementState::Empty);
    }

    #[test]
    fn reset_from_empty_stays_empty() {
        let mut engine = PolygonMeasurement::new();
        engine.reset();
        assert_eq!(engine.state(), MeasurementState::Empty);
        assert_consistent(&engine);
    }

    #[test]
    fn count_tracks_placements_since_reset() {
        let mut engine = PolygonMeasurement::new();
        let targets = [
            target(0.0, 0.0, 0.0),
            None,
            target(1.0, 0.0, 0.0),
            target(1.0, 0.1, 1.0),
            None,
            target(0.0, 0.0, 1.0),
            target(-0.5, 0.0, 0.5),
        ];

        let mut placed = 0;
        for t in targets {
            if t.is_some() {
                placed += 1;
            }
            engine.place_point(t);
            assert_eq!(engine.point_count(), placed);
            assert_consistent(&engine);
        }
    }

    #[test]
    fn state_only_moves_forward_until_reset() {
        let mut engine = PolygonMeasurement::new();
        let mut states = vec![engine.state()];
        for i in 0..5 {
            engine.place_point(target(i as f64, 0.0, (i * i) as f64));
            states.push(engine.state());
        }

        assert_eq!(
            states,
            vec![
                MeasurementState::Empty,
                MeasurementState::Open,
                MeasurementState::Open,
                MeasurementState::Measurable,
                MeasurementState::Measurable,
                MeasurementState::Measurable,
            ]
        );
    }

    #[test]
    fn observers_see_every_recompute() {
        let seen: Arc<Mutex<Vec<(usize, Option<f64>)>>> = Arc::default();
        let sink = seen.clone();

        let mut engine = PolygonMeasurement::new();
        engine.subscribe(Box::new(move |snapshot| {
            sink.lock().unwrap().push((snapshot.point_count, snapshot.area));
        }));

        engine.place_point(target(0.0, 0.0, 0.0));
        engine.place_point(None);
        engine.place_point(target(4.0, 0.0, 0.0));
        engine.place_point(target(0.0, 0.0, 3.0));
        engine.reset();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(1, None), (2, None), (3, Some(6.0)), (0, None)]
        );
    }

    #[test]
    fn snapshot_json_shape() {
        let mut engine = PolygonMeasurement::new();
        engine.place_point(target(0.0, 0.0, 0.0));
        engine.place_point(target(4.0, 0.0, 0.0));
        engine.place_point(target(0.0, 0.0, 3.0));

        let json = engine.snapshot().to_json();
        assert_eq!(json["point_count"], 3);
        assert_eq!(json["state"], "measurable");
        assert_eq!(json["outline"].as_array().unwrap().len(), 4);
        assert_eq!(json["area_display"], "6.000 m²");

        engine.reset();
        let json = engine.snapshot().to_json();
        assert!(json["area"].is_null());
        assert!(json["outline"].is_null());
    }
}
