//! Headless polygon measurement core.
//!
//! Everything here is plain data plus Bevy `Resource` derives; no system in
//! this module touches the render world, so it can be driven from tests with
//! synthetic poses.
//!
//! ```text
//! hit results ──> HitTargetTracker ──current_target()──┐
//!                                                      v
//! place / reset ─────────────────────────────> PolygonMeasurement
//!                                                      │ recompute()
//!                                                      v
//!                                   count · outline · area · observers
//! ```

/// Outline derivation, shoelace area and display formatting.
pub mod area;

/// Point list owner with the Empty / Open / Measurable state machine.
pub mod engine;

/// Per-frame best surface target.
pub mod hit_target;

/// Immutable points, target poses and hit-test results.
pub mod point;

pub use engine::{MeasurementSnapshot, MeasurementState, PolygonMeasurement};
pub use hit_target::HitTargetTracker;
pub use point::{HitTestResult, Point3, TargetPose};
