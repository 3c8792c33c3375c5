use bevy::math::{DQuat, DVec3};

/// Committed world-space coordinate of a placed point.
///
/// Snapshotted from a target pose at placement time. There are no mutators;
/// a later pose update can never move an already placed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3(DVec3);

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn position(&self) -> DVec3 {
        self.0
    }

    pub fn to_array(&self) -> [f64; 3] {
        self.0.to_array()
    }
}

impl From<DVec3> for Point3 {
    fn from(value: DVec3) -> Self {
        Self(value)
    }
}

/// Rigid transform of the surface point under the reticle for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl TargetPose {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose on an upward-facing surface.
    pub fn from_position(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }

    /// Orientation is only used by the rendered marker, never by measurement.
    pub fn to_point(&self) -> Point3 {
        Point3(self.position)
    }

    /// Single-precision transform for the render world.
    pub fn to_transform(&self) -> bevy::prelude::Transform {
        bevy::prelude::Transform::from_translation(self.position.as_vec3())
            .with_rotation(self.orientation.as_quat())
    }
}

/// One ranked candidate returned by the platform's hit-test for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    pub pose: TargetPose,
}

impl HitTestResult {
    pub fn new(pose: TargetPose) -> Self {
        Self { pose }
    }
}
