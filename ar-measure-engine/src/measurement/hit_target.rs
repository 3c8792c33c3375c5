use super::point::{HitTestResult, TargetPose};
use bevy::prelude::*;

/// Current surface target under the reticle.
///
/// Holds only the most recent frame's top-ranked hit. No smoothing is
/// applied, so every frame's target is independent of the last.
#[derive(Resource, Debug, Default)]
pub struct HitTargetTracker {
    target: Option<TargetPose>,
    session_active: bool,
}

impl HitTargetTracker {
    /// Replace the target with the best-ranked hit, or clear it on an empty frame.
    pub fn update_from_frame(&mut self, hits: &[HitTestResult]) {
        self.session_active = true;
        self.target = hits.first().map(|hit| hit.pose);
    }

    pub fn current_target(&self) -> Option<TargetPose> {
        self.target
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Session-ended notification from the platform.
    pub fn end_session(&mut self) {
        if self.session_active {
            debug!("Hit target tracker cleared on session end");
        }
        self.session_active = false;
        self.target = None;
    }

    pub fn is_session_active(&self) -> bool {
        self.session_active
    }
}
