//! Scene furniture around the measurement overlay.
//!
//! Provides the reticle marking the current surface target and, on native
//! builds, a ground plane so the stand-in hit test has something to show.

/// Reticle gizmo following the tracker's current target.
pub mod gizmos;

/// Visible ground plane and lighting for the desktop stand-in.
pub mod ground;
