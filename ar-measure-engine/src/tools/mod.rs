//! Interactive measurement tool built on the headless measurement core.
//!
//! Wires platform input and user commands into `PolygonMeasurement` and
//! draws the resulting overlay.
//!
//! ## Frame Pipeline
//!
//! ```text
//! MeasureSet::Platform   desktop hit test / RPC messages / keyboard
//!   └─> MeasureSet::Ingest     FrameHitResults -> HitTargetTracker
//!       └─> MeasureSet::Commands   SessionEndedEvent, MeasureCommandEvent
//!           └─> MeasureSet::Present    overlay, HUD, RPC notifications
//! ```
//!
//! ## Commands
//!
//! - **Place point**: `Space` or left click (native), `place_point` RPC (WASM).
//!   Ignored while no surface is under the reticle.
//! - **Reset**: `R` (native), `reset` RPC (WASM). Clears every point.
//! - **End session**: `Escape` (native), `session_ended` RPC (WASM).
//!   Clears the current target; placed points are kept. On native builds the
//!   desktop hit test stays silent until `Enter` starts a new session.

/// Polygon overlay: vertex markers, closed outline and the area readout.
pub mod polygon;

/// Measurement events, frame ordering and the systems applying commands.
///
/// Also hosts the native keyboard shortcuts.
pub mod tool_manager;
