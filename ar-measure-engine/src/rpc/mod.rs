//! JSON-RPC 2.0 bridge to the page hosting the AR session.
//!
//! On WASM builds the engine runs inside a page that owns the WebXR session.
//! The page forwards each frame's hit-test results and user commands via
//! `postMessage`; the engine answers requests and pushes notifications back.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (WebXR)                         Engine (canvas)
//!        │                                        │
//!        ├─ frame_hit_results (notification) ───> │ -> HitTargetTracker
//!        ├─ place_point / reset ────────────────> │ -> PolygonMeasurement
//!        ├─ session_ended ──────────────────────> │ -> tracker cleared
//!        │                                        │
//!        │ <──────── measurement_updated ─────────┤ after every recompute
//!        │ <──────── Response (with ID) ──────────┤
//! ```
//!
//! ## Methods
//!
//! - `frame_hit_results`: `{ hits: [{ position: [x,y,z], orientation?: [x,y,z,w] }] }`,
//!   best candidate first. An empty list means no surface this frame.
//! - `session_ended`: clears the current target.
//! - `place_point`, `reset`: measurement commands.
//! - `get_measurement`: returns the current snapshot.
//!
//! ## Notifications Sent
//!
//! - `measurement_updated`: `{ point_count, state, markers, outline, area, area_display }`
//! - `session_state_changed`: `{ active, has_target }` after a session end is applied
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 message types, parsing and the postMessage transport.
pub mod web_rpc;
