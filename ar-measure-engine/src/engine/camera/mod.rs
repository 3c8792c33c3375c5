//! Desktop stand-in for the AR device.
//!
//! A free-look camera plays the role of the tracked device pose, and a
//! cursor ray against the ground plane plays the role of the platform's
//! surface hit-test. Neither is compiled into WASM builds, where the host
//! page supplies hit results over RPC.


/// Free-look camera resource and controller system.
pub mod viewport_camera;
