//! Live floor-area measurement for AR surface hit-tests.
//!
//! `measurement` is the headless core; `tools`, `engine` and `rpc` embed it
//! in a Bevy app and connect it to the AR platform.

pub mod engine;
pub mod measurement;
pub mod rpc;
pub mod tools;
