pub mod camera;
pub mod config;
pub mod core;
pub mod scene;
