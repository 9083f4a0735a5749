//! spin-demos
//!
//! Two small GPU demos sharing one library: `triangles` draws two wobbling
//! triangles (one from a raw vertex array, one through an element buffer) and
//! `textured` draws a spinning quad that blends a base image with a
//! wave-distorted one, with a tweak overlay on top.
//!
//! High-level modules
//! - `config`: layered configuration (defaults, TOML files, environment)
//! - `context`: window, surface and GPU device
//! - `data_structures`: vertex formats, layouts, static geometry and textures
//! - `demos`: the two programs
//! - `flow`: the `Demo` trait and the frame loop
//! - `gui`: the tweak overlay
//! - `params`: the render parameters the GUI and shortcuts edit
//! - `pipelines`: shader stages, vertex arrays and programs
//! - `resources`: scoped GPU ownership, shader compilation, image loading
//! - `render`: scene pass and draw calls
//! - `uniforms`: per-frame uniform formulas
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod demos;
pub mod error;
pub mod flow;
pub mod gui;
pub mod logging;
pub mod params;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod uniforms;
