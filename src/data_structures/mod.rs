//! Demo data types: vertex formats, static geometry and textures.
//!
//! - `vertex` contains interleaved vertex structs and attribute layout computation
//! - `geometry` holds the hardcoded vertex/index data and its validation
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod geometry;
pub mod texture;
pub mod vertex;
