//! Scene tessellation
//!
//! Turns a read-only [`RenderView`](crate::sim::RenderView) into a flat
//! triangle list. Hosts decide how to paint it (2D canvas in the browser).

pub mod shapes;
pub mod vertex;

pub use shapes::{ObstacleStyle, build_scene};
pub use vertex::Vertex;
