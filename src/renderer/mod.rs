//! WebGPU rendering module
//!
//! The scene is rebuilt from a `BodySnapshot` every frame as a flat list of
//! colored triangles in world pixels; the pipeline maps them to the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
