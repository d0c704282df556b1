//! WebGPU rendering module
//!
//! The scene is rebuilt from a [`Snapshot`](crate::sim::Snapshot) every frame
//! as flat-coloured triangles; nothing here feeds back into the simulation.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, Viewport};
pub use scene::build_scene;
pub use vertex::Vertex;
