//! WebGPU rendering module
//!
//! Shapes from the draw list are tessellated into one triangle list and drawn
//! in a single alpha-blended pass. Text is left to the platform.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{Tessellation, tessellate};
pub use vertex::Vertex;
