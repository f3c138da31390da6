//! Static vertex data.
//!
//! Everything here is built once on the CPU; the backend uploads it and
//! reuses it every frame.

mod mesh;
mod vertex;

pub use mesh::{cube_edges, cube_faces, floor_grid, test_cross, test_grid, MeshKind, Topology, FLOOR_Y};
pub use vertex::{CornerVertex, ParticleInstance, Vertex, BILLBOARD_CORNERS, BILLBOARD_INDICES};
