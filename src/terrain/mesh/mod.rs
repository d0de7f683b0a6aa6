mod vertex;
mod generator;

pub use vertex::TerrainVertex;
pub use generator::{HeightmapMeshGenerator, TerrainMesh, TERRAIN_TINT};
