// ============================================
// Terrain Module - Карта высот и сэмплирование
// ============================================

pub mod extent;
pub mod heightmap;
pub mod sampler;
pub mod mesh;
pub mod gpu;

// Re-exports
pub use extent::{WorldExtent, NormalizedCoordinate, ExtentError};
pub use heightmap::{
    HeightSource, HeightmapField, FloatGrid, ProceduralHeight,
    ClampPolicy, TexelCoordinate, HeightmapError, TEXEL_EPSILON,
};
pub use sampler::{sample_height, probe_height, HeightProbe};
pub use mesh::{TerrainVertex, TerrainMesh, HeightmapMeshGenerator, TERRAIN_TINT};
pub use gpu::TerrainModel;
