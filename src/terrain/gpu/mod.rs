mod model;

pub use model::TerrainModel;
