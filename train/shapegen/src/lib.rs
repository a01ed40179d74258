pub mod dataset;
pub mod error;
pub mod generator;
pub mod geom;
mod io;
pub mod record;
pub mod registry;
pub mod render;

pub use dataset::{Dataset, DatasetBuilder, DatasetCfg, DatasetTable, generate};
pub use error::SynthError;
pub use generator::{ItemKey, MAX_SHAPES, Placement, SHAPE_SIZE, Scene, SceneCompositor};
pub use record::{DatasetRecord, TableColumn};
pub use render::RenderCfg;
