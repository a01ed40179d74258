use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("shape count {0} is outside 1..=5")]
    InvalidShapeCount(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O failure at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing image {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("serializing dataset table")]
    Table(#[from] PolarsError),
}
