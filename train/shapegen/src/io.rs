use std::{fs::File, path::PathBuf};

use image::RgbaImage;
use polars::prelude::{CsvWriter, SerWriter};

use crate::{
    dataset::{CSV_NAME, DatasetBuilder, DatasetTable},
    error::SynthError,
    generator::{ItemKey, SceneCompositor},
};

impl SceneCompositor<'_> {
    pub(crate) fn save_png(&self, img: &RgbaImage, key: ItemKey) -> Result<PathBuf, SynthError> {
        let path = self.config.out_dir.join(key.file_name());
        img.save(&path).map_err(|source| SynthError::Image {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl DatasetBuilder<'_> {
    pub fn init_output(&self) -> Result<(), SynthError> {
        let dir = &self.render.out_dir;
        std::fs::create_dir_all(dir).map_err(|source| SynthError::Io {
            path: dir.clone(),
            source,
        })
    }

    pub fn write_csv(&self, table: &DatasetTable) -> Result<PathBuf, SynthError> {
        let path = self.render.out_dir.join(CSV_NAME);
        let mut df = table.to_frame()?;
        let mut file = File::create(&path).map_err(|source| SynthError::Io {
            path: path.clone(),
            source,
        })?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(path)
    }
}
