use std::path::PathBuf;

use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

use crate::{
    error::SynthError,
    generator::{ItemKey, MAX_SHAPES, SceneCompositor},
    record::{DatasetRecord, TableColumn},
    render::RenderCfg,
};

pub const DEFAULT_REPLICAS: usize = 100;
pub const CSV_NAME: &str = "data.csv";

pub struct DatasetCfg {
    pub replicas_per_category: usize,
    /// Largest shape count generated; categories run 1..=max_shapes.
    pub max_shapes: usize,
    /// Drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for DatasetCfg {
    fn default() -> Self {
        Self {
            replicas_per_category: DEFAULT_REPLICAS,
            max_shapes: MAX_SHAPES,
            seed: None,
        }
    }
}

impl DatasetCfg {
    pub fn validate(&self) -> Result<(), SynthError> {
        if !(1..=MAX_SHAPES).contains(&self.max_shapes) {
            return Err(SynthError::InvalidConfig(format!(
                "max shapes {} is outside 1..={MAX_SHAPES}",
                self.max_shapes
            )));
        }
        Ok(())
    }
}

/// Label rows in generation order, with the union of every row's columns.
#[derive(Debug, Default)]
pub struct DatasetTable {
    columns: Vec<TableColumn>,
    records: Vec<DatasetRecord>,
}

impl DatasetTable {
    /// Columns appear in the order they are first seen, so the higher-index attribute
    /// columns of later categories land after `filename`.
    pub fn from_records(records: Vec<DatasetRecord>) -> Self {
        let mut columns: Vec<TableColumn> = Vec::new();
        for rec in &records {
            for col in rec.columns() {
                if !columns.contains(&col) {
                    columns.push(col);
                }
            }
        }
        Self { columns, records }
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    pub fn height(&self) -> usize {
        self.records.len()
    }

    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let series = self
            .columns
            .iter()
            .map(|&col| {
                let name = col.to_string();
                match col {
                    TableColumn::NumShapes => {
                        let counts: Vec<u32> =
                            self.records.iter().map(|r| r.num_shapes as u32).collect();
                        Series::new(name.into(), counts)
                    }
                    _ => {
                        let cells: Vec<Option<String>> =
                            self.records.iter().map(|r| r.field(col)).collect();
                        Series::new(name.into(), cells)
                    }
                }
            })
            .collect::<Vec<_>>();
        DataFrame::new(series)
    }
}

pub struct Dataset {
    pub files: Vec<PathBuf>,
    pub table: DatasetTable,
}

/// Runs the compositor over every (count, replica) pair and writes the label table.
pub struct DatasetBuilder<'a> {
    pub(crate) render: &'a RenderCfg,
    pub(crate) config: &'a DatasetCfg,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(render: &'a RenderCfg, config: &'a DatasetCfg) -> Self {
        Self { render, config }
    }

    /// Generation order: counts ascending, replicas ascending within each count.
    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        let replicas = self.config.replicas_per_category;
        (1..=self.config.max_shapes)
            .flat_map(move |k| (0..replicas).map(move |i| ItemKey::new(k, i)))
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dataset, SynthError> {
        self.render.validate()?;
        self.config.validate()?;
        self.init_output()?;

        let compositor = SceneCompositor::new(self.render);
        let mut files = Vec::new();
        let mut records = Vec::new();
        for key in self.keys() {
            let (path, record) = compositor.compose(rng, key)?;
            info!(file = %path.display(), "generated");
            files.push(path);
            records.push(record);
        }

        let table = DatasetTable::from_records(records);
        let csv = self.write_csv(&table)?;
        info!(
            images = files.len(),
            rows = table.height(),
            columns = table.columns().len(),
            csv = %csv.display(),
            "dataset written"
        );
        Ok(Dataset { files, table })
    }
}

/// Seeds the run RNG from the config (or the OS) and builds the dataset.
pub fn generate(render: &RenderCfg, config: &DatasetCfg) -> Result<Dataset, SynthError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        max_shapes = config.max_shapes,
        replicas = config.replicas_per_category,
        out_dir = %render.out_dir.display(),
        "generating dataset"
    );
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    DatasetBuilder::new(render, config).build(&mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Scene;

    fn cfg(replicas: usize, max_shapes: usize) -> DatasetCfg {
        DatasetCfg {
            replicas_per_category: replicas,
            max_shapes,
            seed: Some(3),
        }
    }

    #[test]
    fn keys_restart_replicas_per_category() {
        let render = RenderCfg::default();
        let config = cfg(2, 3);
        let keys: Vec<_> = DatasetBuilder::new(&render, &config)
            .keys()
            .map(|k| (k.num_shapes, k.replica))
            .collect();
        assert_eq!(keys, [(1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1)]);
    }

    #[test]
    fn max_shapes_is_bounded_by_registries() {
        assert!(cfg(1, 0).validate().is_err());
        assert!(cfg(1, 6).validate().is_err());
        assert!(cfg(1, 5).validate().is_ok());
    }

    #[test]
    fn table_columns_are_union_in_first_seen_order() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let records: Vec<_> = [1, 2, 1]
            .into_iter()
            .map(|k| DatasetRecord::from_scene(&Scene::sample(&mut rng, k).unwrap(), "f".into()))
            .collect();
        let table = DatasetTable::from_records(records);
        let names: Vec<String> = table.columns().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            [
                "num_shapes",
                "shape_0",
                "color_0",
                "position_0",
                "filename",
                "shape_1",
                "color_1",
                "position_1"
            ]
        );
        assert_eq!(table.height(), 3);
    }

    #[test]
    fn frame_leaves_missing_cells_null() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(13);
        let records: Vec<_> = [1, 3]
            .into_iter()
            .map(|k| DatasetRecord::from_scene(&Scene::sample(&mut rng, k).unwrap(), "f".into()))
            .collect();
        let df = DatasetTable::from_records(records).to_frame().unwrap();
        assert_eq!(df.shape(), (2, 11));
        assert_eq!(df.column("shape_2").unwrap().null_count(), 1);
        assert_eq!(df.column("shape_0").unwrap().null_count(), 0);
    }
}
