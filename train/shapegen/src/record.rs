use std::fmt;

use crate::generator::{MAX_SHAPES, Placement, Scene};

/// Column of the label table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableColumn {
    NumShapes,
    Shape(usize),
    Color(usize),
    Position(usize),
    Filename,
}

impl fmt::Display for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableColumn::NumShapes => f.write_str("num_shapes"),
            TableColumn::Shape(i) => write!(f, "shape_{i}"),
            TableColumn::Color(i) => write!(f, "color_{i}"),
            TableColumn::Position(i) => write!(f, "position_{i}"),
            TableColumn::Filename => f.write_str("filename"),
        }
    }
}

/// Ground-truth labels for one image. Attribute slots at or past `num_shapes` stay `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetRecord {
    pub num_shapes: usize,
    pub attributes: [Option<Placement>; MAX_SHAPES],
    pub filename: String,
}

impl DatasetRecord {
    pub fn from_scene(scene: &Scene, filename: String) -> Self {
        let mut attributes = [None; MAX_SHAPES];
        for (slot, p) in attributes.iter_mut().zip(scene.placements()) {
            *slot = Some(*p);
        }
        Self {
            num_shapes: scene.len(),
            attributes,
            filename,
        }
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.attributes.iter().flatten()
    }

    /// Columns this record populates, in the order its fields are laid out:
    /// count, all shapes, all colors, all positions, then the file.
    pub fn columns(&self) -> Vec<TableColumn> {
        let k = self.num_shapes;
        std::iter::once(TableColumn::NumShapes)
            .chain((0..k).map(TableColumn::Shape))
            .chain((0..k).map(TableColumn::Color))
            .chain((0..k).map(TableColumn::Position))
            .chain(std::iter::once(TableColumn::Filename))
            .collect()
    }

    pub fn field(&self, column: TableColumn) -> Option<String> {
        let at = |i: usize| self.attributes.get(i).copied().flatten();
        match column {
            TableColumn::NumShapes => Some(self.num_shapes.to_string()),
            TableColumn::Shape(i) => at(i).map(|p| p.shape.to_string()),
            TableColumn::Color(i) => at(i).map(|p| p.color.to_string()),
            TableColumn::Position(i) => at(i).map(|p| p.slot.to_string()),
            TableColumn::Filename => Some(self.filename.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn record(k: usize) -> DatasetRecord {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(k as u64);
        let scene = Scene::sample(&mut rng, k).unwrap();
        DatasetRecord::from_scene(&scene, format!("out/image_{k}_shapes_0.png"))
    }

    #[test]
    fn only_first_k_slots_are_filled() {
        for k in 1..=MAX_SHAPES {
            let r = record(k);
            assert_eq!(r.num_shapes, k);
            assert_eq!(r.placements().count(), k);
            for i in 0..MAX_SHAPES {
                assert_eq!(r.attributes[i].is_some(), i < k);
                assert_eq!(r.field(TableColumn::Shape(i)).is_some(), i < k);
                assert_eq!(r.field(TableColumn::Color(i)).is_some(), i < k);
                assert_eq!(r.field(TableColumn::Position(i)).is_some(), i < k);
            }
        }
    }

    #[test]
    fn columns_follow_field_layout() {
        let names: Vec<String> = record(2).columns().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            [
                "num_shapes",
                "shape_0",
                "shape_1",
                "color_0",
                "color_1",
                "position_0",
                "position_1",
                "filename"
            ]
        );
    }

    #[test]
    fn fields_render_registry_names() {
        let r = record(1);
        let p = r.attributes[0].unwrap();
        assert_eq!(r.field(TableColumn::NumShapes).as_deref(), Some("1"));
        assert_eq!(r.field(TableColumn::Shape(0)), Some(p.shape.name().to_string()));
        assert_eq!(r.field(TableColumn::Position(0)), Some(p.slot.name().to_string()));
        assert_eq!(r.field(TableColumn::Shape(7)), None);
        assert_eq!(
            r.field(TableColumn::Filename).as_deref(),
            Some("out/image_1_shapes_0.png")
        );
    }
}
