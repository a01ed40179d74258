use std::path::PathBuf;

use image::RgbaImage;
use rand::Rng;
use tracing::debug;

use crate::{
    error::SynthError,
    geom::Shape,
    record::DatasetRecord,
    registry::{ColorName, PositionSlot, ShapeKind, sample_distinct},
    render::{Canvas, RenderCfg},
};

/// Edge length of every shape in unit canvas coordinates.
///
/// Together with the slot layout this keeps shapes from overlapping, so it is not configurable.
pub const SHAPE_SIZE: f32 = 0.2;
pub const MAX_SHAPES: usize = 5;

/// Identifies one generated item: the category (shape count) and the replica inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub num_shapes: usize,
    pub replica: usize,
}

impl ItemKey {
    pub fn new(num_shapes: usize, replica: usize) -> Self {
        Self {
            num_shapes,
            replica,
        }
    }

    pub fn file_name(&self) -> String {
        format!("image_{}_shapes_{}.png", self.num_shapes, self.replica)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub shape: ShapeKind,
    pub color: ColorName,
    pub slot: PositionSlot,
}

impl Placement {
    pub fn to_shape(&self) -> Shape {
        (self.shape.generator())(self.slot.center(), SHAPE_SIZE, self.color.rgba())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    placements: Vec<Placement>,
}

impl Scene {
    /// Samples `k` shapes, colors and slots, each without replacement and independently,
    /// then pairs them up by draw order.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, k: usize) -> Result<Self, SynthError> {
        if !(1..=MAX_SHAPES).contains(&k) {
            return Err(SynthError::InvalidShapeCount(k));
        }
        let shapes = sample_distinct(rng, &ShapeKind::ALL, k);
        let colors = sample_distinct(rng, &ColorName::ALL, k);
        let slots = sample_distinct(rng, &PositionSlot::ALL, k);

        let placements = shapes
            .into_iter()
            .zip(colors)
            .zip(slots)
            .map(|((shape, color), slot)| Placement { shape, color, slot })
            .collect();
        Ok(Self { placements })
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn render(&self, side: u32) -> RgbaImage {
        let mut canvas = Canvas::blank(side);
        for p in &self.placements {
            canvas.draw(&p.to_shape());
        }
        canvas.into_image()
    }
}

/// Produces one scene, its PNG and its label record per call.
pub struct SceneCompositor<'a> {
    pub(crate) config: &'a RenderCfg,
}

impl<'a> SceneCompositor<'a> {
    pub fn new(config: &'a RenderCfg) -> Self {
        Self { config }
    }

    pub fn compose<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        key: ItemKey,
    ) -> Result<(PathBuf, DatasetRecord), SynthError> {
        let scene = Scene::sample(rng, key.num_shapes)?;
        debug!(?key, placements = ?scene.placements(), "sampled scene");

        let img = scene.render(self.config.side_px());
        let path = self.save_png(&img, key)?;

        let record = DatasetRecord::from_scene(&scene, path.to_string_lossy().into_owned());
        Ok((path, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashSet;

    #[test]
    fn file_name_embeds_count_and_replica() {
        assert_eq!(ItemKey::new(3, 17).file_name(), "image_3_shapes_17.png");
    }

    #[test]
    fn sampled_attributes_are_pairwise_distinct() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..200 {
            for k in 1..=MAX_SHAPES {
                let scene = Scene::sample(&mut rng, k).unwrap();
                let p = scene.placements();
                assert_eq!(p.len(), k);
                assert_eq!(p.iter().map(|x| x.shape).collect::<HashSet<_>>().len(), k);
                assert_eq!(p.iter().map(|x| x.color).collect::<HashSet<_>>().len(), k);
                assert_eq!(p.iter().map(|x| x.slot).collect::<HashSet<_>>().len(), k);
            }
        }
    }

    #[test]
    fn out_of_range_counts_are_rejected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        for k in [0, 6, 42] {
            assert!(matches!(
                Scene::sample(&mut rng, k),
                Err(SynthError::InvalidShapeCount(n)) if n == k
            ));
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let mut a = Xoshiro256PlusPlus::seed_from_u64(99);
        let mut b = Xoshiro256PlusPlus::seed_from_u64(99);
        for k in 1..=MAX_SHAPES {
            assert_eq!(
                Scene::sample(&mut a, k).unwrap(),
                Scene::sample(&mut b, k).unwrap()
            );
        }
    }

    #[test]
    fn rendered_scene_paints_each_slot_center() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let scene = Scene::sample(&mut rng, 5).unwrap();
        let img = scene.render(100);
        for p in scene.placements() {
            let c = p.slot.center();
            let px = img.get_pixel((c.x * 100.0) as u32, ((1.0 - c.y) * 100.0) as u32);
            assert_eq!(*px, p.color.rgba(), "{p:?}");
        }
    }

    #[test]
    fn compose_writes_png_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RenderCfg {
            out_dir: dir.path().to_path_buf(),
            image_size: 60,
        };
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let (path, record) = SceneCompositor::new(&cfg)
            .compose(&mut rng, ItemKey::new(3, 0))
            .unwrap();

        assert_eq!(path, dir.path().join("image_3_shapes_0.png"));
        assert_eq!(record.num_shapes, 3);
        assert_eq!(record.filename, path.to_string_lossy());
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (60, 60));
    }
}
