use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_polygon_mut},
    point::Point as PixelPoint,
};

use crate::{
    error::SynthError,
    geom::{Geometry, Point, Shape},
};

pub const DEFAULT_OUT_DIR: &str = "generated_images";
pub const DEFAULT_IMAGE_SIZE: u32 = 300;

// Figure edge in inches; dpi is image_size / 10, so the side comes out at image_size pixels.
const FIGURE_INCHES: f32 = 10.0;
const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub struct RenderCfg {
    pub out_dir: PathBuf,
    pub image_size: u32,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            image_size: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl RenderCfg {
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.image_size < 10 {
            return Err(SynthError::InvalidConfig(format!(
                "image size {} is below 10",
                self.image_size
            )));
        }
        Ok(())
    }

    pub fn dpi(&self) -> f32 {
        self.image_size as f32 / 10.0
    }

    pub fn side_px(&self) -> u32 {
        (self.dpi() * FIGURE_INCHES).round() as u32
    }
}

/// Square raster spanning the unit square, transparent and without axes.
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn blank(side: u32) -> Self {
        Self {
            img: RgbaImage::from_pixel(side, side, BACKGROUND),
        }
    }

    fn scale(&self) -> f32 {
        self.img.width() as f32
    }

    fn to_pixel(&self, p: Point) -> PixelPoint<i32> {
        let s = self.scale();
        PixelPoint::new(
            (p.x * s).round() as i32,
            ((1.0 - p.y) * s).round() as i32,
        )
    }

    pub fn draw(&mut self, shape: &Shape) {
        match &shape.geometry {
            Geometry::Circle { center, radius } => {
                let c = self.to_pixel(*center);
                let r = (radius * self.scale()).round() as i32;
                draw_filled_circle_mut(&mut self.img, (c.x, c.y), r, shape.fill);
            }
            Geometry::Polygon(points) => {
                let mut poly: Vec<PixelPoint<i32>> =
                    points.iter().map(|p| self.to_pixel(*p)).collect();
                // imageproc rejects an explicitly closed or empty outline
                poly.dedup();
                if poly.len() > 1 && poly.first() == poly.last() {
                    poly.pop();
                }
                if poly.is_empty() {
                    return;
                }
                draw_polygon_mut(&mut self.img, &poly, shape.fill);
            }
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }
}
