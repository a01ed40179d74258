use std::f32::consts::{FRAC_PI_2, TAU};

use image::Rgba;

/// Point in normalized canvas units, origin bottom-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Circle { center: Point, radius: f32 },
    Polygon(Vec<Point>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub fill: Rgba<u8>,
}

pub fn circle(center: Point, size: f32, fill: Rgba<u8>) -> Shape {
    Shape {
        geometry: Geometry::Circle {
            center,
            radius: size / 2.0,
        },
        fill,
    }
}

pub fn square(c: Point, size: f32, fill: Rgba<u8>) -> Shape {
    let h = size / 2.0;
    let points = vec![
        Point::new(c.x - h, c.y - h),
        Point::new(c.x + h, c.y - h),
        Point::new(c.x + h, c.y + h),
        Point::new(c.x - h, c.y + h),
    ];
    Shape {
        geometry: Geometry::Polygon(points),
        fill,
    }
}

pub fn triangle(c: Point, size: f32, fill: Rgba<u8>) -> Shape {
    let h = size / 2.0;
    let points = vec![
        Point::new(c.x, c.y + h),
        Point::new(c.x - h, c.y - h),
        Point::new(c.x + h, c.y - h),
    ];
    Shape {
        geometry: Geometry::Polygon(points),
        fill,
    }
}

// The pentagon starts at -90° and the hexagon at 0°; both offsets are part of the dataset look.
pub fn pentagon(c: Point, size: f32, fill: Rgba<u8>) -> Shape {
    regular_polygon(c, size, 5, -FRAC_PI_2, fill)
}

pub fn hexagon(c: Point, size: f32, fill: Rgba<u8>) -> Shape {
    regular_polygon(c, size, 6, 0.0, fill)
}

fn regular_polygon(c: Point, size: f32, sides: usize, offset: f32, fill: Rgba<u8>) -> Shape {
    let r = size / 2.0;
    let points = (0..sides)
        .map(|i| {
            let angle = TAU * i as f32 / sides as f32 + offset;
            Point::new(c.x + r * angle.cos(), c.y + r * angle.sin())
        })
        .collect();
    Shape {
        geometry: Geometry::Polygon(points),
        fill,
    }
}
