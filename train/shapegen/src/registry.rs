use std::fmt;

use image::Rgba;
use rand::{Rng, seq::index};

use crate::geom::{self, Point, Shape};

pub type ShapeFn = fn(Point, f32, Rgba<u8>) -> Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Pentagon,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
        }
    }

    pub fn generator(self) -> ShapeFn {
        match self {
            ShapeKind::Circle => geom::circle,
            ShapeKind::Square => geom::square,
            ShapeKind::Triangle => geom::triangle,
            ShapeKind::Pentagon => geom::pentagon,
            ShapeKind::Hexagon => geom::hexagon,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorName {
    Red,
    Green,
    Blue,
    Yellow,
    Pink,
    Black,
}

impl ColorName {
    pub const ALL: [ColorName; 6] = [
        ColorName::Red,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Yellow,
        ColorName::Pink,
        ColorName::Black,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Yellow => "yellow",
            ColorName::Pink => "pink",
            ColorName::Black => "black",
        }
    }

    /// Opaque RGBA matching the usual named-color table (`green` is 0,128,0).
    pub fn rgba(self) -> Rgba<u8> {
        match self {
            ColorName::Red => Rgba([255, 0, 0, 255]),
            ColorName::Green => Rgba([0, 128, 0, 255]),
            ColorName::Blue => Rgba([0, 0, 255, 255]),
            ColorName::Yellow => Rgba([255, 255, 0, 255]),
            ColorName::Pink => Rgba([255, 192, 203, 255]),
            ColorName::Black => Rgba([0, 0, 0, 255]),
        }
    }
}

/// Fixed layout slots on the unit canvas, y pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionSlot {
    M,
    TL,
    TR,
    BL,
    BR,
}

impl PositionSlot {
    pub const ALL: [PositionSlot; 5] = [
        PositionSlot::M,
        PositionSlot::TL,
        PositionSlot::TR,
        PositionSlot::BL,
        PositionSlot::BR,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PositionSlot::M => "M",
            PositionSlot::TL => "TL",
            PositionSlot::TR => "TR",
            PositionSlot::BL => "BL",
            PositionSlot::BR => "BR",
        }
    }

    pub fn center(self) -> Point {
        match self {
            PositionSlot::M => Point::new(0.5, 0.5),
            PositionSlot::TL => Point::new(0.25, 0.75),
            PositionSlot::TR => Point::new(0.75, 0.75),
            PositionSlot::BL => Point::new(0.25, 0.25),
            PositionSlot::BR => Point::new(0.75, 0.25),
        }
    }
}

macro_rules! impl_display_by_name {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        })*
    };
}

impl_display_by_name!(ShapeKind, ColorName, PositionSlot);

/// Draws `amount` distinct entries of `population` in sampled order.
///
/// Panics when `amount` exceeds the population, callers check the count first.
pub fn sample_distinct<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    population: &[T],
    amount: usize,
) -> Vec<T> {
    index::sample(rng, population.len(), amount)
        .into_iter()
        .map(|i| population[i])
        .collect()
}
