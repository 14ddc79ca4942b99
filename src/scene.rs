//! JSON scene descriptions.
//!
//! A scene is a canvas (size, pixel type, background) and a list of shapes
//! drawn in order. Colours are plain `[r, g, b]` triplets, encoded into the
//! canvas pixel type when the scene is drawn.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gfx::fixed::{Fp, FP_1};
use crate::gfx::CircleSegments;
use crate::pixel::{Pixel, PixelType};
use crate::pixmap::Pixmap;

pub type Color = [u8; 3];
pub type Point = [i32; 2];

fn default_pixel_type() -> PixelType {
    PixelType::Rgb888
}

fn default_name() -> String {
    "untitled".to_string()
}

/// Something to draw, tagged by `"shape"` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    ThickLine {
        from: Point,
        to: Point,
        radius: u32,
        color: Color,
    },
    Rect {
        from: Point,
        to: Point,
        color: Color,
    },
    FillRect {
        from: Point,
        to: Point,
        color: Color,
    },
    Circle {
        center: Point,
        radius: i32,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: i32,
        color: Color,
    },
    /// `segments` are [`CircleSegments`] bits
    CircleSeg {
        center: Point,
        radius: i32,
        segments: u8,
        color: Color,
    },
    Ellipse {
        center: Point,
        a: u32,
        b: u32,
        color: Color,
    },
    FillEllipse {
        center: Point,
        a: u32,
        b: u32,
        color: Color,
    },
    Triangle {
        points: [Point; 3],
        #[serde(default)]
        fill: bool,
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        #[serde(default)]
        fill: bool,
        color: Color,
    },
    /// Antialiased line, coordinates in pixels with fractions
    AaLine {
        from: [f32; 2],
        to: [f32; 2],
        color: Color,
    },
    /// Checkerboard tile rendered off screen and blitted at `at`
    Checker {
        at: Point,
        size: u32,
        cell: u32,
        colors: [Color; 2],
    },
}

#[inline]
fn to_fp(v: f32) -> Fp {
    (v * FP_1 as f32).round() as Fp
}

impl Shape {
    fn draw<S: AsRef<[u8]> + AsMut<[u8]>>(&self, p: &mut Pixmap<S>) {
        let t = p.pixel_type();
        let px = |c: &Color| -> Pixel { t.rgb_to_pixel(c[0], c[1], c[2]) };

        match self {
            Shape::Line { from, to, color } => {
                p.line(from[0], from[1], to[0], to[1], px(color));
            },
            Shape::ThickLine {
                from,
                to,
                radius,
                color,
            } => {
                p.line_thick(from[0], from[1], to[0], to[1], *radius, px(color));
            },
            Shape::Rect { from, to, color } => p.rect(from[0], from[1], to[0], to[1], px(color)),
            Shape::FillRect { from, to, color } => {
                p.fill_rect(from[0], from[1], to[0], to[1], px(color));
            },
            Shape::Circle {
                center,
                radius,
                color,
            } => p.circle(center[0], center[1], *radius, px(color)),
            Shape::FillCircle {
                center,
                radius,
                color,
            } => p.fill_circle(center[0], center[1], *radius, px(color)),
            Shape::CircleSeg {
                center,
                radius,
                segments,
                color,
            } => {
                let segs = CircleSegments::from_bits_truncate(*segments);
                p.circle_seg(center[0], center[1], *radius, segs, px(color));
            },
            Shape::Ellipse {
                center,
                a,
                b,
                color,
            } => p.ellipse(center[0], center[1], *a, *b, px(color)),
            Shape::FillEllipse {
                center,
                a,
                b,
                color,
            } => p.fill_ellipse(center[0], center[1], *a, *b, px(color)),
            Shape::Triangle {
                points: [a, b, c],
                fill,
                color,
            } => {
                if *fill {
                    p.fill_triangle(a[0], a[1], b[0], b[1], c[0], c[1], px(color));
                } else {
                    p.triangle(a[0], a[1], b[0], b[1], c[0], c[1], px(color));
                }
            },
            Shape::Polygon {
                points,
                fill,
                color,
            } => {
                let points: Vec<(i32, i32)> = points.iter().map(|pt| (pt[0], pt[1])).collect();
                if *fill {
                    p.fill_polygon(&points, px(color));
                } else {
                    p.polygon(&points, px(color));
                }
            },
            Shape::AaLine { from, to, color } => {
                p.line_aa(
                    to_fp(from[0]),
                    to_fp(from[1]),
                    to_fp(to[0]),
                    to_fp(to[1]),
                    px(color),
                );
            },
            Shape::Checker {
                at,
                size,
                cell,
                colors,
            } => {
                match checker_tile(t, *size, *cell, [px(&colors[0]), px(&colors[1])]) {
                    Ok(tile) => p.blit_xywh_clipped(&tile, 0, 0, *size, *size, at[0], at[1]),
                    Err(e) => warn!("Skipping checker tile: {}", e),
                }
            },
        }
    }
}

fn checker_tile(pixel_type: PixelType, size: u32, cell: u32, colors: [Pixel; 2]) -> Result<Pixmap> {
    let mut tile = Pixmap::alloc(size, size, pixel_type)?;
    let cell = cell.max(1);
    for cy in 0..size.div_ceil(cell) {
        for cx in 0..size.div_ceil(cell) {
            let color = colors[((cx + cy) % 2) as usize];
            tile.fill_rect_xywh((cx * cell) as i32, (cy * cell) as i32, cell, cell, color);
        }
    }
    Ok(tile)
}

/// A canvas and the shapes drawn on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "default_name")]
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_pixel_type")]
    pub pixel_type: PixelType,
    #[serde(default)]
    pub background: Color,
    /// Gamma used for antialiased mixing, none mixes linearly
    #[serde(default)]
    pub gamma: Option<f32>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixel_type: default_pixel_type(),
            background: [0, 0, 0],
            gamma: None,
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json(&json)?;
        info!(
            "Loaded scene {:?} {}x{} {} with {} shapes",
            scene.name,
            scene.width,
            scene.height,
            scene.pixel_type,
            scene.shapes.len()
        );
        Ok(scene)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clear `p` to the background and draw every shape in user coordinates
    pub fn draw<S: AsRef<[u8]> + AsMut<[u8]>>(&self, p: &mut Pixmap<S>) {
        let [r, g, b] = self.background;
        p.fill(p.pixel_type().rgb_to_pixel(r, g, b));
        for shape in &self.shapes {
            shape.draw(p);
        }
    }

    /// Allocate a canvas for the scene and draw it
    pub fn render(&self) -> Result<Pixmap> {
        let mut p = Pixmap::alloc(self.width, self.height, self.pixel_type)?;
        if let Some(gamma) = self.gamma {
            p.set_gamma(gamma);
        }
        debug!("Rendering scene {:?} into {}", self.name, p);
        self.draw(&mut p);
        Ok(p)
    }

    /// Built-in scene showing every primitive
    pub fn demo() -> Self {
        let mut scene = Self::new("demo", 320, 240);
        scene.background = [0x10, 0x10, 0x20];
        scene.gamma = Some(2.2);

        let shapes = [
            Shape::Checker {
                at: [0, 0],
                size: 64,
                cell: 8,
                colors: [[0x30, 0x30, 0x30], [0x50, 0x50, 0x50]],
            },
            Shape::FillRect {
                from: [80, 10],
                to: [150, 60],
                color: [0x20, 0x60, 0xc0],
            },
            Shape::Rect {
                from: [76, 6],
                to: [154, 64],
                color: [0xff, 0xff, 0xff],
            },
            Shape::FillCircle {
                center: [220, 40],
                radius: 30,
                color: [0xc0, 0x30, 0x30],
            },
            Shape::CircleSeg {
                center: [220, 40],
                radius: 36,
                segments: (CircleSegments::SEG1 | CircleSegments::SEG3).bits(),
                color: [0xff, 0xc0, 0x00],
            },
            Shape::Circle {
                center: [290, 40],
                radius: 20,
                color: [0xff, 0xff, 0xff],
            },
            Shape::FillEllipse {
                center: [60, 130],
                a: 50,
                b: 25,
                color: [0x30, 0xa0, 0x50],
            },
            Shape::Ellipse {
                center: [60, 130],
                a: 55,
                b: 30,
                color: [0xff, 0xff, 0xff],
            },
            Shape::Triangle {
                points: [[140, 100], [200, 160], [120, 170]],
                fill: true,
                color: [0xa0, 0x40, 0xc0],
            },
            Shape::Polygon {
                points: vec![[230, 100], [300, 110], [280, 170], [250, 140], [220, 170]],
                fill: true,
                color: [0x40, 0xc0, 0xc0],
            },
            Shape::Line {
                from: [0, 239],
                to: [319, 180],
                color: [0xff, 0xff, 0x00],
            },
            Shape::ThickLine {
                from: [20, 200],
                to: [150, 225],
                radius: 3,
                color: [0xff, 0x80, 0x00],
            },
            Shape::AaLine {
                from: [170.0, 195.5],
                to: [310.25, 232.75],
                color: [0xff, 0xff, 0xff],
            },
        ];
        scene.shapes.extend(shapes);
        scene
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo()
    }
}
