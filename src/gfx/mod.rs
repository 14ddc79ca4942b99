//! Rasterization primitives.
//!
//! Every primitive is a method on [`Pixmap`] and comes in two flavours: the
//! plain one takes user coordinates and goes through the pixmap orientation,
//! the `_raw` one addresses the stored buffer directly. Both clip against the
//! pixmap, any `i32` coordinate is accepted. Colours are pixel values already
//! encoded in the pixmap pixel type.
//!
//! The `draw_*` workers shared by both flavours take raw `i64` coordinates so
//! that transformed or offset points can not overflow.

pub mod aa;
mod circle;
mod ellipse;
pub mod fixed;
mod hvline;
mod line;
mod line_thick;
mod polygon;
mod rect;
mod triangle;

pub use circle::CircleSegments;

use crate::pixmap::Pixmap;

impl<S: AsRef<[u8]>> Pixmap<S> {
    /// User point to raw coordinates
    #[inline]
    pub(crate) fn raw_point(&self, x: i64, y: i64) -> (i64, i64) {
        self.orientation()
            .transform_point(x, y, self.raw_w(), self.raw_h())
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::pixel::PixelType;
    use crate::pixmap::Pixmap;

    /// Zeroed G8 canvas
    pub fn canvas(w: u32, h: u32) -> Pixmap {
        Pixmap::alloc(w, h, PixelType::G8).unwrap()
    }

    /// Canvas of `w` x `h` with the listed points set to 1
    pub fn with_points(w: u32, h: u32, points: &[(i32, i32)]) -> Vec<u8> {
        let mut p = canvas(w, h);
        for &(x, y) in points {
            p.put_pixel(x, y, 1);
        }
        p.into_data()
    }

    /// Render as rows of `.` and `#` so failures are readable
    pub fn render(data: &[u8], w: usize) -> String {
        data.chunks(w)
            .map(|row| {
                row.iter()
                    .map(|p| if *p == 0 { '.' } else { '#' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn assert_grid(p: &Pixmap, expected: &[u8]) {
        let w = p.raw_w() as usize;
        assert_eq!(
            p.data(),
            expected,
            "\ngot:\n{}\nexpected:\n{}",
            render(p.data(), w),
            render(expected, w)
        );
    }
}
