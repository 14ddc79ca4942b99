use crate::pixel::Pixel;
use crate::pixmap::Pixmap;

/// Horizontal extent of the convex polygon `poly` between rows `y0` and `y1`
fn band_extent(poly: &[(f64, f64)], y0: f64, y1: f64) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut take = |x: f64| {
        lo = lo.min(x);
        hi = hi.max(x);
    };

    let mut prev = poly[poly.len() - 1];
    for &(x, y) in poly {
        if y >= y0 && y <= y1 {
            take(x);
        }
        let (px, py) = prev;
        for yb in [y0, y1] {
            if (py < yb && y > yb) || (py > yb && y < yb) {
                take(px + (x - px) * (yb - py) / (y - py));
            }
        }
        prev = (x, y);
    }

    (lo <= hi).then_some((lo, hi))
}

#[inline]
fn round(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// Line widened by `r` pixels on each side.
    ///
    /// The body is the quad spanned by the line offset along its exact
    /// normal scaled to `r`. Row `y` gets the part of the quad between
    /// `y - 0.49` and `y + 0.49`, rounded to whole pixels. A zero length
    /// line is a square of side `2r + 1`.
    pub(crate) fn draw_line_thick(
        &mut self,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        r: u32,
        pixel: Pixel,
    ) {
        if r == 0 {
            self.draw_line(x0, y0, x1, y1, pixel);
            return;
        }

        if x0 == x1 && y0 == y1 {
            let r = r as i64;
            self.draw_fill_rect(x0 - r, y0 - r, x0 + r, y0 + r, pixel);
            return;
        }

        let (fx0, fy0, fx1, fy1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
        let (dx, dy) = (fx1 - fx0, fy1 - fy0);
        let len = dx.hypot(dy);
        let nx = -dy * r as f64 / len;
        let ny = dx * r as f64 / len;

        let quad = [
            (fx0 + nx, fy0 + ny),
            (fx1 + nx, fy1 + ny),
            (fx1 - nx, fy1 - ny),
            (fx0 - nx, fy0 - ny),
        ];

        let top = quad.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let bottom = quad.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let first = ((top - 0.49).ceil() as i64).max(0);
        let last = ((bottom + 0.49).floor() as i64).min(self.raw_h() as i64 - 1);

        for y in first..=last {
            let row = y as f64;
            if let Some((lx, rx)) = band_extent(&quad, row - 0.49, row + 0.49) {
                self.draw_hline(round(lx), round(rx), y, pixel);
            }
        }
    }

    /// Line from `(x0, y0)` to `(x1, y1)` widened by `r` on each side,
    /// `r == 0` is a plain [`line`](Self::line)
    pub fn line_thick(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u32, pixel: Pixel) {
        let (x0, y0) = self.raw_point(x0 as i64, y0 as i64);
        let (x1, y1) = self.raw_point(x1 as i64, y1 as i64);
        self.draw_line_thick(x0, y0, x1, y1, r, pixel);
    }

    pub fn line_thick_raw(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u32, pixel: Pixel) {
        self.draw_line_thick(x0 as i64, y0 as i64, x1 as i64, y1 as i64, r, pixel);
    }
}
