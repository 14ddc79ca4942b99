//! Axis aligned ellipses.
//!
//! Same top down walk as the circle, on `x^2 * b^2 + y^2 * a^2 - a^2 * b^2`.
//! The error terms outgrow `i64` for large semi axes, they are kept in
//! `i128`.

use crate::pixel::Pixel;
use crate::pixmap::{Orientation, Pixmap};

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    fn ellipse_outside(&self, xc: i64, yc: i64, a: i64, b: i64) -> bool {
        xc + a < 0 || yc + b < 0 || xc - a >= self.raw_w() as i64 || yc - b >= self.raw_h() as i64
    }

    /// Walk the top right quadrant, `point` gets every outline step and
    /// `row` the half width reached on each row offset `y`
    fn walk_ellipse(
        &mut self,
        a: u32,
        b: u32,
        mut point: impl FnMut(&mut Self, i64, i64),
        mut row: impl FnMut(&mut Self, i64, i64),
    ) {
        let a2 = a as i128 * a as i128;
        let b2 = b as i128 * b as i128;

        let mut x: i128 = 0;
        let mut y: i128 = b as i128;
        let mut error = -b2 * a as i128;
        while y >= 0 {
            while error < 0 {
                error += b2 * (2 * x + 1);
                x += 1;
                point(self, (x - 1) as i64, y as i64);
            }
            error += a2 * (-2 * y + 1);
            point(self, (x - 1) as i64, y as i64);
            row(self, (x - 1) as i64, y as i64);
            y -= 1;
        }
    }

    // ========================================================================
    // Raw workers
    // ========================================================================

    pub(crate) fn draw_ellipse(&mut self, xc: i64, yc: i64, a: u32, b: u32, pixel: Pixel) {
        if a == 0 {
            self.draw_vline(xc, yc - b as i64, yc + b as i64, pixel);
            return;
        }
        if b == 0 {
            self.draw_hline(xc - a as i64, xc + a as i64, yc, pixel);
            return;
        }
        if self.ellipse_outside(xc, yc, a as i64, b as i64) {
            return;
        }

        self.walk_ellipse(
            a,
            b,
            |p, x, y| {
                p.put_pixel_raw_clipped(xc - x, yc - y, pixel);
                p.put_pixel_raw_clipped(xc + x, yc - y, pixel);
                p.put_pixel_raw_clipped(xc - x, yc + y, pixel);
                p.put_pixel_raw_clipped(xc + x, yc + y, pixel);
            },
            |_, _, _| {},
        );
    }

    pub(crate) fn draw_fill_ellipse(&mut self, xc: i64, yc: i64, a: u32, b: u32, pixel: Pixel) {
        if a == 0 || b == 0 {
            self.draw_ellipse(xc, yc, a, b, pixel);
            return;
        }
        if self.ellipse_outside(xc, yc, a as i64, b as i64) {
            return;
        }

        self.walk_ellipse(
            a,
            b,
            |_, _, _| {},
            |p, x, y| {
                p.draw_hline(xc - x, xc + x, yc - y, pixel);
                p.draw_hline(xc - x, xc + x, yc + y, pixel);
            },
        );
    }

    /// Center to raw space, semi axes swapped along with the axes
    fn raw_ellipse(&self, xc: i32, yc: i32, a: u32, b: u32) -> (i64, i64, u32, u32) {
        let (xc, yc) = self.raw_point(xc as i64, yc as i64);
        if self.orientation().contains(Orientation::AXES_SWAP) {
            (xc, yc, b, a)
        } else {
            (xc, yc, a, b)
        }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Ellipse outline with semi axes `a` (horizontal) and `b` (vertical),
    /// a zero semi axis draws a line
    pub fn ellipse(&mut self, xc: i32, yc: i32, a: u32, b: u32, pixel: Pixel) {
        let (xc, yc, a, b) = self.raw_ellipse(xc, yc, a, b);
        self.draw_ellipse(xc, yc, a, b, pixel);
    }

    pub fn ellipse_raw(&mut self, xc: i32, yc: i32, a: u32, b: u32, pixel: Pixel) {
        self.draw_ellipse(xc as i64, yc as i64, a, b, pixel);
    }

    pub fn fill_ellipse(&mut self, xc: i32, yc: i32, a: u32, b: u32, pixel: Pixel) {
        let (xc, yc, a, b) = self.raw_ellipse(xc, yc, a, b);
        self.draw_fill_ellipse(xc, yc, a, b, pixel);
    }

    pub fn fill_ellipse_raw(&mut self, xc: i32, yc: i32, a: u32, b: u32, pixel: Pixel) {
        self.draw_fill_ellipse(xc as i64, yc as i64, a, b, pixel);
    }
}

#[cfg(test)]
mod tests {
    use crate::gfx::testutil::{assert_grid, canvas, with_points};
    use crate::pixmap::Symmetry;

    #[test]
    fn test_ellipse() {
        let mut p = canvas(5, 3);
        p.ellipse(2, 1, 2, 1, 1);
        #[rustfmt::skip]
        let expected = [
            0, 1, 1, 1, 0,
            1, 0, 0, 0, 1,
            0, 1, 1, 1, 0,
        ];
        assert_grid(&p, &expected);
    }

    #[test]
    fn test_fill_ellipse() {
        let mut p = canvas(5, 3);
        p.fill_ellipse(2, 1, 2, 1, 1);
        #[rustfmt::skip]
        let expected = [
            0, 1, 1, 1, 0,
            1, 1, 1, 1, 1,
            0, 1, 1, 1, 0,
        ];
        assert_grid(&p, &expected);
    }

    #[test]
    fn test_ellipse_degenerate_axes() {
        let mut p = canvas(5, 5);
        p.ellipse(2, 2, 0, 1, 1);
        assert_grid(&p, &with_points(5, 5, &[(2, 1), (2, 2), (2, 3)]));

        let mut p = canvas(5, 5);
        p.fill_ellipse(2, 2, 2, 0, 1);
        assert_grid(&p, &with_points(5, 5, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]));

        let mut p = canvas(5, 5);
        p.ellipse(2, 2, 0, 0, 1);
        assert_grid(&p, &with_points(5, 5, &[(2, 2)]));
    }

    #[test]
    fn test_ellipse_equal_axes_is_circle() {
        let mut a = canvas(11, 11);
        a.ellipse(5, 5, 4, 4, 1);
        let mut b = canvas(11, 11);
        b.circle(5, 5, 4, 1);
        assert_grid(&a, b.data());
    }

    #[test]
    fn test_ellipse_on_rotated_pixmap() {
        let mut p = canvas(3, 5);
        p.rotate(Symmetry::Rotate90);
        p.ellipse(2, 1, 2, 1, 1);
        for (x, y) in [(1, 0), (2, 0), (3, 0), (0, 1), (4, 1), (1, 2), (2, 2), (3, 2)] {
            assert_eq!(p.get_pixel(x, y), 1, "{},{}", x, y);
        }
        assert_eq!(p.get_pixel(2, 1), 0);
    }

    #[test]
    fn test_ellipse_outside() {
        let mut p = canvas(4, 4);
        p.ellipse(i32::MAX, i32::MAX, u32::MAX, 3, 1);
        p.fill_ellipse(-100, 2, 50, 50, 1);
        assert!(p.data().iter().all(|b| *b == 0));
    }
}
