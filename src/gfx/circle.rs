//! Circles, filled circles and circle segments.
//!
//! All of them walk the same midpoint loop: starting at the top, `x` grows
//! until `x^2 + y^2 - r^2` turns non-negative, then `y` steps down a row.
//! The error terms are kept incrementally so the loop only adds.

use bitflags::bitflags;

use crate::pixel::Pixel;
use crate::pixmap::{Orientation, Pixmap};

bitflags! {
    /// Quadrants of a circle, in user space
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CircleSegments: u8 {
        /// Right and up
        const SEG1 = 0x01;
        /// Left and up
        const SEG2 = 0x02;
        /// Left and down
        const SEG3 = 0x04;
        /// Right and down
        const SEG4 = 0x08;
    }
}

impl CircleSegments {
    fn swapped(self, a: Self, b: Self) -> Self {
        let mut out = self - a - b;
        if self.contains(a) {
            out |= b;
        }
        if self.contains(b) {
            out |= a;
        }
        out
    }

    /// Segments as they land in a buffer with the given orientation
    pub fn to_raw(self, orientation: Orientation) -> Self {
        let mut segs = self;
        if orientation.contains(Orientation::AXES_SWAP) {
            segs = segs.swapped(Self::SEG1, Self::SEG3);
        }
        if orientation.contains(Orientation::X_SWAP) {
            segs = segs
                .swapped(Self::SEG1, Self::SEG2)
                .swapped(Self::SEG3, Self::SEG4);
        }
        if orientation.contains(Orientation::Y_SWAP) {
            segs = segs
                .swapped(Self::SEG1, Self::SEG4)
                .swapped(Self::SEG2, Self::SEG3);
        }
        segs
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// True when the box of a circle misses the buffer entirely
    fn circle_outside(&self, xc: i64, yc: i64, r: i64) -> bool {
        xc + r < 0 || yc + r < 0 || xc - r >= self.raw_w() as i64 || yc - r >= self.raw_h() as i64
    }

    // ========================================================================
    // Raw workers
    // ========================================================================

    pub(crate) fn draw_circle_seg(
        &mut self,
        xc: i64,
        yc: i64,
        r: i64,
        segs: CircleSegments,
        pixel: Pixel,
    ) {
        if r == 0 {
            if !segs.is_empty() {
                self.put_pixel_raw_clipped(xc, yc, pixel);
            }
            return;
        }

        let r = r.abs();
        if segs.is_empty() || self.circle_outside(xc, yc, r) {
            return;
        }

        let put4 = |p: &mut Self, x: i64, y: i64| {
            if segs.contains(CircleSegments::SEG2) {
                p.put_pixel_raw_clipped(xc - x, yc - y, pixel);
            }
            if segs.contains(CircleSegments::SEG1) {
                p.put_pixel_raw_clipped(xc + x, yc - y, pixel);
            }
            if segs.contains(CircleSegments::SEG3) {
                p.put_pixel_raw_clipped(xc - x, yc + y, pixel);
            }
            if segs.contains(CircleSegments::SEG4) {
                p.put_pixel_raw_clipped(xc + x, yc + y, pixel);
            }
        };

        let mut x = 0;
        let mut y = r;
        let mut error = -r;
        while y >= 0 {
            while error < 0 {
                error += 2 * x + 1;
                x += 1;
                put4(self, x - 1, y);
            }
            error += -2 * y + 1;
            put4(self, x - 1, y);
            y -= 1;
        }
    }

    pub(crate) fn draw_circle(&mut self, xc: i64, yc: i64, r: i64, pixel: Pixel) {
        self.draw_circle_seg(xc, yc, r, CircleSegments::all(), pixel);
    }

    pub(crate) fn draw_fill_circle(&mut self, xc: i64, yc: i64, r: i64, pixel: Pixel) {
        let r = r.abs();
        if self.circle_outside(xc, yc, r) {
            return;
        }

        let mut x = 0;
        let mut y = r;
        let mut error = -r;
        while y >= 0 {
            while error < 0 {
                error += 2 * x + 1;
                x += 1;
            }
            error += -2 * y + 1;
            self.draw_hline(xc - x + 1, xc + x - 1, yc - y, pixel);
            self.draw_hline(xc - x + 1, xc + x - 1, yc + y, pixel);
            y -= 1;
        }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Circle outline, a negative radius is taken as its absolute value
    pub fn circle(&mut self, xc: i32, yc: i32, r: i32, pixel: Pixel) {
        let (xc, yc) = self.raw_point(xc as i64, yc as i64);
        self.draw_circle(xc, yc, r as i64, pixel);
    }

    pub fn circle_raw(&mut self, xc: i32, yc: i32, r: i32, pixel: Pixel) {
        self.draw_circle(xc as i64, yc as i64, r as i64, pixel);
    }

    pub fn fill_circle(&mut self, xc: i32, yc: i32, r: i32, pixel: Pixel) {
        let (xc, yc) = self.raw_point(xc as i64, yc as i64);
        self.draw_fill_circle(xc, yc, r as i64, pixel);
    }

    pub fn fill_circle_raw(&mut self, xc: i32, yc: i32, r: i32, pixel: Pixel) {
        self.draw_fill_circle(xc as i64, yc as i64, r as i64, pixel);
    }

    /// Only the quadrants selected by `segs`
    pub fn circle_seg(&mut self, xc: i32, yc: i32, r: i32, segs: CircleSegments, pixel: Pixel) {
        let (xc, yc) = self.raw_point(xc as i64, yc as i64);
        let segs = segs.to_raw(self.orientation());
        self.draw_circle_seg(xc, yc, r as i64, segs, pixel);
    }

    pub fn circle_seg_raw(
        &mut self,
        xc: i32,
        yc: i32,
        r: i32,
        segs: CircleSegments,
        pixel: Pixel,
    ) {
        self.draw_circle_seg(xc as i64, yc as i64, r as i64, segs, pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::testutil::{assert_grid, canvas, with_points};
    use crate::pixmap::Symmetry;

    #[test]
    fn test_circle_r0() {
        let mut p = canvas(3, 3);
        p.circle(1, 1, 0, 1);
        assert_grid(&p, &with_points(3, 3, &[(1, 1)]));
    }

    #[test]
    fn test_circle_r1_diamond() {
        let mut p = canvas(5, 5);
        p.circle(2, 2, 1, 1);
        assert_grid(&p, &with_points(5, 5, &[(1, 2), (2, 1), (2, 3), (3, 2)]));
    }

    #[test]
    fn test_circle_r2() {
        let mut p = canvas(5, 5);
        p.circle(2, 2, 2, 1);
        #[rustfmt::skip]
        let expected = [
            0, 1, 1, 1, 0,
            1, 0, 0, 0, 1,
            1, 0, 0, 0, 1,
            1, 0, 0, 0, 1,
            0, 1, 1, 1, 0,
        ];
        assert_grid(&p, &expected);
    }

    #[test]
    fn test_circle_negative_radius() {
        let mut a = canvas(9, 9);
        a.circle(4, 4, -3, 1);
        let mut b = canvas(9, 9);
        b.circle(4, 4, 3, 1);
        assert_grid(&a, b.data());
    }

    #[test]
    fn test_fill_circle_r2() {
        let mut p = canvas(5, 5);
        p.fill_circle(2, 2, 2, 1);
        #[rustfmt::skip]
        let expected = [
            0, 1, 1, 1, 0,
            1, 1, 1, 1, 1,
            1, 1, 1, 1, 1,
            1, 1, 1, 1, 1,
            0, 1, 1, 1, 0,
        ];
        assert_grid(&p, &expected);
    }

    #[test]
    fn test_circle_clipped() {
        let mut p = canvas(5, 5);
        p.circle(0, 0, 2, 1);
        assert_grid(&p, &with_points(5, 5, &[(2, 0), (2, 1), (1, 2), (0, 2)]));

        let mut p = canvas(5, 5);
        p.circle(i32::MIN, i32::MIN, 10, 1);
        p.fill_circle(i32::MAX, 2, 3, 1);
        assert_grid(&p, &[0; 25]);
    }

    #[test]
    fn test_circle_seg() {
        let mut p = canvas(5, 5);
        p.circle_seg(2, 2, 2, CircleSegments::SEG1, 1);
        assert_grid(&p, &with_points(5, 5, &[(2, 0), (3, 0), (4, 1), (4, 2)]));

        let mut p = canvas(5, 5);
        p.circle_seg(2, 2, 2, CircleSegments::empty(), 1);
        p.circle_seg(2, 2, 0, CircleSegments::empty(), 1);
        assert_grid(&p, &[0; 25]);
    }

    #[test]
    fn test_circle_seg_all_is_circle() {
        let mut a = canvas(9, 9);
        a.circle_seg(4, 4, 4, CircleSegments::all(), 1);
        let mut b = canvas(9, 9);
        b.circle(4, 4, 4, 1);
        assert_grid(&a, b.data());
    }

    #[test]
    fn test_circle_seg_follows_orientation() {
        for sym in [Symmetry::MirrorV, Symmetry::MirrorH, Symmetry::Rotate90, Symmetry::Rotate270] {
            let mut p = canvas(5, 5);
            p.rotate(sym);
            p.circle_seg(2, 2, 2, CircleSegments::SEG1, 1);
            for (x, y) in [(2, 0), (3, 0), (4, 1), (4, 2)] {
                assert_eq!(p.get_pixel(x, y), 1, "{:?} {},{}", sym, x, y);
            }
            assert_eq!(p.get_pixel(1, 0), 0, "{:?}", sym);
            assert_eq!(p.get_pixel(3, 4), 0, "{:?}", sym);
        }
    }

    #[test]
    fn test_segments_to_raw() {
        let s = CircleSegments::SEG1 | CircleSegments::SEG4;
        assert_eq!(s.to_raw(Orientation::empty()), s);
        assert_eq!(
            s.to_raw(Orientation::X_SWAP),
            CircleSegments::SEG2 | CircleSegments::SEG3
        );
        assert_eq!(
            CircleSegments::SEG1.to_raw(Orientation::AXES_SWAP),
            CircleSegments::SEG3
        );
    }
}
