use crate::pixel::Pixel;
use crate::pixmap::{Orientation, Pixmap};

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    // ========================================================================
    // Raw workers
    // ========================================================================

    /// Horizontal run `x0..=x1` on raw row `y`, clipped
    pub(crate) fn draw_hline(&mut self, x0: i64, x1: i64, y: i64, pixel: Pixel) {
        if y < 0 || y >= self.raw_h() as i64 {
            return;
        }
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let start = x0.max(0);
        let end = x1.min(self.raw_w() as i64 - 1);
        if start > end {
            return;
        }

        let bpp = self.bpp() as usize;
        if bpp % 8 == 0 && self.offset() == 0 {
            // Compute the byte range once and stamp the pattern
            let psize = bpp / 8;
            let pattern = pixel.to_le_bytes();
            let first = y as usize * self.bytes_per_row() + start as usize * psize;
            let last = first + (end - start + 1) as usize * psize;
            for chunk in self.data_mut()[first..last].chunks_exact_mut(psize) {
                chunk.copy_from_slice(&pattern[..psize]);
            }
            return;
        }

        for x in start..=end {
            self.put_pixel_raw(x as i32, y as i32, pixel);
        }
    }

    /// Vertical run `y0..=y1` on raw column `x`, clipped
    pub(crate) fn draw_vline(&mut self, x: i64, y0: i64, y1: i64, pixel: Pixel) {
        if x < 0 || x >= self.raw_w() as i64 {
            return;
        }
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let start = y0.max(0);
        let end = y1.min(self.raw_h() as i64 - 1);

        for y in start..=end {
            self.put_pixel_raw(x as i32, y as i32, pixel);
        }
    }

    /// User space horizontal line, a vertical one in the buffer when the
    /// axes are swapped
    fn user_hline(&mut self, x0: i64, x1: i64, y: i64, pixel: Pixel) {
        let (ax, ay) = self.raw_point(x0, y);
        let (bx, by) = self.raw_point(x1, y);
        if self.orientation().contains(Orientation::AXES_SWAP) {
            self.draw_vline(ax, ay, by, pixel);
        } else {
            self.draw_hline(ax, bx, ay, pixel);
        }
    }

    fn user_vline(&mut self, x: i64, y0: i64, y1: i64, pixel: Pixel) {
        let (ax, ay) = self.raw_point(x, y0);
        let (bx, by) = self.raw_point(x, y1);
        if self.orientation().contains(Orientation::AXES_SWAP) {
            self.draw_hline(ax, bx, ay, pixel);
        } else {
            self.draw_vline(ax, ay, by, pixel);
        }
    }

    // ========================================================================
    // Horizontal
    // ========================================================================

    /// Horizontal line from `x0` to `x1` inclusive
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, pixel: Pixel) {
        self.user_hline(x0 as i64, x1 as i64, y as i64, pixel);
    }

    /// Horizontal line of `w` pixels starting at `x`
    pub fn hline_xyw(&mut self, x: i32, y: i32, w: u32, pixel: Pixel) {
        if w == 0 {
            return;
        }
        self.user_hline(x as i64, x as i64 + w as i64 - 1, y as i64, pixel);
    }

    pub fn hline_raw(&mut self, x0: i32, x1: i32, y: i32, pixel: Pixel) {
        self.draw_hline(x0 as i64, x1 as i64, y as i64, pixel);
    }

    // ========================================================================
    // Vertical
    // ========================================================================

    /// Vertical line from `y0` to `y1` inclusive
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, pixel: Pixel) {
        self.user_vline(x as i64, y0 as i64, y1 as i64, pixel);
    }

    /// Vertical line of `h` pixels starting at `y`
    pub fn vline_xyh(&mut self, x: i32, y: i32, h: u32, pixel: Pixel) {
        if h == 0 {
            return;
        }
        self.user_vline(x as i64, y as i64, y as i64 + h as i64 - 1, pixel);
    }

    pub fn vline_raw(&mut self, x: i32, y0: i32, y1: i32, pixel: Pixel) {
        self.draw_vline(x as i64, y0 as i64, y1 as i64, pixel);
    }
}

#[cfg(test)]
mod tests {
    use crate::gfx::testutil::{assert_grid, canvas, with_points};
    use crate::pixel::PixelType;
    use crate::pixmap::{Pixmap, Symmetry};

    #[test]
    fn test_hline_clipped() {
        let mut p = canvas(5, 3);
        p.hline(-10, 2, 1, 1);
        p.hline(3, 100, 1, 1);
        p.hline(0, 4, -1, 1);
        p.hline(0, 4, 3, 1);
        assert_grid(&p, &with_points(5, 3, &[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]));
    }

    #[test]
    fn test_hline_reversed_endpoints() {
        let mut p = canvas(5, 1);
        p.hline(3, 1, 0, 1);
        assert_grid(&p, &[0, 1, 1, 1, 0]);
    }

    #[test]
    fn test_hline_extreme() {
        let mut p = canvas(3, 1);
        p.hline(i32::MIN, i32::MAX, 0, 1);
        assert_grid(&p, &[1, 1, 1]);
        let mut p = canvas(3, 1);
        p.hline_xyw(i32::MAX, 0, u32::MAX, 1);
        p.hline_xyw(0, 0, 0, 1);
        assert_grid(&p, &[0, 0, 0]);
    }

    #[test]
    fn test_hline_sub_byte() {
        let mut p = Pixmap::alloc(12, 1, PixelType::G1).unwrap();
        p.hline(2, 9, 0, 1);
        assert_eq!(p.data(), &[0x3f, 0xc0]);
    }

    #[test]
    fn test_hline_rgb888() {
        let mut p = Pixmap::alloc(3, 1, PixelType::Rgb888).unwrap();
        p.hline_xyw(1, 0, 2, 0x0a0b0c);
        assert_eq!(p.data(), &[0, 0, 0, 0x0c, 0x0b, 0x0a, 0x0c, 0x0b, 0x0a]);
    }

    #[test]
    fn test_vline() {
        let mut p = canvas(3, 4);
        p.vline(1, 5, -3, 1);
        p.vline_xyh(2, 3, 1, 1);
        p.vline(-1, 0, 3, 1);
        assert_grid(&p, &with_points(3, 4, &[(1, 0), (1, 1), (1, 2), (1, 3), (2, 3)]));
    }

    #[test]
    fn test_hline_on_rotated_pixmap() {
        let mut p = canvas(2, 3);
        p.rotate(Symmetry::Rotate90);
        assert_eq!((p.w(), p.h()), (3, 2));
        p.hline(0, 2, 0, 1);
        // user row 0 is the last raw column
        assert_grid(&p, &[0, 1, 0, 1, 0, 1]);
    }
}
