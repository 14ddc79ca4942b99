use crate::pixel::Pixel;
use crate::pixmap::Pixmap;

/// xywh to inclusive corners, `None` when empty
#[inline]
fn corners(x: i32, y: i32, w: u32, h: u32) -> Option<(i64, i64, i64, i64)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (x, y) = (x as i64, y as i64);
    Some((x, y, x + w as i64 - 1, y + h as i64 - 1))
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    pub(crate) fn draw_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, pixel: Pixel) {
        self.draw_hline(x0, x1, y0, pixel);
        self.draw_hline(x0, x1, y1, pixel);
        self.draw_vline(x0, y0, y1, pixel);
        self.draw_vline(x1, y0, y1, pixel);
    }

    pub(crate) fn draw_fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, pixel: Pixel) {
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let first = y0.max(0);
        let last = y1.min(self.raw_h() as i64 - 1);
        for y in first..=last {
            self.draw_hline(x0, x1, y, pixel);
        }
    }

    /// Corners mapped to raw space, rectangles stay rectangles under any
    /// orientation
    fn raw_corners(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> (i64, i64, i64, i64) {
        let (x0, y0) = self.raw_point(x0, y0);
        let (x1, y1) = self.raw_point(x1, y1);
        (x0, y0, x1, y1)
    }

    // ========================================================================
    // Outline
    // ========================================================================

    /// Rectangle outline with inclusive corners
    pub fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Pixel) {
        let (x0, y0, x1, y1) = self.raw_corners(x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        self.draw_rect(x0, y0, x1, y1, pixel);
    }

    pub fn rect_xywh(&mut self, x: i32, y: i32, w: u32, h: u32, pixel: Pixel) {
        if let Some((x0, y0, x1, y1)) = corners(x, y, w, h) {
            let (x0, y0, x1, y1) = self.raw_corners(x0, y0, x1, y1);
            self.draw_rect(x0, y0, x1, y1, pixel);
        }
    }

    pub fn rect_raw(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Pixel) {
        self.draw_rect(x0 as i64, y0 as i64, x1 as i64, y1 as i64, pixel);
    }

    // ========================================================================
    // Filled
    // ========================================================================

    /// Filled rectangle with inclusive corners
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Pixel) {
        let (x0, y0, x1, y1) = self.raw_corners(x0 as i64, y0 as i64, x1 as i64, y1 as i64);
        self.draw_fill_rect(x0, y0, x1, y1, pixel);
    }

    pub fn fill_rect_xywh(&mut self, x: i32, y: i32, w: u32, h: u32, pixel: Pixel) {
        if let Some((x0, y0, x1, y1)) = corners(x, y, w, h) {
            let (x0, y0, x1, y1) = self.raw_corners(x0, y0, x1, y1);
            self.draw_fill_rect(x0, y0, x1, y1, pixel);
        }
    }

    pub fn fill_rect_raw(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Pixel) {
        self.draw_fill_rect(x0 as i64, y0 as i64, x1 as i64, y1 as i64, pixel);
    }
}
