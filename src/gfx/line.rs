use crate::pixel::Pixel;
use crate::pixmap::Pixmap;

/// Round `num / den` to the nearest integer, halves up
#[inline]
fn div_round(num: i128, den: i128) -> i128 {
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    (2 * num + den).div_euclid(2 * den)
}

/// Cohen-Sutherland line clipping against a `w` x `h` buffer.
///
/// Intersections are always computed from the original endpoints with exact
/// rational arithmetic, so swapping the endpoints yields the same segment.
/// Returns `None` when nothing of the line is visible.
fn clip_line(
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    w: u32,
    h: u32,
) -> Option<(i64, i64, i64, i64)> {
    const INSIDE: u8 = 0;
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const BOTTOM: u8 = 4;
    const TOP: u8 = 8;
    // Each endpoint moves at most twice, anything longer is a corner graze
    const MAX_ITERATIONS: u32 = 16;

    let w = w as i64;
    let h = h as i64;
    if w == 0 || h == 0 {
        return None;
    }

    let outcode = |x: i64, y: i64| -> u8 {
        let mut code = INSIDE;
        if x < 0 {
            code |= LEFT;
        } else if x >= w {
            code |= RIGHT;
        }
        if y < 0 {
            code |= TOP;
        } else if y >= h {
            code |= BOTTOM;
        }
        code
    };

    let dx = x1 as i128 - x0 as i128;
    let dy = y1 as i128 - y0 as i128;

    // Point of the original line on row `y` or column `x`
    let x_at = |y: i64| (x0 as i128 + div_round(dx * (y as i128 - y0 as i128), dy)) as i64;
    let y_at = |x: i64| (y0 as i128 + div_round(dy * (x as i128 - x0 as i128), dx)) as i64;

    let (mut cx0, mut cy0, mut cx1, mut cy1) = (x0, y0, x1, y1);
    let mut code0 = outcode(cx0, cy0);
    let mut code1 = outcode(cx1, cy1);

    for _ in 0..MAX_ITERATIONS {
        if (code0 | code1) == 0 {
            return Some((cx0, cy0, cx1, cy1));
        }
        if (code0 & code1) != 0 {
            return None;
        }

        let code_out = if code0 != 0 { code0 } else { code1 };

        // An endpoint outside on an axis the line runs parallel to would
        // have been rejected above, the divisions below are safe
        let (x, y) = if (code_out & BOTTOM) != 0 {
            (x_at(h - 1), h - 1)
        } else if (code_out & TOP) != 0 {
            (x_at(0), 0)
        } else if (code_out & RIGHT) != 0 {
            (w - 1, y_at(w - 1))
        } else {
            (0, y_at(0))
        };

        if code_out == code0 {
            cx0 = x;
            cy0 = y;
            code0 = outcode(cx0, cy0);
        } else {
            cx1 = x;
            cy1 = y;
            code1 = outcode(cx1, cy1);
        }
    }

    None
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// Clipped line in raw coordinates.
    ///
    /// Bresenham walking in from both ends at once, so the pixel set does not
    /// depend on the order of the endpoints.
    pub(crate) fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, pixel: Pixel) {
        let Some((mut x0, mut y0, mut x1, mut y1)) =
            clip_line(x0, y0, x1, y1, self.raw_w(), self.raw_h())
        else {
            return;
        };

        if x0 == x1 && y0 == y1 {
            self.put_pixel_raw(x0 as i32, y0 as i32, pixel);
            return;
        }
        if x0 == x1 {
            self.draw_vline(x0, y0, y1, pixel);
            return;
        }
        if y0 == y1 {
            self.draw_hline(x0, x1, y0, pixel);
            return;
        }

        let steep = (y1 - y0).abs() >= (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let deltax = x1 - x0;
        let deltay = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut error = deltax / 2;
        let mut y = 0;

        for x in 0..=deltax / 2 {
            let (ax, ay, bx, by) = (x0 + x, y0 + y, x1 - x, y1 - y);
            if steep {
                self.put_pixel_raw(ay as i32, ax as i32, pixel);
                self.put_pixel_raw(by as i32, bx as i32, pixel);
            } else {
                self.put_pixel_raw(ax as i32, ay as i32, pixel);
                self.put_pixel_raw(bx as i32, by as i32, pixel);
            }

            error -= deltay;
            if error < 0 {
                y += ystep;
                error += deltax;
            }
        }
    }

    /// Line from `(x0, y0)` to `(x1, y1)`, both ends inclusive
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Pixel) {
        let (x0, y0) = self.raw_point(x0 as i64, y0 as i64);
        let (x1, y1) = self.raw_point(x1 as i64, y1 as i64);
        self.draw_line(x0, y0, x1, y1, pixel);
    }

    pub fn line_raw(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Pixel) {
        self.draw_line(x0 as i64, y0 as i64, x1 as i64, y1 as i64, pixel);
    }
}
