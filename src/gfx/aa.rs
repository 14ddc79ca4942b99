//! Antialiased primitives on 24.8 fixed point coordinates.
//!
//! Pixel `i` is the unit box centered on `i`, spanning `[i - 1/2, i + 1/2)`.
//! A primitive covers an area, every pixel it overlaps is mixed with the
//! background by the covered fraction: `mix = min(cov_x * cov_y >> 8, 255)`
//! with both coverages in 1/256 of a pixel. Pixels with zero coverage are
//! left alone.

use crate::gamma::Gamma;
use crate::gfx::fixed::{fp_floor_to_int, fp_from_int, Fp, FP_1, FP_1_2};
use crate::pixel::{Pixel, PixelFlags, PixelType};
use crate::pixmap::{Orientation, Pixmap};

/// Blend `fg` over `bg` by `mix / 255`, channel by channel.
///
/// With a gamma the blend happens on linear values. Palette pixels can not
/// be blended, the one with more weight wins.
pub fn mix_pixels(
    fg: Pixel,
    bg: Pixel,
    mix: u8,
    pixel_type: PixelType,
    gamma: Option<&Gamma>,
) -> Pixel {
    match mix {
        0 => return bg,
        255 => return fg,
        _ => {},
    }

    let desc = pixel_type.desc();
    if desc.flags.contains(PixelFlags::IS_PALETTE) {
        return if mix > 127 { fg } else { bg };
    }

    let m = mix as u32;
    let gamma = gamma.filter(|g| g.pixel_type() == pixel_type);

    desc.channels
        .iter()
        .enumerate()
        .fold(0, |out, (i, c)| {
            let (f, b) = (c.get(fg), c.get(bg));
            let v = match gamma {
                Some(g) => {
                    let lf = g.to_linear(i, f);
                    let lb = g.to_linear(i, b);
                    g.from_linear(i, (lf * m + lb * (255 - m)) / 255)
                },
                None => (f * m + b * (255 - m)) / 255,
            };
            c.set(out, v)
        })
}

/// Length of `[a, b]` inside pixel `i`, in 1/256 of a pixel
#[inline]
fn overlap(a: Fp, b: Fp, i: i64) -> Fp {
    let lo = fp_from_int(i) - FP_1_2;
    let hi = lo + FP_1;
    (b.min(hi) - a.max(lo)).max(0)
}

/// Index of the pixel holding `v`
#[inline]
fn pixel_of(v: Fp) -> i64 {
    fp_floor_to_int(v + FP_1_2)
}

#[inline]
fn coverage_mix(cov_x: Fp, cov_y: Fp) -> u8 {
    ((cov_x * cov_y) >> 8).min(255) as u8
}

/// `num / den` rounded to the nearest integer
#[inline]
fn div_round(num: i128, den: i128) -> i128 {
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    (2 * num + den).div_euclid(2 * den)
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// Blend `pixel` into raw `(x, y)` by `mix`, ignored when outside
    pub(crate) fn mix_pixel_raw(&mut self, x: i64, y: i64, pixel: Pixel, mix: u8) {
        if mix == 0 || !self.in_bounds_raw(x, y) {
            return;
        }
        let (x, y) = (x as i32, y as i32);
        let bg = self.get_pixel_raw(x, y);
        let p = mix_pixels(pixel, bg, mix, self.pixel_type(), self.gamma().map(|g| &**g));
        self.put_pixel_raw(x, y, p);
    }

    // ========================================================================
    // Raw workers
    // ========================================================================

    /// Mix every pixel overlapped by the area `[x0, x1] x [y0, y1]`
    pub(crate) fn draw_area_aa(&mut self, x0: Fp, y0: Fp, x1: Fp, y1: Fp, pixel: Pixel) {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        let first_x = pixel_of(x0).max(0);
        let last_x = pixel_of(x1).min(self.raw_w() as i64 - 1);
        let first_y = pixel_of(y0).max(0);
        let last_y = pixel_of(y1).min(self.raw_h() as i64 - 1);

        for y in first_y..=last_y {
            let cov_y = overlap(y0, y1, y);
            if cov_y == 0 {
                continue;
            }
            for x in first_x..=last_x {
                let cov_x = overlap(x0, x1, x);
                self.mix_pixel_raw(x, y, pixel, coverage_mix(cov_x, cov_y));
            }
        }
    }

    /// Wu style line: the major axis coverage comes from the segment extent,
    /// the minor axis is split between the two pixels around the line
    pub(crate) fn draw_line_aa(&mut self, x0: Fp, y0: Fp, x1: Fp, y1: Fp, pixel: Pixel) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();

        // Work as if x is the major axis
        let (mut a0, mut b0, mut a1, mut b1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if a0 > a1 {
            std::mem::swap(&mut a0, &mut a1);
            std::mem::swap(&mut b0, &mut b1);
        }

        let da = a1 - a0;
        let db = b1 - b0;
        if da == 0 {
            return;
        }

        let (major_len, minor_len) = if steep {
            (self.raw_h(), self.raw_w())
        } else {
            (self.raw_w(), self.raw_h())
        };
        let first = pixel_of(a0).max(0);
        let last = pixel_of(a1).min(major_len as i64 - 1);

        for i in first..=last {
            let cov = overlap(a0, a1, i);
            if cov == 0 {
                continue;
            }

            let b = b0 as i128 + div_round((fp_from_int(i) - a0) as i128 * db as i128, da as i128);
            let b = b as Fp;
            let j = fp_floor_to_int(b);
            if j < -1 || j >= minor_len as i64 {
                continue;
            }
            let frac = b - fp_from_int(j);

            for (j, weight) in [(j, FP_1 - frac), (j + 1, frac)] {
                let mix = coverage_mix(cov, weight);
                if steep {
                    self.mix_pixel_raw(j, i, pixel, mix);
                } else {
                    self.mix_pixel_raw(i, j, pixel, mix);
                }
            }
        }
    }

    // ========================================================================
    // Pixel
    // ========================================================================

    /// Unit square centered on `(x, y)`
    pub fn put_pixel_aa(&mut self, x: Fp, y: Fp, pixel: Pixel) {
        let (x, y) = self.raw_point_fp(x, y);
        self.put_pixel_aa_raw(x, y, pixel);
    }

    pub fn put_pixel_aa_raw(&mut self, x: Fp, y: Fp, pixel: Pixel) {
        self.draw_area_aa(x - FP_1_2, y - FP_1_2, x + FP_1_2, y + FP_1_2, pixel);
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// One pixel thick horizontal line from `x0` to `x1` centered on `y`
    pub fn hline_aa(&mut self, x0: Fp, x1: Fp, y: Fp, pixel: Pixel) {
        let (ax, ay) = self.raw_point_fp(x0, y);
        let (bx, by) = self.raw_point_fp(x1, y);
        if self.orientation().contains(Orientation::AXES_SWAP) {
            self.vline_aa_raw(ax, ay, by, pixel);
        } else {
            self.hline_aa_raw(ax, bx, ay, pixel);
        }
    }

    pub fn hline_aa_raw(&mut self, x0: Fp, x1: Fp, y: Fp, pixel: Pixel) {
        self.draw_area_aa(x0, y - FP_1_2, x1, y + FP_1_2, pixel);
    }

    /// One pixel thick vertical line from `y0` to `y1` centered on `x`
    pub fn vline_aa(&mut self, x: Fp, y0: Fp, y1: Fp, pixel: Pixel) {
        let (ax, ay) = self.raw_point_fp(x, y0);
        let (bx, by) = self.raw_point_fp(x, y1);
        if self.orientation().contains(Orientation::AXES_SWAP) {
            self.hline_aa_raw(ax, bx, ay, pixel);
        } else {
            self.vline_aa_raw(ax, ay, by, pixel);
        }
    }

    pub fn vline_aa_raw(&mut self, x: Fp, y0: Fp, y1: Fp, pixel: Pixel) {
        self.draw_area_aa(x - FP_1_2, y0, x + FP_1_2, y1, pixel);
    }

    /// Antialiased line, a zero length line draws nothing
    pub fn line_aa(&mut self, x0: Fp, y0: Fp, x1: Fp, y1: Fp, pixel: Pixel) {
        let (x0, y0) = self.raw_point_fp(x0, y0);
        let (x1, y1) = self.raw_point_fp(x1, y1);
        self.draw_line_aa(x0, y0, x1, y1, pixel);
    }

    pub fn line_aa_raw(&mut self, x0: Fp, y0: Fp, x1: Fp, y1: Fp, pixel: Pixel) {
        self.draw_line_aa(x0, y0, x1, y1, pixel);
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Filled rectangle between the pixel centers `(x0, y0)` and `(x1, y1)`,
    /// integer corners give the same result as [`fill_rect`](Self::fill_rect)
    pub fn fill_rect_aa(&mut self, x0: Fp, y0: Fp, x1: Fp, y1: Fp, pixel: Pixel) {
        let (x0, y0) = self.raw_point_fp(x0, y0);
        let (x1, y1) = self.raw_point_fp(x1, y1);
        self.fill_rect_aa_raw(x0, y0, x1, y1, pixel);
    }

    pub fn fill_rect_aa_raw(&mut self, x0: Fp, y0: Fp, x1: Fp, y1: Fp, pixel: Pixel) {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.draw_area_aa(x0 - FP_1_2, y0 - FP_1_2, x1 + FP_1_2, y1 + FP_1_2, pixel);
    }

    pub fn fill_rect_xywh_aa(&mut self, x: Fp, y: Fp, w: Fp, h: Fp, pixel: Pixel) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect_aa(x, y, x + w - FP_1, y + h - FP_1, pixel);
    }

    pub fn fill_rect_xywh_aa_raw(&mut self, x: Fp, y: Fp, w: Fp, h: Fp, pixel: Pixel) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect_aa_raw(x, y, x + w - FP_1, y + h - FP_1, pixel);
    }
}

impl<S: AsRef<[u8]>> Pixmap<S> {
    #[inline]
    fn raw_point_fp(&self, x: Fp, y: Fp) -> (Fp, Fp) {
        self.orientation()
            .transform_point_fp(x, y, self.raw_w(), self.raw_h())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::testutil::{assert_grid, canvas};
    use crate::pixmap::Symmetry;

    fn fp(v: f64) -> Fp {
        (v * FP_1 as f64) as Fp
    }

    /// 5x5 G8 canvas with a single `hline_aa`
    fn hline(x0: f64, x1: f64, y: f64) -> Pixmap {
        let mut p = canvas(5, 5);
        p.hline_aa(fp(x0), fp(x1), fp(y), 0xff);
        p
    }

    fn grid(cells: &[((usize, usize), u8)]) -> Vec<u8> {
        let mut g = vec![0; 25];
        for &((x, y), v) in cells {
            g[y * 5 + x] = v;
        }
        g
    }

    #[test]
    fn test_hline_aa_zero_length() {
        for (x, y) in [(1.0, 1.0), (1.5, 1.0), (1.0, 1.5), (1.5, 1.5), (1.0 + 1.0 / 256.0, 1.0)] {
            assert_grid(&hline(x, x, y), &[0; 25]);
        }
    }

    #[test]
    fn test_hline_aa_half_pixel() {
        assert_grid(&hline(1.0, 1.5, 1.0), &grid(&[((1, 1), 0x80)]));
        assert_grid(&hline(1.0, 1.5, 1.5), &grid(&[((1, 1), 0x40), ((1, 2), 0x40)]));
    }

    #[test]
    fn test_hline_aa_one_pixel() {
        assert_grid(&hline(1.0, 2.0, 1.0), &grid(&[((1, 1), 0x80), ((2, 1), 0x80)]));
        assert_grid(&hline(1.5, 2.5, 1.0), &grid(&[((2, 1), 0xff)]));
        assert_grid(
            &hline(1.0, 2.0, 1.5),
            &grid(&[((1, 1), 0x40), ((2, 1), 0x40), ((1, 2), 0x40), ((2, 2), 0x40)]),
        );
        assert_grid(&hline(1.5, 2.5, 1.5), &grid(&[((2, 1), 0x80), ((2, 2), 0x80)]));
    }

    #[test]
    fn test_hline_aa_long() {
        assert_grid(
            &hline(1.0, 4.0, 1.0),
            &grid(&[((1, 1), 0x80), ((2, 1), 0xff), ((3, 1), 0xff), ((4, 1), 0x80)]),
        );
        let mut cells = Vec::new();
        for y in [1, 2] {
            cells.extend([((1, y), 0x40), ((2, y), 0x80), ((3, y), 0x80), ((4, y), 0x40)]);
        }
        assert_grid(&hline(1.0, 4.0, 1.5), &grid(&cells));
    }

    #[test]
    fn test_hline_aa_clipped() {
        let mut p = canvas(5, 5);
        p.hline_aa(fp(-1000.0), Fp::from(i32::MAX) << 8, fp(0.0), 0xff);
        assert_grid(&p, &grid(&[((0, 0), 0xff), ((1, 0), 0xff), ((2, 0), 0xff), ((3, 0), 0xff), ((4, 0), 0xff)]));
    }

    #[test]
    fn test_vline_aa() {
        let mut p = canvas(5, 5);
        p.vline_aa(fp(1.0), fp(4.0), fp(1.0), 0xff);
        assert_grid(
            &p,
            &grid(&[((1, 1), 0x80), ((1, 2), 0xff), ((1, 3), 0xff), ((1, 4), 0x80)]),
        );
    }

    #[test]
    fn test_put_pixel_aa() {
        let mut p = canvas(5, 5);
        p.put_pixel_aa(fp(2.0), fp(3.0), 0xff);
        assert_grid(&p, &grid(&[((2, 3), 0xff)]));

        let mut p = canvas(5, 5);
        p.put_pixel_aa(fp(1.5), fp(1.5), 0xff);
        assert_grid(
            &p,
            &grid(&[((1, 1), 0x40), ((2, 1), 0x40), ((1, 2), 0x40), ((2, 2), 0x40)]),
        );
    }

    #[test]
    fn test_fill_rect_aa() {
        let mut a = canvas(5, 5);
        a.fill_rect_aa(fp(1.0), fp(1.0), fp(2.0), fp(3.0), 0xff);
        let mut b = canvas(5, 5);
        b.fill_rect(1, 1, 2, 3, 0xff);
        assert_grid(&a, b.data());

        let mut p = canvas(5, 5);
        p.fill_rect_aa(fp(1.5), fp(1.0), fp(2.5), fp(1.0), 0xff);
        assert_grid(&p, &grid(&[((1, 1), 0x80), ((2, 1), 0xff), ((3, 1), 0x80)]));

        let mut p = canvas(5, 5);
        p.fill_rect_xywh_aa(fp(1.0), fp(1.0), 0, fp(2.0), 0xff);
        assert_grid(&p, &[0; 25]);
    }

    #[test]
    fn test_line_aa_diagonal() {
        let mut p = canvas(5, 5);
        p.line_aa(fp(1.0), fp(1.0), fp(3.0), fp(3.0), 0xff);
        assert_grid(&p, &grid(&[((1, 1), 0x80), ((2, 2), 0xff), ((3, 3), 0x80)]));
    }

    #[test]
    fn test_line_aa_horizontal_matches_hline() {
        let mut p = canvas(5, 5);
        p.line_aa(fp(4.0), fp(1.0), fp(1.0), fp(1.0), 0xff);
        assert_grid(&p, hline(1.0, 4.0, 1.0).data());
    }

    #[test]
    fn test_line_aa_zero_length() {
        let mut p = canvas(5, 5);
        p.line_aa(fp(2.5), fp(2.5), fp(2.5), fp(2.5), 0xff);
        assert_grid(&p, &[0; 25]);
    }

    #[test]
    fn test_line_aa_symmetric() {
        let mut a = canvas(8, 8);
        a.line_aa(fp(0.5), fp(1.25), fp(6.75), fp(4.5), 0xff);
        let mut b = canvas(8, 8);
        b.line_aa(fp(6.75), fp(4.5), fp(0.5), fp(1.25), 0xff);
        assert_grid(&a, b.data());
    }

    #[test]
    fn test_line_aa_split_between_rows() {
        let mut p = canvas(5, 5);
        p.line_aa(fp(1.5), fp(1.5), fp(2.5), fp(1.5), 0xff);
        assert_grid(&p, &grid(&[((2, 1), 0x80), ((2, 2), 0x80)]));
    }

    #[test]
    fn test_hline_aa_on_rotated_pixmap() {
        let mut p = canvas(5, 5);
        p.rotate(Symmetry::Rotate90);
        p.hline_aa(fp(1.0), fp(4.0), fp(1.0), 0xff);
        assert_eq!(p.get_pixel(1, 1), 0x80);
        assert_eq!(p.get_pixel(2, 1), 0xff);
        assert_eq!(p.get_pixel(4, 1), 0x80);
        assert_eq!(p.get_pixel(2, 2), 0);
    }

    #[test]
    fn test_mix_pixels_rgb() {
        let t = PixelType::Rgb888;
        assert_eq!(mix_pixels(0xffffff, 0, 0x80, t, None), 0x808080);
        assert_eq!(mix_pixels(0xff0000, 0x0000ff, 0xff, t, None), 0xff0000);
        assert_eq!(mix_pixels(0xff0000, 0x0000ff, 0, t, None), 0x0000ff);
    }

    #[test]
    fn test_mix_pixels_gamma() {
        let g = Gamma::new(PixelType::G8, 2.2);
        let lin = mix_pixels(0xff, 0, 0x80, PixelType::G8, None);
        let gam = mix_pixels(0xff, 0, 0x80, PixelType::G8, Some(&g));
        assert_eq!(lin, 0x80);
        assert!(gam > lin, "{} <= {}", gam, lin);
    }

    #[test]
    fn test_mix_pixels_palette() {
        let t = PixelType::P8;
        assert_eq!(mix_pixels(5, 9, 200, t, None), 5);
        assert_eq!(mix_pixels(5, 9, 100, t, None), 9);
    }

    #[test]
    fn test_aa_uses_pixmap_gamma() {
        let mut p = canvas(3, 1);
        p.set_gamma(2.2);
        p.hline_aa(fp(0.0), fp(0.5), fp(0.0), 0xff);
        assert!(p.get_pixel(0, 0) > 0x80);
    }
}
