//! Rectangle copies between pixmaps.
//!
//! All variants are methods of the destination. Rectangles are given as
//! inclusive corners (`xyxy`) or origin and size (`xywh`). The checked
//! variants refuse rectangles that do not fit, the `_clipped` ones trim the
//! rectangle against both pixmaps, and the `_raw` ones ignore orientation.
//! Pixels are converted when the pixel types differ.

use log::debug;

use crate::error::{Error, Result};
use crate::pixel::PixelType;
use crate::pixmap::{CopyFlags, Pixmap};

/// Normalized inclusive source rectangle and destination origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlitRect {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
}

impl BlitRect {
    fn new(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y1 < y0 { (y1, y0) } else { (y0, y1) };
        Self {
            x0: x0 as i64,
            y0: y0 as i64,
            x1: x1 as i64,
            y1: y1 as i64,
            x2: x2 as i64,
            y2: y2 as i64,
        }
    }

    fn fits(&self, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> bool {
        self.x0 >= 0
            && self.y0 >= 0
            && self.x1 < src_w as i64
            && self.y1 < src_h as i64
            && self.x2 >= 0
            && self.y2 >= 0
            && self.x2 + (self.x1 - self.x0) < dst_w as i64
            && self.y2 + (self.y1 - self.y0) < dst_h as i64
    }

    fn out_of_bounds(&self) -> Error {
        Error::BlitOutOfBounds {
            x0: self.x0 as i32,
            y0: self.y0 as i32,
            x1: self.x1 as i32,
            y1: self.y1 as i32,
        }
    }

    /// Trim against a `src_w` x `src_h` source and a `dst_w` x `dst_h`
    /// destination, `None` when nothing is left
    fn clip(mut self, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Option<Self> {
        if self.x2 >= dst_w as i64 || self.y2 >= dst_h as i64 {
            return None;
        }

        if self.x2 < 0 {
            self.x0 -= self.x2;
            self.x2 = 0;
        }
        if self.y2 < 0 {
            self.y0 -= self.y2;
            self.y2 = 0;
        }

        // The source origin is clamped on its own, the destination stays put
        self.x0 = self.x0.max(0);
        self.y0 = self.y0.max(0);
        self.x1 = self.x1.min(src_w as i64 - 1);
        self.y1 = self.y1.min(src_h as i64 - 1);

        if self.x0 > self.x1 || self.y0 > self.y1 {
            return None;
        }

        let src_w = self.x1 - self.x0 + 1;
        let src_h = self.y1 - self.y0 + 1;
        let avail_w = dst_w as i64 - self.x2;
        let avail_h = dst_h as i64 - self.y2;

        debug!(
            "Blitting {}x{}, available {}x{}",
            src_w, src_h, avail_w, avail_h
        );

        if src_w > avail_w {
            self.x1 -= src_w - avail_w;
        }
        if src_h > avail_h {
            self.y1 -= src_h - avail_h;
        }

        Some(self)
    }
}

/// xywh to xyxy, `None` for an empty rectangle
fn xywh(x: i32, y: i32, w: u32, h: u32) -> Option<(i32, i32, i32, i32)> {
    if w == 0 || h == 0 {
        return None;
    }
    let x1 = (x as i64 + w as i64 - 1).min(i32::MAX as i64) as i32;
    let y1 = (y as i64 + h as i64 - 1).min(i32::MAX as i64) as i32;
    Some((x, y, x1, y1))
}

impl<D: AsRef<[u8]> + AsMut<[u8]>> Pixmap<D> {
    // ========================================================================
    // Copy loops
    // ========================================================================

    /// Copy a rectangle already known to fit, in raw coordinates
    fn blit_rect_raw<S: AsRef<[u8]>>(&mut self, src: &Pixmap<S>, r: BlitRect) {
        let w = (r.x1 - r.x0 + 1) as usize;
        let bpp = src.bpp() as usize;
        let same_type = src.pixel_type() == self.pixel_type();

        let aligned = same_type
            && bpp % 8 == 0
            && src.offset() == 0
            && self.offset() == 0;

        if aligned {
            let len = w * bpp / 8;
            for row in 0..=(r.y1 - r.y0) as usize {
                let s = (r.y0 as usize + row) * src.bytes_per_row() + r.x0 as usize * bpp / 8;
                let d = (r.y2 as usize + row) * self.bytes_per_row() + r.x2 as usize * bpp / 8;
                self.data_mut()[d..d + len].copy_from_slice(&src.data()[s..s + len]);
            }
            return;
        }

        let (from, to) = (src.pixel_type(), self.pixel_type());
        for row in 0..=(r.y1 - r.y0) as i32 {
            for col in 0..w as i32 {
                let p = src.get_pixel_raw(r.x0 as i32 + col, r.y0 as i32 + row);
                let p = from.convert_pixel(p, to);
                self.put_pixel_raw(r.x2 as i32 + col, r.y2 as i32 + row, p);
            }
        }
    }

    /// Copy a rectangle already known to fit, in user coordinates
    fn blit_rect<S: AsRef<[u8]>>(&mut self, src: &Pixmap<S>, r: BlitRect) {
        if src.orientation().is_empty() && self.orientation().is_empty() {
            self.blit_rect_raw(src, r);
            return;
        }

        let (from, to) = (src.pixel_type(), self.pixel_type());
        for row in 0..=(r.y1 - r.y0) as i32 {
            for col in 0..=(r.x1 - r.x0) as i32 {
                let p = src.get_pixel(r.x0 as i32 + col, r.y0 as i32 + row);
                let p = from.convert_pixel(p, to);
                self.put_pixel(r.x2 as i32 + col, r.y2 as i32 + row, p);
            }
        }
    }

    // ========================================================================
    // Checked
    // ========================================================================

    /// Copy the inclusive rectangle `(x0, y0)-(x1, y1)` of `src` to `(x2, y2)`
    pub fn blit_xyxy<S: AsRef<[u8]>>(
        &mut self,
        src: &Pixmap<S>,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Result<()> {
        let r = BlitRect::new(x0, y0, x1, y1, x2, y2);
        if !r.fits(src.w(), src.h(), self.w(), self.h()) {
            return Err(r.out_of_bounds());
        }
        self.blit_rect(src, r);
        Ok(())
    }

    pub fn blit_xywh<S: AsRef<[u8]>>(
        &mut self,
        src: &Pixmap<S>,
        x0: i32,
        y0: i32,
        w0: u32,
        h0: u32,
        x1: i32,
        y1: i32,
    ) -> Result<()> {
        match xywh(x0, y0, w0, h0) {
            Some((x0, y0, xe, ye)) => self.blit_xyxy(src, x0, y0, xe, ye, x1, y1),
            None => Ok(()),
        }
    }

    /// Copy the whole of `src` to `(x, y)`
    pub fn blit<S: AsRef<[u8]>>(&mut self, src: &Pixmap<S>, x: i32, y: i32) -> Result<()> {
        self.blit_xywh(src, 0, 0, src.w(), src.h(), x, y)
    }

    // ========================================================================
    // Clipped
    // ========================================================================

    /// Like [`blit_xyxy`](Self::blit_xyxy), trimming whatever falls outside
    /// of either pixmap
    pub fn blit_xyxy_clipped<S: AsRef<[u8]>>(
        &mut self,
        src: &Pixmap<S>,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) {
        let r = BlitRect::new(x0, y0, x1, y1, x2, y2);
        if let Some(r) = r.clip(src.w(), src.h(), self.w(), self.h()) {
            self.blit_rect(src, r);
        }
    }

    pub fn blit_xywh_clipped<S: AsRef<[u8]>>(
        &mut self,
        src: &Pixmap<S>,
        x0: i32,
        y0: i32,
        w0: u32,
        h0: u32,
        x1: i32,
        y1: i32,
    ) {
        if let Some((x0, y0, xe, ye)) = xywh(x0, y0, w0, h0) {
            self.blit_xyxy_clipped(src, x0, y0, xe, ye, x1, y1);
        }
    }

    // ========================================================================
    // Raw
    // ========================================================================

    /// Like [`blit_xyxy`](Self::blit_xyxy) in stored coordinates, ignoring
    /// the orientation of both pixmaps
    pub fn blit_xyxy_raw<S: AsRef<[u8]>>(
        &mut self,
        src: &Pixmap<S>,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Result<()> {
        let r = BlitRect::new(x0, y0, x1, y1, x2, y2);
        if !r.fits(src.raw_w(), src.raw_h(), self.raw_w(), self.raw_h()) {
            return Err(r.out_of_bounds());
        }
        self.blit_rect_raw(src, r);
        Ok(())
    }

    pub fn blit_xywh_raw<S: AsRef<[u8]>>(
        &mut self,
        src: &Pixmap<S>,
        x0: i32,
        y0: i32,
        w0: u32,
        h0: u32,
        x2: i32,
        y2: i32,
    ) -> Result<()> {
        match xywh(x0, y0, w0, h0) {
            Some((x0, y0, xe, ye)) => self.blit_xyxy_raw(src, x0, y0, xe, ye, x2, y2),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Conversion
// ============================================================================

impl<S: AsRef<[u8]>> Pixmap<S> {
    /// Allocate a pixmap of another pixel type holding the same image.
    ///
    /// The result has the user size of `self` and no orientation.
    pub fn convert(&self, pixel_type: PixelType) -> Result<Pixmap> {
        if pixel_type == self.pixel_type() && self.orientation().is_empty() {
            return self.copy(CopyFlags::PIXELS);
        }

        let mut dst = Pixmap::alloc(self.w(), self.h(), pixel_type)?;
        dst.blit(self, 0, 0)?;
        Ok(dst)
    }

    /// Convert into an existing pixmap, clearing it first.
    ///
    /// Only the overlapping part is written when the sizes differ.
    pub fn convert_into<D: AsRef<[u8]> + AsMut<[u8]>>(&self, dst: &mut Pixmap<D>) {
        dst.fill(0);
        dst.blit_xywh_clipped(self, 0, 0, self.w(), self.h(), 0, 0);
    }
}
