//! The pixmap: a byte buffer interpreted through a [`PixelType`].
//!
//! [`Pixmap`] is generic over its storage. An allocated pixmap owns a
//! `Vec<u8>`, a sub-pixmap borrows a slice of its parent's buffer and keeps
//! the parent's row stride. The borrow checker makes sure a view never
//! outlives the buffer it looks at.

mod access;
pub(crate) mod bits;
mod fill;
pub mod transform;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::gamma::Gamma;
use crate::pixel::PixelType;

pub use transform::{Orientation, Symmetry};

/// Mutable view into a parent pixmap
pub type SubPixmap<'a> = Pixmap<&'a mut [u8]>;

/// Read-only view into a parent pixmap
pub type SubPixmapRef<'a> = Pixmap<&'a [u8]>;

bitflags! {
    /// What [`Pixmap::copy`] carries over
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CopyFlags: u8 {
        const PIXELS = 0x01;
        const ROTATION = 0x02;
        const GAMMA = 0x04;
    }
}

pub struct Pixmap<S = Vec<u8>> {
    pixels: S,
    w: u32,
    h: u32,
    bytes_per_row: usize,
    offset: u8,
    pixel_type: PixelType,
    orientation: Orientation,
    gamma: Option<Arc<Gamma>>,
}

/// Bytes a `w` x `h` buffer with the given stride must hold
fn required_len(pixel_type: PixelType, w: u32, h: u32, stride: usize) -> usize {
    if w == 0 || h == 0 {
        return 0;
    }
    (h as usize - 1) * stride + bits::row_span(0, pixel_type.bpp(), w)
}

fn min_stride(pixel_type: PixelType, w: u32, h: u32) -> Result<usize> {
    if pixel_type == PixelType::Unknown {
        return Err(Error::UnknownPixelType(pixel_type));
    }
    pixel_type.row_bytes(w).ok_or(Error::TooLarge { w, h, pixel_type })
}

// ============================================================================
// Owned pixmaps
// ============================================================================

impl Pixmap<Vec<u8>> {
    /// Allocate a zeroed pixmap.
    ///
    /// A zero width or height is valid and yields an empty buffer.
    pub fn alloc(w: u32, h: u32, pixel_type: PixelType) -> Result<Self> {
        let bpr = min_stride(pixel_type, w, h)?;
        Self::alloc_with_stride(w, h, pixel_type, bpr)
    }

    /// Allocate a zeroed pixmap with an explicit row stride
    pub fn alloc_with_stride(w: u32, h: u32, pixel_type: PixelType, stride: usize) -> Result<Self> {
        let min = min_stride(pixel_type, w, h)?;
        if stride < min {
            return Err(Error::InvalidStride { stride, min });
        }
        let size = if w == 0 {
            0
        } else {
            stride
                .checked_mul(h as usize)
                .ok_or(Error::TooLarge { w, h, pixel_type })?
        };

        debug!(
            "Allocating pixmap {}x{} {} bpr {} ({} bytes)",
            w, h, pixel_type, stride, size
        );

        Ok(Self::from_parts(vec![0; size], w, h, stride, 0, pixel_type))
    }

    /// Change the size, reallocating the buffer.
    ///
    /// The raw bytes are kept as far as they fit, rows are not re-laid out.
    pub fn resize(&mut self, w: u32, h: u32) -> Result<()> {
        let bpr = min_stride(self.pixel_type, w, h)?;
        let size = bpr.checked_mul(h as usize).ok_or(Error::TooLarge {
            w,
            h,
            pixel_type: self.pixel_type,
        })?;

        debug!("Resizing pixmap {}x{} -> {}x{}", self.w, self.h, w, h);

        self.pixels.resize(size, 0);
        self.w = w;
        self.h = h;
        self.bytes_per_row = bpr;
        Ok(())
    }

    pub fn into_data(self) -> Vec<u8> {
        self.pixels
    }
}

// ============================================================================
// Common accessors
// ============================================================================

impl<S: AsRef<[u8]>> Pixmap<S> {
    fn from_parts(pixels: S, w: u32, h: u32, bpr: usize, offset: u8, pixel_type: PixelType) -> Self {
        Self {
            pixels,
            w,
            h,
            bytes_per_row: if w == 0 { 0 } else { bpr },
            offset,
            pixel_type,
            orientation: Orientation::empty(),
            gamma: None,
        }
    }

    /// Wrap existing memory without copying it.
    ///
    /// Ownership follows the storage: a `Vec<u8>` is owned and dropped with
    /// the pixmap, a slice stays owned by the caller.
    pub fn from_data(w: u32, h: u32, pixel_type: PixelType, data: S) -> Result<Self> {
        let bpr = min_stride(pixel_type, w, h)?;
        Self::from_data_with_stride(w, h, pixel_type, bpr, data)
    }

    pub fn from_data_with_stride(
        w: u32,
        h: u32,
        pixel_type: PixelType,
        stride: usize,
        data: S,
    ) -> Result<Self> {
        let min = min_stride(pixel_type, w, h)?;
        if stride < min {
            return Err(Error::InvalidStride { stride, min });
        }
        let needed = required_len(pixel_type, w, h, stride);
        let len = data.as_ref().len();
        if len < needed {
            return Err(Error::DataTooSmall { len, needed });
        }
        Ok(Self::from_parts(data, w, h, stride, 0, pixel_type))
    }

    /// Width as seen through the orientation
    #[inline]
    pub fn w(&self) -> u32 {
        self.orientation.user_size(self.w, self.h).0
    }

    /// Height as seen through the orientation
    #[inline]
    pub fn h(&self) -> u32 {
        self.orientation.user_size(self.w, self.h).1
    }

    /// Stored width, ignoring the orientation
    #[inline]
    pub fn raw_w(&self) -> u32 {
        self.w
    }

    #[inline]
    pub fn raw_h(&self) -> u32 {
        self.h
    }

    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Bit offset of the first pixel inside its byte
    #[inline]
    pub fn offset(&self) -> u8 {
        self.offset
    }

    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    #[inline]
    pub fn bpp(&self) -> u8 {
        self.pixel_type.bpp()
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn gamma(&self) -> Option<&Arc<Gamma>> {
        self.gamma.as_ref()
    }

    /// Buffer starting at the byte holding pixel (0, 0)
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pixels.as_ref()
    }

    /// Bytes of raw row `y`, including the partial bytes at both ends
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.bytes_per_row;
        let len = bits::row_span(self.offset, self.bpp(), self.w);
        &self.pixels.as_ref()[start..start + len]
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn rotate(&mut self, symmetry: Symmetry) {
        self.orientation = self.orientation.rotated(symmetry);
        trace!("Pixmap rotated {:?} -> {:?}", symmetry, self.orientation);
    }

    /// Install gamma correction tables for this pixmap's pixel type
    pub fn set_gamma(&mut self, gamma: f32) {
        self.gamma = Some(Arc::new(Gamma::new(self.pixel_type, gamma)));
    }

    pub fn clear_gamma(&mut self) {
        self.gamma = None;
    }

    // ========================================================================
    // Sub-pixmaps
    // ========================================================================

    /// Byte start, bit offset and raw size of a user rectangle
    fn sub_geometry(&self, x: i32, y: i32, w: u32, h: u32) -> Result<(usize, u8, u32, u32)> {
        let (rx, ry, rw, rh) =
            self.orientation
                .transform_rect(x as i64, y as i64, w, h, self.w, self.h);

        if rx < 0 || ry < 0 || rx + rw as i64 > self.w as i64 || ry + rh as i64 > self.h as i64 {
            return Err(Error::SubPixmapOutOfBounds {
                x,
                y,
                w,
                h,
                parent_w: self.w(),
                parent_h: self.h(),
            });
        }

        let (byte, offset) = bits::bit_position(
            self.bytes_per_row,
            self.offset,
            self.bpp(),
            rx as usize,
            ry as usize,
        );
        let start = byte.min(self.pixels.as_ref().len());

        trace!(
            "Sub-pixmap {},{} {}x{} -> byte {} offset {}",
            rx,
            ry,
            rw,
            rh,
            start,
            offset
        );

        Ok((start, offset, rw, rh))
    }

    fn view<T: AsRef<[u8]>>(&self, pixels: T, offset: u8, w: u32, h: u32) -> Pixmap<T> {
        Pixmap {
            pixels,
            w,
            h,
            bytes_per_row: self.bytes_per_row,
            offset,
            pixel_type: self.pixel_type,
            orientation: self.orientation,
            gamma: self.gamma.clone(),
        }
    }

    /// Read-only view of a rectangle given in user coordinates
    pub fn sub_pixmap(&self, x: i32, y: i32, w: u32, h: u32) -> Result<SubPixmapRef<'_>> {
        let (start, offset, rw, rh) = self.sub_geometry(x, y, w, h)?;
        Ok(self.view(&self.pixels.as_ref()[start..], offset, rw, rh))
    }

    /// Borrow the whole pixmap as a read-only view
    pub fn as_view(&self) -> SubPixmapRef<'_> {
        self.view(self.pixels.as_ref(), self.offset, self.w, self.h)
    }

    // ========================================================================
    // Whole pixmap operations
    // ========================================================================

    /// Copy into a freshly allocated, tightly packed pixmap
    pub fn copy(&self, flags: CopyFlags) -> Result<Pixmap> {
        let mut new = Pixmap::alloc(self.w, self.h, self.pixel_type)?;

        if flags.contains(CopyFlags::PIXELS) && !self.is_empty() {
            if self.offset == 0 {
                let len = new.bytes_per_row;
                for y in 0..self.h {
                    let start = y as usize * new.bytes_per_row;
                    new.pixels[start..start + len].copy_from_slice(&self.row(y)[..len]);
                }
            } else {
                for y in 0..self.h as i32 {
                    for x in 0..self.w as i32 {
                        new.put_pixel_raw(x, y, self.get_pixel_raw(x, y));
                    }
                }
            }
        }

        if flags.contains(CopyFlags::ROTATION) {
            new.orientation = self.orientation;
        }

        if flags.contains(CopyFlags::GAMMA) {
            new.gamma = self.gamma.clone();
        }

        Ok(new)
    }

    /// Owned copy with pixels, orientation and gamma
    pub fn to_owned_pixmap(&self) -> Result<Pixmap> {
        self.copy(CopyFlags::all())
    }

    /// Same pixel type, same size and same pixels, as seen by the user
    pub fn equal<T: AsRef<[u8]>>(&self, other: &Pixmap<T>) -> bool {
        if self.pixel_type != other.pixel_type || self.w() != other.w() || self.h() != other.h() {
            return false;
        }

        let (w, h) = (self.w() as i32, self.h() as i32);
        (0..h).all(|y| (0..w).all(|x| self.get_pixel(x, y) == other.get_pixel(x, y)))
    }

    /// Log the pixmap description at info level
    pub fn print_info(&self) {
        info!("{}", self);
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixels.as_mut()
    }

    /// Mutable view of a rectangle given in user coordinates
    pub fn sub_pixmap_mut(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<SubPixmap<'_>> {
        let (start, offset, rw, rh) = self.sub_geometry(x, y, w, h)?;
        Ok(Pixmap {
            pixels: &mut self.pixels.as_mut()[start..],
            w: rw,
            h: rh,
            bytes_per_row: self.bytes_per_row,
            offset,
            pixel_type: self.pixel_type,
            orientation: self.orientation,
            gamma: self.gamma.clone(),
        })
    }

    /// Borrow the whole pixmap as a mutable view
    pub fn as_view_mut(&mut self) -> SubPixmap<'_> {
        Pixmap {
            pixels: self.pixels.as_mut(),
            w: self.w,
            h: self.h,
            bytes_per_row: self.bytes_per_row,
            offset: self.offset,
            pixel_type: self.pixel_type,
            orientation: self.orientation,
            gamma: self.gamma.clone(),
        }
    }
}

impl<S: AsRef<[u8]>, T: AsRef<[u8]>> PartialEq<Pixmap<T>> for Pixmap<S> {
    fn eq(&self, other: &Pixmap<T>) -> bool {
        self.equal(other)
    }
}

impl<S: AsRef<[u8]>> fmt::Debug for Pixmap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("w", &self.w)
            .field("h", &self.h)
            .field("bytes_per_row", &self.bytes_per_row)
            .field("offset", &self.offset)
            .field("pixel_type", &self.pixel_type)
            .field("orientation", &self.orientation)
            .field("gamma", &self.gamma.as_ref().map(|g| g.gamma()))
            .finish_non_exhaustive()
    }
}

impl<S: AsRef<[u8]>> fmt::Display for Pixmap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pixmap info")?;
        writeln!(f, "------------")?;
        writeln!(f, "Size\t{}x{}", self.w, self.h)?;
        writeln!(f, "BPP\t{}", self.bpp())?;
        writeln!(f, "BPR\t{}", self.bytes_per_row)?;
        writeln!(f, "Pixel\t{} ({})", self.pixel_type, self.pixel_type.id())?;
        writeln!(f, "Offset\t{} (only unaligned pixel types)", self.offset)?;
        write!(
            f,
            "Flags\taxes_swap={} x_swap={} y_swap={}",
            self.orientation.contains(Orientation::AXES_SWAP) as u8,
            self.orientation.contains(Orientation::X_SWAP) as u8,
            self.orientation.contains(Orientation::Y_SWAP) as u8
        )?;
        if let Some(gamma) = &self.gamma {
            write!(f, "\n{}", gamma)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_rgb888() {
        let p = Pixmap::alloc(100, 200, PixelType::Rgb888).unwrap();
        assert_eq!(p.w(), 100);
        assert_eq!(p.h(), 200);
        assert_eq!(p.bytes_per_row(), 300);
        assert_eq!(p.offset(), 0);
        assert!(p.gamma().is_none());
        assert_eq!(p.orientation(), Orientation::empty());
        assert_eq!(p.data().len(), 300 * 200);
    }

    #[test]
    fn test_alloc_bpr_all_types() {
        for t in PixelType::ALL.into_iter().skip(1) {
            for w in [1u32, 3, 7, 8, 13] {
                let p = Pixmap::alloc(w, 2, t).unwrap();
                let expected = (w as usize * t.bpp() as usize).div_ceil(8);
                assert_eq!(p.bytes_per_row(), expected, "{} w={}", t, w);
                assert_eq!(p.offset(), 0);
            }
        }
    }

    #[test]
    fn test_alloc_unknown_type_fails() {
        assert!(matches!(
            Pixmap::alloc(10, 10, PixelType::Unknown),
            Err(Error::UnknownPixelType(_))
        ));
    }

    #[test]
    fn test_alloc_zero_size() {
        let p = Pixmap::alloc(0, 10, PixelType::G8).unwrap();
        assert_eq!(p.bytes_per_row(), 0);
        assert!(p.data().is_empty());
        assert!(p.is_empty());

        let p = Pixmap::alloc(10, 0, PixelType::G8).unwrap();
        assert_eq!(p.bytes_per_row(), 10);
        assert!(p.data().is_empty());
    }

    #[test]
    fn test_alloc_too_large() {
        assert!(matches!(
            Pixmap::alloc(u32::MAX, u32::MAX, PixelType::Rgba8888),
            Err(Error::TooLarge { .. })
        ));
    }

    #[test]
    fn test_from_data_checks_length() {
        assert!(Pixmap::from_data(4, 4, PixelType::G8, vec![0u8; 15]).is_err());
        let p = Pixmap::from_data(4, 4, PixelType::G8, vec![7u8; 16]).unwrap();
        assert_eq!(p.get_pixel(3, 3), 7);
    }

    #[test]
    fn test_from_slice_borrows() {
        let mut buf = [0u8; 8];
        {
            let mut p = Pixmap::from_data(8, 8, PixelType::G1, &mut buf[..]).unwrap();
            p.put_pixel(0, 0, 1);
            p.put_pixel(7, 7, 1);
        }
        assert_eq!(buf[0], 0x80);
        assert_eq!(buf[7], 0x01);
    }

    #[test]
    fn test_stride_validation() {
        assert!(matches!(
            Pixmap::alloc_with_stride(10, 2, PixelType::Rgb888, 29),
            Err(Error::InvalidStride { stride: 29, min: 30 })
        ));
        let p = Pixmap::alloc_with_stride(10, 2, PixelType::Rgb888, 32).unwrap();
        assert_eq!(p.bytes_per_row(), 32);
    }

    #[test]
    fn test_sub_pixmap_inherits_bpr() {
        let mut p = Pixmap::alloc(300, 300, PixelType::Rgb888).unwrap();
        p.set_gamma(2.2);
        let sub = p.sub_pixmap(100, 100, 100, 100).unwrap();
        assert_eq!(sub.w(), 100);
        assert_eq!(sub.h(), 100);
        assert_eq!(sub.bytes_per_row(), 900);
        assert_eq!(sub.offset(), 0);
        assert!(sub.gamma().is_some());
    }

    #[test]
    fn test_sub_pixmap_out_of_bounds() {
        let p = Pixmap::alloc(10, 10, PixelType::G8).unwrap();
        assert!(p.sub_pixmap(5, 5, 6, 1).is_err());
        assert!(p.sub_pixmap(-1, 0, 2, 2).is_err());
        assert!(p.sub_pixmap(10, 10, 0, 0).is_ok());
    }

    #[test]
    fn test_sub_pixmap_offset() {
        for (t, x, offset) in [
            (PixelType::G1, 1, 1),
            (PixelType::G1, 9, 1),
            (PixelType::G2, 3, 6),
            (PixelType::G4, 1, 4),
            (PixelType::Rgb666, 1, 2),
            (PixelType::G8, 5, 0),
        ] {
            let p = Pixmap::alloc(16, 4, t).unwrap();
            let sub = p.sub_pixmap(x, 1, 4, 2).unwrap();
            assert_eq!(sub.offset(), offset, "{} x={}", t, x);
        }
    }

    #[test]
    fn test_sub_of_sub_accumulates_offset() {
        let mut p = Pixmap::alloc(32, 2, PixelType::G1).unwrap();
        let mut sub = p.sub_pixmap_mut(3, 0, 20, 2).unwrap();
        let mut subsub = sub.sub_pixmap_mut(6, 1, 4, 1).unwrap();
        assert_eq!(subsub.offset(), 1);
        subsub.fill(1);
        // pixels 9..13 of row 1
        assert_eq!(&p.data()[4..6], &[0x00, 0x78]);
    }

    #[test]
    fn test_sub_pixmap_fill_g1() {
        let mut p = Pixmap::alloc(16, 4, PixelType::G1).unwrap();
        let mut sub = p.sub_pixmap_mut(1, 1, 10, 2).unwrap();
        assert_eq!(sub.offset(), 1);
        sub.fill(1);
        assert_eq!(p.row(0), &[0x00, 0x00]);
        assert_eq!(p.row(1), &[0x7f, 0xe0]);
        assert_eq!(p.row(2), &[0x7f, 0xe0]);
        assert_eq!(p.row(3), &[0x00, 0x00]);
    }

    #[test]
    fn test_sub_pixmap_matches_parent() {
        for t in [PixelType::G1, PixelType::G2Db, PixelType::G4, PixelType::Rgb666] {
            let mut p = Pixmap::alloc(24, 6, t).unwrap();
            let max = (1u32 << t.bpp()) - 1;
            {
                let mut sub = p.sub_pixmap_mut(3, 2, 9, 3).unwrap();
                for y in 0..3 {
                    for x in 0..9 {
                        sub.put_pixel(x, y, (x * 7 + y) as u32 & max);
                    }
                }
            }
            let sub = p.sub_pixmap(3, 2, 9, 3).unwrap();
            for y in 0..3 {
                for x in 0..9 {
                    let v = (x * 7 + y) as u32 & max;
                    assert_eq!(p.get_pixel(x + 3, y + 2), v, "{} {},{}", t, x, y);
                    assert_eq!(sub.get_pixel(x, y), v);
                }
            }
            assert_eq!(p.get_pixel(2, 2), 0);
            assert_eq!(p.get_pixel(12, 2), 0);
        }
    }

    #[test]
    fn test_sub_pixmap_rotated_parent() {
        let mut p = Pixmap::alloc(10, 4, PixelType::G8).unwrap();
        p.rotate(Symmetry::Rotate90);
        assert_eq!((p.w(), p.h()), (4, 10));
        {
            let mut sub = p.sub_pixmap_mut(1, 2, 2, 3).unwrap();
            assert_eq!((sub.w(), sub.h()), (2, 3));
            sub.put_pixel(0, 0, 9);
        }
        assert_eq!(p.get_pixel(1, 2), 9);
    }

    #[test]
    fn test_copy_flags() {
        let mut p = Pixmap::alloc(5, 3, PixelType::G4).unwrap();
        p.put_pixel(4, 2, 0xa);
        p.rotate(Symmetry::MirrorV);
        p.set_gamma(2.2);

        let bare = p.copy(CopyFlags::empty()).unwrap();
        assert_eq!(bare.orientation(), Orientation::empty());
        assert!(bare.gamma().is_none());
        assert!(bare.data().iter().all(|b| *b == 0));

        let full = p.to_owned_pixmap().unwrap();
        assert_eq!(full.orientation(), Orientation::X_SWAP);
        assert!(full.gamma().is_some());
        assert!(full.equal(&p));
    }

    #[test]
    fn test_copy_of_unaligned_sub() {
        let mut p = Pixmap::alloc(16, 2, PixelType::G1).unwrap();
        p.put_pixel(3, 1, 1);
        let sub = p.sub_pixmap(3, 1, 5, 1).unwrap();
        let copy = sub.copy(CopyFlags::PIXELS).unwrap();
        assert_eq!(copy.offset(), 0);
        assert_eq!(copy.bytes_per_row(), 1);
        assert_eq!(copy.data(), &[0x80]);
    }

    #[test]
    fn test_resize() {
        let mut p = Pixmap::alloc(4, 4, PixelType::G8).unwrap();
        p.resize(8, 2).unwrap();
        assert_eq!(p.bytes_per_row(), 8);
        assert_eq!(p.data().len(), 16);
        assert_eq!((p.w(), p.h()), (8, 2));
    }

    #[test]
    fn test_equal() {
        let mut a = Pixmap::alloc(3, 3, PixelType::G8).unwrap();
        let b = Pixmap::alloc(3, 3, PixelType::G8).unwrap();
        assert!(a.equal(&b));
        a.put_pixel(1, 1, 1);
        assert!(a != b);
        let c = Pixmap::alloc(3, 3, PixelType::P8).unwrap();
        assert!(!c.equal(&b));
    }

    #[test]
    fn test_info_mentions_type() {
        let p = Pixmap::alloc(2, 2, PixelType::Rgb565).unwrap();
        let info = p.to_string();
        assert!(info.contains("RGB565 (7)"));
        assert!(info.contains("BPR\t4"));
    }
}
