//! Get and put pixel.
//!
//! `*_raw` accessors address the stored layout directly and do no clipping;
//! callers are expected to have clipped already. The plain accessors take
//! user coordinates, apply the orientation and silently ignore anything
//! outside of the pixmap.

use super::{bits, Pixmap};
use crate::pixel::Pixel;

impl<S: AsRef<[u8]>> Pixmap<S> {
    #[inline]
    pub(crate) fn in_bounds_raw(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.w as i64 && y < self.h as i64
    }

    #[inline]
    fn bit_pos(&self, x: i32, y: i32) -> (usize, u8) {
        debug_assert!(
            self.in_bounds_raw(x as i64, y as i64),
            "pixel {},{} outside of {}x{}",
            x,
            y,
            self.w,
            self.h
        );
        bits::bit_position(self.bytes_per_row, self.offset, self.bpp(), x as usize, y as usize)
    }

    /// Read a pixel at raw coordinates, no clipping
    #[inline]
    pub fn get_pixel_raw(&self, x: i32, y: i32) -> Pixel {
        let (byte, bit) = self.bit_pos(x, y);
        bits::read_pixel(
            self.pixels.as_ref(),
            byte,
            bit,
            self.bpp(),
            self.pixel_type.bit_order(),
        )
    }

    /// Read a pixel at raw coordinates, 0 when outside
    #[inline]
    pub fn get_pixel_raw_clipped(&self, x: i64, y: i64) -> Pixel {
        if !self.in_bounds_raw(x, y) {
            return 0;
        }
        self.get_pixel_raw(x as i32, y as i32)
    }

    /// Read a pixel at user coordinates, 0 when outside
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        let (x, y) = self
            .orientation
            .transform_point(x as i64, y as i64, self.w, self.h);
        self.get_pixel_raw_clipped(x, y)
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// Write a pixel at raw coordinates, no clipping
    #[inline]
    pub fn put_pixel_raw(&mut self, x: i32, y: i32, pixel: Pixel) {
        let (byte, bit) = self.bit_pos(x, y);
        let bpp = self.bpp();
        let order = self.pixel_type.bit_order();
        bits::write_pixel(self.pixels.as_mut(), byte, bit, bpp, order, pixel);
    }

    /// Write a pixel at raw coordinates, ignored when outside
    #[inline]
    pub fn put_pixel_raw_clipped(&mut self, x: i64, y: i64, pixel: Pixel) {
        if self.in_bounds_raw(x, y) {
            self.put_pixel_raw(x as i32, y as i32, pixel);
        }
    }

    /// Write a pixel at user coordinates, ignored when outside
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        let (x, y) = self
            .orientation
            .transform_point(x as i64, y as i64, self.w, self.h);
        self.put_pixel_raw_clipped(x, y, pixel);
    }
}

#[cfg(test)]
mod tests {
    use crate::pixel::PixelType;
    use crate::pixmap::{Pixmap, Symmetry};

    const POINTS: [(i32, i32); 4] = [(0, 0), (3, 1), (10, 0), (11, 1)];

    fn sub_put(
        t: PixelType,
        pw: u32,
        sub_x: i32,
        sub_w: u32,
        value: u32,
        points: &[(i32, i32)],
    ) -> Vec<u8> {
        let mut p = Pixmap::alloc(pw, 4, t).unwrap();
        {
            let mut sub = p.sub_pixmap_mut(sub_x, 1, sub_w, 2).unwrap();
            for &(x, y) in points {
                sub.put_pixel(x, y, value);
            }
        }
        p.into_data()
    }

    #[test]
    fn test_sub_pixmap_put_1bpp() {
        let cases: [(i32, [u8; 4]); 4] = [
            (1, [0x40, 0x00, 0x08, 0x00]),
            (2, [0x20, 0x00, 0x04, 0x00]),
            (3, [0x10, 0x00, 0x02, 0x00]),
            (4, [0x08, 0x00, 0x01, 0x00]),
        ];
        for (x, rows) in cases {
            let data = sub_put(PixelType::G1, 16, x, 10, 1, &POINTS);
            assert_eq!(&data[0..2], &[0, 0], "off {}", x);
            assert_eq!(&data[2..6], &rows, "off {}", x);
            assert_eq!(&data[6..8], &[0, 0], "off {}", x);
        }
    }

    #[test]
    fn test_sub_pixmap_put_1bpp_byte_aligned() {
        let data = sub_put(PixelType::G1, 16, 8, 8, 1, &POINTS);
        assert_eq!(data, [0x00, 0x00, 0x00, 0x80, 0x00, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn test_sub_pixmap_put_2bpp() {
        let cases: [(i32, [u8; 4]); 3] = [
            (1, [0x30, 0x00, 0x00, 0xc0]),
            (2, [0x0c, 0x00, 0x00, 0x30]),
            (3, [0x03, 0x00, 0x00, 0x0c]),
        ];
        for (x, rows) in cases {
            let data = sub_put(PixelType::G2, 8, x, 4, 3, &POINTS);
            assert_eq!(&data[2..6], &rows, "off {}", x);
            assert!(data[..2].iter().chain(&data[6..]).all(|b| *b == 0));
        }
    }

    #[test]
    fn test_sub_pixmap_put_4bpp() {
        let data = sub_put(PixelType::G4, 4, 1, 2, 0xf, &[(0, 0), (1, 1), (10, 0), (11, 1)]);
        assert_eq!(data, [0x00, 0x00, 0x0f, 0x00, 0x00, 0xf0, 0x00, 0x00]);
    }

    #[test]
    fn test_clipped_access() {
        let mut p = Pixmap::alloc(4, 4, PixelType::G8).unwrap();
        p.put_pixel(-1, 0, 0xff);
        p.put_pixel(0, 4, 0xff);
        p.put_pixel(i32::MIN, i32::MAX, 0xff);
        assert!(p.data().iter().all(|b| *b == 0));
        assert_eq!(p.get_pixel(100, 100), 0);
        assert_eq!(p.get_pixel_raw_clipped(-5, 2), 0);
    }

    #[test]
    fn test_orientation_applied() {
        let mut p = Pixmap::alloc(3, 2, PixelType::G8).unwrap();
        p.rotate(Symmetry::MirrorV);
        p.put_pixel(0, 0, 1);
        assert_eq!(p.get_pixel_raw(2, 0), 1);

        p.set_orientation(Default::default());
        p.rotate(Symmetry::Rotate90);
        assert_eq!((p.w(), p.h()), (2, 3));
        p.put_pixel(1, 2, 5);
        // axes swapped to (2, 1), then x mirrored
        assert_eq!(p.get_pixel_raw(0, 1), 5);
        assert_eq!(p.get_pixel(1, 2), 5);
    }

    #[test]
    fn test_rgb666_pixels_independent() {
        let mut p = Pixmap::alloc(5, 1, PixelType::Rgb666).unwrap();
        for x in 0..5 {
            p.put_pixel(x, 0, 0x3ffff - x as u32);
        }
        for x in 0..5 {
            assert_eq!(p.get_pixel(x, 0), 0x3ffff - x as u32);
        }
    }
}
