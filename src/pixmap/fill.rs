use super::{bits, Pixmap};
use crate::pixel::Pixel;

impl<S: AsRef<[u8]> + AsMut<[u8]>> Pixmap<S> {
    /// Set every pixel to `pixel`
    pub fn fill(&mut self, pixel: Pixel) {
        if self.is_empty() {
            return;
        }

        let bpp = self.bpp() as usize;

        if self.offset == 0 && bpp % 8 == 0 {
            // Byte aligned pixels: stamp the little endian pattern
            let pattern = pixel.to_le_bytes();
            let psize = bpp / 8;
            let len = self.w as usize * psize;
            for y in 0..self.h as usize {
                let start = y * self.bytes_per_row;
                let row = &mut self.pixels.as_mut()[start..start + len];
                for chunk in row.chunks_exact_mut(psize) {
                    chunk.copy_from_slice(&pattern[..psize]);
                }
            }
            return;
        }

        if self.offset == 0 && bpp < 8 {
            // Whole bytes first, the partial tail goes pixel by pixel
            let per_byte = 8 / bpp;
            let full = self.w as usize / per_byte;
            let mut byte = 0u8;
            for i in 0..per_byte {
                let mut one = [0u8];
                bits::write_pixel(
                    &mut one,
                    0,
                    (i * bpp) as u8,
                    bpp as u8,
                    self.pixel_type.bit_order(),
                    pixel,
                );
                byte |= one[0];
            }
            for y in 0..self.h as usize {
                let start = y * self.bytes_per_row;
                self.pixels.as_mut()[start..start + full].fill(byte);
            }
            let done = (full * per_byte) as i32;
            for y in 0..self.h as i32 {
                for x in done..self.w as i32 {
                    self.put_pixel_raw(x, y, pixel);
                }
            }
            return;
        }

        for y in 0..self.h as i32 {
            for x in 0..self.w as i32 {
                self.put_pixel_raw(x, y, pixel);
            }
        }
    }
}
