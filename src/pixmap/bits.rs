//! Bit addressing of packed pixels.
//!
//! A pixel is located by an absolute bit position `y * bpr * 8 + x * bpp +
//! offset` that is split into a byte index and a bit within that byte.
//! Sub-byte pixels (1, 2 and 4 bpp) never straddle a byte, their order inside
//! the byte depends on [`BitOrder`]. Wider pixels are stored as a little
//! endian bit stream, which covers both byte aligned formats and 18bpp.

use crate::pixel::{BitOrder, Pixel};

/// Byte index and bit (0..8) of a pixel
#[inline]
pub(crate) fn bit_position(bpr: usize, offset: u8, bpp: u8, x: usize, y: usize) -> (usize, u8) {
    let bit = x * bpp as usize + offset as usize;
    (y * bpr + bit / 8, (bit % 8) as u8)
}

/// Number of bytes touched by a row of `w` pixels starting at bit `offset`
#[inline]
pub(crate) fn row_span(offset: u8, bpp: u8, w: u32) -> usize {
    (offset as usize + w as usize * bpp as usize).div_ceil(8)
}

#[inline]
const fn value_mask(bpp: u8) -> u64 {
    (1u64 << bpp) - 1
}

#[inline]
fn sub_byte_shift(bit: u8, bpp: u8, order: BitOrder) -> u8 {
    match order {
        BitOrder::MsbFirst => 8 - bpp - bit,
        BitOrder::LsbFirst => bit,
    }
}

/// Read a pixel value of `bpp` bits at `(byte, bit)`
#[inline]
pub(crate) fn read_pixel(data: &[u8], byte: usize, bit: u8, bpp: u8, order: BitOrder) -> Pixel {
    if bpp < 8 {
        let shift = sub_byte_shift(bit, bpp, order);
        return ((data[byte] >> shift) as u64 & value_mask(bpp)) as Pixel;
    }

    if bit == 0 {
        match bpp {
            8 => return data[byte] as Pixel,
            16 => return u16::from_le_bytes([data[byte], data[byte + 1]]) as Pixel,
            24 => return u32::from_le_bytes([data[byte], data[byte + 1], data[byte + 2], 0]),
            32 => {
                return u32::from_le_bytes([
                    data[byte],
                    data[byte + 1],
                    data[byte + 2],
                    data[byte + 3],
                ])
            },
            _ => {},
        }
    }

    let nbytes = (bit as usize + bpp as usize).div_ceil(8);
    let acc = data[byte..byte + nbytes]
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | ((*b as u64) << (8 * i)));
    ((acc >> bit) & value_mask(bpp)) as Pixel
}

/// Write the low `bpp` bits of `value` at `(byte, bit)`
#[inline]
pub(crate) fn write_pixel(
    data: &mut [u8],
    byte: usize,
    bit: u8,
    bpp: u8,
    order: BitOrder,
    value: Pixel,
) {
    if bpp < 8 {
        let shift = sub_byte_shift(bit, bpp, order);
        let mask = (value_mask(bpp) as u8) << shift;
        let v = ((value as u8) << shift) & mask;
        data[byte] = (data[byte] & !mask) | v;
        return;
    }

    if bit == 0 {
        let bytes = value.to_le_bytes();
        match bpp {
            8 => {
                data[byte] = bytes[0];
                return;
            },
            16 => {
                data[byte..byte + 2].copy_from_slice(&bytes[..2]);
                return;
            },
            24 => {
                data[byte..byte + 3].copy_from_slice(&bytes[..3]);
                return;
            },
            32 => {
                data[byte..byte + 4].copy_from_slice(&bytes);
                return;
            },
            _ => {},
        }
    }

    let nbytes = (bit as usize + bpp as usize).div_ceil(8);
    let span = &mut data[byte..byte + nbytes];
    let mut acc = span
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | ((*b as u64) << (8 * i)));
    let mask = value_mask(bpp) << bit;
    acc = (acc & !mask) | (((value as u64) << bit) & mask);
    for (i, b) in span.iter_mut().enumerate() {
        *b = (acc >> (8 * i)) as u8;
    }
}
