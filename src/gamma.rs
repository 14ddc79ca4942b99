//! Gamma correction tables.
//!
//! A [`Gamma`] carries one pair of lookup tables per channel of a pixel type:
//! `linear` maps an encoded channel value to a linear value with two extra
//! bits of precision, `encode` maps it back. Pixmaps share a gamma through an
//! `Arc`, so sub-pixmaps and copies see the same tables.

use std::fmt;

use log::debug;

use crate::pixel::PixelType;

const MAX_LINEAR_BITS: u8 = 16;

#[derive(Debug, Clone)]
struct ChannelTables {
    bits: u8,
    linear_bits: u8,
    linear: Vec<u16>,
    encode: Vec<u16>,
}

fn fill_table(in_bits: u8, out_bits: u8, exponent: f32) -> Vec<u16> {
    let in_max = ((1u32 << in_bits) - 1) as f32;
    let out_max = ((1u32 << out_bits) - 1) as f32;
    (0..1u32 << in_bits)
        .map(|i| ((i as f32 / in_max).powf(exponent) * out_max + 0.5) as u16)
        .collect()
}

/// Per channel gamma lookup tables for one pixel type
#[derive(Debug, Clone)]
pub struct Gamma {
    gamma: f32,
    pixel_type: PixelType,
    channels: Vec<ChannelTables>,
}

impl Gamma {
    pub fn new(pixel_type: PixelType, gamma: f32) -> Self {
        debug!("Creating gamma {} tables for {}", gamma, pixel_type);

        let channels = pixel_type
            .channels()
            .iter()
            .map(|c| {
                let linear_bits = (c.size + 2).min(MAX_LINEAR_BITS);
                ChannelTables {
                    bits: c.size,
                    linear_bits,
                    linear: fill_table(c.size, linear_bits, gamma),
                    encode: fill_table(linear_bits, c.size, 1.0 / gamma),
                }
            })
            .collect();

        Self {
            gamma,
            pixel_type,
            channels,
        }
    }

    #[inline]
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    /// Bits of the linear values produced for channel `chan`
    #[inline]
    pub fn linear_bits(&self, chan: usize) -> u8 {
        self.channels[chan].linear_bits
    }

    /// Encoded channel value to linear light
    #[inline]
    pub fn to_linear(&self, chan: usize, value: u32) -> u32 {
        let t = &self.channels[chan];
        t.linear[(value as usize).min(t.linear.len() - 1)] as u32
    }

    /// Linear light back to an encoded channel value
    #[inline]
    pub fn from_linear(&self, chan: usize, value: u32) -> u32 {
        let t = &self.channels[chan];
        t.encode[(value as usize).min(t.encode.len() - 1)] as u32
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gamma {:.2} for {}", self.gamma, self.pixel_type)?;
        for (c, t) in self.pixel_type.channels().iter().zip(&self.channels) {
            write!(f, " {}:{}->{}", c.name, t.bits, t.linear_bits)?;
        }
        Ok(())
    }
}
