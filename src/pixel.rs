//! Pixel type descriptors.
//!
//! Every pixmap stores pixels in one of the [`PixelType`] layouts below. A
//! [`Pixel`] is always a value already encoded in such a layout: the drawing
//! code never converts colors on its own, callers encode them up front with
//! [`PixelType::rgb_to_pixel`] and friends.
//!
//! The descriptor table is a process wide `static`, indexed by the numeric id
//! of the pixel type.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A pixel value encoded in some [`PixelType`].
pub type Pixel = u32;

// ============================================================================
// Flags and channels
// ============================================================================

bitflags! {
    /// Properties of a pixel type
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PixelFlags: u8 {
        const HAS_ALPHA = 0x01;
        const IS_RGB = 0x02;
        const IS_PALETTE = 0x04;
        const IS_CMYK = 0x08;
        const IS_GRAYSCALE = 0x10;
    }
}

/// Order of sub-byte pixels inside a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// Leftmost pixel sits in the most significant bits (`*_UB` types)
    MsbFirst,
    /// Leftmost pixel sits in the least significant bits (`*_DB` types)
    LsbFirst,
}

/// One channel of a pixel value, addressed by bit offset from the LSB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub name: &'static str,
    pub offset: u8,
    pub size: u8,
}

impl Channel {
    const fn new(name: &'static str, offset: u8, size: u8) -> Self {
        Self { name, offset, size }
    }

    /// Largest value the channel can hold
    #[inline]
    pub const fn max(&self) -> u32 {
        (1 << self.size) - 1
    }

    /// Channel mask in pixel value position
    #[inline]
    pub const fn mask(&self) -> u32 {
        self.max() << self.offset
    }

    #[inline]
    pub const fn get(&self, pixel: Pixel) -> u32 {
        (pixel >> self.offset) & self.max()
    }

    #[inline]
    pub const fn set(&self, pixel: Pixel, value: u32) -> Pixel {
        (pixel & !self.mask()) | ((value & self.max()) << self.offset)
    }
}

/// Rescale a channel value between bit depths with rounding
#[inline]
pub(crate) fn scale_channel(value: u32, from_bits: u8, to_bits: u8) -> u32 {
    if from_bits == to_bits {
        return value;
    }
    let from_max = (1u32 << from_bits) - 1;
    let to_max = (1u32 << to_bits) - 1;
    (value.min(from_max) * to_max + from_max / 2) / from_max
}

// ============================================================================
// Pixel Type
// ============================================================================

/// Pixel layouts, numbered by their stable id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u32)]
pub enum PixelType {
    Unknown = 0,
    Rgb101010,
    Xrgb8888,
    Rgba8888,
    Rgb888,
    Bgr888,
    Rgb555,
    Rgb565,
    Rgb666,
    Rgb332,
    Cmyk8888,
    P2,
    P4,
    P8,
    G1Db,
    G2Db,
    G4Db,
    G1Ub,
    G2Ub,
    G4Ub,
    G8,
    Ga88,
    G16,
}

/// Static description of one pixel type
#[derive(Debug)]
pub struct PixelTypeDesc {
    pub pixel_type: PixelType,
    pub name: &'static str,
    pub bpp: u8,
    pub bit_order: BitOrder,
    pub flags: PixelFlags,
    pub channels: &'static [Channel],
}

impl PixelTypeDesc {
    /// Look up a channel by its name ("R", "G", "B", "A", "V", "I", "C", ...)
    pub fn channel(&self, name: &str) -> Option<&'static Channel> {
        self.channels.iter().find(|c| c.name == name)
    }
}

const RGB: PixelFlags = PixelFlags::IS_RGB;
const RGBA: PixelFlags = PixelFlags::IS_RGB.union(PixelFlags::HAS_ALPHA);
const GRAY: PixelFlags = PixelFlags::IS_GRAYSCALE;
const GRAY_ALPHA: PixelFlags = PixelFlags::IS_GRAYSCALE.union(PixelFlags::HAS_ALPHA);
const PALETTE: PixelFlags = PixelFlags::IS_PALETTE;

const fn desc(
    pixel_type: PixelType,
    name: &'static str,
    bpp: u8,
    bit_order: BitOrder,
    flags: PixelFlags,
    channels: &'static [Channel],
) -> PixelTypeDesc {
    PixelTypeDesc {
        pixel_type,
        name,
        bpp,
        bit_order,
        flags,
        channels,
    }
}

use BitOrder::{LsbFirst, MsbFirst};

static PIXEL_TYPES: [PixelTypeDesc; PixelType::COUNT] = [
    desc(PixelType::Unknown, "UNKNOWN", 0, MsbFirst, PixelFlags::empty(), &[]),
    desc(
        PixelType::Rgb101010,
        "RGB101010",
        32,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 20, 10),
            Channel::new("G", 10, 10),
            Channel::new("B", 0, 10),
        ],
    ),
    desc(
        PixelType::Xrgb8888,
        "xRGB8888",
        32,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 16, 8),
            Channel::new("G", 8, 8),
            Channel::new("B", 0, 8),
        ],
    ),
    desc(
        PixelType::Rgba8888,
        "RGBA8888",
        32,
        LsbFirst,
        RGBA,
        &[
            Channel::new("R", 24, 8),
            Channel::new("G", 16, 8),
            Channel::new("B", 8, 8),
            Channel::new("A", 0, 8),
        ],
    ),
    desc(
        PixelType::Rgb888,
        "RGB888",
        24,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 16, 8),
            Channel::new("G", 8, 8),
            Channel::new("B", 0, 8),
        ],
    ),
    desc(
        PixelType::Bgr888,
        "BGR888",
        24,
        LsbFirst,
        RGB,
        &[
            Channel::new("B", 16, 8),
            Channel::new("G", 8, 8),
            Channel::new("R", 0, 8),
        ],
    ),
    desc(
        PixelType::Rgb555,
        "RGB555",
        16,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 10, 5),
            Channel::new("G", 5, 5),
            Channel::new("B", 0, 5),
        ],
    ),
    desc(
        PixelType::Rgb565,
        "RGB565",
        16,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 11, 5),
            Channel::new("G", 5, 6),
            Channel::new("B", 0, 5),
        ],
    ),
    desc(
        PixelType::Rgb666,
        "RGB666",
        18,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 12, 6),
            Channel::new("G", 6, 6),
            Channel::new("B", 0, 6),
        ],
    ),
    desc(
        PixelType::Rgb332,
        "RGB332",
        8,
        LsbFirst,
        RGB,
        &[
            Channel::new("R", 5, 3),
            Channel::new("G", 2, 3),
            Channel::new("B", 0, 2),
        ],
    ),
    desc(
        PixelType::Cmyk8888,
        "CMYK8888",
        32,
        LsbFirst,
        PixelFlags::IS_CMYK,
        &[
            Channel::new("K", 24, 8),
            Channel::new("Y", 16, 8),
            Channel::new("M", 8, 8),
            Channel::new("C", 0, 8),
        ],
    ),
    desc(PixelType::P2, "P2", 2, MsbFirst, PALETTE, &[Channel::new("I", 0, 2)]),
    desc(PixelType::P4, "P4", 4, MsbFirst, PALETTE, &[Channel::new("I", 0, 4)]),
    desc(PixelType::P8, "P8", 8, MsbFirst, PALETTE, &[Channel::new("I", 0, 8)]),
    desc(PixelType::G1Db, "G1_DB", 1, LsbFirst, GRAY, &[Channel::new("V", 0, 1)]),
    desc(PixelType::G2Db, "G2_DB", 2, LsbFirst, GRAY, &[Channel::new("V", 0, 2)]),
    desc(PixelType::G4Db, "G4_DB", 4, LsbFirst, GRAY, &[Channel::new("V", 0, 4)]),
    desc(PixelType::G1Ub, "G1_UB", 1, MsbFirst, GRAY, &[Channel::new("V", 0, 1)]),
    desc(PixelType::G2Ub, "G2_UB", 2, MsbFirst, GRAY, &[Channel::new("V", 0, 2)]),
    desc(PixelType::G4Ub, "G4_UB", 4, MsbFirst, GRAY, &[Channel::new("V", 0, 4)]),
    desc(PixelType::G8, "G8", 8, MsbFirst, GRAY, &[Channel::new("V", 0, 8)]),
    desc(
        PixelType::Ga88,
        "GA88",
        16,
        LsbFirst,
        GRAY_ALPHA,
        &[Channel::new("V", 0, 8), Channel::new("A", 8, 8)],
    ),
    desc(PixelType::G16, "G16", 16, LsbFirst, GRAY, &[Channel::new("V", 0, 16)]),
];

impl PixelType {
    pub const COUNT: usize = 23;

    /// 1bpp grayscale, leftmost pixel in the MSB
    pub const G1: Self = Self::G1Ub;
    pub const G2: Self = Self::G2Ub;
    pub const G4: Self = Self::G4Ub;

    /// Every valid pixel type, in id order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Unknown,
        Self::Rgb101010,
        Self::Xrgb8888,
        Self::Rgba8888,
        Self::Rgb888,
        Self::Bgr888,
        Self::Rgb555,
        Self::Rgb565,
        Self::Rgb666,
        Self::Rgb332,
        Self::Cmyk8888,
        Self::P2,
        Self::P4,
        Self::P8,
        Self::G1Db,
        Self::G2Db,
        Self::G4Db,
        Self::G1Ub,
        Self::G2Ub,
        Self::G4Ub,
        Self::G8,
        Self::Ga88,
        Self::G16,
    ];

    #[inline]
    pub fn desc(self) -> &'static PixelTypeDesc {
        &PIXEL_TYPES[self as usize]
    }

    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.desc().name
    }

    /// Bits per pixel
    #[inline]
    pub fn bpp(self) -> u8 {
        self.desc().bpp
    }

    #[inline]
    pub fn flags(self) -> PixelFlags {
        self.desc().flags
    }

    #[inline]
    pub fn bit_order(self) -> BitOrder {
        self.desc().bit_order
    }

    #[inline]
    pub fn channels(self) -> &'static [Channel] {
        self.desc().channels
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        self.flags().contains(PixelFlags::HAS_ALPHA)
    }

    /// Bytes needed to store one row of `w` pixels
    pub fn row_bytes(self, w: u32) -> Option<usize> {
        let bits = (w as usize).checked_mul(self.bpp() as usize)?;
        Some(bits.div_ceil(8))
    }

    /// Look up a pixel type by its descriptor name, case insensitive.
    ///
    /// `G1`, `G2` and `G4` resolve to the MSB-first variants.
    pub fn from_name(name: &str) -> Result<Self> {
        let upper = name.to_ascii_uppercase();
        let alias = match upper.as_str() {
            "G1" => Some(Self::G1),
            "G2" => Some(Self::G2),
            "G4" => Some(Self::G4),
            _ => None,
        };
        if let Some(t) = alias {
            return Ok(t);
        }
        PIXEL_TYPES
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(&upper))
            .map(|d| d.pixel_type)
            .ok_or_else(|| Error::UnknownPixelTypeName(name.to_string()))
    }

    // ========================================================================
    // Color Conversion
    // ========================================================================

    /// Encode an opaque RGB triplet into this pixel type
    pub fn rgb_to_pixel(self, r: u8, g: u8, b: u8) -> Pixel {
        self.rgba_to_pixel(r, g, b, 0xff)
    }

    /// Encode an RGBA quadruplet into this pixel type.
    ///
    /// Grayscale and palette types store the luma, CMYK types use the
    /// `K = 255 - max(R, G, B)` separation.
    pub fn rgba_to_pixel(self, r: u8, g: u8, b: u8, a: u8) -> Pixel {
        let desc = self.desc();
        let mut pixel = 0;

        if desc.flags.contains(PixelFlags::IS_RGB) {
            for (name, value) in [("R", r), ("G", g), ("B", b)] {
                if let Some(c) = desc.channel(name) {
                    pixel = c.set(pixel, scale_channel(value as u32, 8, c.size));
                }
            }
        } else if desc.flags.contains(PixelFlags::IS_CMYK) {
            let max = r.max(g).max(b) as u32;
            let k = 255 - max;
            let sep = |v: u8| if max == 0 { 0 } else { (max - v as u32) * 255 / max };
            for (name, value) in [("C", sep(r)), ("M", sep(g)), ("Y", sep(b)), ("K", k)] {
                if let Some(c) = desc.channel(name) {
                    pixel = c.set(pixel, value);
                }
            }
        } else if let Some(c) = desc.channels.first() {
            pixel = c.set(pixel, scale_channel(luma(r, g, b), 8, c.size));
        }

        if let Some(c) = desc.channel("A") {
            pixel = c.set(pixel, scale_channel(a as u32, 8, c.size));
        }

        pixel
    }

    /// Decode a pixel of this type into RGBA, alpha is 255 for types without it
    pub fn pixel_to_rgba(self, pixel: Pixel) -> [u8; 4] {
        let desc = self.desc();
        let get8 = |name: &str| {
            desc.channel(name)
                .map(|c| scale_channel(c.get(pixel), c.size, 8) as u8)
        };
        let a = get8("A").unwrap_or(0xff);

        if desc.flags.contains(PixelFlags::IS_RGB) {
            return [
                get8("R").unwrap_or(0),
                get8("G").unwrap_or(0),
                get8("B").unwrap_or(0),
                a,
            ];
        }

        if desc.flags.contains(PixelFlags::IS_CMYK) {
            let k = get8("K").unwrap_or(0) as u32;
            let ink = |v: Option<u8>| ((255 - v.unwrap_or(0) as u32) * (255 - k) / 255) as u8;
            return [ink(get8("C")), ink(get8("M")), ink(get8("Y")), a];
        }

        match desc.channels.first() {
            Some(c) => {
                let v = scale_channel(c.get(pixel), c.size, 8) as u8;
                [v, v, v, a]
            },
            None => [0, 0, 0, a],
        }
    }

    /// Convert a pixel value of this type into `to`, going through RGBA8888
    pub fn convert_pixel(self, pixel: Pixel, to: PixelType) -> Pixel {
        if self == to {
            return pixel;
        }
        let [r, g, b, a] = self.pixel_to_rgba(pixel);
        to.rgba_to_pixel(r, g, b, a)
    }
}

/// Integer approximation of Rec. 601 luma
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u32 {
    (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000
}

impl TryFrom<u32> for PixelType {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(Error::InvalidPixelType(id))
    }
}

impl FromStr for PixelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for PixelType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_name(&s)
    }
}

impl From<PixelType> for String {
    fn from(t: PixelType) -> Self {
        t.name().to_string()
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
