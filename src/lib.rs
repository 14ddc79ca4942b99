//! Bit-packed pixmaps with software rasterization.
//!
//! A [`Pixmap`] is a byte buffer read through a [`PixelType`] descriptor,
//! from 1 bit grayscale up to 32 bit RGBA. Pixmaps carry an orientation so
//! every drawing call can work in rotated or mirrored user coordinates, and
//! sub-pixmaps are plain borrows of a parent's buffer.
//!
//! ```
//! use rasterkit::{Pixmap, PixelType};
//!
//! let mut p = Pixmap::alloc(16, 16, PixelType::Rgb888).unwrap();
//! let red = PixelType::Rgb888.rgb_to_pixel(0xff, 0, 0);
//! p.line(0, 0, 15, 15, red);
//! assert_eq!(p.get_pixel(7, 7), red);
//! ```

pub mod blit;
#[cfg(feature = "sdl")]
pub mod display;
pub mod error;
pub mod gamma;
pub mod gfx;
pub mod pixel;
pub mod pixmap;
pub mod scene;

pub use error::{Error, Result};
pub use gamma::Gamma;
pub use gfx::CircleSegments;
pub use pixel::{Pixel, PixelFlags, PixelType};
pub use pixmap::{CopyFlags, Orientation, Pixmap, SubPixmap, SubPixmapRef, Symmetry};
pub use scene::{Scene, Shape};
