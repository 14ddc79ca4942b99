//! Error type shared by the pixmap constructors, blits and scene loading.
//!
//! Geometry is never an error: drawing outside a pixmap is clipped. Only
//! construction with bad arguments and checked blits report failures.

use std::path::PathBuf;

use crate::pixel::PixelType;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid pixel type id {0}")]
    InvalidPixelType(u32),

    #[error("pixel type {0} cannot be allocated")]
    UnknownPixelType(PixelType),

    #[error("unknown pixel type name {0:?}")]
    UnknownPixelTypeName(String),

    #[error("pixmap {w}x{h} of {pixel_type} is too large")]
    TooLarge { w: u32, h: u32, pixel_type: PixelType },

    #[error("stride {stride} is smaller than the {min} bytes needed per row")]
    InvalidStride { stride: usize, min: usize },

    #[error("buffer holds {len} bytes, {needed} needed")]
    DataTooSmall { len: usize, needed: usize },

    #[error("sub-pixmap {x},{y} {w}x{h} is outside of the {parent_w}x{parent_h} parent")]
    SubPixmapOutOfBounds {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        parent_w: u32,
        parent_h: u32,
    },

    #[error("blit rectangle {x0},{y0}-{x1},{y1} does not fit")]
    BlitOutOfBounds { x0: i32, y0: i32, x1: i32, y1: i32 },

    #[error("failed to read or write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene description")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
