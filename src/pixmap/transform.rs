//! Pixmap orientation.
//!
//! Drawing coordinates are "user" coordinates. Before touching memory they are
//! mapped onto the stored ("raw") layout: axes are swapped first, then each
//! axis is optionally mirrored against the raw size.

use bitflags::bitflags;

use crate::gfx::fixed::{fp_from_int, Fp};

bitflags! {
    /// Orientation flags of a pixmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Orientation: u8 {
        const AXES_SWAP = 0x01;
        const X_SWAP = 0x02;
        const Y_SWAP = 0x04;
    }
}

/// Rotations and mirrors applied through [`Orientation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// Clockwise by 90 degrees
    Rotate90,
    Rotate180,
    /// Clockwise by 270 degrees, i.e. counter clockwise by 90
    Rotate270,
    /// Upside down
    MirrorH,
    /// Left to right
    MirrorV,
}

impl Orientation {
    /// Apply a symmetry on top of the current orientation.
    ///
    /// Quarter turns walk two mirrored cycles of `(x_swap, y_swap)`, each step
    /// toggling `axes_swap`. Clockwise: `00 -> 10 -> 11 -> 01`, counter
    /// clockwise: `00 -> 01 -> 11 -> 10`.
    pub fn rotated(self, symmetry: Symmetry) -> Self {
        let x = self.contains(Self::X_SWAP);
        let y = self.contains(Self::Y_SWAP);

        let (nx, ny) = match symmetry {
            Symmetry::Rotate90 => match (x, y) {
                (false, false) => (true, false),
                (true, false) => (true, true),
                (true, true) => (false, true),
                (false, true) => (false, false),
            },
            Symmetry::Rotate270 => match (x, y) {
                (false, false) => (false, true),
                (false, true) => (true, true),
                (true, true) => (true, false),
                (true, false) => (false, false),
            },
            Symmetry::Rotate180 => (!x, !y),
            Symmetry::MirrorH => (x, !y),
            Symmetry::MirrorV => (!x, y),
        };

        let mut out = self;
        if matches!(symmetry, Symmetry::Rotate90 | Symmetry::Rotate270) {
            out.toggle(Self::AXES_SWAP);
        }
        out.set(Self::X_SWAP, nx);
        out.set(Self::Y_SWAP, ny);
        out
    }

    /// Size as seen by the user for a raw `w` x `h` buffer
    #[inline]
    pub fn user_size(self, w: u32, h: u32) -> (u32, u32) {
        if self.contains(Self::AXES_SWAP) {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Map a user point onto raw coordinates of a `w` x `h` buffer
    #[inline]
    pub fn transform_point(self, x: i64, y: i64, w: u32, h: u32) -> (i64, i64) {
        let (mut x, mut y) = if self.contains(Self::AXES_SWAP) {
            (y, x)
        } else {
            (x, y)
        };
        if self.contains(Self::X_SWAP) {
            x = w as i64 - 1 - x;
        }
        if self.contains(Self::Y_SWAP) {
            y = h as i64 - 1 - y;
        }
        (x, y)
    }

    /// Map raw coordinates of a `w` x `h` buffer back to user coordinates
    #[inline]
    pub fn inverse_transform_point(self, x: i64, y: i64, w: u32, h: u32) -> (i64, i64) {
        let x = if self.contains(Self::X_SWAP) { w as i64 - 1 - x } else { x };
        let y = if self.contains(Self::Y_SWAP) { h as i64 - 1 - y } else { y };
        if self.contains(Self::AXES_SWAP) {
            (y, x)
        } else {
            (x, y)
        }
    }

    /// Same as [`transform_point`](Self::transform_point) for 24.8 fixed point
    #[inline]
    pub fn transform_point_fp(self, x: Fp, y: Fp, w: u32, h: u32) -> (Fp, Fp) {
        let (mut x, mut y) = if self.contains(Self::AXES_SWAP) {
            (y, x)
        } else {
            (x, y)
        };
        if self.contains(Self::X_SWAP) {
            x = fp_from_int(w as i64 - 1) - x;
        }
        if self.contains(Self::Y_SWAP) {
            y = fp_from_int(h as i64 - 1) - y;
        }
        (x, y)
    }

    /// Map a user rectangle onto raw coordinates of a `w` x `h` buffer
    pub fn transform_rect(
        self,
        x: i64,
        y: i64,
        rw: u32,
        rh: u32,
        w: u32,
        h: u32,
    ) -> (i64, i64, u32, u32) {
        let (mut x, mut y, rw, rh) = if self.contains(Self::AXES_SWAP) {
            (y, x, rh, rw)
        } else {
            (x, y, rw, rh)
        };
        if self.contains(Self::X_SWAP) {
            x = w as i64 - x - rw as i64;
        }
        if self.contains(Self::Y_SWAP) {
            y = h as i64 - y - rh as i64;
        }
        (x, y, rw, rh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_cw_cycle() {
        let mut o = Orientation::empty();
        let expected = [
            Orientation::X_SWAP | Orientation::AXES_SWAP,
            Orientation::X_SWAP | Orientation::Y_SWAP,
            Orientation::Y_SWAP | Orientation::AXES_SWAP,
            Orientation::empty(),
        ];
        for e in expected {
            o = o.rotated(Symmetry::Rotate90);
            assert_eq!(o, e);
        }
    }

    #[test]
    fn test_rotate_ccw_undoes_cw() {
        let mut o = Orientation::empty();
        for _ in 0..3 {
            o = o.rotated(Symmetry::Rotate90);
            assert_eq!(o.rotated(Symmetry::Rotate270).rotated(Symmetry::Rotate90), o);
        }
        let o = Orientation::X_SWAP | Orientation::AXES_SWAP;
        assert_eq!(o.rotated(Symmetry::Rotate270), Orientation::empty());
    }

    #[test]
    fn test_rotate_twice_is_180() {
        let mut o = Orientation::empty();
        for _ in 0..4 {
            assert_eq!(
                o.rotated(Symmetry::Rotate90).rotated(Symmetry::Rotate90),
                o.rotated(Symmetry::Rotate180)
            );
            o = o.rotated(Symmetry::Rotate90);
        }
        assert_eq!(
            Orientation::empty().rotated(Symmetry::Rotate180),
            Orientation::X_SWAP | Orientation::Y_SWAP
        );
    }

    #[test]
    fn test_mirrors() {
        assert_eq!(Orientation::empty().rotated(Symmetry::MirrorH), Orientation::Y_SWAP);
        assert_eq!(Orientation::empty().rotated(Symmetry::MirrorV), Orientation::X_SWAP);
    }

    #[test]
    fn test_transform_point() {
        let o = Orientation::AXES_SWAP | Orientation::X_SWAP;
        // raw buffer 10x4, user sees 4x10
        assert_eq!(o.transform_point(0, 0, 10, 4), (9, 0));
        assert_eq!(o.transform_point(3, 9, 10, 4), (0, 3));
        assert_eq!(Orientation::Y_SWAP.transform_point(2, 0, 10, 4), (2, 3));
    }

    #[test]
    fn test_inverse_transform_point() {
        for bits in 0..8 {
            let o = Orientation::from_bits_truncate(bits);
            for (x, y) in [(0, 0), (3, 1), (9, 3)] {
                let (ux, uy) = o.inverse_transform_point(x, y, 10, 4);
                assert_eq!(o.transform_point(ux, uy, 10, 4), (x, y), "{:?}", o);
            }
        }
    }

    #[test]
    fn test_transform_rect() {
        let o = Orientation::X_SWAP;
        assert_eq!(o.transform_rect(1, 1, 3, 2, 10, 4), (6, 1, 3, 2));
        let o = Orientation::AXES_SWAP;
        assert_eq!(o.transform_rect(1, 2, 3, 4, 10, 10), (2, 1, 4, 3));
    }
}
