//! 24.8 fixed point coordinates used by the antialiased primitives.
//!
//! Values are carried in `i64` so that transforming or offsetting a full range
//! `i32` coordinate can not overflow.

pub type Fp = i64;

pub const FP_FRAC_BITS: u32 = 8;
pub const FP_1: Fp = 1 << FP_FRAC_BITS;
pub const FP_1_2: Fp = FP_1 / 2;
pub const FP_FRAC_MASK: Fp = FP_1 - 1;

#[inline]
pub const fn fp_from_int(v: i64) -> Fp {
    v << FP_FRAC_BITS
}

/// Largest integer not greater than `v`
#[inline]
pub const fn fp_floor_to_int(v: Fp) -> i64 {
    v >> FP_FRAC_BITS
}

#[inline]
pub const fn fp_ceil_to_int(v: Fp) -> i64 {
    (v + FP_FRAC_MASK) >> FP_FRAC_BITS
}

#[inline]
pub const fn fp_round_to_int(v: Fp) -> i64 {
    (v + FP_1_2) >> FP_FRAC_BITS
}

#[inline]
pub const fn fp_frac(v: Fp) -> Fp {
    v & FP_FRAC_MASK
}

#[inline]
pub const fn fp_mul(a: Fp, b: Fp) -> Fp {
    (a * b) >> FP_FRAC_BITS
}

#[inline]
pub const fn fp_div(a: Fp, b: Fp) -> Fp {
    (a << FP_FRAC_BITS) / b
}
