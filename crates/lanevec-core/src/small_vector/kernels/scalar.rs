//! Scalar fallback kernels.
//!
//! These functions serve as:
//! - Fallback on CPUs without the needed SIMD extension
//! - Reference implementations for testing SIMD bit-exactness
//! - The lane-2 operation of the partial 128-bit strategy

use super::{Lanes2, Lanes4};
use crate::small_vector::dispatch::BinaryOp;

/// Native element equality: IEEE `==`, except that NaN equals NaN.
///
/// Hardware compares are ordered and report NaN lanes as unequal, so
/// equality results diverge between strategies for NaN inputs only.
#[inline]
#[must_use]
#[allow(clippy::float_cmp)] // Exact equality is the contract.
pub(crate) fn native_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Element-wise native equality over equally long lane slices.
#[inline]
pub(crate) fn eq_lanes(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(&x, &y)| native_eq(x, y))
}

/// Two independent scalar operations on lanes 0 and 1.
#[inline]
pub(crate) fn binary2(op: BinaryOp, a: &Lanes2, b: &Lanes2) -> Lanes2 {
    Lanes2([op.apply(a.0[0], b.0[0]), op.apply(a.0[1], b.0[1])])
}

/// Up to four independent scalar operations; lanes at or past `dim` stay zero.
#[inline]
pub(crate) fn binary4(op: BinaryOp, a: &Lanes4, b: &Lanes4, dim: usize) -> Lanes4 {
    let mut out = Lanes4::default();
    for i in 0..dim.min(4) {
        out.0[i] = op.apply(a.0[i], b.0[i]);
    }
    out
}
