//! SSE2 kernels for two f64 lanes (x86_64).
//!
//! All functions require SSE2 detection before calling.

#![allow(clippy::wildcard_imports)]

use super::Lanes2;
use crate::small_vector::dispatch::BinaryOp;

/// One 2-lane SSE2 instruction.
///
/// # Safety
///
/// Caller must ensure the CPU supports SSE2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
#[inline]
pub(crate) unsafe fn binary(op: BinaryOp, a: &Lanes2, b: &Lanes2) -> Lanes2 {
    // SAFETY: `Lanes2` is 16-byte aligned, so `_mm_load_pd` / `_mm_store_pd` are valid.
    use std::arch::x86_64::*;

    let va = _mm_load_pd(a.0.as_ptr());
    let vb = _mm_load_pd(b.0.as_ptr());
    let vr = match op {
        BinaryOp::Add => _mm_add_pd(va, vb),
        BinaryOp::Sub => _mm_sub_pd(va, vb),
        BinaryOp::Mul => _mm_mul_pd(va, vb),
        BinaryOp::Div => _mm_div_pd(va, vb),
    };

    let mut out = Lanes2::default();
    _mm_store_pd(out.0.as_mut_ptr(), vr);
    out
}

/// Ordered compare of both lanes; true only if both report equal.
///
/// # Safety
///
/// Caller must ensure the CPU supports SSE2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
#[inline]
pub(crate) unsafe fn eq(a: &Lanes2, b: &Lanes2) -> bool {
    use std::arch::x86_64::*;

    let va = _mm_load_pd(a.0.as_ptr());
    let vb = _mm_load_pd(b.0.as_ptr());
    _mm_movemask_pd(_mm_cmpeq_pd(va, vb)) == 0b11
}
