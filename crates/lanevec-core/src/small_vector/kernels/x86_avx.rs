//! AVX kernels for four f64 lanes (x86_64).
//!
//! All functions require AVX detection before calling. For three-lane
//! vectors lane 3 is computed but carries no meaning.

#![allow(clippy::wildcard_imports)]

use super::Lanes4;
use crate::small_vector::dispatch::BinaryOp;

/// One 4-lane AVX instruction.
///
/// # Safety
///
/// Caller must ensure the CPU supports AVX.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
#[inline]
pub(crate) unsafe fn binary(op: BinaryOp, a: &Lanes4, b: &Lanes4) -> Lanes4 {
    // SAFETY: `Lanes4` is 32-byte aligned, so `_mm256_load_pd` / `_mm256_store_pd` are valid.
    use std::arch::x86_64::*;

    let va = _mm256_load_pd(a.0.as_ptr());
    let vb = _mm256_load_pd(b.0.as_ptr());
    let vr = match op {
        BinaryOp::Add => _mm256_add_pd(va, vb),
        BinaryOp::Sub => _mm256_sub_pd(va, vb),
        BinaryOp::Mul => _mm256_mul_pd(va, vb),
        BinaryOp::Div => _mm256_div_pd(va, vb),
    };

    let mut out = Lanes4::default();
    _mm256_store_pd(out.0.as_mut_ptr(), vr);
    out
}

/// Ordered non-signalling compare; true only if the first `dim` lanes all
/// report equal.
///
/// # Safety
///
/// Caller must ensure the CPU supports AVX and `dim <= 4`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
#[inline]
pub(crate) unsafe fn eq(a: &Lanes4, b: &Lanes4, dim: usize) -> bool {
    use std::arch::x86_64::*;

    let va = _mm256_load_pd(a.0.as_ptr());
    let vb = _mm256_load_pd(b.0.as_ptr());
    let mask = _mm256_movemask_pd(_mm256_cmp_pd::<_CMP_EQ_OQ>(va, vb));
    let wanted = (1_i32 << dim) - 1;
    mask & wanted == wanted
}
