//! NEON kernels for two f64 lanes (aarch64).
//!
//! NEON is part of the aarch64 baseline; callers still check the detected
//! capability so dispatch stays uniform across architectures.

#![allow(clippy::wildcard_imports)]

use super::Lanes2;
use crate::small_vector::dispatch::BinaryOp;

/// One 2-lane NEON instruction.
#[cfg(target_arch = "aarch64")]
#[inline]
pub(crate) fn binary(op: BinaryOp, a: &Lanes2, b: &Lanes2) -> Lanes2 {
    use std::arch::aarch64::*;

    let mut out = Lanes2::default();
    // SAFETY: NEON intrinsics are always safe on aarch64; `Lanes2` holds exactly
    // two f64 values for `vld1q_f64` / `vst1q_f64`.
    unsafe {
        let va = vld1q_f64(a.0.as_ptr());
        let vb = vld1q_f64(b.0.as_ptr());
        let vr = match op {
            BinaryOp::Add => vaddq_f64(va, vb),
            BinaryOp::Sub => vsubq_f64(va, vb),
            BinaryOp::Mul => vmulq_f64(va, vb),
            BinaryOp::Div => vdivq_f64(va, vb),
        };
        vst1q_f64(out.0.as_mut_ptr(), vr);
    }
    out
}

/// Ordered compare of both lanes; true only if both report equal.
#[cfg(target_arch = "aarch64")]
#[inline]
pub(crate) fn eq(a: &Lanes2, b: &Lanes2) -> bool {
    use std::arch::aarch64::*;

    // SAFETY: Same as `binary`.
    unsafe {
        let mask = vceqq_f64(vld1q_f64(a.0.as_ptr()), vld1q_f64(b.0.as_ptr()));
        vgetq_lane_u64::<0>(mask) == u64::MAX && vgetq_lane_u64::<1>(mask) == u64::MAX
    }
}
