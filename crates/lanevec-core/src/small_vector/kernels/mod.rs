//! Lane kernels for small vectors.
//!
//! # Module Structure
//!
//! - `scalar` - per-lane fallback and native scalar equality
//! - `x86_sse2` - 2-lane SSE2 kernels (x86_64 only)
//! - `x86_avx` - 4-lane AVX kernels (x86_64 only)
//! - `neon` - 2-lane NEON kernels (aarch64 only)
//!
//! The safe wrappers below take the capabilities that selected them and
//! re-check the one flag they need before entering a `#[target_feature]`
//! kernel, so a wrapper can never run an instruction the CPU lacks.

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for SIMD unsafe blocks in this module tree.
// - Condition 1: Loads and stores go through `Lanes2` / `Lanes4`, which are aligned
//   to their full width, so aligned load/store intrinsics never fault.
// - Condition 2: Target-featured functions are called only after checking the
//   matching `HardwareCapabilities` flag, and capabilities never claim more than
//   runtime detection reported.
// Reason: Intrinsics are required for the hardware strategies.

pub(crate) mod scalar;

#[cfg(target_arch = "x86_64")]
mod x86_avx;

#[cfg(target_arch = "x86_64")]
mod x86_sse2;

#[cfg(target_arch = "aarch64")]
mod neon;

use crate::capabilities::HardwareCapabilities;

use super::dispatch::BinaryOp;

/// Two f64 lanes aligned for a 128-bit load.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(16))]
pub(crate) struct Lanes2(pub(crate) [f64; 2]);

/// Four f64 lanes aligned for a 256-bit load.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(32))]
pub(crate) struct Lanes4(pub(crate) [f64; 4]);

impl Lanes4 {
    #[inline]
    pub(crate) fn low(&self) -> Lanes2 {
        Lanes2([self.0[0], self.0[1]])
    }

    #[inline]
    pub(crate) fn high(&self) -> Lanes2 {
        Lanes2([self.0[2], self.0[3]])
    }

    #[inline]
    pub(crate) fn from_halves(low: Lanes2, high: Lanes2) -> Self {
        Self([low.0[0], low.0[1], high.0[0], high.0[1]])
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

/// One 2-lane instruction, or two scalar operations without 128-bit support.
#[inline]
pub(crate) fn binary_128(
    op: BinaryOp,
    a: &Lanes2,
    b: &Lanes2,
    caps: &HardwareCapabilities,
) -> Lanes2 {
    #[cfg(target_arch = "x86_64")]
    if caps.sse2() {
        // SAFETY: SSE2 presence checked above (invariant 2); operands are `Lanes2` (invariant 1).
        return unsafe { x86_sse2::binary(op, a, b) };
    }

    #[cfg(target_arch = "aarch64")]
    if caps.neon() {
        return neon::binary(op, a, b);
    }

    let _ = caps;
    scalar::binary2(op, a, b)
}

/// One 4-lane instruction, or the 128-bit halves without 256-bit support.
#[inline]
pub(crate) fn binary_256(
    op: BinaryOp,
    a: &Lanes4,
    b: &Lanes4,
    caps: &HardwareCapabilities,
) -> Lanes4 {
    #[cfg(target_arch = "x86_64")]
    if caps.avx() {
        // SAFETY: AVX presence checked above (invariant 2); operands are `Lanes4` (invariant 1).
        return unsafe { x86_avx::binary(op, a, b) };
    }

    binary_partial(op, a, b, 4, caps)
}

/// Lanes 0-1 as one 128-bit instruction, then lanes 2-3 as a second one
/// (`dim == 4`) or lane 2 as a scalar operation (`dim == 3`).
#[inline]
pub(crate) fn binary_partial(
    op: BinaryOp,
    a: &Lanes4,
    b: &Lanes4,
    dim: usize,
    caps: &HardwareCapabilities,
) -> Lanes4 {
    let low = binary_128(op, &a.low(), &b.low(), caps);
    let high = if dim == 4 {
        binary_128(op, &a.high(), &b.high(), caps)
    } else {
        Lanes2([op.apply(a.0[2], b.0[2]), 0.0])
    };
    Lanes4::from_halves(low, high)
}

// =============================================================================
// Equality
// =============================================================================

/// Both lanes equal under the hardware ordered compare.
#[inline]
pub(crate) fn eq_128(a: &Lanes2, b: &Lanes2, caps: &HardwareCapabilities) -> bool {
    #[cfg(target_arch = "x86_64")]
    if caps.sse2() {
        // SAFETY: SSE2 presence checked above (invariant 2); operands are `Lanes2` (invariant 1).
        return unsafe { x86_sse2::eq(a, b) };
    }

    #[cfg(target_arch = "aarch64")]
    if caps.neon() {
        return neon::eq(a, b);
    }

    let _ = caps;
    scalar::eq_lanes(&a.0, &b.0)
}

/// The first `dim` lanes equal under the hardware ordered compare.
#[inline]
pub(crate) fn eq_256(a: &Lanes4, b: &Lanes4, dim: usize, caps: &HardwareCapabilities) -> bool {
    #[cfg(target_arch = "x86_64")]
    if caps.avx() {
        // SAFETY: AVX presence checked above (invariant 2); operands are `Lanes4` (invariant 1).
        return unsafe { x86_avx::eq(a, b, dim) };
    }

    eq_partial(a, b, dim, caps)
}

/// Lanes 0-1 by hardware compare, then lanes 2-3 by hardware compare
/// (`dim == 4`) or lane 2 by native scalar equality (`dim == 3`).
#[inline]
pub(crate) fn eq_partial(a: &Lanes4, b: &Lanes4, dim: usize, caps: &HardwareCapabilities) -> bool {
    if !eq_128(&a.low(), &b.low(), caps) {
        return false;
    }
    if dim == 4 {
        eq_128(&a.high(), &b.high(), caps)
    } else {
        scalar::native_eq(a.0[2], b.0[2])
    }
}
