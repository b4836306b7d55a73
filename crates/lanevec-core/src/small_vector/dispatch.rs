//! Dimension resolution and strategy selection for small-vector operators.
//!
//! Every binary operator goes through the same two steps:
//! 1. Resolve the effective dimension. A broadcast operand adopts the other
//!    operand's dimension; two plain operands must agree.
//! 2. Pick a strategy from the dimension and the capabilities in effect.

use crate::capabilities::HardwareCapabilities;
use crate::error::{Error, Result};

use super::kernels::{self, scalar, Lanes4};
use super::SmallVector;

/// Element-wise binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOp {
    /// Applies the operator to one pair of lanes.
    #[inline]
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// Execution strategy for one operator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Independent scalar operations per lane.
    Scalar,
    /// One 128-bit instruction over two lanes.
    Simd128,
    /// Two 128-bit instructions, or one plus a scalar lane for three lanes.
    Partial128,
    /// One 256-bit instruction over four lanes.
    Simd256,
}

/// Strategy used for vectors of `dim` elements under `caps`.
pub fn select_strategy(dim: usize, caps: &HardwareCapabilities) -> Result<Strategy> {
    match dim {
        1 => Ok(Strategy::Scalar),
        2 if caps.has_128() => Ok(Strategy::Simd128),
        2 => Ok(Strategy::Scalar),
        3 | 4 if caps.has_256() => Ok(Strategy::Simd256),
        3 | 4 if caps.has_128() => Ok(Strategy::Partial128),
        3 | 4 => Ok(Strategy::Scalar),
        other => Err(Error::DimensionOutOfRange(other)),
    }
}

/// Effective dimension of a binary operation.
pub(crate) fn resolve_dimension(left: &SmallVector, right: &SmallVector) -> Result<usize> {
    if left.is_broadcast() {
        Ok(right.dim())
    } else if right.is_broadcast() {
        Ok(left.dim())
    } else if left.dim() != right.dim() {
        Err(Error::DimensionMismatch {
            left: left.dim(),
            right: right.dim(),
        })
    } else {
        Ok(left.dim())
    }
}

/// Element-wise `op` over both operands.
pub(crate) fn binary(
    op: BinaryOp,
    left: &SmallVector,
    right: &SmallVector,
    caps: &HardwareCapabilities,
) -> Result<SmallVector> {
    let dim = resolve_dimension(left, right)?;
    let lanes = match select_strategy(dim, caps)? {
        Strategy::Scalar => scalar::binary4(op, &left.lanes4(), &right.lanes4(), dim),
        Strategy::Simd128 => {
            let pair = kernels::binary_128(op, &left.lanes2(), &right.lanes2(), caps);
            return Ok(SmallVector::from_pair(pair));
        }
        Strategy::Partial128 => {
            kernels::binary_partial(op, &left.lanes4(), &right.lanes4(), dim, caps)
        }
        Strategy::Simd256 => kernels::binary_256(op, &left.lanes4(), &right.lanes4(), caps),
    };
    Ok(SmallVector::from_lanes(dim, lanes))
}

/// Whether every compared lane is equal.
///
/// The scalar strategy uses native equality (NaN equals NaN); hardware
/// strategies use the ordered compare (NaN never equal). Inputs without NaN
/// give the same answer on every strategy.
pub(crate) fn equals(
    left: &SmallVector,
    right: &SmallVector,
    caps: &HardwareCapabilities,
) -> Result<bool> {
    let dim = resolve_dimension(left, right)?;
    let equal = match select_strategy(dim, caps)? {
        Strategy::Scalar => {
            let (a, b): (Lanes4, Lanes4) = (left.lanes4(), right.lanes4());
            scalar::eq_lanes(&a.0[..dim], &b.0[..dim])
        }
        Strategy::Simd128 => kernels::eq_128(&left.lanes2(), &right.lanes2(), caps),
        Strategy::Partial128 => kernels::eq_partial(&left.lanes4(), &right.lanes4(), dim, caps),
        Strategy::Simd256 => kernels::eq_256(&left.lanes4(), &right.lanes4(), dim, caps),
    };
    Ok(equal)
}
