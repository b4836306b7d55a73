//! Fixed-dimension f64 vectors with capability-dispatched operators.
//!
//! A [`SmallVector`] holds one to four `f64` elements. Binary operators resolve
//! an effective dimension, then run on the widest strategy the hardware
//! capabilities allow:
//!
//! | Dimension | 256-bit | 128-bit only | neither |
//! |-----------|---------|--------------|---------|
//! | 1         | scalar  | scalar       | scalar  |
//! | 2         | 128-bit | 128-bit      | scalar  |
//! | 3, 4      | 256-bit | partial      | scalar  |
//!
//! # Module Structure
//!
//! - `dispatch` - dimension resolution and strategy selection
//! - `kernels` - per-ISA lane kernels and the scalar fallback
//! - `format` - locale-aware `<a, b>` rendering
//!
//! # Example
//!
//! ```
//! use lanevec_core::{NumberFormat, SmallVector};
//!
//! let diff = SmallVector::from([6.0, 9.0]) - SmallVector::from([2.0, 3.0]);
//! assert_eq!(diff.to_string_with(&NumberFormat::invariant()), "<4, 6>");
//! ```

pub mod dispatch;
mod format;
mod kernels;

#[cfg(test)]
mod small_vector_tests;

use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use crate::capabilities::{capabilities, HardwareCapabilities};
use crate::error::{Error, Result};
use crate::register::{Lane128, Lane256, TypedRegister};
use crate::size_table::ElementKind;

pub use dispatch::{select_strategy, BinaryOp, Strategy};
pub use format::NumberFormat;

use kernels::{Lanes2, Lanes4};

/// Largest supported dimension.
pub const MAX_DIM: usize = 4;

const F64_BYTES: usize = std::mem::size_of::<f64>();

#[derive(Debug, Clone, Copy)]
enum Repr {
    /// D = 1.
    Scalar(f64),
    /// D = 2.
    Pair(Lanes2),
    /// D = 3 or 4; lane 3 is zero when D = 3.
    Quad { lanes: Lanes4, dim: usize },
    /// One value standing for every lane; takes the other operand's dimension.
    Broadcast(f64),
}

/// Vector of one to four `f64` elements.
///
/// Exactly one representation is populated for a given dimension. The
/// [`SmallVector::ZERO`], [`SmallVector::ONE`] and [`SmallVector::ALL_BITS_SET`]
/// constants are broadcast vectors: in a binary operation they take the other
/// operand's dimension.
///
/// The `std::ops` operators panic when two non-broadcast operands differ in
/// dimension; the `try_*` methods report [`Error::DimensionMismatch`] instead.
#[derive(Debug, Clone, Copy)]
pub struct SmallVector {
    repr: Repr,
}

impl SmallVector {
    /// Broadcast `0.0`.
    pub const ZERO: Self = Self::constant(0.0);

    /// Broadcast `1.0`.
    pub const ONE: Self = Self::constant(1.0);

    /// Broadcast value with every bit set (a NaN payload).
    pub const ALL_BITS_SET: Self = Self::constant(f64::from_bits(u64::MAX));

    /// Broadcast vector with nominal dimension 4.
    pub(crate) const fn constant(value: f64) -> Self {
        Self {
            repr: Repr::Broadcast(value),
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// One-element vector.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            repr: Repr::Scalar(value),
        }
    }

    /// Vector copied from `values`, which must hold 1 to 4 elements.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::from_slice_at(values, 0)
    }

    /// Vector copied from `values[start..]`.
    ///
    /// Fails with [`Error::OutOfRange`] when `start` is not inside `values` or
    /// when the remainder is longer than 4.
    pub fn from_slice_at(values: &[f64], start: usize) -> Result<Self> {
        if start >= values.len() {
            return Err(Error::OutOfRange {
                index: start,
                len: values.len(),
            });
        }
        Self::from_exact(&values[start..])
    }

    /// Vector copied from `count` elements of `values` starting at `start`.
    pub fn from_slice_at_len(values: &[f64], start: usize, count: usize) -> Result<Self> {
        if start >= values.len() {
            return Err(Error::OutOfRange {
                index: start,
                len: values.len(),
            });
        }
        let end = start.saturating_add(count);
        if end > values.len() {
            return Err(Error::OutOfRange {
                index: end,
                len: values.len(),
            });
        }
        Self::from_exact(&values[start..end])
    }

    /// Vector read from native-endian `f64` bytes.
    ///
    /// Trailing bytes that do not fill a whole element are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut values = [0.0; MAX_DIM];
        let count = bytes.len() / F64_BYTES;
        if count == 0 || count > MAX_DIM {
            return Err(length_out_of_range(count));
        }
        for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(F64_BYTES)) {
            *value = bytemuck::pod_read_unaligned(chunk);
        }
        Self::from_exact(&values[..count])
    }

    /// Vector holding the elements of an `f64` register.
    ///
    /// A broadcast register yields a broadcast vector.
    pub fn from_register(register: &TypedRegister) -> Result<Self> {
        if register.kind() != ElementKind::F64 {
            return Err(Error::UnsupportedType(register.kind().to_string()));
        }
        if register.is_broadcast() {
            return Ok(Self::constant(register.get::<f64>(0)));
        }
        Self::from_exact(&register.to_vec::<f64>())
    }

    fn from_exact(values: &[f64]) -> Result<Self> {
        let repr = match *values {
            [x] => Repr::Scalar(x),
            [x, y] => Repr::Pair(Lanes2([x, y])),
            [x, y, z] => Repr::Quad {
                lanes: Lanes4([x, y, z, 0.0]),
                dim: 3,
            },
            [x, y, z, w] => Repr::Quad {
                lanes: Lanes4([x, y, z, w]),
                dim: 4,
            },
            _ => return Err(length_out_of_range(values.len())),
        };
        Ok(Self { repr })
    }

    pub(crate) fn from_pair(lanes: Lanes2) -> Self {
        Self {
            repr: Repr::Pair(lanes),
        }
    }

    /// Result vector of dimension `dim` (1..=4) from kernel output lanes.
    pub(crate) fn from_lanes(dim: usize, mut lanes: Lanes4) -> Self {
        let repr = match dim {
            1 => Repr::Scalar(lanes.0[0]),
            2 => Repr::Pair(lanes.low()),
            _ => {
                if dim == 3 {
                    lanes.0[3] = 0.0;
                }
                Repr::Quad {
                    lanes,
                    dim: dim.min(MAX_DIM),
                }
            }
        };
        Self { repr }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of elements. Broadcast constants report 4.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        match self.repr {
            Repr::Scalar(_) => 1,
            Repr::Pair(_) => 2,
            Repr::Quad { dim, .. } => dim,
            Repr::Broadcast(_) => MAX_DIM,
        }
    }

    /// Whether this is one of the broadcast constants.
    #[inline]
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        matches!(self.repr, Repr::Broadcast(_))
    }

    /// Element `index`, or `None` past the dimension.
    ///
    /// Broadcast vectors return their value for every index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        match self.repr {
            Repr::Broadcast(value) => Some(value),
            _ => self.as_slice().get(index).copied(),
        }
    }

    /// The populated elements.
    ///
    /// A broadcast vector holds a single value, so its slice has one element.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match &self.repr {
            Repr::Scalar(value) | Repr::Broadcast(value) => std::slice::from_ref(value),
            Repr::Pair(lanes) => &lanes.0,
            Repr::Quad { lanes, dim } => &lanes.0[..*dim],
        }
    }

    /// The populated elements as a new `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Copies the elements to the front of `destination`.
    pub fn copy_to(&self, destination: &mut [f64]) -> Result<()> {
        self.copy_to_at(destination, 0)
    }

    /// Copies the elements into `destination[start..]`.
    pub fn copy_to_at(&self, destination: &mut [f64], start: usize) -> Result<()> {
        if start >= destination.len() {
            return Err(Error::OutOfRange {
                index: start,
                len: destination.len(),
            });
        }
        let source = self.as_slice();
        let available = destination.len() - start;
        if available < source.len() {
            return Err(Error::DestinationTooSmall {
                required: source.len(),
                available,
            });
        }
        destination[start..start + source.len()].copy_from_slice(source);
        Ok(())
    }

    /// Copies the elements to the front of `destination` if they fit.
    #[must_use]
    pub fn try_copy_to(&self, destination: &mut [f64]) -> bool {
        self.copy_to(destination).is_ok()
    }

    /// Register holding the elements, built from the widest matching blocks.
    pub fn to_register(&self) -> Result<TypedRegister> {
        match self.repr {
            Repr::Broadcast(value) => TypedRegister::broadcast(value),
            Repr::Scalar(value) => TypedRegister::from_value(value),
            Repr::Pair(lanes) => TypedRegister::from_lane128::<f64>(Lane128::from_elements(&lanes.0)),
            Repr::Quad { lanes, dim: 3 } => TypedRegister::from_lane128_and_value(
                Lane128::from_elements(&lanes.low().0),
                lanes.0[2],
            ),
            Repr::Quad { lanes, .. } => {
                TypedRegister::from_lane256::<f64>(Lane256::from_elements(&lanes.0))
            }
        }
    }

    #[inline]
    pub(crate) fn lanes2(&self) -> Lanes2 {
        match self.repr {
            Repr::Scalar(value) => Lanes2([value, 0.0]),
            Repr::Pair(lanes) => lanes,
            Repr::Quad { lanes, .. } => lanes.low(),
            Repr::Broadcast(value) => Lanes2([value; 2]),
        }
    }

    #[inline]
    pub(crate) fn lanes4(&self) -> Lanes4 {
        match self.repr {
            Repr::Scalar(value) => Lanes4([value, 0.0, 0.0, 0.0]),
            Repr::Pair(lanes) => Lanes4::from_halves(lanes, Lanes2::default()),
            Repr::Quad { lanes, .. } => lanes,
            Repr::Broadcast(value) => Lanes4([value; 4]),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// `op` on the process-wide capabilities.
    pub fn apply(&self, op: BinaryOp, rhs: &Self) -> Result<Self> {
        self.apply_with(op, rhs, &capabilities())
    }

    /// `op` restricted to `caps`.
    pub fn apply_with(&self, op: BinaryOp, rhs: &Self, caps: &HardwareCapabilities) -> Result<Self> {
        dispatch::binary(op, self, rhs, caps)
    }

    /// Element-wise sum.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.apply(BinaryOp::Add, rhs)
    }

    /// Element-wise difference.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.apply(BinaryOp::Sub, rhs)
    }

    /// Element-wise product.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.apply(BinaryOp::Mul, rhs)
    }

    /// Element-wise quotient.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.apply(BinaryOp::Div, rhs)
    }

    /// `ZERO - self`.
    pub fn try_neg(&self) -> Result<Self> {
        Self::ZERO.try_sub(self)
    }

    /// Every element multiplied by `factor`.
    ///
    /// The factor is broadcast and multiplied through the vector dispatch, so
    /// the result is bit-identical to per-element scalar multiplication.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        self.scale_with(factor, &capabilities())
    }

    /// [`SmallVector::scale`] restricted to `caps`.
    #[must_use]
    pub fn scale_with(&self, factor: f64, caps: &HardwareCapabilities) -> Self {
        operator_result(dispatch::binary(
            BinaryOp::Mul,
            self,
            &Self::constant(factor),
            caps,
        ))
    }

    /// Equality on the process-wide capabilities.
    pub fn try_eq(&self, rhs: &Self) -> Result<bool> {
        self.eq_with(rhs, &capabilities())
    }

    /// Equality restricted to `caps`.
    ///
    /// Hardware strategies compare with the ordered compare, so a NaN lane is
    /// never equal; the scalar strategy treats NaN as equal to NaN.
    pub fn eq_with(&self, rhs: &Self, caps: &HardwareCapabilities) -> Result<bool> {
        dispatch::equals(self, rhs, caps)
    }

    /// Renders with an explicit number format.
    #[must_use]
    pub fn to_string_with(&self, format: &NumberFormat) -> String {
        format.format_values(self.as_slice())
    }
}

fn length_out_of_range(len: usize) -> Error {
    Error::OutOfRange {
        index: len,
        len: MAX_DIM,
    }
}

#[track_caller]
fn operator_result(result: Result<SmallVector>) -> SmallVector {
    match result {
        Ok(vector) => vector,
        Err(err) => panic!("{err}"),
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<f64> for SmallVector {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<[f64; 2]> for SmallVector {
    fn from(values: [f64; 2]) -> Self {
        Self::from_pair(Lanes2(values))
    }
}

impl From<[f64; 3]> for SmallVector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_lanes(3, Lanes4([x, y, z, 0.0]))
    }
}

impl From<[f64; 4]> for SmallVector {
    fn from(values: [f64; 4]) -> Self {
        Self::from_lanes(4, Lanes4(values))
    }
}

impl TryFrom<&[f64]> for SmallVector {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl TryFrom<&TypedRegister> for SmallVector {
    type Error = Error;

    fn try_from(register: &TypedRegister) -> Result<Self> {
        Self::from_register(register)
    }
}

// =============================================================================
// Operators
// =============================================================================

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for SmallVector {
            type Output = SmallVector;

            /// # Panics
            ///
            /// Panics when both operands are non-broadcast and differ in dimension.
            #[track_caller]
            fn $method(self, rhs: SmallVector) -> SmallVector {
                operator_result(self.apply($op, &rhs))
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::Div);

impl Mul<f64> for SmallVector {
    type Output = SmallVector;

    fn mul(self, factor: f64) -> SmallVector {
        self.scale(factor)
    }
}

impl Mul<SmallVector> for f64 {
    type Output = SmallVector;

    fn mul(self, vector: SmallVector) -> SmallVector {
        vector.scale(self)
    }
}

impl Neg for SmallVector {
    type Output = SmallVector;

    #[track_caller]
    fn neg(self) -> SmallVector {
        operator_result(self.try_neg())
    }
}

impl PartialEq for SmallVector {
    /// `false` when both operands are non-broadcast and differ in dimension.
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

impl Index<usize> for SmallVector {
    type Output = f64;

    /// Broadcast vectors ignore `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= dim()` on a non-broadcast vector.
    fn index(&self, index: usize) -> &f64 {
        match &self.repr {
            Repr::Broadcast(value) => value,
            _ => &self.as_slice()[index],
        }
    }
}

impl fmt::Display for SmallVector {
    /// Renders in the process locale; `{:.N}` fixes the fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut format = NumberFormat::current();
        if let Some(precision) = f.precision() {
            format = format.with_precision(precision);
        }
        f.write_str(&self.to_string_with(&format))
    }
}
