//! Incremental register construction from mixed-width segments.
//!
//! Segments are always written in the order 256-bit blocks, 128-bit blocks,
//! scalar or slice tail, each immediately after the previous one, no matter
//! in which order the builder methods were called.

use crate::error::{Error, Result};
use crate::size_table::Element;

use super::lane::{Lane128, Lane256};
use super::typed::{RegisterMode, TypedRegister};

#[derive(Debug, Clone, Copy)]
enum Tail<'a, T> {
    Empty,
    Value(T),
    Slice(&'a [T]),
}

/// Builder concatenating 256-bit blocks, 128-bit blocks and a tail.
///
/// # Example
///
/// ```
/// use lanevec_core::register::{Lane128, RegisterAssembler};
///
/// let block = Lane128::from_elements(&[1.0_f64, 2.0]);
/// let register = RegisterAssembler::new()
///     .with_blocks128(&[block])
///     .with_value(3.0_f64)
///     .build()?;
/// assert_eq!(register.to_vec::<f64>(), vec![1.0, 2.0, 3.0]);
/// # Ok::<(), lanevec_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RegisterAssembler<'a, T: Element> {
    blocks256: &'a [Lane256],
    blocks128: &'a [Lane128],
    tail: Tail<'a, T>,
}

impl<T: Element> Default for RegisterAssembler<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Element> RegisterAssembler<'a, T> {
    /// Assembler with every segment empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks256: &[],
            blocks128: &[],
            tail: Tail::Empty,
        }
    }

    /// Leading 256-bit blocks.
    #[must_use]
    pub fn with_blocks256(mut self, blocks: &'a [Lane256]) -> Self {
        self.blocks256 = blocks;
        self
    }

    /// 128-bit blocks following the 256-bit ones.
    #[must_use]
    pub fn with_blocks128(mut self, blocks: &'a [Lane128]) -> Self {
        self.blocks128 = blocks;
        self
    }

    /// Single trailing value. Replaces any previous tail.
    #[must_use]
    pub fn with_value(mut self, value: T) -> Self {
        self.tail = Tail::Value(value);
        self
    }

    /// Trailing values. Replaces any previous tail.
    #[must_use]
    pub fn with_slice(mut self, values: &'a [T]) -> Self {
        self.tail = Tail::Slice(values);
        self
    }

    fn tail_len(&self) -> usize {
        match self.tail {
            Tail::Empty => 0,
            Tail::Value(_) => 1,
            Tail::Slice(values) => values.len(),
        }
    }

    /// Logical element count the built register will have.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks256.len() * T::KIND.lanes_256()
            + self.blocks128.len() * T::KIND.lanes_128()
            + self.tail_len()
    }

    /// Whether every segment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocates the register and writes every segment.
    ///
    /// Fails with [`Error::EmptyAssembly`] when every segment is empty.
    pub fn build(self) -> Result<TypedRegister> {
        if self.is_empty() {
            return Err(Error::EmptyAssembly);
        }

        let mut register = TypedRegister::allocate(T::KIND, self.len(), RegisterMode::Dense)?;
        let bytes = register.bytes_mut();
        let mut offset = 0;

        for block in self.blocks256 {
            bytes[offset..offset + Lane256::BYTES].copy_from_slice(block.as_bytes());
            offset += Lane256::BYTES;
        }

        for block in self.blocks128 {
            bytes[offset..offset + Lane128::BYTES].copy_from_slice(block.as_bytes());
            offset += Lane128::BYTES;
        }

        let tail: &[u8] = match &self.tail {
            Tail::Empty => &[],
            Tail::Value(value) => bytemuck::bytes_of(value),
            Tail::Slice(values) => bytemuck::cast_slice(values),
        };
        bytes[offset..offset + tail.len()].copy_from_slice(tail);

        Ok(register)
    }
}
