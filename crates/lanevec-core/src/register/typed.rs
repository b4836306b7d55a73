//! Type-erased register over a single owned byte buffer.

use crate::error::Result;
use crate::raw_memory::{RawMemory, REGISTER_ALIGN};
use crate::size_table::{Element, ElementKind, BLOCK_256_BYTES};

use super::assembler::RegisterAssembler;
use super::lane::{Lane128, Lane256};

/// How logical indices map onto the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterMode {
    /// Index `i` lives at byte offset `i << shift`.
    Dense,
    /// Every index reads the value at offset 0.
    Broadcast,
}

/// Fixed-capacity memory block with per-kind, per-width views.
///
/// The register owns its buffer exclusively and is immutable after
/// construction. Typed and lane accessors copy out of the byte buffer, so no
/// two typed aliases over the same bytes are ever live.
///
/// Accessors do not check logical bounds: callers guarantee `index < len()`.
/// Reads past the logical length but inside the allocation return padding
/// bytes that carry no meaning (zero in practice); reads past the allocation
/// panic.
#[derive(Debug)]
pub struct TypedRegister {
    kind: ElementKind,
    len: usize,
    mode: RegisterMode,
    memory: RawMemory,
}

impl TypedRegister {
    /// Allocates a zeroed register of `len` elements of `kind`.
    ///
    /// The buffer is rounded up to whole 256-bit blocks plus one spare block
    /// so element-aligned 256-bit reads starting inside the payload stay in
    /// the allocation.
    pub(crate) fn allocate(kind: ElementKind, len: usize, mode: RegisterMode) -> Result<Self> {
        let payload = match mode {
            RegisterMode::Dense => kind.offset_of(len),
            RegisterMode::Broadcast => BLOCK_256_BYTES,
        };
        let size = payload.next_multiple_of(BLOCK_256_BYTES) + BLOCK_256_BYTES;
        let memory = RawMemory::zeroed(size, REGISTER_ALIGN)?;
        tracing::trace!(%kind, len, ?mode, bytes = size, "Allocated register");
        Ok(Self {
            kind,
            len,
            mode,
            memory,
        })
    }

    /// Register whose every index reads `value`.
    ///
    /// The value is replicated across the full 256-bit lane count for `T`,
    /// which is also the logical length, so wide-lane reads of a broadcast
    /// register never leave the written bytes.
    pub fn broadcast<T: Element>(value: T) -> Result<Self> {
        let mut register = Self::allocate(T::KIND, T::KIND.lanes_256(), RegisterMode::Broadcast)?;
        let block = Lane256::splat(value);
        register.memory.as_bytes_mut()[..BLOCK_256_BYTES].copy_from_slice(block.as_bytes());
        Ok(register)
    }

    /// Single-element register.
    pub fn from_value<T: Element>(value: T) -> Result<Self> {
        RegisterAssembler::new().with_value(value).build()
    }

    /// Register holding a copy of `values`.
    pub fn from_slice<T: Element>(values: &[T]) -> Result<Self> {
        RegisterAssembler::new().with_slice(values).build()
    }

    /// Register holding one 128-bit block of `T` lanes.
    pub fn from_lane128<T: Element>(block: Lane128) -> Result<Self> {
        RegisterAssembler::<T>::new()
            .with_blocks128(std::slice::from_ref(&block))
            .build()
    }

    /// Register holding a 128-bit block followed by one value.
    pub fn from_lane128_and_value<T: Element>(block: Lane128, value: T) -> Result<Self> {
        RegisterAssembler::new()
            .with_blocks128(std::slice::from_ref(&block))
            .with_value(value)
            .build()
    }

    /// Register holding a 128-bit block followed by `values`.
    pub fn from_lane128_and_slice<T: Element>(block: Lane128, values: &[T]) -> Result<Self> {
        RegisterAssembler::new()
            .with_blocks128(std::slice::from_ref(&block))
            .with_slice(values)
            .build()
    }

    /// Register holding two consecutive 128-bit blocks.
    ///
    /// Same layout as [`TypedRegister::from_lane256`] on the joined block.
    pub fn from_two_lane128<T: Element>(low: Lane128, high: Lane128) -> Result<Self> {
        RegisterAssembler::<T>::new()
            .with_blocks128(&[low, high])
            .build()
    }

    /// Register holding one 256-bit block of `T` lanes.
    pub fn from_lane256<T: Element>(block: Lane256) -> Result<Self> {
        RegisterAssembler::<T>::new()
            .with_blocks256(std::slice::from_ref(&block))
            .build()
    }

    /// Element kind fixed at construction.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Logical element count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the register holds no logical elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index mapping mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> RegisterMode {
        self.mode
    }

    /// Whether every index reads the same stored value.
    #[inline]
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        self.mode == RegisterMode::Broadcast
    }

    #[inline]
    fn physical_offset(&self, kind: ElementKind, index: usize) -> usize {
        match self.mode {
            RegisterMode::Dense => kind.offset_of(index),
            RegisterMode::Broadcast => 0,
        }
    }

    /// Element `index` viewed as `T`.
    ///
    /// Broadcast registers ignore `index`. `T` need not match
    /// [`TypedRegister::kind`]; the offset is scaled by `T`'s width.
    ///
    /// # Panics
    ///
    /// Panics if the read would leave the allocation.
    #[inline]
    #[must_use]
    pub fn get<T: Element>(&self, index: usize) -> T {
        let offset = self.physical_offset(T::KIND, index);
        let bytes = &self.memory.as_bytes()[offset..offset + T::KIND.byte_width()];
        bytemuck::pod_read_unaligned(bytes)
    }

    /// 128-bit view starting at element `index` of the register's kind.
    ///
    /// # Panics
    ///
    /// Panics if the read would leave the allocation.
    #[inline]
    #[must_use]
    pub fn lane128(&self, index: usize) -> Lane128 {
        let offset = self.physical_offset(self.kind, index);
        let mut bytes = [0; Lane128::BYTES];
        bytes.copy_from_slice(&self.memory.as_bytes()[offset..offset + Lane128::BYTES]);
        Lane128::from_bytes(bytes)
    }

    /// 256-bit view starting at element `index` of the register's kind.
    ///
    /// # Panics
    ///
    /// Panics if the read would leave the allocation.
    #[inline]
    #[must_use]
    pub fn lane256(&self, index: usize) -> Lane256 {
        let offset = self.physical_offset(self.kind, index);
        let mut bytes = [0; Lane256::BYTES];
        bytes.copy_from_slice(&self.memory.as_bytes()[offset..offset + Lane256::BYTES]);
        Lane256::from_bytes(bytes)
    }

    /// The `block`-th adjacent 128-bit block.
    #[inline]
    #[must_use]
    pub fn block128(&self, block: usize) -> Lane128 {
        self.lane128(block * self.kind.lanes_128())
    }

    /// The `block`-th adjacent 256-bit block.
    #[inline]
    #[must_use]
    pub fn block256(&self, block: usize) -> Lane256 {
        self.lane256(block * self.kind.lanes_256())
    }

    /// Every logical element viewed as `T`.
    #[must_use]
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    /// Stored payload bytes.
    ///
    /// Dense registers expose `len` elements, broadcast registers their
    /// replicated 256-bit block.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        let payload = match self.mode {
            RegisterMode::Dense => self.kind.offset_of(self.len),
            RegisterMode::Broadcast => BLOCK_256_BYTES,
        };
        &self.memory.as_bytes()[..payload]
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        self.memory.as_bytes_mut()
    }
}
