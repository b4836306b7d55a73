//! Zero-initialised, pointer-stable raw buffers with scoped release.
//!
//! `RawMemory` is the raw-memory provider behind every register: a fixed-size
//! allocation that never moves, starts zeroed and is released exactly once
//! when the owner drops it, on every exit path including unwinding.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

use crate::error::{Error, Result};

/// Alignment of register buffers, one 256-bit block.
pub const REGISTER_ALIGN: usize = 32;

/// Owned, zero-initialised heap allocation.
#[derive(Debug)]
pub struct RawMemory {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl RawMemory {
    /// Allocates `size` zeroed bytes aligned to `align`.
    ///
    /// `size` is rounded up to at least one byte so the pointer is always a
    /// real allocation.
    pub fn zeroed(size: usize, align: usize) -> Result<Self> {
        let layout = Layout::from_size_align(size.max(1), align)
            .map_err(|_| Error::Allocation { size, align })?;

        // SAFETY: `alloc_zeroed` requires a valid non-zero layout.
        // - Condition 1: `layout.size() >= 1` by the `max(1)` above.
        // - Condition 2: `Layout::from_size_align` validated the alignment.
        // Reason: Raw allocation is required for a pointer-stable aligned buffer.
        let ptr = unsafe { alloc_zeroed(layout) };

        NonNull::new(ptr)
            .map(|ptr| Self { ptr, layout })
            .ok_or(Error::Allocation { size, align })
    }

    /// Size of the allocation in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Always false, allocations hold at least one byte.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Alignment of the allocation in bytes.
    #[inline]
    #[must_use]
    pub fn align(&self) -> usize {
        self.layout.align()
    }

    /// Stable address of the first byte.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Whole allocation as bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: The allocation is live for `&self` and fully initialised.
        // - Condition 1: `ptr` came from `alloc_zeroed(layout)`, so `len()` bytes are valid.
        // - Condition 2: Zeroing initialised every byte.
        // Reason: Byte view over the owned allocation.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// Whole allocation as mutable bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: Same as `as_bytes`; `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for RawMemory {
    fn drop(&mut self) {
        // SAFETY: `dealloc` requires the original pointer/layout pair.
        // - Condition 1: `self.ptr` was produced by `alloc_zeroed(self.layout)` in `zeroed`.
        // - Condition 2: Drop runs at most once, so the block is released exactly once.
        // Reason: Manual deallocation is needed for raw-memory RAII.
        unsafe {
            dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

// SAFETY: `RawMemory` owns its allocation exclusively.
// - Condition 1: No aliasing references are stored, only pointer + layout metadata.
// - Condition 2: Mutation requires `&mut self`, preventing cross-thread races.
// Reason: Heap allocations are not thread-affine; ownership transfer is sound.
unsafe impl Send for RawMemory {}

// SAFETY: Shared access only hands out `&[u8]`, which is `Sync`.
// Reason: Registers are immutable after construction and shared for reads.
unsafe impl Sync for RawMemory {}
