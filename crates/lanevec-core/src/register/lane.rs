//! 128-bit and 256-bit lane blocks.
//!
//! A lane block is a plain aligned byte array that can be viewed as any
//! element kind, or converted to and from the x86_64 SIMD register types.

use crate::size_table::{Element, BLOCK_128_BYTES, BLOCK_256_BYTES};

macro_rules! lane_block {
    ($name:ident, $bytes:expr, $align:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(C, align($align))]
        pub struct $name([u8; $bytes]);

        impl Default for $name {
            fn default() -> Self {
                Self([0; $bytes])
            }
        }

        impl $name {
            /// Size of the block in bytes.
            pub const BYTES: usize = $bytes;

            /// Wraps raw bytes.
            #[inline]
            #[must_use]
            pub const fn from_bytes(bytes: [u8; $bytes]) -> Self {
                Self(bytes)
            }

            /// Raw bytes of the block.
            #[inline]
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $bytes] {
                &self.0
            }

            /// Block with `value` in every lane of kind `T`.
            #[must_use]
            pub fn splat<T: Element>(value: T) -> Self {
                let mut block = Self::default();
                for chunk in block.0.chunks_exact_mut(T::KIND.byte_width()) {
                    chunk.copy_from_slice(bytemuck::bytes_of(&value));
                }
                block
            }

            /// Block holding `values` in its leading lanes.
            ///
            /// Lanes past `values.len()` are zero; values past the block
            /// capacity are ignored.
            #[must_use]
            pub fn from_elements<T: Element>(values: &[T]) -> Self {
                let mut block = Self::default();
                let bytes: &[u8] = bytemuck::cast_slice(values);
                let n = bytes.len().min($bytes);
                block.0[..n].copy_from_slice(&bytes[..n]);
                block
            }

            /// Lane `index` viewed as `T`.
            ///
            /// # Panics
            ///
            /// Panics if the lane lies outside the block.
            #[inline]
            #[must_use]
            pub fn get<T: Element>(&self, index: usize) -> T {
                let offset = T::KIND.offset_of(index);
                bytemuck::pod_read_unaligned(&self.0[offset..offset + T::KIND.byte_width()])
            }

            /// Every lane viewed as `T`.
            #[must_use]
            pub fn to_vec<T: Element>(&self) -> Vec<T> {
                self.0
                    .chunks_exact(T::KIND.byte_width())
                    .map(bytemuck::pod_read_unaligned)
                    .collect()
            }
        }
    };
}

lane_block!(
    Lane128,
    BLOCK_128_BYTES,
    16,
    "A 128-bit block of lanes."
);
lane_block!(
    Lane256,
    BLOCK_256_BYTES,
    32,
    "A 256-bit block of lanes."
);

impl Lane256 {
    /// Joins two 128-bit halves, `low` first.
    ///
    /// Emulates a 256-bit value on hardware without native 256-bit support.
    #[must_use]
    pub fn from_halves(low: Lane128, high: Lane128) -> Self {
        let mut block = Self::default();
        block.0[..BLOCK_128_BYTES].copy_from_slice(low.as_bytes());
        block.0[BLOCK_128_BYTES..].copy_from_slice(high.as_bytes());
        block
    }

    /// Lower 128 bits.
    #[must_use]
    pub fn low(&self) -> Lane128 {
        let mut bytes = [0; BLOCK_128_BYTES];
        bytes.copy_from_slice(&self.0[..BLOCK_128_BYTES]);
        Lane128(bytes)
    }

    /// Upper 128 bits.
    #[must_use]
    pub fn high(&self) -> Lane128 {
        let mut bytes = [0; BLOCK_128_BYTES];
        bytes.copy_from_slice(&self.0[BLOCK_128_BYTES..]);
        Lane128(bytes)
    }
}

// =============================================================================
// x86_64 register conversions
// =============================================================================

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::{__m128, __m128d, __m128i, __m256, __m256d, __m256i};

    use super::{Lane128, Lane256};

    macro_rules! simd_conversions {
        ($lane:ident: $($simd:ident => $to:ident),*) => {
            impl $lane {
                $(
                    #[doc = concat!("Reinterprets the block as `", stringify!($simd), "`.")]
                    #[inline]
                    #[must_use]
                    pub fn $to(self) -> $simd {
                        bytemuck::cast(self.0)
                    }
                )*
            }

            $(
                impl From<$simd> for $lane {
                    #[inline]
                    fn from(value: $simd) -> Self {
                        Self(bytemuck::cast(value))
                    }
                }
            )*
        };
    }

    simd_conversions!(Lane128: __m128d => to_m128d, __m128 => to_m128, __m128i => to_m128i);
    simd_conversions!(Lane256: __m256d => to_m256d, __m256 => to_m256, __m256i => to_m256i);
}
