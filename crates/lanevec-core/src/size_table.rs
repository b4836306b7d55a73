//! Byte width, bit width and lane-count lookup per supported element kind.
//!
//! `ElementKind` is the closed construction-time tag of a register. `Element`
//! ties each supported primitive to its tag at compile time, so typed register
//! accessors never compare types at runtime.

use std::any::TypeId;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Width of a 128-bit SIMD block in bytes.
pub const BLOCK_128_BYTES: usize = 16;

/// Width of a 256-bit SIMD block in bytes.
pub const BLOCK_256_BYTES: usize = 32;

/// Primitive numeric kind a register is specialised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `i8`
    I8,
    /// `u8`
    U8,
    /// `i16`
    I16,
    /// `u16`
    U16,
    /// `i32`
    I32,
    /// `u32`
    U32,
    /// `i64`
    I64,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl ElementKind {
    /// All supported kinds, narrowest first.
    pub const ALL: [ElementKind; 10] = [
        ElementKind::I8,
        ElementKind::U8,
        ElementKind::I16,
        ElementKind::U16,
        ElementKind::I32,
        ElementKind::U32,
        ElementKind::I64,
        ElementKind::U64,
        ElementKind::F32,
        ElementKind::F64,
    ];

    /// log2 of the element size in bytes.
    ///
    /// Offsets are computed as `index << shift()`.
    #[inline]
    #[must_use]
    pub const fn shift(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 0,
            Self::I16 | Self::U16 => 1,
            Self::I32 | Self::U32 | Self::F32 => 2,
            Self::I64 | Self::U64 | Self::F64 => 3,
        }
    }

    /// Element size in bytes.
    #[inline]
    #[must_use]
    pub const fn byte_width(self) -> usize {
        1 << self.shift()
    }

    /// Element size in bits.
    #[inline]
    #[must_use]
    pub const fn bit_width(self) -> usize {
        self.byte_width() * 8
    }

    /// Number of elements of this kind in a 128-bit block.
    #[inline]
    #[must_use]
    pub const fn lanes_128(self) -> usize {
        BLOCK_128_BYTES >> self.shift()
    }

    /// Number of elements of this kind in a 256-bit block.
    #[inline]
    #[must_use]
    pub const fn lanes_256(self) -> usize {
        BLOCK_256_BYTES >> self.shift()
    }

    /// Byte offset of logical element `index`.
    #[inline]
    #[must_use]
    pub const fn offset_of(self, index: usize) -> usize {
        index << self.shift()
    }

    /// Rust type name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Resolves the kind of an arbitrary `'static` type.
    ///
    /// Meant for type-erased callers that carry a type parameter without the
    /// `Element` bound; typed code should read `T::KIND` instead.
    pub fn of<T: 'static>() -> Result<Self> {
        let id = TypeId::of::<T>();
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_id_of() == id)
            .ok_or_else(|| Error::UnsupportedType(std::any::type_name::<T>().to_string()))
    }

    fn type_id_of(self) -> TypeId {
        match self {
            Self::I8 => TypeId::of::<i8>(),
            Self::U8 => TypeId::of::<u8>(),
            Self::I16 => TypeId::of::<i16>(),
            Self::U16 => TypeId::of::<u16>(),
            Self::I32 => TypeId::of::<i32>(),
            Self::U32 => TypeId::of::<u32>(),
            Self::I64 => TypeId::of::<i64>(),
            Self::U64 => TypeId::of::<u64>(),
            Self::F32 => TypeId::of::<f32>(),
            Self::F64 => TypeId::of::<f64>(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedType(s.to_string()))
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive that can be stored in and read from a `TypedRegister`.
///
/// Sealed: the supported set is exactly the kinds of `ElementKind`.
pub trait Element: bytemuck::Pod + PartialEq + fmt::Debug + sealed::Sealed {
    /// Construction-time tag for this primitive.
    const KIND: ElementKind;
}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;
            }
        )*
    };
}

impl_element! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}
