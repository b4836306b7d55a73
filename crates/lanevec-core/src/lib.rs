//! # `Lanevec` Core
//!
//! Small fixed-dimension SIMD vectors and type-erased multi-width registers.
//!
//! ## Features
//!
//! - **Small vectors**: `f64` vectors of dimension 1 to 4 with `+ - * /`,
//!   negation and equality dispatched to 256-bit, 128-bit or scalar kernels
//! - **Broadcast constants**: `ZERO`, `ONE` and `ALL_BITS_SET` adapt to the
//!   other operand's dimension
//! - **Typed registers**: one owned byte buffer readable as any primitive
//!   kind or as 128-bit / 256-bit lane blocks
//! - **Capability detection**: SSE/SSE2/AVX/AVX2 (x86_64) and NEON (aarch64),
//!   probed once per process and cappable through configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use lanevec_core::{NumberFormat, SmallVector};
//!
//! let product = SmallVector::from([6.0, 9.0, 20.0]) * SmallVector::from([2.0, 3.0, 10.0]);
//! assert_eq!(product.to_string_with(&NumberFormat::invariant()), "<12, 27, 200>");
//!
//! // Constants take the dimension of the other operand.
//! let shifted = SmallVector::from([1.0, 2.0]) + SmallVector::ONE;
//! assert_eq!(shifted.as_slice(), &[2.0, 3.0]);
//!
//! // Fallible twins report dimension mismatches instead of panicking.
//! assert!(SmallVector::new(1.0).try_add(&SmallVector::from([1.0, 2.0])).is_err());
//! ```
//!
//! ## Capping the SIMD tier
//!
//! ```rust,no_run
//! use lanevec_core::{capabilities, LanevecConfig};
//!
//! fn main() -> lanevec_core::Result<()> {
//!     // Reads lanevec.toml and LANEVEC_SIMD__MAX_TIER before first use.
//!     let config = LanevecConfig::load()?;
//!     let caps = capabilities::init_from_config(&config)?;
//!     println!("running on tier {:?}", caps.tier());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in crates/lanevec-core/Cargo.toml [lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::cast_lossless,
        clippy::manual_assert
    )
)]

pub mod capabilities;
pub mod config;
pub mod error;
pub mod raw_memory;
pub mod register;
pub mod size_table;
pub mod small_vector;

#[cfg(test)]
mod capabilities_tests;

pub use capabilities::{capabilities, HardwareCapabilities, SimdTier};
pub use config::{LanevecConfig, SimdConfig};
pub use error::{Error, Result};
pub use raw_memory::RawMemory;
pub use register::{Lane128, Lane256, RegisterAssembler, RegisterMode, TypedRegister};
pub use size_table::{Element, ElementKind};
pub use small_vector::{BinaryOp, NumberFormat, SmallVector, Strategy};
