//! Type-erased multi-width registers.
//!
//! One owned byte buffer presented as any supported element kind, as 128-bit
//! blocks or as 256-bit blocks, without copying the buffer.
//!
//! # Module Structure
//!
//! - `lane` - `Lane128` / `Lane256` blocks and x86_64 register conversions
//! - `typed` - `TypedRegister` and its dense / broadcast index mapping
//! - `assembler` - `RegisterAssembler` for mixed-width construction

mod assembler;
mod lane;
mod typed;

pub use assembler::RegisterAssembler;
pub use lane::{Lane128, Lane256};
pub use typed::{RegisterMode, TypedRegister};


#[cfg(test)]
mod assembler_tests;
