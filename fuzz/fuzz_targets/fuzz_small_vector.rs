//! Fuzz target for small-vector operators and register assembly.
//!
//! This target feeds arbitrary values and lengths through:
//! - Slice and byte construction (length and offset errors, never panics)
//! - Every operator on every strategy the CPU supports
//! - Register assembly from mixed 128-bit blocks and tails
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_small_vector
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanevec_core::{
    BinaryOp, HardwareCapabilities, Lane128, RegisterAssembler, SimdTier, SmallVector,
};

/// Fuzzing input for small-vector operations.
#[derive(Arbitrary, Debug)]
struct VectorInput {
    /// Left operand source values
    left: Vec<f64>,
    /// Right operand source values
    right: Vec<f64>,
    /// Start offset into `left`
    start: u8,
    /// Raw bytes for byte construction
    bytes: Vec<u8>,
    /// Multiplier for scalar scaling
    factor: f64,
    /// Blocks for register assembly
    blocks: Vec<[f64; 2]>,
}

const OPS: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

fuzz_target!(|input: VectorInput| {
    // Construction must fail cleanly on bad lengths and offsets.
    let left = SmallVector::from_slice_at(&input.left, usize::from(input.start));
    let right = SmallVector::from_slice(&input.right);
    let _ = SmallVector::from_bytes(&input.bytes);

    let detected = HardwareCapabilities::detect();
    let caps = [
        detected,
        detected.capped(SimdTier::Simd128),
        HardwareCapabilities::scalar(),
    ];

    if let (Ok(left), Ok(right)) = (left, right) {
        for op in OPS {
            let results: Vec<_> = caps
                .iter()
                .map(|c| left.apply_with(op, &right, c))
                .collect();

            // Every strategy agrees on success, dimension and bit pattern.
            for result in &results[1..] {
                match (&results[0], result) {
                    (Ok(a), Ok(b)) => {
                        assert_eq!(a.dim(), b.dim());
                        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
                            assert!(x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()));
                        }
                    }
                    (Err(a), Err(b)) => assert_eq!(a, b),
                    _ => panic!("strategies disagree on {op:?}"),
                }
            }
        }

        for c in &caps {
            let _ = left.eq_with(&right, c);
            let _ = left.scale_with(input.factor, c);
        }
        let _ = left.try_neg();
        let _ = left.to_register();
    }

    // Register assembly never panics and keeps the written values.
    let blocks: Vec<Lane128> = input
        .blocks
        .iter()
        .take(64)
        .map(|pair| Lane128::from_elements(pair))
        .collect();
    let tail: Vec<f64> = input.left.iter().take(64).copied().collect();
    if let Ok(register) = RegisterAssembler::new()
        .with_blocks128(&blocks)
        .with_slice(&tail)
        .build()
    {
        assert_eq!(register.len(), blocks.len() * 2 + tail.len());
        for (i, value) in tail.iter().enumerate() {
            let got = register.get::<f64>(blocks.len() * 2 + i);
            assert_eq!(got.to_bits(), value.to_bits());
        }
    }
});
