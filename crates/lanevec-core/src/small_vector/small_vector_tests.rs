#![allow(clippy::float_cmp, clippy::cast_precision_loss)]
//! Tests for `SmallVector` construction, accessors and operators.

use super::{BinaryOp, NumberFormat, SmallVector};
use crate::capabilities::{HardwareCapabilities, SimdTier};
use crate::error::Error;
use crate::register::TypedRegister;

fn render(vector: SmallVector) -> String {
    vector.to_string_with(&NumberFormat::invariant())
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_is_dimension_one() {
    let v = SmallVector::new(8.0);
    assert_eq!(v.dim(), 1);
    assert!(!v.is_broadcast());
    assert_eq!(v.as_slice(), &[8.0]);
}

#[test]
fn test_from_arrays() {
    assert_eq!(SmallVector::from([1.0, 2.0]).dim(), 2);
    assert_eq!(SmallVector::from([1.0, 2.0, 3.0]).dim(), 3);
    assert_eq!(SmallVector::from([1.0, 2.0, 3.0, 4.0]).dim(), 4);
    assert_eq!(SmallVector::from(5.0).dim(), 1);
}

#[test]
fn test_from_slice_lengths() {
    for len in 1..=4 {
        let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let v = SmallVector::from_slice(&values).expect("vector");
        assert_eq!(v.dim(), len);
        assert_eq!(v.to_vec(), values);
    }
    assert_eq!(
        SmallVector::from_slice(&[]).unwrap_err(),
        Error::OutOfRange { index: 0, len: 0 }
    );
    assert_eq!(
        SmallVector::from_slice(&[0.0; 5]).unwrap_err(),
        Error::OutOfRange { index: 5, len: 4 }
    );
    assert!(SmallVector::try_from(&[1.0, 2.0][..]).is_ok());
}

#[test]
fn test_from_slice_at() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let v = SmallVector::from_slice_at(&values, 3).expect("vector");
    assert_eq!(v.as_slice(), &[4.0, 5.0, 6.0]);

    assert_eq!(
        SmallVector::from_slice_at(&values, 6).unwrap_err(),
        Error::OutOfRange { index: 6, len: 6 }
    );
    assert_eq!(
        SmallVector::from_slice_at(&values, 1).unwrap_err(),
        Error::OutOfRange { index: 5, len: 4 }
    );
}

#[test]
fn test_from_slice_at_len() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let v = SmallVector::from_slice_at_len(&values, 1, 2).expect("vector");
    assert_eq!(v.as_slice(), &[2.0, 3.0]);

    assert_eq!(
        SmallVector::from_slice_at_len(&values, 4, 3).unwrap_err(),
        Error::OutOfRange { index: 7, len: 6 }
    );
    assert_eq!(
        SmallVector::from_slice_at_len(&values, 0, 0).unwrap_err(),
        Error::OutOfRange { index: 0, len: 4 }
    );
    assert_eq!(
        SmallVector::from_slice_at_len(&values, 0, 5).unwrap_err(),
        Error::OutOfRange { index: 5, len: 4 }
    );
}

#[test]
fn test_from_bytes() {
    let bytes: Vec<u8> = [1.5_f64, -2.0, 3.25]
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    let v = SmallVector::from_bytes(&bytes).expect("vector");
    assert_eq!(v.as_slice(), &[1.5, -2.0, 3.25]);

    // Trailing partial element is ignored.
    let mut padded = bytes.clone();
    padded.extend_from_slice(&[0xff; 3]);
    assert_eq!(SmallVector::from_bytes(&padded).expect("vector"), v);

    assert_eq!(
        SmallVector::from_bytes(&[0; 7]).unwrap_err(),
        Error::OutOfRange { index: 0, len: 4 }
    );
    assert_eq!(
        SmallVector::from_bytes(&[0; 40]).unwrap_err(),
        Error::OutOfRange { index: 5, len: 4 }
    );
}

// ============================================================================
// Constants
// ============================================================================

#[test]
fn test_constants_are_broadcast() {
    for constant in [SmallVector::ZERO, SmallVector::ONE, SmallVector::ALL_BITS_SET] {
        assert!(constant.is_broadcast());
        assert_eq!(constant.dim(), 4);
    }
    assert_eq!(SmallVector::ALL_BITS_SET[0].to_bits(), u64::MAX);
    assert_eq!(SmallVector::ONE[17], 1.0);
    assert_eq!(SmallVector::ZERO.get(99), Some(0.0));
}

#[test]
fn test_every_bad_length_is_out_of_range() {
    let results = [
        SmallVector::from_slice(&[0.0; 5]),
        SmallVector::from_slice_at_len(&[1.0, 2.0], 0, 0),
        SmallVector::from_bytes(&[0; 40]),
        SmallVector::from_bytes(&[]),
    ];
    for result in results {
        assert!(matches!(result, Err(Error::OutOfRange { .. })), "{result:?}");
    }
}

#[test]
fn test_constants_hold_one_value() {
    assert_eq!(SmallVector::ONE.as_slice(), &[1.0]);
    assert_eq!(SmallVector::ZERO.to_vec(), vec![0.0]);
    assert_eq!(SmallVector::ONE.lanes2().0, [1.0; 2]);
    assert_eq!(SmallVector::ONE.lanes4().0, [1.0; 4]);
    assert!(!SmallVector::from([1.0, 1.0, 1.0, 1.0]).is_broadcast());
}

#[test]
fn test_constants_adapt_to_other_operand() {
    for dim in 1..=4 {
        let values: Vec<f64> = (1..=dim).map(|i| i as f64).collect();
        let v = SmallVector::from_slice(&values).expect("vector");

        let sum = SmallVector::ZERO + v;
        assert_eq!(sum.dim(), dim);
        assert!(!sum.is_broadcast());
        assert_eq!(sum.to_vec(), values);

        assert_eq!((v * SmallVector::ONE).to_vec(), values);
    }
}

#[test]
fn test_two_constants_give_plain_quad() {
    let v = SmallVector::ONE + SmallVector::ONE;
    assert!(!v.is_broadcast());
    assert_eq!(v.dim(), 4);
    assert_eq!(v.as_slice(), &[2.0; 4]);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_rendered_operator_results() {
    assert_eq!(render(SmallVector::new(6.0) + SmallVector::new(2.0)), "<8>");
    assert_eq!(
        render(SmallVector::from([6.0, 9.0]) - SmallVector::from([2.0, 3.0])),
        "<4, 6>"
    );
    assert_eq!(
        render(SmallVector::from([6.0, 9.0, 20.0]) * SmallVector::from([2.0, 3.0, 10.0])),
        "<12, 27, 200>"
    );
    assert_eq!(
        render(
            SmallVector::from([6.0, 9.0, 20.0, 100.0]) / SmallVector::from([2.0, 3.0, 10.0, 50.0])
        ),
        "<3, 3, 2, 2>"
    );
}

#[test]
fn test_scalar_multiply_both_sides() {
    assert_eq!(render(SmallVector::from([6.0, 9.0]) * 2.0), "<12, 18>");
    assert_eq!(render(6.0 * SmallVector::from([2.0, 3.0])), "<12, 18>");
}

#[test]
fn test_scale_matches_per_lane_multiply() {
    let v = SmallVector::from([0.1, -3.7, 1e300]);
    let factor = 3.3;
    let scaled = v.scale_with(factor, &HardwareCapabilities::detect());
    for (got, x) in scaled.as_slice().iter().zip(v.as_slice()) {
        assert_eq!(got.to_bits(), (x * factor).to_bits());
    }
}

#[test]
fn test_negation() {
    let v = -SmallVector::from([1.0, -2.0, 3.0]);
    assert_eq!(v.as_slice(), &[-1.0, 2.0, -3.0]);
    assert_eq!(v.dim(), 3);
    // Defined as ZERO - v, so negating +0 gives +0.
    assert_eq!((-SmallVector::new(0.0))[0].to_bits(), 0.0_f64.to_bits());
}

#[test]
fn test_try_ops_report_mismatch() {
    let a = SmallVector::from([1.0, 2.0]);
    let b = SmallVector::from([1.0, 2.0, 3.0]);
    let mismatch = Error::DimensionMismatch { left: 2, right: 3 };
    assert_eq!(a.try_add(&b).unwrap_err(), mismatch);
    assert_eq!(a.try_sub(&b).unwrap_err(), mismatch);
    assert_eq!(a.try_mul(&b).unwrap_err(), mismatch);
    assert_eq!(a.try_div(&b).unwrap_err(), mismatch);
    assert_eq!(a.try_eq(&b).unwrap_err(), mismatch);
}

#[test]
#[should_panic(expected = "Dimension mismatch")]
fn test_operator_panics_on_mismatch() {
    let _ = SmallVector::from([1.0, 2.0]) + SmallVector::new(1.0);
}

#[test]
fn test_apply_with_forced_capabilities() {
    let a = SmallVector::from([6.0, 9.0, 20.0, 100.0]);
    let b = SmallVector::from([2.0, 3.0, 10.0, 50.0]);
    let detected = HardwareCapabilities::detect();
    for caps in [
        detected,
        detected.capped(SimdTier::Simd128),
        HardwareCapabilities::scalar(),
    ] {
        let q = a.apply_with(BinaryOp::Div, &b, &caps).expect("quotient");
        assert_eq!(q.as_slice(), &[3.0, 3.0, 2.0, 2.0]);
    }
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_equality() {
    assert_eq!(SmallVector::from([1.0, 2.0]), SmallVector::from([1.0, 2.0]));
    assert_ne!(SmallVector::from([1.0, 2.0]), SmallVector::from([1.0, 3.0]));
    assert_eq!(
        SmallVector::from([1.0, 2.0, 3.0, 4.0]),
        SmallVector::from([1.0, 2.0, 3.0, 4.0])
    );
    assert_ne!(SmallVector::new(1.0), SmallVector::new(2.0));
}

#[test]
fn test_equality_with_constant() {
    assert_eq!(SmallVector::from([1.0, 1.0, 1.0]), SmallVector::ONE);
    assert_ne!(SmallVector::from([1.0, 0.0]), SmallVector::ONE);
}

#[test]
fn test_mismatched_dimensions_are_unequal() {
    assert_ne!(SmallVector::new(1.0), SmallVector::from([1.0, 1.0]));
}

#[test]
fn test_eq_with_scalar_nan_divergence() {
    let v = SmallVector::from([f64::NAN, 1.0]);
    assert_eq!(v.eq_with(&v, &HardwareCapabilities::scalar()), Ok(true));
    let detected = HardwareCapabilities::detect();
    if detected.has_128() {
        assert_eq!(v.eq_with(&v, &detected), Ok(false));
    }
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_get_and_index() {
    let v = SmallVector::from([1.0, 2.0, 3.0]);
    assert_eq!(v.get(2), Some(3.0));
    assert_eq!(v.get(3), None);
    assert_eq!(v[1], 2.0);
}

#[test]
#[should_panic]
fn test_index_past_dimension_panics() {
    let v = SmallVector::from([1.0, 2.0, 3.0]);
    let _ = v[3];
}

#[test]
fn test_copy_to() {
    let v = SmallVector::from([1.0, 2.0, 3.0]);
    let mut out = [0.0; 5];
    v.copy_to(&mut out).expect("copy");
    assert_eq!(out, [1.0, 2.0, 3.0, 0.0, 0.0]);

    v.copy_to_at(&mut out, 2).expect("copy");
    assert_eq!(out, [1.0, 2.0, 1.0, 2.0, 3.0]);

    assert_eq!(
        v.copy_to_at(&mut out, 3).unwrap_err(),
        Error::DestinationTooSmall {
            required: 3,
            available: 2
        }
    );
    assert_eq!(
        v.copy_to_at(&mut out, 5).unwrap_err(),
        Error::OutOfRange { index: 5, len: 5 }
    );
}

#[test]
fn test_try_copy_to() {
    let v = SmallVector::from([1.0, 2.0]);
    let mut short = [0.0; 1];
    assert!(!v.try_copy_to(&mut short));
    assert_eq!(short, [0.0]);

    let mut exact = [0.0; 2];
    assert!(v.try_copy_to(&mut exact));
    assert_eq!(exact, [1.0, 2.0]);
}

// ============================================================================
// Registers
// ============================================================================

#[test]
fn test_register_round_trip_per_dimension() {
    for len in 1..=4 {
        let values: Vec<f64> = (0..len).map(|i| 0.5 + i as f64).collect();
        let v = SmallVector::from_slice(&values).expect("vector");
        let register = v.to_register().expect("register");
        assert_eq!(register.len(), len);
        assert_eq!(register.to_vec::<f64>(), values);
        assert_eq!(SmallVector::from_register(&register).expect("vector"), v);
    }
}

#[test]
fn test_broadcast_register_gives_constant() {
    let register = SmallVector::ONE.to_register().expect("register");
    assert!(register.is_broadcast());
    let v = SmallVector::try_from(&register).expect("vector");
    assert!(v.is_broadcast());
    assert_eq!((v * SmallVector::from([2.0, 3.0])).as_slice(), &[2.0, 3.0]);
}

#[test]
fn test_register_of_other_kind_is_unsupported() {
    let register = TypedRegister::from_slice(&[1_i32, 2]).expect("register");
    assert_eq!(
        SmallVector::from_register(&register).unwrap_err(),
        Error::UnsupportedType("i32".to_string())
    );
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_display_precision() {
    let format = NumberFormat::invariant().with_precision(1);
    assert_eq!(
        SmallVector::from([1.0, 2.26]).to_string_with(&format),
        "<1.0, 2.3>"
    );
}
