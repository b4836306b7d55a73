#![allow(clippy::float_cmp)]
//! Tests for `RegisterAssembler`.

use super::{Lane128, Lane256, RegisterAssembler, TypedRegister};
use crate::error::Error;

#[test]
fn test_all_segments_empty_fails() {
    let err = RegisterAssembler::<f64>::new().build().unwrap_err();
    assert_eq!(err, Error::EmptyAssembly);

    let err = RegisterAssembler::<u8>::new()
        .with_blocks256(&[])
        .with_blocks128(&[])
        .with_slice(&[])
        .build()
        .unwrap_err();
    assert_eq!(err, Error::EmptyAssembly);

    assert_eq!(
        TypedRegister::from_slice::<i32>(&[]).unwrap_err(),
        Error::EmptyAssembly
    );
}

#[test]
fn test_segments_written_in_fixed_order() {
    let wide = [Lane256::from_elements(&[1.0_f64, 2.0, 3.0, 4.0])];
    let narrow = [
        Lane128::from_elements(&[5.0_f64, 6.0]),
        Lane128::from_elements(&[7.0_f64, 8.0]),
    ];
    let tail = [9.0_f64, 10.0, 11.0];

    // Builder call order does not change the layout.
    let register = RegisterAssembler::new()
        .with_slice(&tail)
        .with_blocks128(&narrow)
        .with_blocks256(&wide)
        .build()
        .expect("register");

    assert_eq!(register.len(), 11);
    assert_eq!(
        register.to_vec::<f64>(),
        (1..=11).map(f64::from).collect::<Vec<f64>>()
    );
}

#[test]
fn test_len_counts_lanes_of_kind() {
    let wide = [Lane256::default(); 2];
    let narrow = [Lane128::default(); 3];
    let assembler = RegisterAssembler::<u16>::new()
        .with_blocks256(&wide)
        .with_blocks128(&narrow)
        .with_value(1);
    assert_eq!(assembler.len(), 2 * 16 + 3 * 8 + 1);
    assert!(!assembler.is_empty());
}

#[test]
fn test_tail_value_replaces_slice() {
    let register = RegisterAssembler::new()
        .with_slice(&[1_i8, 2, 3])
        .with_value(4_i8)
        .build()
        .expect("register");
    assert_eq!(register.to_vec::<i8>(), vec![4]);
}

#[test]
fn test_only_256_blocks() {
    let blocks = [
        Lane256::splat(1_u32),
        Lane256::splat(2_u32),
    ];
    let register = RegisterAssembler::<u32>::new()
        .with_blocks256(&blocks)
        .build()
        .expect("register");
    assert_eq!(register.len(), 16);
    assert_eq!(register.get::<u32>(7), 1);
    assert_eq!(register.get::<u32>(8), 2);
    assert_eq!(register.block256(1), blocks[1]);
}

#[test]
fn test_only_128_blocks_and_value() {
    let blocks = [Lane128::splat(-1_i64)];
    let register = RegisterAssembler::new()
        .with_blocks128(&blocks)
        .with_value(7_i64)
        .build()
        .expect("register");
    assert_eq!(register.to_vec::<i64>(), vec![-1, -1, 7]);
}
