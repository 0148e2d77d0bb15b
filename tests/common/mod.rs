#![allow(dead_code)]

use fastsandra::{ByteOrder, ElementLayout, TypeDescriptor, TypeTag};

/// Row counts exercised by the round-trip suites, including the empty page.
pub const ROW_COUNTS: [usize; 5] = [0, 1, 7, 64, 10_000];

pub fn random_bytes_i8(rng: &mut fastrand::Rng, rows: usize) -> Vec<i8> {
    (0..rows).map(|_| rng.i8(..)).collect()
}

pub fn random_i16(rng: &mut fastrand::Rng, rows: usize) -> Vec<i16> {
    (0..rows).map(|_| rng.i16(..)).collect()
}

pub fn random_i32(rng: &mut fastrand::Rng, rows: usize) -> Vec<i32> {
    (0..rows).map(|_| rng.i32(..)).collect()
}

pub fn random_i64(rng: &mut fastrand::Rng, rows: usize) -> Vec<i64> {
    (0..rows).map(|_| rng.i64(..)).collect()
}

/// Arbitrary bit patterns, NaNs included; compare with `to_bits`.
pub fn random_f32(rng: &mut fastrand::Rng, rows: usize) -> Vec<f32> {
    (0..rows).map(|_| f32::from_bits(rng.u32(..))).collect()
}

/// Arbitrary bit patterns, NaNs included; compare with `to_bits`.
pub fn random_f64(rng: &mut fastrand::Rng, rows: usize) -> Vec<f64> {
    (0..rows).map(|_| f64::from_bits(rng.u64(..))).collect()
}

pub fn random_bool(rng: &mut fastrand::Rng, rows: usize) -> Vec<bool> {
    (0..rows).map(|_| rng.bool()).collect()
}

/// A custom `int` variant sent little-endian.
pub fn little_endian_int() -> TypeDescriptor {
    TypeDescriptor::new(TypeTag::new(0x0409), ElementLayout::Int32)
        .with_byte_order(ByteOrder::Little)
}
