//! Fixed-width wire encoding, the inverse of [`decode_column`](crate::decode_column).
//!
//! Drivers never need this; it exists to build pages for tests, benches and
//! the demo binary.

use crate::{temporal::DATE_EPOCH_OFFSET, types::ByteOrder};

/// A native value with a fixed-width wire form.
pub trait WireValue: Copy {
    /// Bytes per value on the wire.
    const WIDTH: usize;

    /// Append the wire bytes of `self` in `order`.
    fn write_to(self, order: ByteOrder, out: &mut Vec<u8>);
}

macro_rules! implement_wire_value {
    ($($ty:ty),*) => {
        $(
            impl WireValue for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn write_to(self, order: ByteOrder, out: &mut Vec<u8>) {
                    match order {
                        ByteOrder::Big => out.extend_from_slice(&self.to_be_bytes()),
                        ByteOrder::Little => out.extend_from_slice(&self.to_le_bytes()),
                    }
                }
            }
        )*
    };
}

implement_wire_value!(i8, i16, i32, i64, u32, f32, f64);

impl WireValue for bool {
    const WIDTH: usize = 1;

    fn write_to(self, _order: ByteOrder, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }
}

/// Encode `values` big-endian, as the CQL protocol sends them.
pub fn encode_column<T: WireValue>(values: &[T]) -> Vec<u8> {
    encode_column_with(values, ByteOrder::Big)
}

/// Encode `values` in an explicit byte order.
pub fn encode_column_with<T: WireValue>(values: &[T], order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * T::WIDTH);
    for &value in values {
        value.write_to(order, &mut out);
    }
    out
}

/// Wire form of a CQL `date` given signed days since 1970-01-01.
pub fn date_to_wire(days: i32) -> u32 {
    // Every i32 lands inside u32 once shifted by 2^31.
    (i64::from(days) + DATE_EPOCH_OFFSET) as u32
}

/// Encode signed day offsets as a CQL `date` column.
pub fn encode_dates(days: &[i32]) -> Vec<u8> {
    let wire = days.iter().copied().map(date_to_wire).collect::<Vec<_>>();
    encode_column(&wire)
}

/// Encode milliseconds since the Unix epoch as a CQL `timestamp` column.
pub fn encode_timestamps(millis: &[i64]) -> Vec<u8> {
    encode_column(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_midpoint_maps_to_epoch() {
        assert_eq!(date_to_wire(0), 1 << 31);
        assert_eq!(date_to_wire(-1), (1 << 31) - 1);
        assert_eq!(date_to_wire(i32::MIN), 0);
        assert_eq!(date_to_wire(i32::MAX), u32::MAX);
    }

    #[test]
    fn encodes_in_requested_order() {
        assert_eq!(encode_column(&[1_i16, 2]), vec![0, 1, 0, 2]);
        assert_eq!(
            encode_column_with(&[1_i16, 2], ByteOrder::Little),
            vec![1, 0, 2, 0]
        );
        assert_eq!(encode_column(&[true, false]), vec![1, 0]);
    }
}
