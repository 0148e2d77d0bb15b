use std::sync::Arc;

use arrow::{
    array::{ArrayRef, BooleanArray, PrimitiveArray},
    buffer::{BooleanBuffer, MutableBuffer, NullBuffer, ScalarBuffer},
    datatypes::{
        ArrowNativeType, ArrowPrimitiveType, Date32Type, Float32Type, Float64Type, Int16Type,
        Int32Type, Int64Type, Int8Type, Time64NanosecondType, TimestampMillisecondType,
        UInt32Type,
    },
};

use super::{ColumnBuffer, DecodedColumn};
use crate::{
    error::{DecodeError, DecodeResult},
    types::{ByteOrder, ElementLayout, TypeDescriptor},
};

/// Decode `row_count` fixed-width elements from `buffer` as `descriptor`
/// describes them.
///
/// The bytes are copied once into an aligned buffer which is then viewed as a
/// slice of the target native type; wire-order elements are swapped in place
/// when the host disagrees. A validity bitmap, when present, becomes the null
/// buffer verbatim.
pub fn decode_column(
    buffer: &ColumnBuffer<'_>,
    descriptor: &TypeDescriptor,
    row_count: usize,
) -> DecodeResult<DecodedColumn> {
    let data = buffer.data();
    let expected = row_count.saturating_mul(descriptor.element_width());
    if data.len() != expected {
        return Err(DecodeError::MalformedBuffer {
            expected,
            actual: data.len(),
        });
    }
    let nulls = validity(buffer, row_count)?;
    let order = descriptor.byte_order();

    let values: ArrayRef = match descriptor.target_layout() {
        ElementLayout::Int8 => Arc::new(primitive::<Int8Type>(data, order, row_count, nulls)),
        ElementLayout::Int16 => Arc::new(primitive::<Int16Type>(data, order, row_count, nulls)),
        ElementLayout::Int32 => Arc::new(primitive::<Int32Type>(data, order, row_count, nulls)),
        ElementLayout::Int64 => Arc::new(primitive::<Int64Type>(data, order, row_count, nulls)),
        ElementLayout::UInt32 => {
            Arc::new(primitive::<UInt32Type>(data, order, row_count, nulls))
        }
        ElementLayout::Float32 => {
            Arc::new(primitive::<Float32Type>(data, order, row_count, nulls))
        }
        ElementLayout::Float64 => {
            Arc::new(primitive::<Float64Type>(data, order, row_count, nulls))
        }
        ElementLayout::Date32 => {
            Arc::new(primitive::<Date32Type>(data, order, row_count, nulls))
        }
        ElementLayout::TimestampMillisecond => Arc::new(primitive::<TimestampMillisecondType>(
            data, order, row_count, nulls,
        )),
        ElementLayout::Time64Nanosecond => Arc::new(primitive::<Time64NanosecondType>(
            data, order, row_count, nulls,
        )),
        ElementLayout::Boolean => {
            let bits = BooleanBuffer::collect_bool(row_count, |i| data[i] != 0);
            Arc::new(BooleanArray::new(bits, nulls))
        }
    };
    Ok(DecodedColumn::new(values))
}

fn validity(buffer: &ColumnBuffer<'_>, row_count: usize) -> DecodeResult<Option<NullBuffer>> {
    match buffer.validity() {
        None => Ok(None),
        Some(bits) if bits.len() != row_count => Err(DecodeError::MalformedValidity {
            expected: row_count,
            actual: bits.len(),
        }),
        Some(bits) => Ok(Some(NullBuffer::new(bits.clone()))),
    }
}

fn primitive<T>(
    data: &[u8],
    order: ByteOrder,
    row_count: usize,
    nulls: Option<NullBuffer>,
) -> PrimitiveArray<T>
where
    T: ArrowPrimitiveType,
    T::Native: WireNative,
{
    let mut bytes = MutableBuffer::from_len_zeroed(data.len());
    bytes.as_slice_mut().copy_from_slice(data);
    if !order.is_native() {
        bytes
            .typed_data_mut::<T::Native>()
            .iter_mut()
            .for_each(|value| *value = value.reverse_bytes());
    }
    let values = ScalarBuffer::<T::Native>::new(bytes.into(), 0, row_count);
    PrimitiveArray::<T>::new(values, nulls)
}

/// Fixed-width native types whose byte order can be flipped in place.
pub(crate) trait WireNative: ArrowNativeType {
    fn reverse_bytes(self) -> Self;
}

macro_rules! implement_wire_native_int {
    ($($ty:ty),*) => {
        $(
            impl WireNative for $ty {
                fn reverse_bytes(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

implement_wire_native_int!(i8, i16, i32, i64, u32);

impl WireNative for f32 {
    fn reverse_bytes(self) -> Self {
        f32::from_bits(self.to_bits().swap_bytes())
    }
}

impl WireNative for f64 {
    fn reverse_bytes(self) -> Self {
        f64::from_bits(self.to_bits().swap_bytes())
    }
}
