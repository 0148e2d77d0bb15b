//! Whole-column corrections for temporal wire encodings.
//!
//! CQL `date` values arrive as unsigned 32-bit day counts with the Unix epoch
//! placed at 2^31, the midpoint of the range. The decoder produces the raw
//! `UInt32` column in one pass; [`adjust`] then shifts the whole column by the
//! rule's offset and reinterprets it as `Date32` (or a millisecond timestamp)
//! in a second pass. Nothing is materialised per row.

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, AsArray, PrimitiveArray},
    datatypes::{
        ArrowPrimitiveType, DataType, Date32Type, Int64Type, TimeUnit,
        TimestampMillisecondType, UInt32Type,
    },
};

use crate::{
    decode::DecodedColumn,
    error::{DecodeError, DecodeResult},
};

/// Wire value of CQL `date` that denotes 1970-01-01.
pub const DATE_EPOCH_OFFSET: i64 = 1 << 31;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Granularity of a temporal value.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum TemporalUnit {
    /// Whole days.
    Day,
    /// Milliseconds.
    Millisecond,
}

/// Shift-and-reinterpret rule applied to one column after decoding.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct AdjustRule {
    /// Subtracted from every raw value, in `source_unit`.
    pub offset: i64,
    /// Unit of the raw values.
    pub source_unit: TemporalUnit,
    /// Unit of the adjusted column; `Day` yields `Date32`, `Millisecond`
    /// yields a millisecond timestamp.
    pub target_unit: TemporalUnit,
}

impl AdjustRule {
    /// Rule with an explicit offset and units.
    pub const fn new(offset: i64, source_unit: TemporalUnit, target_unit: TemporalUnit) -> Self {
        Self {
            offset,
            source_unit,
            target_unit,
        }
    }

    /// Rule for CQL `date`: midpoint epoch to signed days.
    pub const fn cql_date() -> Self {
        Self::new(DATE_EPOCH_OFFSET, TemporalUnit::Day, TemporalUnit::Day)
    }

    fn apply(&self, value: i64) -> DecodeResult<i64> {
        let overflow = || DecodeError::Overflow {
            value,
            offset: self.offset,
        };
        let shifted = value.checked_sub(self.offset).ok_or_else(overflow)?;
        match (self.source_unit, self.target_unit) {
            (TemporalUnit::Day, TemporalUnit::Millisecond) => {
                shifted.checked_mul(MILLIS_PER_DAY).ok_or_else(overflow)
            }
            (TemporalUnit::Millisecond, TemporalUnit::Day) => {
                Ok(shifted.div_euclid(MILLIS_PER_DAY))
            }
            _ => Ok(shifted),
        }
    }
}

/// Apply `rule` to every valid element of `column`.
///
/// Accepts `UInt32`, `Int64`, `Date32` and millisecond timestamp columns.
/// Values are widened to `i64` before the subtraction, so the full `u32`
/// range shifts without overflow; narrowing to `Date32` is checked. The
/// validity mask is carried over untouched and null slots are skipped.
pub fn adjust(column: &DecodedColumn, rule: &AdjustRule) -> DecodeResult<DecodedColumn> {
    let values = column.values();
    let adjusted = match values.data_type() {
        DataType::UInt32 => shift(values.as_primitive::<UInt32Type>(), rule)?,
        DataType::Int64 => shift(values.as_primitive::<Int64Type>(), rule)?,
        DataType::Date32 => shift(values.as_primitive::<Date32Type>(), rule)?,
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            shift(values.as_primitive::<TimestampMillisecondType>(), rule)?
        }
        other => {
            return Err(DecodeError::UnsupportedAdjustment {
                data_type: other.clone(),
            })
        }
    };
    Ok(DecodedColumn::new(adjusted))
}

fn shift<T>(array: &PrimitiveArray<T>, rule: &AdjustRule) -> DecodeResult<ArrayRef>
where
    T: ArrowPrimitiveType,
    T::Native: Into<i64>,
{
    match rule.target_unit {
        TemporalUnit::Day => {
            let days = array.try_unary::<_, Date32Type, DecodeError>(|raw| {
                let value: i64 = raw.into();
                let shifted = rule.apply(value)?;
                i32::try_from(shifted).map_err(|_| DecodeError::Overflow {
                    value,
                    offset: rule.offset,
                })
            })?;
            Ok(Arc::new(days))
        }
        TemporalUnit::Millisecond => {
            let millis = array
                .try_unary::<_, TimestampMillisecondType, DecodeError>(|raw| {
                    rule.apply(raw.into())
                })?;
            Ok(Arc::new(millis))
        }
    }
}

#[cfg(test)]
mod tests {
    use arrow::{
        array::{Array, Int32Array, UInt32Array},
        buffer::NullBuffer,
    };

    use super::*;

    fn date_column(values: Vec<u32>, nulls: Option<Vec<bool>>) -> DecodedColumn {
        let nulls = nulls.map(NullBuffer::from);
        DecodedColumn::new(Arc::new(UInt32Array::new(values.into(), nulls)))
    }

    #[test]
    fn midpoint_is_epoch_day() {
        let column = date_column(vec![1 << 31], None);
        let adjusted = adjust(&column, &AdjustRule::cql_date()).unwrap();
        let days = adjusted.values().as_primitive::<Date32Type>();
        assert_eq!(days.values().as_ref(), &[0]);
    }

    #[test]
    fn shifts_around_epoch() {
        let mid = 1_u32 << 31;
        let column = date_column(vec![mid, mid + 1, mid - 1, 0, u32::MAX], None);
        let adjusted = adjust(&column, &AdjustRule::cql_date()).unwrap();
        assert_eq!(adjusted.data_type(), &DataType::Date32);
        let days = adjusted.values().as_primitive::<Date32Type>();
        assert_eq!(
            days.values().as_ref(),
            &[0, 1, -1, i32::MIN, i32::MAX]
        );
    }

    #[test]
    fn days_rescale_to_milliseconds() {
        let mid = 1_u32 << 31;
        let rule = AdjustRule::new(
            DATE_EPOCH_OFFSET,
            TemporalUnit::Day,
            TemporalUnit::Millisecond,
        );
        let adjusted = adjust(&date_column(vec![mid + 2, mid - 1], None), &rule).unwrap();
        assert_eq!(
            adjusted.data_type(),
            &DataType::Timestamp(TimeUnit::Millisecond, None)
        );
        let millis = adjusted
            .values()
            .as_primitive::<TimestampMillisecondType>();
        assert_eq!(
            millis.values().as_ref(),
            &[2 * MILLIS_PER_DAY, -MILLIS_PER_DAY]
        );
    }

    #[test]
    fn milliseconds_floor_to_days() {
        let column = DecodedColumn::new(Arc::new(PrimitiveArray::<Int64Type>::from(vec![
            MILLIS_PER_DAY + 1,
            -1,
        ])));
        let rule = AdjustRule::new(0, TemporalUnit::Millisecond, TemporalUnit::Day);
        let adjusted = adjust(&column, &rule).unwrap();
        let days = adjusted.values().as_primitive::<Date32Type>();
        assert_eq!(days.values().as_ref(), &[1, -1]);
    }

    #[test]
    fn narrowing_overflow_is_reported() {
        let rule = AdjustRule::new(0, TemporalUnit::Day, TemporalUnit::Day);
        let err = adjust(&date_column(vec![u32::MAX], None), &rule)
            .expect_err("u32::MAX does not fit in Date32");
        assert!(matches!(
            err,
            DecodeError::Overflow {
                value: 4_294_967_295,
                offset: 0,
            }
        ));
    }

    #[test]
    fn subtraction_overflow_is_reported() {
        let column = DecodedColumn::new(Arc::new(PrimitiveArray::<Int64Type>::from(vec![
            i64::MIN,
        ])));
        let rule = AdjustRule::new(1, TemporalUnit::Millisecond, TemporalUnit::Millisecond);
        let err = adjust(&column, &rule).expect_err("i64::MIN - 1 must not wrap");
        assert!(matches!(err, DecodeError::Overflow { offset: 1, .. }));
    }

    #[test]
    fn validity_passes_through_and_nulls_are_skipped() {
        let rule = AdjustRule::new(0, TemporalUnit::Day, TemporalUnit::Day);
        // The null slot holds a value that would overflow if it were adjusted.
        let column = date_column(vec![5, u32::MAX, 7], Some(vec![true, false, true]));
        let adjusted = adjust(&column, &rule).unwrap();
        assert_eq!(adjusted.validity(), column.validity());
        let days = adjusted.values().as_primitive::<Date32Type>();
        assert_eq!(days.value(0), 5);
        assert!(days.is_null(1));
        assert_eq!(days.value(2), 7);
    }

    #[test]
    fn rejects_unsupported_source() {
        let column = DecodedColumn::new(Arc::new(Int32Array::from(vec![1, 2])));
        let err = adjust(&column, &AdjustRule::cql_date()).expect_err("int32 is not adjustable");
        assert!(matches!(
            err,
            DecodeError::UnsupportedAdjustment {
                data_type: DataType::Int32
            }
        ));
    }
}
