use arrow::{datatypes::DataType, error::ArrowError};

use crate::{
    rowset::RowSet,
    types::{ElementLayout, TypeTag},
};

/// Result alias for column-scoped decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Error raised while decoding or adjusting a single column.
///
/// None of these are retryable: the input bytes are already resident and a
/// second attempt would fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The wire tag has no entry in the registry.
    #[error("unknown wire type tag {tag}")]
    UnknownType {
        /// Tag found in the column metadata.
        tag: TypeTag,
    },
    /// Buffer length disagrees with `row_count * element_width`.
    #[error("malformed column buffer: expected {expected} bytes, got {actual}")]
    MalformedBuffer {
        /// Byte length implied by the row count and element width.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },
    /// Validity bitmap length disagrees with the row count.
    #[error("malformed validity bitmap: expected {expected} entries, got {actual}")]
    MalformedValidity {
        /// Row count of the page.
        expected: usize,
        /// Entries in the supplied bitmap.
        actual: usize,
    },
    /// Element width does not match the layout's natural width.
    #[error("invalid descriptor for tag {tag}: layout {layout:?} cannot use width {width}")]
    InvalidDescriptor {
        /// Tag being described.
        tag: TypeTag,
        /// Requested target layout.
        layout: ElementLayout,
        /// Requested element width in bytes.
        width: usize,
    },
    /// Offset subtraction or unit rescaling left the working integer range.
    #[error("temporal adjustment overflowed: value {value} with offset {offset}")]
    Overflow {
        /// Raw element value, widened to `i64`.
        value: i64,
        /// Offset of the rule being applied.
        offset: i64,
    },
    /// The column's element type cannot be fed to a temporal adjustment.
    #[error("temporal adjustment not supported for {data_type:?}")]
    UnsupportedAdjustment {
        /// Element type of the rejected column.
        data_type: DataType,
    },
    /// A column name appeared more than once in one page.
    #[error("duplicate column name in page: {name}")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },
    /// Generic Arrow failure while building output structures.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

/// A column that failed to decode, paired with the reason.
#[derive(Debug)]
pub struct ColumnFailure {
    /// Column name from the page metadata.
    pub name: String,
    /// Why decoding failed.
    pub error: DecodeError,
}

/// Returned when at least one column of a page failed to decode.
///
/// The columns that did decode are kept, in source order, so callers doing
/// exploratory retrieval can carry on with a partial page.
#[derive(Debug, thiserror::Error)]
#[error("{}", summarize(.decoded, .failures))]
pub struct PartialPageError {
    decoded: RowSet,
    failures: Vec<ColumnFailure>,
}

impl PartialPageError {
    pub(crate) fn new(decoded: RowSet, failures: Vec<ColumnFailure>) -> Self {
        Self { decoded, failures }
    }

    /// Columns that decoded successfully.
    pub fn decoded(&self) -> &RowSet {
        &self.decoded
    }

    /// Every column that failed, in source order.
    pub fn failures(&self) -> &[ColumnFailure] {
        &self.failures
    }

    /// Names of the failed columns, in source order.
    pub fn failed_columns(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.name.as_str())
    }

    /// Split into the partial row set and the failures.
    pub fn into_parts(self) -> (RowSet, Vec<ColumnFailure>) {
        (self.decoded, self.failures)
    }
}

fn summarize(decoded: &RowSet, failures: &[ColumnFailure]) -> String {
    let names = failures
        .iter()
        .map(|failure| failure.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} of {} column(s) failed to decode: [{names}]",
        failures.len(),
        failures.len() + decoded.num_columns(),
    )
}
