//! Column buffers in, typed Arrow columns out.

mod assembler;
mod column;

use arrow::{
    array::{Array, ArrayRef, AsArray, PrimitiveArray},
    buffer::BooleanBuffer,
    datatypes::{ArrowPrimitiveType, DataType},
};

pub use self::{assembler::RowSetAssembler, column::decode_column};
use crate::types::TypeTag;

/// Raw fixed-width bytes for one column across a page, owned by the caller.
#[derive(Debug, Clone)]
pub struct ColumnBuffer<'a> {
    data: &'a [u8],
    validity: Option<BooleanBuffer>,
}

impl<'a> ColumnBuffer<'a> {
    /// Buffer with every row present.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            validity: None,
        }
    }

    /// Attach a validity bitmap; `true` marks a present value.
    pub fn with_validity(self, validity: impl Into<BooleanBuffer>) -> Self {
        Self {
            validity: Some(validity.into()),
            ..self
        }
    }

    /// Raw column bytes.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Validity bitmap, if the page carried one.
    pub fn validity(&self) -> Option<&BooleanBuffer> {
        self.validity.as_ref()
    }
}

/// One entry of an incoming page: metadata plus bytes.
#[derive(Debug, Clone)]
pub struct PageColumn<'a> {
    name: &'a str,
    tag: TypeTag,
    buffer: ColumnBuffer<'a>,
}

impl<'a> PageColumn<'a> {
    /// Describe one column of a page.
    pub fn new(name: &'a str, tag: TypeTag, buffer: ColumnBuffer<'a>) -> Self {
        Self { name, tag, buffer }
    }

    /// Column name from the result metadata.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Wire type tag from the result metadata.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Raw column contents.
    pub fn buffer(&self) -> &ColumnBuffer<'a> {
        &self.buffer
    }
}

/// A decoded column: contiguous native values plus a validity mask.
///
/// The mask is the null buffer of the wrapped Arrow array.
#[derive(Debug, Clone)]
pub struct DecodedColumn {
    values: ArrayRef,
}

impl DecodedColumn {
    /// Wrap an already built array.
    pub fn new(values: ArrayRef) -> Self {
        Self { values }
    }

    /// The decoded array.
    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    /// Take the decoded array.
    pub fn into_values(self) -> ArrayRef {
        self.values
    }

    /// Element type of the column.
    pub fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        self.values.null_count()
    }

    /// Per-row validity, `true` where a value is present.
    pub fn validity(&self) -> BooleanBuffer {
        match self.values.nulls() {
            Some(nulls) => nulls.inner().clone(),
            None => BooleanBuffer::new_set(self.values.len()),
        }
    }

    /// Typed view, if the column holds `T`.
    pub fn as_primitive<T: ArrowPrimitiveType>(&self) -> Option<&PrimitiveArray<T>> {
        self.values.as_primitive_opt::<T>()
    }
}
