#![deny(missing_docs)]
//! Columnar decoding of Cassandra result pages into Arrow arrays.
//!
//! The transport layer hands over one raw, fixed-width byte buffer per column.
//! Instead of building one object per row, each buffer is copied once into an
//! aligned Arrow buffer and viewed as a typed slice. The wire tags a page may
//! carry are resolved through an explicit [`TypeRegistry`], which callers can
//! extend before decoding starts; [`TypeRegistry::with_temporal`] adds the
//! `date` and `timestamp` column types, including the epoch shift `date`
//! values need.
//!
//! ```
//! use fastsandra::{wire, ColumnBuffer, PageColumn, RowSetAssembler, TypeRegistry, TypeTag};
//!
//! let registry = TypeRegistry::with_temporal();
//! let ids = wire::encode_column(&[1_i32, 2, 3]);
//! let dates = wire::encode_dates(&[0, 1, -1]);
//! let page = [
//!     PageColumn::new("instrument_id", TypeTag::INT, ColumnBuffer::new(&ids)),
//!     PageColumn::new("event_date", TypeTag::DATE, ColumnBuffer::new(&dates)),
//! ];
//! let rows = RowSetAssembler::new(&registry).assemble(&page, 3).unwrap();
//! assert_eq!(rows.num_columns(), 2);
//! ```

mod observability;

/// Column-scoped and page-scoped decode errors.
pub mod error;

/// Wire type tags, element layouts and type descriptors.
pub mod types;

/// Tag to descriptor dispatch table.
pub mod registry;

/// Column decoding and page assembly.
pub mod decode;

/// Decoder configuration.
pub mod option;

/// Post-decode epoch and unit corrections for temporal columns.
pub mod temporal;

/// Decoded pages.
pub mod rowset;

/// Encoding of native values into the fixed-width wire layout.
pub mod wire;

pub use crate::{
    decode::{decode_column, ColumnBuffer, DecodedColumn, PageColumn, RowSetAssembler},
    error::{ColumnFailure, DecodeError, DecodeResult, PartialPageError},
    option::DecodeOptions,
    registry::TypeRegistry,
    rowset::RowSet,
    temporal::{adjust, AdjustRule, TemporalUnit, DATE_EPOCH_OFFSET},
    types::{ByteOrder, ElementLayout, TypeDescriptor, TypeTag},
};
