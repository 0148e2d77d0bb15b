use std::sync::Arc;

use arrow::{
    array::ArrayRef,
    datatypes::{Field, Schema, SchemaRef},
    record_batch::{RecordBatch, RecordBatchOptions},
};

use crate::{decode::DecodedColumn, error::DecodeResult};

/// One decoded page: named columns in source order.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    row_count: usize,
    columns: Vec<(String, DecodedColumn)>,
}

impl RowSet {
    pub(crate) fn new(row_count: usize) -> Self {
        Self {
            row_count,
            columns: Vec::new(),
        }
    }

    /// Names are unique by construction; the assembler rejects repeats.
    pub(crate) fn push(&mut self, name: String, column: DecodedColumn) {
        debug_assert!(self.column(&name).is_none(), "duplicate column {name}");
        self.columns.push((name, column));
    }

    /// Rows in the page.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Decoded columns in the page.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column decoded.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&DecodedColumn> {
        self.columns
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, column)| column)
    }

    /// Column names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, column)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedColumn)> {
        self.columns
            .iter()
            .map(|(name, column)| (name.as_str(), column))
    }

    /// Take the `(name, column)` pairs.
    pub fn into_columns(self) -> Vec<(String, DecodedColumn)> {
        self.columns
    }

    /// Arrow schema of the page; every field is nullable.
    pub fn schema(&self) -> SchemaRef {
        let fields = self
            .columns
            .iter()
            .map(|(name, column)| Field::new(name, column.data_type().clone(), true))
            .collect::<Vec<_>>();
        Arc::new(Schema::new(fields))
    }

    /// Hand the page to tabular tooling as a `RecordBatch`.
    pub fn to_record_batch(&self) -> DecodeResult<RecordBatch> {
        let arrays = self
            .columns
            .iter()
            .map(|(_, column)| column.values().clone())
            .collect::<Vec<ArrayRef>>();
        let options = RecordBatchOptions::new().with_row_count(Some(self.row_count));
        Ok(RecordBatch::try_new_with_options(
            self.schema(),
            arrays,
            &options,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use arrow::{
        array::{Array, AsArray, Int32Array},
        datatypes::{DataType, Int32Type},
    };

    use super::*;

    fn rows() -> RowSet {
        let mut rows = RowSet::new(3);
        rows.push(
            "a".to_string(),
            DecodedColumn::new(Arc::new(Int32Array::from(vec![Some(1), None, Some(3)]))),
        );
        rows.push(
            "b".to_string(),
            DecodedColumn::new(Arc::new(Int32Array::from(vec![4, 5, 6]))),
        );
        rows
    }

    #[test]
    fn lookup_by_name() {
        let rows = rows();
        assert_eq!(rows.num_columns(), 2);
        assert_eq!(rows.column("b").unwrap().len(), 3);
        assert!(rows.column("c").is_none());
        assert_eq!(
            rows.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn record_batch_keeps_order_and_nulls() {
        let batch = rows().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 3);
        let schema = batch.schema();
        assert_eq!(schema.field(0).name(), "a");
        assert_eq!(schema.field(1).name(), "b");
        assert_eq!(schema.field(0).data_type(), &DataType::Int32);
        assert!(batch.column(0).is_null(1));
        assert_eq!(batch.column(1).as_primitive::<Int32Type>().value(2), 6);
    }

    #[test]
    fn empty_page_still_reports_rows() {
        let batch = RowSet::new(7).to_record_batch().unwrap();
        assert_eq!(batch.num_columns(), 0);
        assert_eq!(batch.num_rows(), 7);
    }
}
