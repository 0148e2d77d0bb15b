use std::collections::HashSet;

use super::{decode_column, DecodedColumn, PageColumn};
use crate::{
    error::{ColumnFailure, DecodeError, DecodeResult, PartialPageError},
    observability::{log_debug, log_warn},
    option::DecodeOptions,
    registry::TypeRegistry,
    rowset::RowSet,
    temporal::adjust,
};

/// Decodes every column of a page against a shared [`TypeRegistry`].
///
/// Columns are independent: one bad column never stops the others, and all
/// failures are reported together.
#[derive(Debug, Clone)]
pub struct RowSetAssembler<'r> {
    registry: &'r TypeRegistry,
    options: DecodeOptions,
}

impl<'r> RowSetAssembler<'r> {
    /// Assembler with default options.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_options(registry, DecodeOptions::default())
    }

    /// Assembler with explicit options.
    pub fn with_options(registry: &'r TypeRegistry, options: DecodeOptions) -> Self {
        Self { registry, options }
    }

    /// Registry this assembler resolves tags against.
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Options in effect.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Resolve, decode and adjust a single column.
    pub fn decode_one(
        &self,
        column: &PageColumn<'_>,
        row_count: usize,
    ) -> DecodeResult<DecodedColumn> {
        let descriptor = self.registry.resolve(column.tag())?;
        let decoded = decode_column(column.buffer(), descriptor, row_count)?;
        match self.registry.adjustment(column.tag()) {
            Some(rule) if self.options.apply_adjustments => adjust(&decoded, rule),
            _ => Ok(decoded),
        }
    }

    /// Decode a page of `row_count` rows.
    ///
    /// On success every column is present in source order. If any column
    /// fails, the error still carries the columns that decoded.
    pub fn assemble(
        &self,
        page: &[PageColumn<'_>],
        row_count: usize,
    ) -> Result<RowSet, PartialPageError> {
        let mut seen = HashSet::with_capacity(page.len());
        let duplicate = page
            .iter()
            .map(|column| !seen.insert(column.name()))
            .collect::<Vec<_>>();

        let results = self.decode_all(page, &duplicate, row_count);

        let mut rows = RowSet::new(row_count);
        let mut failures = Vec::new();
        for (column, result) in page.iter().zip(results) {
            match result {
                Ok(decoded) => rows.push(column.name().to_string(), decoded),
                Err(error) => {
                    log_warn!(
                        component = "assembler",
                        event = "column_decode_failed",
                        column = column.name(),
                        tag = %column.tag(),
                        error = %error,
                    );
                    failures.push(ColumnFailure {
                        name: column.name().to_string(),
                        error,
                    });
                }
            }
        }

        log_debug!(
            component = "assembler",
            event = "page_decoded",
            rows = row_count,
            columns = page.len(),
            failed = failures.len(),
        );

        if failures.is_empty() {
            Ok(rows)
        } else {
            Err(PartialPageError::new(rows, failures))
        }
    }

    fn decode_slot(
        &self,
        column: &PageColumn<'_>,
        duplicate: bool,
        row_count: usize,
    ) -> DecodeResult<DecodedColumn> {
        if duplicate {
            return Err(DecodeError::DuplicateColumn {
                name: column.name().to_string(),
            });
        }
        self.decode_one(column, row_count)
    }

    fn decode_all(
        &self,
        page: &[PageColumn<'_>],
        duplicate: &[bool],
        row_count: usize,
    ) -> Vec<DecodeResult<DecodedColumn>> {
        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                use rayon::prelude::*;

                return page
                    .par_iter()
                    .zip(duplicate.par_iter())
                    .map(|(column, &dup)| self.decode_slot(column, dup, row_count))
                    .collect();
            }
        }

        page.iter()
            .zip(duplicate)
            .map(|(column, &dup)| self.decode_slot(column, dup, row_count))
            .collect()
    }
}
