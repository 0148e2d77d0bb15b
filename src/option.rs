/// Knobs for [`RowSetAssembler`](crate::RowSetAssembler).
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub(crate) parallel: bool,
    pub(crate) apply_adjustments: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            parallel: false,
            apply_adjustments: true,
        }
    }
}

impl DecodeOptions {
    /// Decode the columns of a page on the rayon pool.
    ///
    /// Only honoured when the crate is built with the `parallel` feature;
    /// otherwise columns decode sequentially.
    pub fn parallel(self, parallel: bool) -> Self {
        DecodeOptions { parallel, ..self }
    }

    /// Apply the registry's temporal adjustments after decoding. When off,
    /// adjusted tags come back in their raw storage layout.
    pub fn apply_adjustments(self, apply_adjustments: bool) -> Self {
        DecodeOptions {
            apply_adjustments,
            ..self
        }
    }

    /// Whether parallel decoding was requested.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Whether temporal adjustments run.
    pub fn applies_adjustments(&self) -> bool {
        self.apply_adjustments
    }
}
