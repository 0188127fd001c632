//! Errors surfaced by [`crate::optimizer::break_lines`].

/// Failure modes for [`crate::optimizer::break_lines`].
///
/// Both variants are described in detail in the crate's top-level documentation. Everything
/// else — oversize boxes, zero-stretch or zero-shrink glue where stretching or shrinking would be
/// required — is handled internally by the optimizer's fallback breakpoint mechanism and never
/// raises an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BreakError {
    /// No breakpoint sequence satisfies the caller's configured `max_adjustment_ratio`, even
    /// after relaxing the threshold as far as the optimizer's retry logic allows.
    ///
    /// This is a recoverable signal: callers typically retry with hyphenation enabled, a larger
    /// `max_adjustment_ratio`, or `None` (unbounded).
    #[error("no breakpoint sequence satisfies the configured maximum adjustment ratio")]
    MaxAdjustmentExceeded,

    /// `items[index]` has a negative width. Programmer error; not retried.
    #[error("item {index} has a negative width")]
    InvalidItemWidth {
        /// The offending item's index.
        index: usize,
    },

    /// The glue at `items[index]` has negative stretch or shrink. Programmer error; not retried.
    #[error("glue at item {index} has negative stretch or shrink")]
    InvalidGlue {
        /// The offending item's index.
        index: usize,
    },
}
