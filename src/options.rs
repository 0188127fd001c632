//! Tunable parameters for [`crate::optimizer::break_lines`] and
//! [`crate::position::position_items`].

/// Options controlling [`crate::optimizer::break_lines`].
///
/// Expressed as plain data, rather than a named-strategy builder, since `break_lines` is a free
/// function.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakOptions {
    /// A hard ceiling on the adjustment ratio the optimizer may ever settle on, even after
    /// relaxing `initial_max_adjustment_ratio`. `None` means unbounded (the optimizer will relax
    /// as far as needed rather than ever raising `MaxAdjustmentExceeded`).
    pub max_adjustment_ratio: Option<f64>,
    /// The starting adjustment-ratio threshold. Raised automatically by the optimizer's retry
    /// logic when no breakpoint sequence is feasible at the current threshold.
    pub initial_max_adjustment_ratio: f64,
    /// Extra demerits charged when two consecutive chosen breaks are both flagged penalties
    /// (e.g. two hyphenated lines in a row).
    pub double_hyphen_penalty: f64,
    /// Extra demerits charged when two consecutive chosen lines differ by more than one fitness
    /// class (e.g. a very tight line followed by a very loose one).
    pub adjacent_loose_tight_penalty: f64,
}

impl Default for BreakOptions {
    fn default() -> Self {
        BreakOptions {
            max_adjustment_ratio: None,
            initial_max_adjustment_ratio: 1.0,
            double_hyphen_penalty: 0.0,
            adjacent_loose_tight_penalty: 0.0,
        }
    }
}

/// Options controlling [`crate::position::position_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionOptions {
    /// When set, glue items (other than those at a line's leading/trailing edge) also get a
    /// [`crate::position::PositionedItem`] record, with `width` set to the glue's rendered gap.
    /// When unset (the default), only boxes and line-ending penalties are emitted.
    pub include_glue: bool,
}
