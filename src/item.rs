//! The tagged union of paragraph items: boxes, glues, and penalties.

/// Demerit/break-cost sentinel. A [`Item::Penalty`] with `cost <= MIN_COST` is a forced break.
pub const MIN_COST: f64 = -1000.0;

/// Demerit/break-cost sentinel. A [`Item::Penalty`] with `cost >= MAX_COST` can never be chosen.
pub const MAX_COST: f64 = 1000.0;

/// No line may be stretched or shrunk past this ratio on the shrink side.
pub const MIN_ADJUSTMENT_RATIO: f64 = -1.0;

/// A single item in a paragraph's item stream.
///
/// Lines may only be broken at [`Item::Glue`] (when it follows a box) or at
/// [`Item::Penalty`] (when its cost is below [`MAX_COST`]). [`Item::Box`] is never a
/// breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item {
    /// An unbreakable typeset unit, typically a word or glyph run.
    Box {
        /// The width of the box.
        width: f64,
    },
    /// Elastic space that separates boxes.
    Glue {
        /// The preferred width of the space.
        width: f64,
        /// How much the space may grow, proportional to this value.
        stretch: f64,
        /// How much the space may shrink, proportional to this value.
        shrink: f64,
    },
    /// An explicit candidate breakpoint, such as a hyphenation point.
    Penalty {
        /// The width contributed to the line if this break is taken (e.g. a hyphen glyph).
        width: f64,
        /// The aesthetic cost of breaking here. `<= MIN_COST` forces a break; `>= MAX_COST`
        /// forbids one.
        cost: f64,
        /// Whether this penalty participates in the double-hyphen demerit (see
        /// `BreakOptions::double_hyphen_penalty`).
        flagged: bool,
    },
}

impl Item {
    /// Constructs a [`Item::Box`].
    pub fn box_(width: f64) -> Item {
        Item::Box { width }
    }

    /// Constructs a [`Item::Glue`].
    pub fn glue(width: f64, stretch: f64, shrink: f64) -> Item {
        Item::Glue {
            width,
            stretch,
            shrink,
        }
    }

    /// Constructs a [`Item::Penalty`].
    pub fn penalty(width: f64, cost: f64, flagged: bool) -> Item {
        Item::Penalty {
            width,
            cost,
            flagged,
        }
    }

    /// The item's nominal width, i.e. the width it contributes to a line that does not break at
    /// it (for a penalty, the width it contributes only if the break *is* taken is not included
    /// here — see the optimizer and ratio computer, which add it explicitly at the break).
    pub fn width(&self) -> f64 {
        match *self {
            Item::Box { width } => width,
            Item::Glue { width, .. } => width,
            Item::Penalty { width, .. } => width,
        }
    }

    pub(crate) fn stretch(&self) -> f64 {
        match *self {
            Item::Glue { stretch, .. } => stretch,
            _ => 0.0,
        }
    }

    pub(crate) fn shrink(&self) -> f64 {
        match *self {
            Item::Glue { shrink, .. } => shrink,
            _ => 0.0,
        }
    }

    pub(crate) fn cost(&self) -> f64 {
        match *self {
            Item::Penalty { cost, .. } => cost,
            _ => 0.0,
        }
    }

    pub(crate) fn flagged(&self) -> bool {
        matches!(self, Item::Penalty { flagged: true, .. })
    }

    pub(crate) fn is_box(&self) -> bool {
        matches!(self, Item::Box { .. })
    }

    pub(crate) fn is_forced_break(&self) -> bool {
        matches!(self, Item::Penalty { cost, .. } if *cost <= MIN_COST)
    }

    /// Whether `self` is a legal breakpoint, given the item immediately preceding it (`None` at
    /// the start of the paragraph).
    pub(crate) fn is_legal_breakpoint(&self, prev: Option<&Item>) -> bool {
        match self {
            Item::Box { .. } => false,
            Item::Glue { .. } => matches!(prev, Some(Item::Box { .. })),
            Item::Penalty { cost, .. } => *cost < MAX_COST,
        }
    }
}

/// Constructs the standard paragraph-ending item: a zero-width glue with infinite stretch,
/// followed conventionally by a forced break (see [`forced_break`]).
///
/// This is what [`crate::text::layout_items_from_string`] appends; callers building their own
/// item streams by hand should append `[finishing_glue(), forced_break()]`.
pub fn finishing_glue() -> Item {
    Item::Glue {
        width: 0.0,
        stretch: f64::INFINITY,
        shrink: 0.0,
    }
}

/// Constructs a forced-break penalty: `cost = MIN_COST`, `width = 0`, `flagged = false`.
///
/// A well-formed paragraph's item stream ends with this (after a [`finishing_glue`]), guaranteeing
/// the optimizer always has a final legal breakpoint.
pub fn forced_break() -> Item {
    Item::Penalty {
        width: 0.0,
        cost: MIN_COST,
        flagged: false,
    }
}
