//! Knuth-Plass optimal paragraph line-breaking.
//!
//! Given a sequence of typesetting items (boxes, glues, penalties) and one or more target line
//! widths, [`break_lines`] chooses a globally optimal set of breakpoints minimizing total visual
//! demerits across the paragraph; [`position_items`] then computes pixel-accurate per-item
//! placements from those breakpoints.
//!
//! The crate is organized leaf-first:
//!
//! - [`item`] — the `Box`/`Glue`/`Penalty` tagged union and its sentinels.
//! - [`error`] — the two failure modes `break_lines` can raise.
//! - [`line_widths`] — the per-line target-width oracle.
//! - [`options`] — tunable parameters for the optimizer and positioner.
//! - [`optimizer`] — the dynamic-programming search itself.
//! - [`ratio`] — per-line adjustment ratios from a chosen breakpoint sequence.
//! - [`position`] — per-item renderable placements.
//! - [`text`] — a convenience string-to-item-stream splitter.
//!
//! Text tokenization beyond whitespace splitting, width measurement, hyphenation dictionaries,
//! and rendering are all out of scope: callers supply a measuring callback (and, optionally, a
//! hyphenation callback) and consume [`PositionedItem`] records however their surface requires.

mod error;
mod item;
mod line_widths;
mod optimizer;
mod options;
mod position;
mod ratio;
mod text;

pub use error::BreakError;
pub use item::{finishing_glue, forced_break, Item, MAX_COST, MIN_ADJUSTMENT_RATIO, MIN_COST};
pub use line_widths::LineWidths;
pub use optimizer::break_lines;
pub use options::{BreakOptions, PositionOptions};
pub use position::{position_items, PositionedItem};
pub use ratio::adjustment_ratios;
pub use text::layout_items_from_string;
