//! Computes pixel-accurate placements for each item on each line.

use crate::item::{Item, MIN_ADJUSTMENT_RATIO};
use crate::line_widths::LineWidths;
use crate::options::PositionOptions;
use crate::ratio::adjustment_ratios;

/// A single rendered item: its index into the original item stream, which line it landed on, its
/// horizontal offset from the start of that line, and its rendered width.
///
/// For glue, `width` is the stretched/shrunk gap, not the glue's preferred width. For a
/// line-ending penalty (e.g. a hyphen), `width` is the penalty's own width — this is where a
/// visible hyphen glyph belongs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedItem {
    /// Index of the source item in the original `items` slice.
    pub item: usize,
    /// Which line (0-indexed) this item was placed on.
    pub line: usize,
    /// Horizontal offset from the start of the line.
    pub x_offset: f64,
    /// Rendered width of this item on the line.
    pub width: f64,
}

/// Lays out each item of `items` on the line implied by `breakpoints`, following the same line
/// ranges as [`crate::ratio::adjustment_ratios`].
///
/// Each line's adjustment ratio is clamped to `>= MIN_ADJUSTMENT_RATIO` so no line is ever asked
/// to shrink more than its total shrinkability allows, even if the optimizer's fallback mechanism
/// chose a breakpoint that overflows the target width.
pub fn position_items(
    items: &[Item],
    line_widths: &LineWidths,
    breakpoints: &[usize],
    options: &PositionOptions,
) -> Vec<PositionedItem> {
    if breakpoints.len() < 2 {
        return Vec::new();
    }

    let ratios: Vec<f64> = adjustment_ratios(items, line_widths, breakpoints)
        .into_iter()
        .map(|r| r.max(MIN_ADJUSTMENT_RATIO))
        .collect();

    let mut positioned = Vec::new();
    for line in 0..breakpoints.len() - 1 {
        let start = if line == 0 {
            breakpoints[0]
        } else {
            breakpoints[line] + 1
        };
        let end = breakpoints[line + 1];
        let r = ratios[line];

        let mut x_offset = 0.0;
        for (idx, item) in items.iter().enumerate().take(end + 1).skip(start) {
            match item {
                Item::Box { width } => {
                    positioned.push(PositionedItem {
                        item: idx,
                        line,
                        x_offset,
                        width: *width,
                    });
                    x_offset += width;
                }
                Item::Glue {
                    width,
                    stretch,
                    shrink,
                } => {
                    if idx == start || idx == end {
                        continue;
                    }
                    let adjust = if r < 0.0 { *shrink } else { *stretch };
                    let gap = width + r * adjust;
                    if options.include_glue {
                        positioned.push(PositionedItem {
                            item: idx,
                            line,
                            x_offset,
                            width: gap,
                        });
                    }
                    x_offset += gap;
                }
                Item::Penalty { width, .. } => {
                    if idx == end && *width > 0.0 {
                        positioned.push(PositionedItem {
                            item: idx,
                            line,
                            x_offset,
                            width: *width,
                        });
                        x_offset += width;
                    }
                }
            }
        }
    }
    positioned
}
