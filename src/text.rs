//! Convenience: split a string (with optional hyphenation) into an item stream.

use crate::item::{finishing_glue, forced_break, Item};

/// Splits `text` into an item stream suitable for [`crate::optimizer::break_lines`].
///
/// Each run of non-whitespace becomes a word token; each run of whitespace becomes a single
/// glue, measured by `measure(" ")` regardless of the run's actual length (runs of more than one
/// space are intentionally collapsed to one glue, matching the conventional treatment of
/// inter-word space in text layout). A word token becomes a single [`Item::Box`] unless
/// `hyphenate` is supplied, in which case the word is split into fragments via `hyphenate`, with
/// a flagged, cost-10 [`Item::Penalty`] of width `measure("-")` inserted between consecutive
/// fragments.
///
/// The returned sequence always ends with [`finishing_glue`] followed by [`forced_break`], so it
/// is ready to hand directly to `break_lines` as a well-formed paragraph.
pub fn layout_items_from_string<M, H>(text: &str, mut measure: M, mut hyphenate: Option<H>) -> Vec<Item>
where
    M: FnMut(&str) -> f64,
    H: FnMut(&str) -> Vec<String>,
{
    let mut items = Vec::new();

    let mut i = 0;
    let bytes_len = text.len();
    while i < bytes_len {
        let rest = &text[i..];
        let is_ws = rest.chars().next().unwrap().is_whitespace();
        let mut j = i;
        for (offset, ch) in rest.char_indices() {
            if ch.is_whitespace() != is_ws {
                break;
            }
            j = i + offset + ch.len_utf8();
        }
        let run = &text[i..j];

        if is_ws {
            let space_width = measure(" ");
            items.push(Item::glue(space_width, 1.5 * space_width, (space_width - 2.0).max(0.0)));
        } else {
            match &mut hyphenate {
                Some(hyphenate) => {
                    let fragments = hyphenate(run);
                    let hyphen_width = measure("-");
                    for (k, fragment) in fragments.iter().enumerate() {
                        items.push(Item::box_(measure(fragment)));
                        if k + 1 < fragments.len() {
                            items.push(Item::penalty(hyphen_width, 10.0, true));
                        }
                    }
                }
                None => items.push(Item::box_(measure(run))),
            }
        }

        i = j;
    }

    items.push(finishing_glue());
    items.push(forced_break());
    items
}
