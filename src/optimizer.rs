//! The Knuth-Plass dynamic-programming search over an active set of candidate breakpoints.
//!
//! This is the crate's core. Every other module either feeds it (`item`, `text`) or consumes its
//! output (`ratio`, `position`).

use std::collections::HashMap;

use crate::error::BreakError;
use crate::item::{Item, MAX_COST, MIN_ADJUSTMENT_RATIO, MIN_COST};
use crate::line_widths::LineWidths;
use crate::options::BreakOptions;

/// A candidate break position still reachable under the current threshold.
///
/// Nodes are arena-allocated into a single `Vec` per [`break_lines`] call and referenced by
/// index rather than by pointer, per the re-architecture guidance this crate follows: nodes form
/// a DAG via `prev`, so indices into a flat arena avoid the cycles and unsafe bookkeeping that
/// owning pointers into a linked active list would require.
#[derive(Debug, Clone, Copy)]
struct Node {
    /// The item index at which this break lies.
    index: usize,
    /// The number of lines up to and including this break.
    line: usize,
    /// Fitness class, 0 (very tight) through 3 (very loose).
    fitness: u8,
    /// Cumulative width/stretch/shrink *after* this break, skipping the glue and non-breakable
    /// penalties that immediately follow it up to the next box (see [`lookahead_sums`]).
    total_width: f64,
    total_stretch: f64,
    total_shrink: f64,
    /// Minimum total demerits to reach this node.
    total_demerits: f64,
    /// Predecessor node, or `None` for the paragraph-start sentinel.
    prev: Option<usize>,
}

impl Node {
    fn root() -> Node {
        Node {
            index: 0,
            line: 0,
            fitness: 1,
            total_width: 0.0,
            total_stretch: 0.0,
            total_shrink: 0.0,
            total_demerits: 0.0,
            prev: None,
        }
    }
}

fn fitness_class(r: f64) -> u8 {
    if r < -0.5 {
        0
    } else if r < 0.5 {
        1
    } else if r < 1.0 {
        2
    } else {
        3
    }
}

fn adjustment_ratio(actual_len: f64, ideal: f64, stretch: f64, shrink: f64) -> f64 {
    if actual_len < ideal {
        if stretch > 0.0 {
            (ideal - actual_len) / stretch
        } else {
            f64::INFINITY
        }
    } else if actual_len > ideal {
        if shrink > 0.0 {
            (ideal - actual_len) / shrink
        } else {
            f64::NEG_INFINITY
        }
    } else {
        0.0
    }
}

fn demerits(r: f64, item: &Item) -> f64 {
    let badness = 100.0 * r.abs().powi(3);
    let cost = item.cost();
    let is_penalty = matches!(item, Item::Penalty { .. });
    if !is_penalty || cost >= 0.0 {
        (1.0 + badness + cost).powi(2)
    } else if cost > MIN_COST {
        (1.0 + badness).powi(2) - cost.powi(2)
    } else {
        (1.0 + badness).powi(2)
    }
}

/// Sums of width/stretch/shrink starting at `b`, continuing through glue and non-breakable
/// penalties up to (but not including) the next box or forced-break penalty. This is what a new
/// break node's cumulative totals are seeded with, so that the glue/penalties immediately
/// trailing a break belong to neither the line that ends there nor the line that begins after it.
fn lookahead_sums(items: &[Item], b: usize, seed: (f64, f64, f64)) -> (f64, f64, f64) {
    let (mut w, mut s, mut sh) = seed;
    for (i, item) in items.iter().enumerate().skip(b) {
        match item {
            Item::Box { .. } => break,
            Item::Glue {
                width,
                stretch,
                shrink,
            } => {
                w += width;
                s += stretch;
                sh += shrink;
            }
            Item::Penalty { cost, .. } => {
                if *cost <= MIN_COST && i > b {
                    break;
                }
            }
        }
    }
    (w, s, sh)
}

enum PassResult {
    Done(Vec<usize>),
    NeedsRelax(f64),
}

/// Runs one DP sweep at a fixed `threshold`. Returns `Done` with the chosen breakpoints, or
/// `NeedsRelax(ratio)` if the active set emptied out in a way that relaxing the threshold to
/// `ratio` would have avoided (see step 6 of the optimizer's main loop).
fn run_pass(items: &[Item], line_widths: &LineWidths, threshold: f64, options: &BreakOptions) -> PassResult {
    let mut arena: Vec<Node> = vec![Node::root()];
    let mut active: Vec<usize> = vec![0];

    let (mut sum_width, mut sum_stretch, mut sum_shrink) = (0.0f64, 0.0f64, 0.0f64);

    let mut b = 0usize;
    while b < items.len() {
        let item = &items[b];
        let legal = match item {
            Item::Box { width } => {
                sum_width += width;
                false
            }
            Item::Glue {
                width,
                stretch,
                shrink,
            } => {
                let legal = b > 0 && items[b - 1].is_box();
                if !legal {
                    sum_width += width;
                    sum_stretch += stretch;
                    sum_shrink += shrink;
                }
                legal
            }
            Item::Penalty { cost, .. } => *cost < MAX_COST,
        };

        if legal {
            let mandatory = item.is_forced_break();

            let mut retained: Vec<usize> = Vec::with_capacity(active.len());
            let mut last_pruned: Option<usize> = None;
            let mut min_ratio_above_threshold = f64::INFINITY;
            // Keyed by (resulting line, fitness class), not fitness alone: nodes already in
            // `active` can carry differing `.line` values at the same `b` (a node and its own
            // surviving descendants, for instance), and collapsing across lines would silently
            // drop a distinct line-count path — and, with `LineWidths::Varying`, evaluate later
            // breaks against the wrong line's target width. Mirrors the teacher's `layout_breakpoint`,
            // which resets its per-fitness `class_a`/`class_demerits` arrays every time it crosses
            // into a new source line.
            let mut best: HashMap<(usize, u8), (f64, usize)> = HashMap::new();

            for &a_idx in &active {
                let a = arena[a_idx];
                let penalty_width = match item {
                    Item::Penalty { width, .. } => *width,
                    _ => 0.0,
                };
                let actual_len = sum_width - a.total_width + penalty_width;
                let ideal = line_widths.get(a.line);
                let r = adjustment_ratio(
                    actual_len,
                    ideal,
                    sum_stretch - a.total_stretch,
                    sum_shrink - a.total_shrink,
                );

                let prune = r < MIN_ADJUSTMENT_RATIO || mandatory;
                if prune {
                    last_pruned = Some(a_idx);
                } else {
                    retained.push(a_idx);
                }

                if r >= MIN_ADJUSTMENT_RATIO && r <= threshold {
                    let mut d = demerits(r, item);
                    if item.flagged() && items[a.index].flagged() {
                        d += options.double_hyphen_penalty;
                    }
                    let fitness = fitness_class(r);
                    if a.index > 0 && (fitness as i32 - a.fitness as i32).abs() > 1 {
                        d += options.adjacent_loose_tight_penalty;
                    }
                    let total = a.total_demerits + d;
                    let key = (a.line + 1, fitness);
                    let slot = best.entry(key).or_insert((total, a_idx));
                    if total < slot.0 {
                        *slot = (total, a_idx);
                    }
                } else if r > threshold && r < min_ratio_above_threshold {
                    min_ratio_above_threshold = r;
                }
            }

            // `HashMap` iteration order is unspecified (and randomized per-instance); sort by key
            // before emitting so that node creation order — and thus which node wins a later exact
            // demerit tie — never depends on hasher state, preserving the optimizer's determinism.
            let mut best: Vec<((usize, u8), (f64, usize))> = best.into_iter().collect();
            best.sort_by_key(|&(key, _)| key);

            let mut added_any = false;
            for ((line, fitness), (total_demerits, a_idx)) in best {
                let a = arena[a_idx];
                let (tw, ts, tsh) = lookahead_sums(items, b, (sum_width, sum_stretch, sum_shrink));
                let node = Node {
                    index: b,
                    line,
                    fitness,
                    total_width: tw,
                    total_stretch: ts,
                    total_shrink: tsh,
                    total_demerits,
                    prev: Some(a_idx),
                };
                debug_assert_eq!(line, a.line + 1);
                arena.push(node);
                retained.push(arena.len() - 1);
                added_any = true;
            }

            if retained.is_empty() && !added_any {
                if min_ratio_above_threshold.is_finite() {
                    return PassResult::NeedsRelax(min_ratio_above_threshold);
                }
                let last_idx = last_pruned.expect("active set cannot empty without a pruned node");
                let last = arena[last_idx];
                let (tw, ts, tsh) = lookahead_sums(items, b, (sum_width, sum_stretch, sum_shrink));
                let node = Node {
                    index: b,
                    line: last.line + 1,
                    fitness: last.fitness,
                    total_width: tw,
                    total_stretch: ts,
                    total_shrink: tsh,
                    total_demerits: last.total_demerits + 1000.0,
                    prev: Some(last_idx),
                };
                arena.push(node);
                retained.push(arena.len() - 1);
            }

            active = retained;
        }

        if let Item::Glue {
            width,
            stretch,
            shrink,
        } = item
        {
            if legal {
                sum_width += width;
                sum_stretch += stretch;
                sum_shrink += shrink;
            }
        }

        b += 1;
    }

    let mut best_idx = active[0];
    for &idx in &active {
        if arena[idx].total_demerits < arena[best_idx].total_demerits {
            best_idx = idx;
        }
    }

    let mut breakpoints = Vec::new();
    let mut cur = Some(best_idx);
    while let Some(idx) = cur {
        breakpoints.push(arena[idx].index);
        cur = arena[idx].prev;
    }
    breakpoints.reverse();

    PassResult::Done(breakpoints)
}

fn validate(items: &[Item]) -> Result<(), BreakError> {
    for (index, item) in items.iter().enumerate() {
        match item {
            Item::Box { width } | Item::Penalty { width, .. } if *width < 0.0 => {
                return Err(BreakError::InvalidItemWidth { index });
            }
            Item::Glue {
                width,
                stretch,
                shrink,
            } => {
                if *width < 0.0 {
                    return Err(BreakError::InvalidItemWidth { index });
                }
                if *stretch < 0.0 || *shrink < 0.0 {
                    return Err(BreakError::InvalidGlue { index });
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Chooses a globally optimal set of breakpoints for `items`, targeting `line_widths`.
///
/// Returns the chosen breakpoint indices, a strictly increasing sequence starting at 0. Empty
/// input yields an empty result; an item sequence with no legal breakpoint (e.g. a single box)
/// yields `[0]`.
///
/// # Errors
///
/// Returns [`BreakError::InvalidItemWidth`] or [`BreakError::InvalidGlue`] if any item fails
/// validation (negative width, or glue with negative stretch/shrink). Returns
/// [`BreakError::MaxAdjustmentExceeded`] if `options.max_adjustment_ratio` is set and no
/// breakpoint sequence satisfies it even after the optimizer's retry-with-relaxed-threshold
/// logic runs its course.
pub fn break_lines(
    items: &[Item],
    line_widths: &LineWidths,
    options: &BreakOptions,
) -> Result<Vec<usize>, BreakError> {
    validate(items)?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let cap = options.max_adjustment_ratio;
    let mut threshold = options.initial_max_adjustment_ratio;
    loop {
        match run_pass(items, line_widths, threshold, options) {
            PassResult::Done(breakpoints) => return Ok(breakpoints),
            PassResult::NeedsRelax(relaxed) => {
                if let Some(cap) = cap {
                    if threshold >= cap {
                        return Err(BreakError::MaxAdjustmentExceeded);
                    }
                }
                threshold = match cap {
                    Some(cap) => relaxed.min(cap),
                    None => relaxed,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{forced_break, Item};

    fn lw(width: f64) -> LineWidths {
        LineWidths::Constant(width)
    }

    #[test]
    fn empty_input_yields_empty_breakpoints() {
        let items: Vec<Item> = Vec::new();
        let bp = break_lines(&items, &lw(100.0), &BreakOptions::default()).unwrap();
        assert_eq!(bp, Vec::<usize>::new());
    }

    #[test]
    fn single_box_yields_single_breakpoint() {
        let items = vec![Item::box_(10.0)];
        let bp = break_lines(&items, &lw(100.0), &BreakOptions::default()).unwrap();
        assert_eq!(bp, vec![0]);
    }

    #[test]
    fn zero_stretch_glue_still_forces_a_break() {
        let items = vec![
            Item::box_(10.0),
            Item::glue(5.0, 0.0, 0.0),
            Item::box_(10.0),
            forced_break(),
        ];
        let bp = break_lines(&items, &lw(50.0), &BreakOptions::default()).unwrap();
        assert_eq!(bp, vec![0, 3]);

        let bp = break_lines(&items, &lw(21.0), &BreakOptions::default()).unwrap();
        assert_eq!(bp, vec![0, 3]);
    }

    #[test]
    fn oversize_box_triggers_fallback_breakpoint() {
        let items = vec![
            Item::box_(5.0),
            Item::glue(5.0, 10.0, 10.0),
            Item::box_(100.0),
            Item::glue(5.0, 10.0, 10.0),
            forced_break(),
        ];
        let bp = break_lines(&items, &lw(50.0), &BreakOptions::default()).unwrap();
        assert_eq!(bp, vec![0, 3, 4]);
    }

    #[test]
    fn threshold_relaxes_until_a_ratio_is_satisfiable() {
        let mut items = Vec::new();
        for _ in 0..5 {
            items.push(Item::box_(10.0));
            items.push(Item::glue(5.0, 1.0, 1.0));
        }
        items.push(forced_break());

        let options = BreakOptions {
            max_adjustment_ratio: Some(1.0),
            ..BreakOptions::default()
        };
        let bp = break_lines(&items, &lw(5.0), &options).unwrap();
        assert_eq!(bp, vec![0, 1, 3, 5, 7, 9, 10]);
    }

    #[test]
    fn capped_max_adjustment_ratio_returns_an_error() {
        let items = vec![
            Item::box_(10.0),
            Item::glue(5.0, 10.0, 10.0),
            Item::box_(10.0),
            forced_break(),
        ];
        let options = BreakOptions {
            max_adjustment_ratio: Some(1.0),
            ..BreakOptions::default()
        };
        let err = break_lines(&items, &lw(100.0), &options).unwrap_err();
        assert_eq!(err, BreakError::MaxAdjustmentExceeded);
    }

    #[test]
    fn negative_width_is_rejected() {
        let items = vec![Item::box_(-1.0)];
        let err = break_lines(&items, &lw(10.0), &BreakOptions::default()).unwrap_err();
        assert_eq!(err, BreakError::InvalidItemWidth { index: 0 });
    }

    #[test]
    fn negative_glue_stretch_is_rejected() {
        let items = vec![Item::glue(1.0, -1.0, 0.0)];
        let err = break_lines(&items, &lw(10.0), &BreakOptions::default()).unwrap_err();
        assert_eq!(err, BreakError::InvalidGlue { index: 0 });
    }

    #[test]
    fn deterministic() {
        let items = vec![
            Item::box_(5.0),
            Item::glue(5.0, 10.0, 10.0),
            Item::box_(100.0),
            Item::glue(5.0, 10.0, 10.0),
            forced_break(),
        ];
        let a = break_lines(&items, &lw(50.0), &BreakOptions::default()).unwrap();
        let b = break_lines(&items, &lw(50.0), &BreakOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    /// Regression for the active-set reduction: it must key on `(line, fitness)`, not fitness
    /// alone. This paragraph offers two routes to the same second breakpoint — one through a
    /// flagged penalty break, one through an unflagged glue break — that land in the same fitness
    /// class with equal base demerits, so a fitness-only reduction would non-deterministically
    /// (or structurally) merge them into one candidate regardless of which `.line` each
    /// predecessor carries. `double_hyphen_penalty` is what should decide between them:
    /// unpenalized, the flagged route wins (both hyphen breaks taken); penalized past the
    /// difference, the unflagged route wins at the first break instead.
    #[test]
    fn active_set_reduction_keys_on_line_and_fitness_not_fitness_alone() {
        let items = vec![
            Item::box_(20.0),                  // 0
            Item::penalty(0.0, 0.0, true),      // 1: flagged break "H1"
            Item::box_(0.0),                    // 2
            Item::glue(0.0, 1.0, 1.0),           // 3: unflagged break, same resulting fit as H1
            Item::box_(20.0),                   // 4
            Item::penalty(0.0, 0.0, true),       // 5: flagged break "H2" (no alternative route)
            Item::box_(15.0),                    // 6
            Item::glue(0.0, f64::INFINITY, 0.0), // 7: finishing glue
            forced_break(),                      // 8
        ];
        let line_widths = lw(20.0);

        let without_penalty = break_lines(&items, &line_widths, &BreakOptions::default()).unwrap();
        assert_eq!(without_penalty, vec![0, 1, 5, 8]);

        let with_penalty = break_lines(
            &items,
            &line_widths,
            &BreakOptions {
                double_hyphen_penalty: 200.0,
                ..BreakOptions::default()
            },
        )
        .unwrap();
        assert_eq!(with_penalty, vec![0, 3, 5, 8]);
    }
}
