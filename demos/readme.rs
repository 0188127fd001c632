extern crate line_break;
use line_break::{break_lines, layout_items_from_string, position_items, BreakOptions, Item, LineWidths, PositionOptions};
use std::fmt::{self, Write};

/// Wraps `text` to `max_width` columns, one character of width per glyph, and renders it inside
/// a box-drawing frame.
fn layout_text(text: &str, max_width: usize) -> Result<String, fmt::Error> {
    let measure = |s: &str| s.chars().count() as f64;
    let items = layout_items_from_string(text, measure, None::<fn(&str) -> Vec<String>>);
    let words: Vec<&str> = text.split_whitespace().collect();

    let line_widths = LineWidths::Constant(max_width as f64);
    let breakpoints =
        break_lines(&items, &line_widths, &BreakOptions::default()).expect("unbounded ratio never fails");
    let placed = position_items(&items, &line_widths, &breakpoints, &PositionOptions::default());

    // `layout_items_from_string` emits one box per word, in source order, so walking `placed` in
    // order and counting boxes seen so far recovers which word each box came from.
    let mut lines = vec![String::new(); breakpoints.len().saturating_sub(1)];
    let mut word = 0;
    for p in &placed {
        if matches!(items[p.item], Item::Box { .. }) {
            if !lines[p.line].is_empty() {
                lines[p.line].push(' ');
            }
            lines[p.line].push_str(words[word]);
            word += 1;
        }
    }

    let mut result = String::new();
    writeln!(&mut result, "┏{}┓", "━".repeat(max_width))?;
    for l in &lines {
        let pad = max_width.saturating_sub(l.chars().count());
        writeln!(&mut result, "┃{}{}┃", l, " ".repeat(pad))?;
    }
    writeln!(&mut result, "┗{}┛", "━".repeat(max_width))?;
    Ok(result)
}

fn main() -> Result<(), fmt::Error> {
    let text = "Far out in the uncharted backwaters of the unfashionable end of the western \
                spiral arm of the Galaxy lies a small unregarded yellow sun.";
    print!("{}", layout_text(text, 40)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rendered_line_fits_within_the_requested_width() {
        let text = "Far out in the uncharted backwaters of the unfashionable end of the western \
                    spiral arm of the Galaxy lies a small unregarded yellow sun.";
        let rendered = layout_text(text, 40).unwrap();
        let body_lines: Vec<&str> = rendered.lines().collect();
        for line in &body_lines[1..body_lines.len() - 1] {
            let content: String = line.chars().skip(1).take(line.chars().count() - 2).collect();
            assert!(content.trim_end().chars().count() <= 40);
        }
    }
}
