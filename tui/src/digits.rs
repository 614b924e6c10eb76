//! Large `MM:SS` countdown built from 3x5 cell digits.

use ratatui::text::Line;

pub const DIGIT_HEIGHT: u16 = 5;
/// Four 3-wide digits, a 1-wide colon and single-cell gaps.
pub const COUNTDOWN_WIDTH: u16 = 4 * 3 + 1 + 4;

// One row per line; `#` marks a filled cell.
const DIGITS: [[&str; 5]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    ["  #", "  #", "  #", "  #", "  #"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];
const COLON: [&str; 5] = [" ", "#", " ", "#", " "];

/// Render `[m, m, s, s]` as five lines of block digits using `fill`.
#[must_use]
pub fn big_countdown(digits: [u8; 4], fill: char) -> Vec<Line<'static>> {
    (0..usize::from(DIGIT_HEIGHT))
        .map(|row| {
            let cell = |d: u8| DIGITS[usize::from(d.min(9))][row];
            let text = format!(
                "{} {} {} {} {}",
                cell(digits[0]),
                cell(digits[1]),
                COLON[row],
                cell(digits[2]),
                cell(digits[3]),
            );
            Line::from(text.replace('#', fill.encode_utf8(&mut [0; 4])))
        })
        .collect()
}
