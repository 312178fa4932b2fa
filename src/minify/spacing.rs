//! Stage 3: Compact spacing
//!
//! Drops spaces that sit directly next to operators and brackets. This is a
//! plain text rewrite: it does not know about string literals, so spacing
//! inside quoted text next to one of these tokens is compacted too.

use super::Stage;
use crate::error::Result;

/// Which side of a token may lose its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Both,
    /// Only `"<tok> "`. Used for `-`, where `" -"` would glue parameters to
    /// their command (`Get-Item -Path`).
    After,
}

/// Operator table, applied in this order on every pass. Named operators are
/// matched case-insensitively.
const TOKENS: &[(&str, Side)] = &[
    ("=", Side::Both),
    ("+", Side::Both),
    ("-", Side::After),
    ("*", Side::Both),
    ("-EQ", Side::Both),
    ("-GT", Side::Both),
    ("-LT", Side::Both),
    ("-NE", Side::Both),
    ("-LE", Side::Both),
    ("-GE", Side::Both),
    ("/", Side::Both),
    ("(", Side::Both),
    (")", Side::Both),
    ("[", Side::Both),
    ("]", Side::Both),
    ("{", Side::Both),
    ("}", Side::Both),
    (";", Side::Both),
];

/// Compact every line in place.
pub fn compact_spacing(lines: &mut [String]) {
    for line in lines.iter_mut() {
        *line = compact_line(line);
    }
}

/// Apply the operator table until the line stops changing.
pub fn compact_line(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = compact_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn compact_pass(line: &str) -> String {
    let mut out = line.to_string();
    for &(token, side) in TOKENS {
        if side == Side::Both {
            out = drop_space(&out, token, true);
        }
        out = drop_space(&out, token, false);
    }
    out
}

/// Remove the space directly before (`leading`) or after each
/// non-overlapping occurrence of `token`, keeping the token's own spelling.
fn drop_space(line: &str, token: &str, leading: bool) -> String {
    let pattern = if leading {
        format!(" {token}")
    } else {
        format!("{token} ")
    };
    // ASCII upper-casing keeps byte offsets, so matches in `folded` index
    // straight into `line`.
    let folded = line.to_ascii_uppercase();
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for (start, _) in folded.match_indices(pattern.as_str()) {
        let end = start + pattern.len();
        out.push_str(&line[last..start]);
        if leading {
            out.push_str(&line[start + 1..end]);
        } else {
            out.push_str(&line[start..end - 1]);
        }
        last = end;
    }
    out.push_str(&line[last..]);
    out
}

/// Pipeline stage wrapping [`compact_spacing`].
#[derive(Debug, Default)]
pub struct SpacingCompactor;

impl Stage for SpacingCompactor {
    fn name(&self) -> &'static str {
        "compact-spacing"
    }

    fn apply(&mut self, lines: &mut Vec<String>) -> Result<()> {
        compact_spacing(lines);
        Ok(())
    }
}
