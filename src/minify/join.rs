//! Stage 4: Join lines
//!
//! Drops blank lines and terminates each remaining statement so the output
//! can be concatenated into a single line of script.

use super::Stage;
use crate::error::Result;

/// A `param(...)` block opener spread over lines: `PARAM` then `(`.
const PARAM_KEYWORD: &str = "PARAM";

/// Trim and terminate every line, dropping the ones that end up empty.
pub fn join_lines(lines: &[String]) -> Vec<String> {
    lines.iter().filter_map(|line| terminate_line(line)).collect()
}

/// Terminate a single line, or `None` if nothing is left after trimming.
///
/// - `{`, `(`, `;`, `}` need nothing appended
/// - `]` gets a newline, since joining indexing or array syntax onto the
///   next statement changes its meaning
/// - a trailing `PARAM` keyword is left alone so it still binds to the
///   `(` on the next line
/// - anything else gets `;`
pub fn terminate_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let last = trimmed.chars().last()?;

    let terminated = match last {
        '{' | '(' | ';' | '}' => trimmed.to_string(),
        ']' => format!("{trimmed}\n"),
        _ if ends_with_param_keyword(trimmed) => trimmed.to_string(),
        _ => format!("{trimmed};"),
    };
    Some(terminated)
}

/// Check for `PARAM` as a whole word at the end of the line.
fn ends_with_param_keyword(line: &str) -> bool {
    let Some(split) = line.len().checked_sub(PARAM_KEYWORD.len()) else {
        return false;
    };
    if !line.is_char_boundary(split) {
        return false;
    }
    let (head, tail) = line.split_at(split);
    tail.eq_ignore_ascii_case(PARAM_KEYWORD)
        && !head.ends_with(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
}

/// Pipeline stage wrapping [`join_lines`].
#[derive(Debug, Default)]
pub struct LineJoiner;

impl Stage for LineJoiner {
    fn name(&self) -> &'static str {
        "join-lines"
    }

    fn apply(&mut self, lines: &mut Vec<String>) -> Result<()> {
        *lines = join_lines(lines);
        Ok(())
    }
}
