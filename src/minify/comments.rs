//! Stage 1: Strip comments
//!
//! Removes `#` line comments and `<# ... #>` block comments. Block comments
//! may span any number of lines, so the stripper carries a [`CommentState`]
//! from one line to the next. Everything outside a comment is copied
//! verbatim, surrounding whitespace included.

use super::Stage;
use crate::error::Result;

const COMMENT: char = '#';
const BLOCK_OPEN: char = '<';
const BLOCK_CLOSE: char = '>';
const ESCAPES: [char; 2] = ['\\', '`'];

/// Where the scanner is relative to a block comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentState {
    #[default]
    Normal,
    InBlockComment,
}

/// Strip comments from every line in place.
///
/// Returns the state after the last line, which is
/// [`CommentState::InBlockComment`] for an unterminated block comment.
pub fn strip_comments(lines: &mut [String]) -> CommentState {
    let mut state = CommentState::Normal;
    for line in lines.iter_mut() {
        *line = strip_line(line, &mut state);
    }
    state
}

/// Strip comments from a single line, updating `state` for the next one.
pub fn strip_line(line: &str, state: &mut CommentState) -> String {
    let chars: Vec<char> = line.chars().collect();

    // Comment-only and empty lines; an open block must still get a chance
    // to see its `#>` terminator, so this only applies in normal state.
    if *state == CommentState::Normal && chars.first().map_or(true, |&c| c == COMMENT) {
        return String::new();
    }

    let mut out = String::with_capacity(line.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match *state {
            CommentState::InBlockComment => {
                if c == COMMENT && chars.get(i + 1) == Some(&BLOCK_CLOSE) {
                    *state = CommentState::Normal;
                    i += 1;
                }
            }
            CommentState::Normal if c != COMMENT => out.push(c),
            CommentState::Normal => match i.checked_sub(1).map(|p| chars[p]) {
                Some(prev) if ESCAPES.contains(&prev) => out.push(c),
                Some(BLOCK_OPEN) => {
                    out.pop();
                    *state = CommentState::InBlockComment;
                }
                _ => break,
            },
        }
        i += 1;
    }

    out
}

/// Pipeline stage wrapping [`strip_comments`].
#[derive(Debug, Default)]
pub struct CommentStripper;

impl Stage for CommentStripper {
    fn name(&self) -> &'static str {
        "strip-comments"
    }

    fn apply(&mut self, lines: &mut Vec<String>) -> Result<()> {
        if strip_comments(lines) == CommentState::InBlockComment {
            tracing::debug!("block comment left open at end of script");
        }
        Ok(())
    }
}
