//! Run summary: size reduction and side-by-side comparison.

use humansize::{format_size, BINARY};

/// Size of a script before and after minification, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    pub original_len: usize,
    pub minimized_len: usize,
}

impl Reduction {
    /// Measure the combined length of both line sequences.
    pub fn measure(original: &[String], minimized: &[String]) -> Self {
        Self {
            original_len: total_len(original),
            minimized_len: total_len(minimized),
        }
    }

    /// Percentage of the original that was removed. Empty input reports 0.
    pub fn percent(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        100.0 - (self.minimized_len as f64 / self.original_len as f64 * 100.0)
    }

    /// Bytes removed (negative if the output grew).
    pub fn saved(&self) -> i64 {
        self.original_len as i64 - self.minimized_len as i64
    }

    /// Human-readable `before -> after` sizes.
    pub fn sizes_human(&self) -> String {
        format!(
            "{} -> {}",
            format_size(self.original_len as u64, BINARY),
            format_size(self.minimized_len as u64, BINARY)
        )
    }
}

fn total_len(lines: &[String]) -> usize {
    lines.iter().map(String::len).sum()
}

/// Render the original script next to the minimized one, one row per
/// original line. Minimized lines past the original's length are not shown.
pub fn compare_lines(original: &[String], minimized: &[String], width: usize) -> String {
    let mut out = String::new();
    for (i, line) in original.iter().enumerate() {
        match minimized.get(i) {
            Some(min) => {
                let min = min.trim_end_matches('\n');
                out.push_str(&format!("{:<width$} | {}\n", line, min));
            }
            None => out.push_str(&format!("{:<width$} |\n", line)),
        }
    }
    out
}
