//! PowerShell script minification
//!
//! Shrinks a script by running its lines through a fixed sequence of
//! stages.
//!
//! # Architecture
//!
//! 1. **Comment stripping** - `#` and `<# ... #>` comments removed
//! 2. **Variable renaming** - most used variables get the shortest names
//! 3. **Spacing compaction** - spaces around operators and brackets dropped
//! 4. **Line joining** - blank lines dropped, statements `;`-terminated
//!
//! Each stage sees the complete output of the one before it. Renaming needs
//! usage counts over the whole script before it can rewrite any line, so
//! stages never run line by line.
//!
//! # Known limitations
//!
//! - Nothing here understands string literals: `#`, `$name` and operator
//!   spacing inside quotes are rewritten like code
//! - Lines are upper-cased while renaming
//! - A function's own name used as call syntax is not tracked
//! - Past 26 renamed variables the lower-case short names begin (`$a`),
//!   and PowerShell resolves `$a` and `$A` to the same variable
//! - Variables also used as `$script:name` (or another scope modifier)
//!   keep their name

mod comments;
mod join;
mod rename;
mod spacing;
mod variables;

pub use comments::{strip_comments, strip_line, CommentState, CommentStripper};
pub use join::{join_lines, terminate_line, LineJoiner};
pub use rename::{rename_variables, VariableRenamer};
pub use spacing::{compact_line, compact_spacing, SpacingCompactor};
pub use variables::{is_builtin, short_name, Variable, VariableSet};

use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// One step of the minification pipeline.
///
/// A stage gets the whole line sequence and may rewrite, drop or add lines.
pub trait Stage {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Apply this stage to every line.
    fn apply(&mut self, lines: &mut Vec<String>) -> Result<()>;
}

/// Stages applied in sequence.
///
/// # Example
///
/// ```
/// use psminimize::minify::{CommentStripper, LineJoiner, Pipeline};
///
/// let mut pipeline = Pipeline::new().with(CommentStripper).with(LineJoiner);
/// let mut lines = vec!["Write-Host hi # greet".to_string(), "".to_string()];
/// pipeline.run(&mut lines).unwrap();
/// assert_eq!(lines, vec!["Write-Host hi;"]);
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Build the standard pipeline, leaving out stages disabled in `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut pipeline = Self::new();
        if config.pipeline.strip_comments {
            pipeline = pipeline.with(CommentStripper);
        }
        if config.pipeline.rename_variables {
            pipeline = pipeline.with(VariableRenamer::new(&config.rename.extra_reserved));
        }
        if config.pipeline.compact_spacing {
            pipeline = pipeline.with(SpacingCompactor);
        }
        if config.pipeline.join_lines {
            pipeline = pipeline.with(LineJoiner);
        }
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn with<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Run every stage over `lines`.
    ///
    /// Stops at the first failing stage; `lines` is then partially
    /// processed and must not be written out.
    pub fn run(&mut self, lines: &mut Vec<String>) -> Result<()> {
        for stage in &mut self.stages {
            stage.apply(lines)?;
            debug!(stage = stage.name(), lines = lines.len(), "Stage complete");
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Minify a sequence of lines with the default pipeline.
///
/// The returned lines are already terminated and are meant to be
/// concatenated as they are.
pub fn minify_lines(lines: &[String]) -> Result<Vec<String>> {
    let mut minimized = lines.to_vec();
    Pipeline::default().run(&mut minimized)?;
    Ok(minimized)
}

/// Minify a whole script.
///
/// # Example
/// ```
/// use psminimize::minify;
/// let output = minify::exec("$name = 'x' # comment\nWrite-Host $name").unwrap();
/// assert_eq!(output, "$A='X';WRITE-HOST $A;");
/// ```
pub fn exec(script: &str) -> Result<String> {
    let lines: Vec<String> = script.lines().map(String::from).collect();
    Ok(minify_lines(&lines)?.concat())
}
