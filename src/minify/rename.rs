//! Stage 2: Shorten variable names
//!
//! The most used variables get the shortest names. Renaming happens in two
//! passes so that one replacement can never corrupt another:
//!
//! 1. every original name becomes its transient alias, longest names first,
//!    so `$COUNT` is never matched inside `$COUNTTOTAL`
//! 2. every alias becomes its short name
//!
//! Aliases live in a namespace no identifier can reach (`$~~<uuid>`), which
//! is what makes the second pass order-independent.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::variables::VariableSet;
use super::Stage;
use crate::error::Result;

/// Discover, rank and rename every variable in `lines`.
///
/// Every line is upper-cased as part of the first pass, matching the
/// case-insensitive way variables are discovered. The returned set records
/// the name each variable ended up with.
pub fn rename_variables(
    lines: &mut [String],
    extra_reserved: &HashSet<String>,
) -> Result<VariableSet> {
    let mut variables = VariableSet::discover(lines, extra_reserved);
    debug!(
        variables = variables.len(),
        reserved = variables.reserved_count(),
        "Discovered variables"
    );

    variables.rank();
    variables.assign_aliases()?;
    variables.assign_short_names();

    for variable in variables.iter() {
        trace!(
            original = %variable.original_name,
            short = %variable.short_name,
            occurrences = variable.occurrences,
            "Assigned short name"
        );
    }

    replace_with_aliases(lines, &variables);
    replace_aliases(lines, &variables);

    Ok(variables)
}

/// First pass: original name -> alias.
fn replace_with_aliases(lines: &mut [String], variables: &VariableSet) {
    let ordered = variables.by_length_desc();
    for line in lines.iter_mut() {
        let mut folded = line.to_ascii_uppercase();
        for variable in &ordered {
            if folded.contains(variable.original_name.as_str()) {
                folded = folded.replace(variable.original_name.as_str(), &variable.alias);
            }
        }
        *line = folded;
    }
}

/// Second pass: alias -> short name.
fn replace_aliases(lines: &mut [String], variables: &VariableSet) {
    for line in lines.iter_mut() {
        for variable in variables.iter() {
            if line.contains(variable.alias.as_str()) {
                *line = line.replace(variable.alias.as_str(), &variable.short_name);
            }
        }
    }
}

/// Pipeline stage wrapping [`rename_variables`].
#[derive(Debug, Default)]
pub struct VariableRenamer {
    extra_reserved: HashSet<String>,
}

impl VariableRenamer {
    /// Create a renamer that also leaves `extra_reserved` untouched.
    ///
    /// Names are matched case-insensitively.
    pub fn new<I, S>(extra_reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extra_reserved: extra_reserved
                .into_iter()
                .map(|name| name.as_ref().to_ascii_uppercase())
                .collect(),
        }
    }
}

impl Stage for VariableRenamer {
    fn name(&self) -> &'static str {
        "rename-variables"
    }

    fn apply(&mut self, lines: &mut Vec<String>) -> Result<()> {
        rename_variables(lines, &self.extra_reserved)?;
        Ok(())
    }
}
