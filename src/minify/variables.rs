//! Variable discovery and short-name allocation.
//!
//! A [`VariableSet`] holds every distinct `$name` token found in a script,
//! keyed by its upper-cased form since PowerShell resolves variables
//! case-insensitively. The set is built once, ranked by usage, and then
//! handed a transient alias and a short name per variable.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::{MinifyError, Result};

/// Marks a token as a variable reference.
pub const SIGIL: char = '$';

/// A backtick before the sigil makes it a literal dollar sign.
pub const ESCAPE: char = '`';

/// Prefix of every transient alias. `~` can never appear in an identifier,
/// so aliases cannot be confused with real variables.
const ALIAS_PREFIX: &str = "$~~";

/// Letters used for short names, in allocation order.
const SHORT_NAME_ALPHABET: &[u8; 51] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxy";

static VARIABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`?\$[A-Za-z0-9_]*").expect("variable pattern is valid"));

/// `$script:name` and friends. The name after the colon is the same
/// variable as a plain `$name`, but is never rewritten.
static SCOPED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$(?:GLOBAL|LOCAL|PRIVATE|SCRIPT|USING):([A-Za-z0-9_]+)")
        .expect("scoped variable pattern is valid")
});

/// Automatic, preference and scope variables that PowerShell gives meaning
/// to. Upper-cased, sigil included.
static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // automatic
        "$_",
        "$ARGS",
        "$CONSOLEFILENAME",
        "$ERROR",
        "$EVENT",
        "$EVENTARGS",
        "$EVENTSUBSCRIBER",
        "$EXECUTIONCONTEXT",
        "$FALSE",
        "$FOREACH",
        "$HOME",
        "$HOST",
        "$INPUT",
        "$ISCORECLR",
        "$ISLINUX",
        "$ISMACOS",
        "$ISWINDOWS",
        "$LASTEXITCODE",
        "$MATCHES",
        "$MYINVOCATION",
        "$NESTEDPROMPTLEVEL",
        "$NULL",
        "$PID",
        "$PROFILE",
        "$PSBOUNDPARAMETERS",
        "$PSCMDLET",
        "$PSCOMMANDPATH",
        "$PSCULTURE",
        "$PSDEBUGCONTEXT",
        "$PSEDITION",
        "$PSHOME",
        "$PSITEM",
        "$PSSCRIPTROOT",
        "$PSSENDERINFO",
        "$PSUICULTURE",
        "$PSVERSIONTABLE",
        "$PWD",
        "$SENDER",
        "$SHELLID",
        "$STACKTRACE",
        "$SWITCH",
        "$THIS",
        "$TRUE",
        // preference
        "$CONFIRMPREFERENCE",
        "$DEBUGPREFERENCE",
        "$ERRORACTIONPREFERENCE",
        "$ERRORVIEW",
        "$FORMATENUMERATIONLIMIT",
        "$INFORMATIONPREFERENCE",
        "$LOGCOMMANDHEALTHEVENT",
        "$LOGCOMMANDLIFECYCLEEVENT",
        "$LOGENGINEHEALTHEVENT",
        "$LOGENGINELIFECYCLEEVENT",
        "$LOGPROVIDERHEALTHEVENT",
        "$LOGPROVIDERLIFECYCLEEVENT",
        "$MAXIMUMHISTORYCOUNT",
        "$OFS",
        "$OUTPUTENCODING",
        "$PROGRESSPREFERENCE",
        "$PSDEFAULTPARAMETERVALUES",
        "$PSEMAILSERVER",
        "$PSMODULEAUTOLOADINGPREFERENCE",
        "$PSNATIVECOMMANDARGUMENTPASSING",
        "$PSSESSIONAPPLICATIONNAME",
        "$PSSESSIONCONFIGURATIONNAME",
        "$PSSESSIONOPTION",
        "$PSSTYLE",
        "$TRANSCRIPT",
        "$VERBOSEPREFERENCE",
        "$WARNINGPREFERENCE",
        "$WHATIFPREFERENCE",
        // scope modifiers and provider drives ($env:PATH, $script:x)
        "$ALIAS",
        "$ENV",
        "$FUNCTION",
        "$GLOBAL",
        "$LOCAL",
        "$PRIVATE",
        "$SCRIPT",
        "$USING",
        "$VARIABLE",
    ]
    .into_iter()
    .collect()
});

/// Check whether an upper-cased name belongs to PowerShell.
pub fn is_builtin(canonical: &str) -> bool {
    RESERVED.contains(canonical)
}

/// Upper-cased `$name` for every name used after a scope modifier.
fn scoped_names(lines: &[String]) -> HashSet<String> {
    lines
        .iter()
        .flat_map(|line| SCOPED_REGEX.captures_iter(line))
        .map(|caps| format!("{SIGIL}{}", caps[1].to_ascii_uppercase()))
        .collect()
}

/// Short name for the given allocation slot.
///
/// Slots run `$A..$y`, then `$A0..$y0`, `$A1..$y1` and so on.
pub fn short_name(slot: usize) -> String {
    let letter = SHORT_NAME_ALPHABET[slot % SHORT_NAME_ALPHABET.len()] as char;
    match slot / SHORT_NAME_ALPHABET.len() {
        0 => format!("{SIGIL}{letter}"),
        round => format!("{SIGIL}{letter}{}", round - 1),
    }
}

/// One distinct variable found in the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Upper-cased name as matched, sigil (and escape) included
    pub original_name: String,
    pub occurrences: usize,
    /// Reserved variables keep their name
    pub reserved: bool,
    /// Placeholder used between the two substitution passes
    pub alias: String,
    pub short_name: String,
}

impl Variable {
    fn new(original_name: String, reserved: bool) -> Self {
        let short_name = if reserved {
            original_name.clone()
        } else {
            String::new()
        };
        Self {
            original_name,
            occurrences: 0,
            reserved,
            alias: String::new(),
            short_name,
        }
    }
}

/// All variables discovered in one run, in discovery order until ranked.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    variables: Vec<Variable>,
}

impl VariableSet {
    /// Scan every line and count each variable.
    ///
    /// `extra_reserved` holds additional upper-cased names that must never
    /// be renamed. Names also referenced through a scope modifier
    /// (`$script:name`) are reserved too. A bare sigil names nothing and is
    /// skipped.
    pub fn discover(lines: &[String], extra_reserved: &HashSet<String>) -> Self {
        let scoped = scoped_names(lines);
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut variables: Vec<Variable> = Vec::new();

        for line in lines {
            for found in VARIABLE_REGEX.find_iter(line) {
                let canonical = found.as_str().to_ascii_uppercase();
                if canonical.trim_start_matches(ESCAPE) == "$" {
                    continue;
                }
                let slot = *index.entry(canonical.clone()).or_insert_with(|| {
                    let reserved = canonical.starts_with(ESCAPE)
                        || is_builtin(&canonical)
                        || extra_reserved.contains(&canonical)
                        || scoped.contains(&canonical);
                    variables.push(Variable::new(canonical, reserved));
                    variables.len() - 1
                });
                variables[slot].occurrences += 1;
            }
        }

        Self { variables }
    }

    /// Order by descending occurrence count; ties keep discovery order.
    pub fn rank(&mut self) {
        self.variables.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    }

    /// Give every variable a fresh random alias.
    ///
    /// Fails if the random source ever repeats itself, since the rename is
    /// only safe while aliases are unique.
    pub fn assign_aliases(&mut self) -> Result<()> {
        self.assign_aliases_from(|| Uuid::new_v4().hyphenated().to_string())
    }

    /// Give every variable an alias built from `next_id`.
    ///
    /// Ids are upper-cased and prefixed with `$~~`.
    pub fn assign_aliases_from<F>(&mut self, mut next_id: F) -> Result<()>
    where
        F: FnMut() -> String,
    {
        let mut seen = HashSet::with_capacity(self.variables.len());
        for variable in &mut self.variables {
            let alias = format!("{ALIAS_PREFIX}{}", next_id().to_ascii_uppercase());
            if !seen.insert(alias.clone()) {
                return Err(MinifyError::AliasCollision {
                    name: variable.original_name.clone(),
                    alias,
                });
            }
            variable.alias = alias;
        }
        Ok(())
    }

    /// Hand out short names in the current order, skipping reserved
    /// variables and any name a reserved variable already holds.
    pub fn assign_short_names(&mut self) {
        let taken: HashSet<String> = self
            .variables
            .iter()
            .filter(|v| v.reserved)
            .map(|v| v.original_name.clone())
            .collect();

        let mut slot = 0;
        for variable in self.variables.iter_mut().filter(|v| !v.reserved) {
            let mut name = short_name(slot);
            while taken.contains(&name) {
                slot += 1;
                name = short_name(slot);
            }
            variable.short_name = name;
            slot += 1;
        }
    }

    /// Variables sorted longest original name first.
    pub fn by_length_desc(&self) -> Vec<&Variable> {
        let mut sorted: Vec<&Variable> = self.variables.iter().collect();
        sorted.sort_by(|a, b| b.original_name.len().cmp(&a.original_name.len()));
        sorted
    }

    pub fn get(&self, canonical: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.original_name == canonical)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Number of variables that will keep their name.
    pub fn reserved_count(&self) -> usize {
        self.variables.iter().filter(|v| v.reserved).count()
    }
}
