//! Variable renaming properties over whole scripts.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use psminimize::minify::{rename_variables, VariableSet};

use crate::helpers::lines;

/// Count every `$name` token, case-sensitively.
fn token_counts(script: &[String]) -> HashMap<String, usize> {
    let token = Regex::new(r"\$[A-Za-z0-9_]*").unwrap();
    let mut counts = HashMap::new();
    for line in script {
        for found in token.find_iter(line) {
            *counts.entry(found.as_str().to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn rename(script: &[String]) -> (Vec<String>, VariableSet) {
    let mut output = script.to_vec();
    let variables = rename_variables(&mut output, &HashSet::new()).unwrap();
    (output, variables)
}

fn assert_counts_preserved(output: &[String], variables: &VariableSet) {
    let counts = token_counts(output);
    for variable in variables.iter() {
        assert_eq!(
            counts.get(&variable.short_name).copied().unwrap_or(0),
            variable.occurrences,
            "{} renamed to {}",
            variable.original_name,
            variable.short_name
        );
    }
    assert_eq!(counts.len(), variables.len());
}

/// `count` distinct variables, variable `i` used `(i % 7) + 1` times.
fn many_variables(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let uses = vec![format!("$v{i}"); i % 7 + 1];
            format!("Write-Output {}", uses.join(" "))
        })
        .collect()
}

// ============================================================================
// Occurrence counts
// ============================================================================

#[test]
fn prefix_names_keep_their_counts() {
    let script = lines(&[
        "$count = 0",
        "$countTotal = $count + $countTotal",
        "$countTotalMax = $countTotal",
        "foreach ($c in $count) { $c }",
    ]);
    let (output, variables) = rename(&script);

    assert_eq!(variables.get("$COUNT").map(|v| v.occurrences), Some(3));
    assert_eq!(variables.get("$COUNTTOTAL").map(|v| v.occurrences), Some(3));
    assert_eq!(variables.get("$COUNTTOTALMAX").map(|v| v.occurrences), Some(1));
    assert_eq!(variables.get("$C").map(|v| v.occurrences), Some(2));
    assert_counts_preserved(&output, &variables);
}

#[test]
fn fewer_than_alphabet_uses_single_letters() {
    let (output, variables) = rename(&many_variables(10));
    assert_counts_preserved(&output, &variables);

    let names: HashSet<&str> = variables.iter().map(|v| v.short_name.as_str()).collect();
    assert_eq!(names.len(), 10);
    assert!(names.iter().all(|name| name.len() == 2));
}

#[test]
fn more_than_alphabet_stays_collision_free() {
    let (output, variables) = rename(&many_variables(120));
    assert_counts_preserved(&output, &variables);

    let names: HashSet<&str> = variables.iter().map(|v| v.short_name.as_str()).collect();
    let aliases: HashSet<&str> = variables.iter().map(|v| v.alias.as_str()).collect();
    assert_eq!(names.len(), 120);
    assert_eq!(aliases.len(), 120);
    assert!(names.contains("$A0"));
    assert!(output.iter().all(|line| !line.contains("$~~")));
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn most_used_variables_get_earliest_names() {
    let script = lines(&[
        "$rare = $tie1 + $tie2",
        "$mid = $hot + $hot",
        "$mid = $mid + $hot + $tie1 + $tie2",
        "$hot = $hot + $hot",
    ]);
    let (_, variables) = rename(&script);

    let short = |name: &str| variables.get(name).map(|v| v.short_name.clone());
    assert_eq!(short("$HOT"), Some("$A".to_string()));
    assert_eq!(short("$MID"), Some("$B".to_string()));
    assert_eq!(short("$TIE1"), Some("$C".to_string()));
    assert_eq!(short("$TIE2"), Some("$D".to_string()));
    assert_eq!(short("$RARE"), Some("$E".to_string()));
}

#[test]
fn occurrence_counts_never_increase_along_rank() {
    let (_, variables) = rename(&many_variables(60));
    let counts: Vec<usize> = variables.iter().map(|v| v.occurrences).collect();
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}

// ============================================================================
// Reserved variables
// ============================================================================

#[test]
fn reserved_variables_pass_through() {
    let script = lines(&["foreach ($item in $input) { $_.Name; $true; $null; $PSScriptRoot }"]);
    let (output, variables) = rename(&script);

    assert_eq!(
        output,
        vec!["FOREACH ($A IN $INPUT) { $_.NAME; $TRUE; $NULL; $PSSCRIPTROOT }"]
    );
    assert_eq!(variables.reserved_count(), 5);
}

#[test]
fn scope_qualified_variable_keeps_its_name_everywhere() {
    let script = lines(&[
        "$cache = $path",
        "$script:cache = $script:cache + 1",
        "$path = $env:PATH",
    ]);
    let (output, variables) = rename(&script);

    assert_eq!(
        output,
        vec![
            "$CACHE = $A",
            "$SCRIPT:CACHE = $SCRIPT:CACHE + 1",
            "$A = $ENV:PATH"
        ]
    );
    assert!(variables.get("$CACHE").is_some_and(|v| v.reserved));
}
