//! Minify command handler
//!
//! Reads the script, runs the pipeline and writes the result. Nothing is
//! written when any stage fails.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use psminimize::cli::Cli;
use psminimize::minify::Pipeline;
use psminimize::summary::{compare_lines, Reduction};
use psminimize::theme::Theme;
use psminimize::Config;

/// Column width of the original script in `--compare` output.
const COMPARE_WIDTH: usize = 120;

/// Handle a minify run from parsed CLI arguments.
///
/// Missing paths are reported and the run stops without error, matching
/// how the tool has always behaved.
#[cfg(not(tarpaulin_include))]
pub fn handle(cli: &Cli) -> Result<()> {
    let theme = Theme::detect();

    let Some(script_path) = cli.script_path.as_deref() else {
        println!("{}", theme.error_text("no file provided"));
        return Ok(());
    };
    let Some(output_path) = cli.output_path.as_deref() else {
        println!("{}", theme.error_text("no output file provided"));
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    let start = Instant::now();

    let original = read_lines(script_path)?;
    let mut minimized = original.clone();
    Pipeline::from_config(&config)
        .run(&mut minimized)
        .with_context(|| format!("Failed to minimize {}", script_path.display()))?;

    fs::write(output_path, render_output(&minimized, config.pipeline.join_lines))
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    if cli.compare {
        print!("{}", compare_lines(&original, &minimized, COMPARE_WIDTH));
    }

    let reduction = Reduction::measure(&original, &minimized);
    println!(
        "{}",
        theme.accent_text(&format!(
            "minimization completed in {:.6} seconds and reduced by {:.6}%",
            start.elapsed().as_secs_f64(),
            reduction.percent()
        ))
    );
    println!("{}", theme.secondary_text(&reduction.sizes_human()));
    Ok(())
}

/// Load configuration from `--config`, or the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            Config::load_from(path)
        }
        None => {
            if let Ok(path) = Config::config_path() {
                debug!(path = %path.display(), "Loading config");
            }
            Config::load()
        }
    }
}

/// Joined lines carry their own terminators; anything else needs newlines.
fn render_output(lines: &[String], joined: bool) -> String {
    if joined {
        lines.concat()
    } else {
        lines.join("\n")
    }
}

/// Read a script into lines, dropping line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    Ok(contents.lines().map(String::from).collect())
}
