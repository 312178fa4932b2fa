//! CLI definitions for psminimize
//!
//! The clap structure lives in the library so tests can inspect it without
//! spawning the binary.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser};

/// Build clap styles using our theme colors.
///
/// - Green: headers, usage, flag names (accent color)
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser, Debug)]
#[command(name = "psminimize")]
#[command(about = "Minimize PowerShell scripts")]
#[command(long_about = "psminimize - shrink a PowerShell script for embedding or transport.

The script is run through four stages, in order:
    1. comments (# and <# ... #>) are stripped
    2. variables are renamed, most used first ($A, $B, ...)
    3. spaces around operators and brackets are removed
    4. lines are joined into ;-terminated statements

Built-in variables ($_, $true, $env:..., preference variables) are never
renamed. Additional names can be protected in
~/.config/psminimize/config.toml:

    [rename]
    extra_reserved = [\"$SharedState\"]

EXAMPLES:
    psminimize -s script.ps1 -o script.min.ps1
    psminimize -s script.ps1 -o out.ps1 --compare

LIMITATIONS:
    String literals are not recognised: text inside quotes is upper-cased
    and may lose spaces next to operators.
    Scripts with more than 26 variables get lower-case short names ($a),
    which PowerShell treats as the same variable as $A.

NOTE:
    -v now raises log verbosity. Use -V or --version for the version.")]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// The path to the PowerShell script file
    #[arg(short = 's', long, value_name = "PATH")]
    pub script_path: Option<PathBuf>,

    /// The path to the output file including name
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Print the original and minimized lines side by side
    #[arg(short = 'c', long)]
    pub compare: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log pipeline progress (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
