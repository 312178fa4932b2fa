//! psminimize - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use psminimize::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    commands::minify::handle(&cli)
}

/// Route `tracing` events through `env_logger`.
///
/// `RUST_LOG` wins when set; otherwise `-v`/`-vv` pick the level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
