use anyhow::Result;
use clap::Parser;

use kirok::{commands, logging, router, Settings};

#[derive(Parser)]
#[command(
    name = "kirok",
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Scaffolds kirok multiplatform projects",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    /// Log level for diagnostics (trace, debug, info, warn, error)
    #[arg(long, default_value = logging::DEFAULT_LEVEL)]
    log_level: String,

    /// Command and its arguments (`help`, `init [version]`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // The raw command args swallow flags, so a trailing level is picked out here.
    let (trailing_level, args) = logging::split_level_flag(&cli.args);
    logging::init(trailing_level.as_deref().unwrap_or(cli.log_level.as_str()));

    let table = commands::table(Settings::from_env())?;
    router::route(&table, &args)
}
