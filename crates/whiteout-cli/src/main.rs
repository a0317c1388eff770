use clap::Parser;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = whiteout_core::Result<T>;

fn main() -> CliResult<()> {
    // truncation warnings are shown unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Hide(args) => args.run(),
        Commands::Unveil(args) => args.run(),
    }
}
