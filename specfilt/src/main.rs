use anyhow::Result;
use clap::Parser;
use specfilt::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    // Usage errors exit before any image is read.
    let config = args.filter_config().unwrap_or_else(|e| e.exit());
    cli::run(&args, &config)
}
