mod args;

use std::process::ExitCode;

use clap::Parser;
use eyre::Context;
use logtree::{Builder, Config, Logger};
use tracing::Level;

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Err(err) => {
            let root = err.root_cause();

            eprint!("\x1b[31m");
            eprintln!("Error: {}", err);
            eprintln!();
            eprintln!("Caused by:");
            eprint!("  {}", root);
            eprintln!("\x1b[0m");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::from(0),
    }
}

fn diagnostics_level(verbose: u8) -> Option<Level> {
    match verbose {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        4_u8..=u8::MAX => Some(Level::TRACE),
    }
}

fn run(args: Args) -> eyre::Result<()> {
    if let Some(level) = diagnostics_level(args.verbose) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(level)
            .init();
    }

    let mut config =
        Config::from_env().context("Failed reading logger configuration from environment")?;
    if let Some(level) = args.level {
        config.level = level;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(format_time) = args.time_format {
        config.format_time = format_time;
    }
    if args.no_color {
        config.use_ansi = false;
    }

    if config.use_ansi {
        yansi::whenever(yansi::Condition::STDOUT_IS_TTY);
    }

    tracing::debug!(target: "logtree", "root configuration: {:?}", config);
    let registry = Builder::new().with_config(config).build();

    let logger = registry
        .get_logger(&args.path)
        .with_context(|| format!("Failed resolving logger path {:?}", args.path))?;
    logger.log(args.severity, &args.message.join(" "))?;

    if args.tree {
        print_tree(registry.root(), 0)?;
    }

    Ok(())
}

fn print_tree(logger: &Logger, depth: usize) -> eyre::Result<()> {
    let label = if logger.is_root() { "/" } else { logger.name() };
    println!("{}{} [{}]", "  ".repeat(depth), label, logger.level());

    for name in logger.children() {
        let child = logger.child(&name)?;
        print_tree(&child, depth + 1)?;
    }
    Ok(())
}
