use clap::Parser;
use logtree::Level;

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Log a message through a hierarchical logger tree.", long_about = None)]
pub struct Args {
    #[arg(
        index = 1,
        value_name = "PATH",
        help = "Slash-delimited logger path, relative to the root. Supports '.' and '..'."
    )]
    pub path: String,

    #[arg(
        index = 2,
        value_name = "LEVEL",
        help = "Severity of the message: notset, debug, info, warning, error, critical or 0-5."
    )]
    pub severity: Level,

    #[arg(index = 3, value_name = "MESSAGE", help = "Message to log.")]
    pub message: Vec<String>,

    #[arg(
        long,
        help = "Minimum level of the root logger. Overrides LOGTREE_LEVEL."
    )]
    pub level: Option<Level>,

    #[arg(
        long,
        help = "Message template using {time}, {level}, {name} and {msg}. Overrides LOGTREE_FORMAT."
    )]
    pub format: Option<String>,

    #[arg(
        long,
        help = "strftime time template, optionally wrapped as {:...}. Overrides LOGTREE_TIME_FORMAT."
    )]
    pub time_format: Option<String>,

    #[arg(long, help = "Disable ANSI colors in the level label.")]
    pub no_color: bool,

    #[arg(long, help = "Print the materialized logger tree after logging.")]
    pub tree: bool,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        help = "Write verbose diagnostics to stderr.",
        display_order = 999
    )]
    pub verbose: u8,
}
