//! CLI entry point for dungeon layout identification

use clap::Parser;
use darkdream::io::cli::{Cli, CommandProcessor};
use darkdream::io::logging::init_logging;

fn main() -> darkdream::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    let processor = CommandProcessor::new(cli);
    processor.process()
}
