//! CLI entry point for the tile grid driver

use clap::Parser;
use tilegrid::io::cli::{Cli, Driver};

fn main() -> tilegrid::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let mut driver = Driver::new(cli);
    driver.run()
}
