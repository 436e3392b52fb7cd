//! Binary entry point for the `retrolz` command-line tool.

use clap::Parser;
use retrolz::cli::args::{run, Cli};

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}
