//! Demo client that lights each row one after the other.
use clap::Parser;
use log::*;
use opc_lights_core::patterns::ScanPattern;
use opc_lights_terminal::{cli::ScanCli, init_logging, run_animation};

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = ScanCli::parse();

    debug!("{:?}", cli);

    run_animation(ScanPattern::new(cli.color), &cli.server, &cli.animation)
}
