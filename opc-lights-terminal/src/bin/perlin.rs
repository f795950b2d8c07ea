//! Demo client that streams 3D Perlin noise.
use clap::Parser;
use log::*;
use opc_lights_core::patterns::NoisePattern;
use opc_lights_terminal::{cli::PerlinCli, init_logging, run_animation};

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = PerlinCli::parse();

    debug!("{:?}", cli);

    let pattern = NoisePattern::perlin(&cli.noise_config());

    run_animation(pattern, &cli.server, &cli.animation)
}
