use clap::Parser;
use log::*;
use opc_lights_terminal::{apply_settings, cli::SettingsCli, init_logging};

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = SettingsCli::parse();

    apply_settings(&cli)?;

    info!(
        "brightness is {} and dithering is {}",
        cli.brightness,
        if cli.dithering() { "on" } else { "off" }
    );

    Ok(())
}
