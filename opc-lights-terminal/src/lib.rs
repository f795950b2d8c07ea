pub mod cli;

use anyhow::Context;
use log::*;
use opc_lights_core::{
    driver::FrameDriver,
    opc::{OpcClient, Transport},
    patterns::Pattern,
};

use crate::cli::{AnimationArgs, ServerArgs, SettingsCli};

/// `info` unless RUST_LOG says otherwise
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_nanos()
        .init();
}

/// Connect and stream `pattern` until the connection breaks or `--frames` is reached.
pub fn run_animation<P: Pattern>(
    pattern: P,
    server: &ServerArgs,
    animation: &AnimationArgs,
) -> anyhow::Result<()> {
    // check everything before connecting
    let pacing = animation.pacing()?;
    let frame = animation.frame()?;

    let addr = server.addr();

    let client = OpcClient::connect(addr.as_str())
        .with_context(|| format!("failed connecting to OPC server at {addr}"))?;

    info!(
        "streaming {}x{} frames at {} fps",
        frame.width(),
        frame.height(),
        pacing.frames_per_second()
    );

    let mut driver = FrameDriver::new(pattern, frame, pacing, client)
        .with_channel(animation.channel)
        .with_wiring(animation.wiring());

    match animation.frames {
        Some(n) => driver.run_frames(n)?,
        None => match driver.run_forever()? {},
    }

    info!("done");

    Ok(())
}

/// Send the brightness and dithering settings once.
pub fn apply_settings(settings: &SettingsCli) -> anyhow::Result<()> {
    let addr = settings.server.addr();

    let mut client = OpcClient::connect(addr.as_str())
        .with_context(|| format!("failed connecting to OPC server at {addr}"))?;

    client.set_brightness(settings.brightness)?;
    client.set_dithering(settings.dithering())?;

    Ok(())
}
