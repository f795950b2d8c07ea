//! Command line flags for the demo clients. Parsed once in `main` and turned into core types.
use clap::{Args, Parser};
use opc_lights_core::{
    config::{
        DEFAULT_FRAMES_PER_SECOND, DEFAULT_HEIGHT, DEFAULT_OPC_PORT, DEFAULT_WIDTH, NoiseConfig,
        PacingConfig,
    },
    errors::OpcResult,
    lights::{FrameBuffer, Wiring},
    opc::BROADCAST_CHANNEL,
};
use smart_leds::RGB8;

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// OPC server as host:port. Takes precedence over --ip and --port
    pub server: Option<String>,

    /// OPC server IP address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub ip: String,

    /// OPC server port
    #[arg(short, long, default_value_t = DEFAULT_OPC_PORT)]
    pub port: u16,
}

impl ServerArgs {
    pub fn addr(&self) -> String {
        match &self.server {
            Some(server) => server.clone(),
            None => format!("{}:{}", self.ip, self.port),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AnimationArgs {
    /// Frames per second
    #[arg(short, long, default_value_t = DEFAULT_FRAMES_PER_SECOND)]
    pub framerate: f32,

    /// LEDs per strip
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Number of strips
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// OPC channel to send to. 0 is every strip
    #[arg(long, default_value_t = BROADCAST_CHANNEL)]
    pub channel: u8,

    /// Send odd rows right to left for serpentine wiring
    #[arg(long)]
    pub zigzag: bool,

    /// Stop after this many frames instead of running until killed
    #[arg(long)]
    pub frames: Option<usize>,
}

impl AnimationArgs {
    pub fn pacing(&self) -> OpcResult<PacingConfig> {
        PacingConfig::new(self.framerate)
    }

    pub fn frame(&self) -> OpcResult<FrameBuffer> {
        FrameBuffer::new(self.width, self.height)
    }

    pub fn wiring(&self) -> Wiring {
        if self.zigzag {
            Wiring::Zigzag
        } else {
            Wiring::RowMajor
        }
    }
}

/// Stream 3D Perlin noise to the LEDs
#[derive(Parser, Debug)]
#[command(version)]
pub struct PerlinCli {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub animation: AnimationArgs,

    /// Noise time units per second
    #[arg(long, default_value_t = 0.5)]
    pub speed: f64,

    /// Horizontal noise scale. Bigger is smoother
    #[arg(long, default_value_t = 16.0)]
    pub freq_x: f64,

    /// Vertical noise scale. Bigger is smoother
    #[arg(long, default_value_t = 16.0)]
    pub freq_y: f64,

    #[arg(long, default_value_t = 0)]
    pub seed: u32,
}

impl PerlinCli {
    pub fn noise_config(&self) -> NoiseConfig {
        NoiseConfig {
            freq_y: self.freq_y,
            freq_x: self.freq_x,
            speed: self.speed,
            seed: self.seed,
        }
    }
}

/// Light each row one after the other
#[derive(Parser, Debug)]
#[command(version)]
pub struct ScanCli {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub animation: AnimationArgs,

    /// Color of the lit row as r,g,b
    #[arg(long, default_value = "0,0,100", value_parser = parse_color)]
    pub color: RGB8,
}

/// Send new brightness and dithering settings to the server and exit
#[derive(Parser, Debug)]
#[command(version)]
pub struct SettingsCli {
    #[command(flatten)]
    pub server: ServerArgs,

    /// LED brightness from 0 to 1.0
    #[arg(short, long, default_value_t = 0.1, value_parser = parse_brightness)]
    pub brightness: f32,

    /// Enable dithering. This is the default
    #[arg(long, overrides_with = "no_dithering")]
    pub dithering: bool,

    /// Disable dithering
    #[arg(long, overrides_with = "dithering")]
    pub no_dithering: bool,
}

impl SettingsCli {
    pub fn dithering(&self) -> bool {
        !self.no_dithering
    }
}

pub fn parse_color(s: &str) -> Result<RGB8, String> {
    let parts = s
        .split(',')
        .map(|x| x.trim().parse::<u8>().map_err(|err| format!("{x:?}: {err}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [r, g, b] => Ok(RGB8::new(*r, *g, *b)),
        _ => Err(format!("expected r,g,b but got {} values", parts.len())),
    }
}

pub fn parse_brightness(s: &str) -> Result<f32, String> {
    let x: f32 = s.parse().map_err(|err| format!("{s:?}: {err}"))?;

    if (0.0..=1.0).contains(&x) {
        Ok(x)
    } else {
        Err(format!("{x} is not between 0 and 1"))
    }
}
