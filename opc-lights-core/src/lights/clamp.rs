/// raw noise is roughly -1..1. this pushes the useful half of it past 255 so it clips
pub const NOISE_SCALE: f64 = 512.0;

/// Clip a channel level into a byte. This is a hard clip, so bright and dark areas band. Values in range are
/// truncated, not rounded. NaN ends up as 0.
pub fn clamp_channel(x: f64) -> u8 {
    if x.is_nan() || x < 0.0 {
        0
    } else if x > 255.0 {
        255
    } else {
        x as u8
    }
}
