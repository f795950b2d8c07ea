//! Pixel storage and the functions that get colors into it.

mod clamp;
mod frame;
mod matrix;

pub use clamp::{NOISE_SCALE, clamp_channel};
pub use frame::FrameBuffer;
pub use matrix::{Layout, SimpleXY, SnakeXY, Wiring};
