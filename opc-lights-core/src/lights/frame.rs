use smart_leds::RGB8;
use smart_leds::colors::BLACK;

use super::Wiring;
use crate::errors::{OpcError, OpcResult};
use crate::opc::MAX_PAYLOAD;

/// A fixed size grid of pixels stored row-major. The size is set once in `new` and always fits in one OPC message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<RGB8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> OpcResult<Self> {
        let pixel_count = width
            .checked_mul(height)
            .filter(|x| *x > 0)
            .ok_or(OpcError::InvalidDimensions { width, height })?;

        // checked here so a frame that can never be sent fails before connecting
        let payload_len = pixel_count
            .checked_mul(3)
            .ok_or(OpcError::InvalidDimensions { width, height })?;

        if payload_len > MAX_PAYLOAD {
            return Err(OpcError::PayloadTooLarge(payload_len));
        }

        Ok(Self {
            width,
            height,
            pixels: vec![BLACK; pixel_count],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> RGB8 {
        self.pixels[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, color: RGB8) {
        self.pixels[row * self.width + col] = color;
    }

    pub fn as_slice(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Copy the pixels into `out` in the order they are wired. `out` is cleared first so it can be reused.
    pub fn write_wired(&self, wiring: Wiring, out: &mut Vec<RGB8>) {
        out.clear();
        out.extend((0..self.pixels.len()).map(|n| {
            let (x, y) = wiring.n_to_xy(n, self.width);

            self.get(y, x)
        }));
    }
}
