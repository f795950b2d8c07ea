//! The render, send, sleep loop.
use std::convert::Infallible;
use std::thread;
use std::time::{Duration, Instant};

use itertools::iproduct;
use smart_leds::RGB8;

use crate::config::PacingConfig;
use crate::errors::OpcResult;
use crate::fps::FpsTracker;
use crate::lights::{FrameBuffer, Wiring, clamp_channel};
use crate::logging::{debug, trace};
use crate::opc::{BROADCAST_CHANNEL, Transport};
use crate::patterns::Pattern;

pub struct FrameDriver<P: Pattern, T> {
    pattern: P,
    state: P::State,
    frame: FrameBuffer,
    pacing: PacingConfig,
    transport: T,
    channel: u8,
    wiring: Wiring,
    /// the frame in wire order
    wired: Vec<RGB8>,
    fps: FpsTracker,
}

impl<P: Pattern, T: Transport> FrameDriver<P, T> {
    pub fn new(pattern: P, frame: FrameBuffer, pacing: PacingConfig, transport: T) -> Self {
        Self {
            pattern,
            state: P::State::default(),
            wired: Vec::with_capacity(frame.pixel_count()),
            frame,
            pacing,
            transport,
            channel: BROADCAST_CHANNEL,
            wiring: Wiring::default(),
            fps: FpsTracker::new(),
        }
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_wiring(mut self, wiring: Wiring) -> Self {
        self.wiring = wiring;
        self
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn state(&self) -> &P::State {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Render, advance, and send one frame. Returns how long to sleep to stay on pace.
    ///
    /// The state is advanced before the frame goes out so that the transport never sees a frame that is out of step
    /// with the state. Errors from the transport are returned as is. There are no retries.
    pub fn tick(&mut self) -> OpcResult<Duration> {
        let start = Instant::now();

        self.render();

        self.pattern
            .advance(&mut self.state, self.pacing.frame_budget(), self.frame.height());

        match self.wiring {
            Wiring::RowMajor => self.transport.put_pixels(self.channel, self.frame.as_slice())?,
            Wiring::Zigzag => {
                self.frame.write_wired(self.wiring, &mut self.wired);
                self.transport.put_pixels(self.channel, &self.wired)?;
            }
        }

        self.fps.tick();

        let elapsed = start.elapsed();
        let sleep = self.pacing.remaining(elapsed);

        trace!("tick took {:?}. sleeping {:?}", elapsed, sleep);

        Ok(sleep)
    }

    fn render(&mut self) {
        for (row, col) in iproduct!(0..self.frame.height(), 0..self.frame.width()) {
            let [r, g, b] = self.pattern.pixel(row, col, &self.state);

            self.frame.set(
                row,
                col,
                RGB8::new(clamp_channel(r), clamp_channel(g), clamp_channel(b)),
            );
        }
    }

    /// Run exactly `n` paced frames.
    pub fn run_frames(&mut self, n: usize) -> OpcResult<()> {
        debug!("running {} frames at {} fps", n, self.pacing.frames_per_second());

        for _ in 0..n {
            let sleep = self.tick()?;
            thread::sleep(sleep);
        }

        Ok(())
    }

    /// Only returns if the transport fails.
    pub fn run_forever(&mut self) -> OpcResult<Infallible> {
        debug!("running forever at {} fps", self.pacing.frames_per_second());

        loop {
            let sleep = self.tick()?;
            thread::sleep(sleep);
        }
    }
}
