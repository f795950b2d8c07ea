//! Open Pixel Control client.
//!
//! Every message is a 4 byte header (channel, command, big-endian payload length) followed by the payload.
//! Pixels are sent as packed RGB bytes. Settings go through the system exclusive command.
use std::fmt::Debug;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use smart_leds::RGB8;

use crate::errors::{OpcError, OpcResult};
use crate::logging::{debug, info, trace};

/// channel 0 goes to every strip
pub const BROADCAST_CHANNEL: u8 = 0;

pub const SET_PIXELS: u8 = 0x00;
pub const SYSTEM_EXCLUSIVE: u8 = 0xFF;

pub const HEADER_LEN: usize = 4;

/// the length field is a u16
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// sysex payloads start with this system id and then a command id
pub const SYSEX_SYSTEM_ID: u16 = 0x0001;
pub const SYSEX_FIRMWARE_CONFIG: u16 = 0x0002;
pub const SYSEX_SET_BRIGHTNESS: u16 = 0x0003;

/// bit 0 of the firmware config byte
pub const FIRMWARE_CONFIG_NO_DITHERING: u8 = 0x01;

/// The things a frame driver or settings updater needs from the LED server.
pub trait Transport {
    fn put_pixels(&mut self, channel: u8, pixels: &[RGB8]) -> OpcResult<()>;

    /// 0.0 is off and 1.0 is full brightness
    fn set_brightness(&mut self, brightness: f32) -> OpcResult<()>;

    fn set_dithering(&mut self, enabled: bool) -> OpcResult<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn put_pixels(&mut self, channel: u8, pixels: &[RGB8]) -> OpcResult<()> {
        (**self).put_pixels(channel, pixels)
    }

    fn set_brightness(&mut self, brightness: f32) -> OpcResult<()> {
        (**self).set_brightness(brightness)
    }

    fn set_dithering(&mut self, enabled: bool) -> OpcResult<()> {
        (**self).set_dithering(enabled)
    }
}

pub struct OpcClient<W> {
    writer: W,
    /// reused for every message so that a frame is one write
    buf: Vec<u8>,
}

impl OpcClient<TcpStream> {
    pub fn connect(addr: impl ToSocketAddrs + Debug) -> OpcResult<Self> {
        debug!("connecting to {:?}", addr);

        let stream = TcpStream::connect(&addr)?;

        // frames are small and we want them out now
        stream.set_nodelay(true)?;

        info!("connected to OPC server at {}", stream.peer_addr()?);

        Ok(Self::new(stream))
    }
}

impl<W: Write> OpcClient<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Build one message in the scratch buffer and write it out. `payload` appends the payload bytes.
    fn send(&mut self, channel: u8, command: u8, payload: impl FnOnce(&mut Vec<u8>)) -> OpcResult<()> {
        self.buf.clear();
        self.buf.extend_from_slice(&[channel, command, 0, 0]);

        payload(&mut self.buf);

        let payload_len = self.buf.len() - HEADER_LEN;

        let len = u16::try_from(payload_len).map_err(|_| OpcError::PayloadTooLarge(payload_len))?;

        self.buf[2..HEADER_LEN].copy_from_slice(&len.to_be_bytes());

        self.writer.write_all(&self.buf)?;
        self.writer.flush()?;

        trace!(
            "sent command {:#04x} on channel {} with {} bytes",
            command, channel, payload_len
        );

        Ok(())
    }

    fn send_sysex(&mut self, command: u16, data: &[u8]) -> OpcResult<()> {
        self.send(BROADCAST_CHANNEL, SYSTEM_EXCLUSIVE, |buf| {
            buf.extend_from_slice(&SYSEX_SYSTEM_ID.to_be_bytes());
            buf.extend_from_slice(&command.to_be_bytes());
            buf.extend_from_slice(data);
        })
    }
}

impl<W: Write> Transport for OpcClient<W> {
    fn put_pixels(&mut self, channel: u8, pixels: &[RGB8]) -> OpcResult<()> {
        self.send(channel, SET_PIXELS, |buf| {
            buf.reserve(pixels.len() * 3);
            for p in pixels {
                buf.extend_from_slice(&[p.r, p.g, p.b]);
            }
        })
    }

    fn set_brightness(&mut self, brightness: f32) -> OpcResult<()> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(OpcError::InvalidBrightness(brightness));
        }

        info!("setting brightness to {}", brightness);

        self.send_sysex(SYSEX_SET_BRIGHTNESS, &brightness.to_be_bytes())
    }

    fn set_dithering(&mut self, enabled: bool) -> OpcResult<()> {
        info!("setting dithering to {}", enabled);

        let flags = if enabled {
            0
        } else {
            FIRMWARE_CONFIG_NO_DITHERING
        };

        self.send_sysex(SYSEX_FIRMWARE_CONFIG, &[flags])
    }
}

/// One message as it came off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcMessage {
    pub channel: u8,
    pub command: u8,
    pub payload: Vec<u8>,
}

impl OpcMessage {
    /// The payload of a set pixels message as colors. A trailing partial pixel is ignored.
    pub fn pixels(&self) -> Vec<RGB8> {
        self.payload
            .chunks_exact(3)
            .map(|x| RGB8::new(x[0], x[1], x[2]))
            .collect()
    }

    /// (system id, command id, data) of a system exclusive message
    pub fn sysex(&self) -> Option<(u16, u16, &[u8])> {
        if self.command != SYSTEM_EXCLUSIVE || self.payload.len() < 4 {
            return None;
        }

        let system_id = u16::from_be_bytes([self.payload[0], self.payload[1]]);
        let command_id = u16::from_be_bytes([self.payload[2], self.payload[3]]);

        Some((system_id, command_id, &self.payload[4..]))
    }
}

/// Read one whole message. Returns `None` if the stream ended before the first byte of a new header.
///
/// A stream that ends partway through a header or a payload is an error.
pub fn read_message<R: Read>(reader: &mut R) -> OpcResult<Option<OpcMessage>> {
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;

    while filled < HEADER_LEN {
        match reader.read(&mut header[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("stream ended after {filled} of {HEADER_LEN} header bytes"),
                )
                .into());
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }

    let len = u16::from_be_bytes([header[2], header[3]]) as usize;

    let mut payload = vec![0; len];
    reader.read_exact(&mut payload)?;

    Ok(Some(OpcMessage {
        channel: header[0],
        command: header[1],
        payload,
    }))
}
