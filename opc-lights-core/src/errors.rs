use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
    #[error("frame rate must be a positive number of frames per second, got {0}")]
    InvalidFrameRate(f32),
    #[error("brightness must be between 0.0 and 1.0, got {0}")]
    InvalidBrightness(f32),
    #[error("frame dimensions must be non-zero and their product must fit in a usize, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// the OPC header only has 16 bits for the payload length
    #[error("payload of {0} bytes does not fit in one OPC message")]
    PayloadTooLarge(usize),
}

pub type OpcResult<T> = Result<T, OpcError>;
