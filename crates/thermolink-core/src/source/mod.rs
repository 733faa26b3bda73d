mod hex;

pub use hex::HexFileSource;

use thiserror::Error;

/// One raw uplink frame read from a log, with its 1-based source line.
#[derive(Debug, Clone)]
pub struct FrameEvent {
    pub line: u64,
    pub data: Vec<u8>,
}

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad hex on line {line}: {message}")]
    Hex { line: u64, message: String },
}
