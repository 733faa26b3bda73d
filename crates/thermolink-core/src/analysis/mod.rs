use std::path::Path;

use thiserror::Error;

use crate::protocols::thermosense::decode_uplink;
use crate::source::{FrameEvent, FrameSource, HexFileSource, SourceError};
use crate::{DecodedFrame, FrameFault, Report, SkippedFrame, make_stub_report};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode every frame in a hex-encoded frame log.
pub fn decode_hex_file(path: &Path, port: u8) -> Result<Report, AnalysisError> {
    let source = HexFileSource::open(path)?;
    decode_source(path, port, source)
}

/// Decode every frame from `source`, aggregating per-frame outcomes.
///
/// A malformed frame is recorded as a fault and never aborts the batch;
/// only source-level failures (I/O, unparseable hex) do. Frames that are
/// not ours (wrong port or format byte) are routed into `skipped` with the
/// format byte actually seen.
pub fn decode_source<S: FrameSource>(
    path: &Path,
    port: u8,
    mut source: S,
) -> Result<Report, AnalysisError> {
    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());

    while let Some(FrameEvent { line, data }) = source.next_frame()? {
        report.frames_total += 1;
        match decode_uplink(&data, port) {
            Ok(Some(record)) => report.records.push(DecodedFrame { line, record }),
            Ok(None) => report.skipped.push(SkippedFrame {
                line,
                port,
                format: data.first().copied(),
            }),
            Err(err) => report.faults.push(FrameFault {
                line,
                message: match data.first() {
                    Some(format) => format!("port {port} format 0x{format:02x}: {err}"),
                    None => format!("port {port}: {err}"),
                },
            }),
        }
    }

    Ok(report)
}
