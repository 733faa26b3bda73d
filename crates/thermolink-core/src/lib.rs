//! ThermoLink core library for decoding environmental sensor uplinks.
//!
//! This crate implements the decode pipeline used by the CLI: frame
//! sources feed the analysis layer, which drives the format 0x2A decoder
//! (layout/reader/parser) and aggregates records into a deterministic
//! report. Decoding is byte-oriented and side-effect free; all I/O is
//! isolated in `source` modules. Wire conventions are captured in readers
//! so parsers stay minimal and consistent with the device firmware.
//!
//! Invariants:
//! - A frame decodes to a full record or fails; no partial records.
//! - "Not mine" (wrong port or format byte) is a routing signal, never an
//!   error.
//! - Report outputs are deterministic and stable across runs.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur de décodage : sources -> analyse ->
//! décodeur de trames (layout/reader/parser) -> rapport déterministe.
//! Une trame est décodée entièrement ou rejetée ; « pas à nous » (port ou
//! format inattendu) est un signal de routage, pas une erreur.
//!
//! # Examples
//! ```
//! use thermolink_core::{UPLINK_PORT, decode_uplink};
//!
//! // format 0x2A, battery voltage only (bit 0), raw 0x1000 -> 1.0 V
//! let frame = [0x2A, 0x01, 0x10, 0x00];
//! let record = decode_uplink(&frame, UPLINK_PORT)?.expect("frame is ours");
//! assert_eq!(record.battery_voltage, Some(1.0));
//! # Ok::<(), thermolink_core::ThermoSenseError>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod comfort;
mod protocols;
mod source;

pub use analysis::{AnalysisError, decode_hex_file, decode_source};
pub use protocols::thermosense::{
    FIELD_ORDER, FieldGroup, FrameBuilder, MESSAGE_FORMAT, ThermoSenseError, UPLINK_PORT,
    decode_uplink,
};
pub use source::{FrameEvent, FrameSource, HexFileSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no generation time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decoded measurements from one uplink frame.
///
/// Fields mirror the presence bitmap: a group absent from the frame is
/// `None` and omitted from JSON output entirely. The derived dewpoint
/// accompanies every temperature/humidity group; the heat index is only
/// attached when the NWS formula is applicable.
///
/// # Examples
/// ```
/// use thermolink_core::SensorRecord;
///
/// let record = SensorRecord::default();
/// assert!(record.battery_voltage.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Battery voltage in volts (bit 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_voltage: Option<f64>,
    /// Bus voltage in volts (bit 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_voltage: Option<f64>,
    /// Boot counter, least significant byte (bit 2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_count: Option<u8>,
    /// Dry-bulb temperature in degrees C (bit 3).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Relative humidity in percent (bit 3).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    /// Dewpoint in degrees C, derived from temperature and humidity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dewpoint_c: Option<f64>,
    /// NWS heat index in degrees C; absent outside the validated range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_index_c: Option<f64>,
    /// Ambient light level in lux (bit 4).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lux: Option<f64>,
    /// Probe-one temperature in degrees C (bit 5).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_one_temperature_c: Option<f64>,
    /// Probe-two temperature in degrees C (bit 6).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_two_temperature_c: Option<f64>,
}

/// Aggregated decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use thermolink_core::make_stub_report;
///
/// let report = make_stub_report("frames.hex", 123);
/// assert_eq!(report.report_version, thermolink_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the wire format version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,
    /// Input log metadata.
    pub input: InputInfo,
    /// Total frames read from the source, decodable or not.
    pub frames_total: u64,
    /// Successfully decoded frames in input order.
    pub records: Vec<DecodedFrame>,
    /// Frames routed away (wrong port or format byte), in input order.
    pub skipped: Vec<SkippedFrame>,
    /// Malformed frames with diagnostics, in input order.
    pub faults: Vec<FrameFault>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use thermolink_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "thermolink".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "thermolink");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "thermolink").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input log metadata embedded in reports.
///
/// # Examples
/// ```
/// use thermolink_core::InputInfo;
///
/// let input = InputInfo {
///     path: "frames.hex".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// One decoded frame with its 1-based source line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedFrame {
    /// Line the frame was read from.
    pub line: u64,
    /// Decoded measurements.
    pub record: SensorRecord,
}

/// Routing info for a frame that is not ours.
///
/// # Examples
/// ```
/// use thermolink_core::SkippedFrame;
///
/// let skipped = SkippedFrame {
///     line: 4,
///     port: 2,
///     format: Some(0x1B),
/// };
/// assert_eq!(skipped.format, Some(0x1B));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFrame {
    /// Line the frame was read from.
    pub line: u64,
    /// Port the decode was attempted on.
    pub port: u8,
    /// Format byte actually seen, absent for empty frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<u8>,
}

/// Diagnostic for a malformed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameFault {
    /// Line the frame was read from.
    pub line: u64,
    /// Human-readable diagnostic (port, format byte, truncation detail).
    pub message: String,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use thermolink_core::make_stub_report;
///
/// let report = make_stub_report("frames.hex", 123);
/// assert!(report.records.is_empty());
/// assert_eq!(report.frames_total, 0);
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "thermolink".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        frames_total: 0,
        records: vec![],
        skipped: vec![],
        faults: vec![],
    }
}
