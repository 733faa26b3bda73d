//! Format 0x2A sensor uplink decoding.
//!
//! The parser gates on the uplink port and format byte, then walks the
//! presence bitmap in ascending bit order; each set bit consumes its field
//! group's encoding. A truncated frame rejects the whole decode. Byte
//! offsets and scale constants live in `layout`, wire conventions in
//! `reader`; `encoder` mirrors the firmware's transmit path for fixtures
//! and round-trip checks.
//!
//! Version française (résumé):
//! Décodage des trames capteur au format 0x2A : porte port/format, puis
//! lecture des groupes de champs dans l'ordre croissant des bits du bitmap.
//! Une trame tronquée est rejetée entièrement. Les positions sont dans
//! `layout`, les conventions dans `reader`.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use encoder::FrameBuilder;
pub use error::ThermoSenseError;
pub use layout::{MESSAGE_FORMAT, UPLINK_PORT};
pub use parser::{FIELD_ORDER, FieldGroup, decode_uplink};
