use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThermoSenseError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
