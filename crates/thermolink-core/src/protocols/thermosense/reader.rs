use super::error::ThermoSenseError;
use super::layout;
use crate::protocols::common::sflt24;

/// Sequential cursor over an uplink payload.
///
/// The offset only moves forward; a read past the end fails with
/// `TooShort` (offsets reported relative to the whole payload) and leaves
/// no way to observe a partial value.
pub struct FrameReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> FrameReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], ThermoSenseError> {
        let end = self.offset + width;
        let bytes = self
            .payload
            .get(self.offset..end)
            .ok_or(ThermoSenseError::TooShort {
                needed: end,
                actual: self.payload.len(),
            })?;
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, ThermoSenseError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16, ThermoSenseError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Two's-complement reinterpretation of [`Self::read_u16_be`].
    pub fn read_i16_be(&mut self) -> Result<i16, ThermoSenseError> {
        Ok(self.read_u16_be()? as i16)
    }

    pub fn read_u24_be(&mut self) -> Result<u32, ThermoSenseError> {
        let bytes = self.take(3)?;
        Ok(u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]))
    }

    /// Signed fixed-point volts, 12 fractional bits.
    pub fn read_voltage(&mut self) -> Result<f64, ThermoSenseError> {
        Ok(f64::from(self.read_i16_be()?) / layout::VOLTAGE_SCALE)
    }

    /// Signed fixed-point degrees C, 8 fractional bits.
    pub fn read_temperature(&mut self) -> Result<f64, ThermoSenseError> {
        Ok(f64::from(self.read_i16_be()?) / layout::TEMPERATURE_SCALE)
    }

    /// Relative humidity in percent, full scale at 0xFFFF.
    pub fn read_humidity(&mut self) -> Result<f64, ThermoSenseError> {
        Ok(f64::from(self.read_u16_be()?) * 100.0 / layout::HUMIDITY_FULL_SCALE)
    }

    /// Compact float lux value, unscaled.
    pub fn read_lux(&mut self) -> Result<f64, ThermoSenseError> {
        Ok(sflt24::decode(self.read_u24_be()?).to_f64())
    }
}
