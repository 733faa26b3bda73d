use super::layout;
use super::parser::{FIELD_ORDER, FieldGroup};
use crate::protocols::common::sflt24;

/// Builds format 0x2A frames, mirroring the firmware's transmit path.
///
/// Fields may be set in any order; [`FrameBuilder::build`] emits the format
/// byte, the presence bitmap, then the present groups in the canonical
/// ascending flag-bit wire order. Scaled values saturate at the limits of
/// their fixed-point encodings.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    battery_voltage: Option<f64>,
    bus_voltage: Option<f64>,
    boot_count: Option<u8>,
    temperature_humidity: Option<(f64, f64)>,
    lux: Option<f64>,
    probe_one_temperature: Option<f64>,
    probe_two_temperature: Option<f64>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn battery_voltage(mut self, volts: f64) -> Self {
        self.battery_voltage = Some(volts);
        self
    }

    pub fn bus_voltage(mut self, volts: f64) -> Self {
        self.bus_voltage = Some(volts);
        self
    }

    pub fn boot_count(mut self, count: u8) -> Self {
        self.boot_count = Some(count);
        self
    }

    pub fn temperature_humidity(mut self, temperature_c: f64, humidity_pct: f64) -> Self {
        self.temperature_humidity = Some((temperature_c, humidity_pct));
        self
    }

    pub fn lux(mut self, lux: f64) -> Self {
        self.lux = Some(lux);
        self
    }

    pub fn probe_one_temperature(mut self, temperature_c: f64) -> Self {
        self.probe_one_temperature = Some(temperature_c);
        self
    }

    pub fn probe_two_temperature(mut self, temperature_c: f64) -> Self {
        self.probe_two_temperature = Some(temperature_c);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut frame = vec![0u8; layout::FIELDS_OFFSET];
        frame[layout::FORMAT_OFFSET] = layout::MESSAGE_FORMAT;
        for group in FIELD_ORDER {
            match group {
                FieldGroup::BatteryVoltage => {
                    if let Some(volts) = self.battery_voltage {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        put_i16(&mut frame, scaled_i16(volts, layout::VOLTAGE_SCALE));
                    }
                }
                FieldGroup::BusVoltage => {
                    if let Some(volts) = self.bus_voltage {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        put_i16(&mut frame, scaled_i16(volts, layout::VOLTAGE_SCALE));
                    }
                }
                FieldGroup::BootCount => {
                    if let Some(count) = self.boot_count {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        frame.push(count);
                    }
                }
                FieldGroup::TemperatureHumidity => {
                    if let Some((temperature, humidity)) = self.temperature_humidity {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        put_i16(
                            &mut frame,
                            scaled_i16(temperature, layout::TEMPERATURE_SCALE),
                        );
                        put_u16(
                            &mut frame,
                            scaled_u16(humidity / 100.0, layout::HUMIDITY_FULL_SCALE),
                        );
                    }
                }
                FieldGroup::Light => {
                    if let Some(lux) = self.lux {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        put_u24(&mut frame, sflt24::encode(lux));
                    }
                }
                FieldGroup::ProbeOneTemperature => {
                    if let Some(temperature) = self.probe_one_temperature {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        put_i16(
                            &mut frame,
                            scaled_i16(temperature, layout::TEMPERATURE_SCALE),
                        );
                    }
                }
                FieldGroup::ProbeTwoTemperature => {
                    if let Some(temperature) = self.probe_two_temperature {
                        frame[layout::FLAGS_OFFSET] |= group.flag();
                        put_i16(
                            &mut frame,
                            scaled_i16(temperature, layout::TEMPERATURE_SCALE),
                        );
                    }
                }
            }
        }
        frame
    }
}

fn put_i16(frame: &mut Vec<u8>, raw: i16) {
    frame.extend_from_slice(&raw.to_be_bytes());
}

fn put_u16(frame: &mut Vec<u8>, raw: u16) {
    frame.extend_from_slice(&raw.to_be_bytes());
}

fn put_u24(frame: &mut Vec<u8>, raw: u32) {
    frame.extend_from_slice(&raw.to_be_bytes()[1..]);
}

fn scaled_i16(value: f64, scale: f64) -> i16 {
    (value * scale).round().clamp(-32768.0, 32767.0) as i16
}

fn scaled_u16(value: f64, scale: f64) -> u16 {
    (value * scale).round().clamp(0.0, 65535.0) as u16
}

#[cfg(test)]
mod tests {
    use super::FrameBuilder;
    use crate::protocols::thermosense::layout;

    #[test]
    fn build_empty_frame() {
        let frame = FrameBuilder::new().build();
        assert_eq!(frame, vec![layout::MESSAGE_FORMAT, 0x00]);
    }

    #[test]
    fn build_emits_canonical_order() {
        // set out of order; wire order must still be vbat, boot, lux
        let frame = FrameBuilder::new()
            .lux(1.0)
            .boot_count(7)
            .battery_voltage(1.0)
            .build();
        assert_eq!(
            frame,
            vec![
                layout::MESSAGE_FORMAT,
                layout::FLAG_VBAT | layout::FLAG_BOOT | layout::FLAG_LUX,
                0x10,
                0x00,
                0x07,
                0x3F,
                0x00,
                0x00,
            ]
        );
    }

    #[test]
    fn build_saturates_voltage() {
        let frame = FrameBuilder::new().battery_voltage(10.0).build();
        // 10 V is past the 12-bit fixed-point range; clamps to i16::MAX
        assert_eq!(&frame[layout::FIELDS_OFFSET..], &[0x7F, 0xFF]);
    }

    #[test]
    fn build_negative_temperature() {
        let frame = FrameBuilder::new().probe_two_temperature(-10.0).build();
        assert_eq!(frame[layout::FLAGS_OFFSET], layout::FLAG_TEMP2);
        assert_eq!(&frame[layout::FIELDS_OFFSET..], &[0xF6, 0x00]);
    }

    #[test]
    fn build_full_scale_humidity() {
        let frame = FrameBuilder::new().temperature_humidity(25.0, 100.0).build();
        assert_eq!(&frame[layout::FIELDS_OFFSET..], &[0x19, 0x00, 0xFF, 0xFF]);
    }
}
