use super::error::ThermoSenseError;
use super::layout;
use super::reader::FrameReader;
use crate::SensorRecord;
use crate::comfort;

/// One optional field group, keyed by its presence-bitmap flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    BatteryVoltage,
    BusVoltage,
    BootCount,
    TemperatureHumidity,
    Light,
    ProbeOneTemperature,
    ProbeTwoTemperature,
}

/// Canonical wire order: ascending flag-bit order. The payload after the
/// bitmap is the concatenation of the present groups in exactly this order.
pub const FIELD_ORDER: [FieldGroup; 7] = [
    FieldGroup::BatteryVoltage,
    FieldGroup::BusVoltage,
    FieldGroup::BootCount,
    FieldGroup::TemperatureHumidity,
    FieldGroup::Light,
    FieldGroup::ProbeOneTemperature,
    FieldGroup::ProbeTwoTemperature,
];

impl FieldGroup {
    pub const fn flag(self) -> u8 {
        match self {
            FieldGroup::BatteryVoltage => layout::FLAG_VBAT,
            FieldGroup::BusVoltage => layout::FLAG_VBUS,
            FieldGroup::BootCount => layout::FLAG_BOOT,
            FieldGroup::TemperatureHumidity => layout::FLAG_TH,
            FieldGroup::Light => layout::FLAG_LUX,
            FieldGroup::ProbeOneTemperature => layout::FLAG_TEMP1,
            FieldGroup::ProbeTwoTemperature => layout::FLAG_TEMP2,
        }
    }

    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            FieldGroup::BatteryVoltage | FieldGroup::BusVoltage => 2,
            FieldGroup::BootCount => 1,
            FieldGroup::TemperatureHumidity => 4,
            FieldGroup::Light => 3,
            FieldGroup::ProbeOneTemperature | FieldGroup::ProbeTwoTemperature => 2,
        }
    }
}

/// Decode one uplink payload.
///
/// Returns `Ok(None)` when the frame is not this decoder's: wrong port or
/// wrong format byte. A truncated frame fails with `TooShort`; no partial
/// record is ever produced.
pub fn decode_uplink(
    payload: &[u8],
    port: u8,
) -> Result<Option<SensorRecord>, ThermoSenseError> {
    if port != layout::UPLINK_PORT {
        return Ok(None);
    }

    let mut reader = FrameReader::new(payload);
    let format = match reader.read_u8() {
        Ok(format) => format,
        // no format byte at all: nothing to claim
        Err(_) => return Ok(None),
    };
    if format != layout::MESSAGE_FORMAT {
        return Ok(None);
    }

    let flags = reader.read_u8()?;

    let mut record = SensorRecord::default();
    for group in FIELD_ORDER {
        if flags & group.flag() == 0 {
            continue;
        }
        match group {
            FieldGroup::BatteryVoltage => {
                record.battery_voltage = Some(reader.read_voltage()?);
            }
            FieldGroup::BusVoltage => {
                record.bus_voltage = Some(reader.read_voltage()?);
            }
            FieldGroup::BootCount => {
                record.boot_count = Some(reader.read_u8()?);
            }
            FieldGroup::TemperatureHumidity => {
                let temperature = reader.read_temperature()?;
                let humidity = reader.read_humidity()?;
                record.temperature_c = Some(temperature);
                record.humidity_pct = Some(humidity);
                record.dewpoint_c = Some(comfort::dewpoint(temperature, humidity));
                record.heat_index_c =
                    comfort::heat_index_celsius(temperature * 1.8 + 32.0, humidity);
            }
            FieldGroup::Light => {
                record.lux = Some(reader.read_lux()?);
            }
            FieldGroup::ProbeOneTemperature => {
                record.probe_one_temperature_c = Some(reader.read_temperature()?);
            }
            FieldGroup::ProbeTwoTemperature => {
                record.probe_two_temperature_c = Some(reader.read_temperature()?);
            }
        }
    }

    Ok(Some(record))
}
