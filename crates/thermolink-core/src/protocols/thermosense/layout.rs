pub const UPLINK_PORT: u8 = 1;
pub const MESSAGE_FORMAT: u8 = 0x2A;

pub const FORMAT_OFFSET: usize = 0;
pub const FLAGS_OFFSET: usize = 1;
pub const FIELDS_OFFSET: usize = 2;

pub const FLAG_VBAT: u8 = 1 << 0;
pub const FLAG_VBUS: u8 = 1 << 1;
pub const FLAG_BOOT: u8 = 1 << 2;
pub const FLAG_TH: u8 = 1 << 3;
pub const FLAG_LUX: u8 = 1 << 4;
pub const FLAG_TEMP1: u8 = 1 << 5;
pub const FLAG_TEMP2: u8 = 1 << 6;
// bit 7 is reserved and never set by the firmware

pub const VOLTAGE_SCALE: f64 = 4096.0;
pub const TEMPERATURE_SCALE: f64 = 256.0;
pub const HUMIDITY_FULL_SCALE: f64 = 65535.0;
