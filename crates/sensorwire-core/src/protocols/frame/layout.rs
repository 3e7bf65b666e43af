pub const FRAME_LEN: usize = 9;

pub const ADDRESS: u8 = 0x2C;
pub const FUNCTION: u8 = 0xE4;
pub const SYNC_MARKER: [u8; 2] = [ADDRESS, FUNCTION];

pub const TVOC_RANGE: std::ops::Range<usize> = 2..4;
pub const CH2O_RANGE: std::ops::Range<usize> = 4..6;
pub const CO2_RANGE: std::ops::Range<usize> = 6..8;

pub const CHECKSUM_SPAN: std::ops::Range<usize> = 0..8;
pub const CHECKSUM_OFFSET: usize = 8;

/// Raw field units per mg/m³.
pub const MILLI_SCALE: f32 = 1000.0;
