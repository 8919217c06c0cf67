//! HAP type identifiers for characteristics and services
//!
//! Apple-defined types are short 32-bit codes placed on the Apple base UUID
//! `0000XXXX-0000-1000-8000-0026BB765291`.

use core::fmt;

/// Apple base UUID, big-endian, with the short code bytes zeroed
const APPLE_BASE_UUID: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0x26, 0xBB, 0x76, 0x52, 0x91,
];

/// A HAP short type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HapType(pub u32);

impl HapType {
    // Characteristics
    pub const BRIGHTNESS: Self = Self(0x08);
    pub const FIRMWARE_REVISION: Self = Self(0x52);
    pub const HUE: Self = Self(0x13);
    pub const IDENTIFY: Self = Self(0x14);
    pub const MANUFACTURER: Self = Self(0x20);
    pub const MODEL: Self = Self(0x21);
    pub const NAME: Self = Self(0x23);
    pub const ON: Self = Self(0x25);
    pub const SATURATION: Self = Self(0x2F);
    pub const SERIAL_NUMBER: Self = Self(0x30);

    // Services
    pub const ACCESSORY_INFORMATION: Self = Self(0x3E);
    pub const LIGHTBULB: Self = Self(0x43);

    /// Full 128-bit UUID in big-endian byte order
    pub const fn uuid(self) -> [u8; 16] {
        let mut uuid = APPLE_BASE_UUID;
        let code = self.0.to_be_bytes();
        uuid[0] = code[0];
        uuid[1] = code[1];
        uuid[2] = code[2];
        uuid[3] = code[3];
        uuid
    }
}

impl fmt::Display for HapType {
    /// Short form used in HAP JSON, e.g. `25` for On
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}
