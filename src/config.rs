//! Accessory configuration
//!
//! Identity strings and the pairing setup code are fixed at build time and
//! handed to the registry once.

use core::fmt;

use heapless::String;

/// Length of a formatted setup code, `NNN-NN-NNN`
pub const SETUP_CODE_LEN: usize = 10;

/// Codes HAP refuses besides the all-same-digit ones
const TRIVIAL_SEQUENCES: [[u8; 8]; 2] = [[1, 2, 3, 4, 5, 6, 7, 8], [8, 7, 6, 5, 4, 3, 2, 1]];

/// Static accessory configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryConfig {
    /// Accessory id, `aid` in HAP
    pub accessory_id: u64,
    /// Name of the accessory information service
    pub display_name: &'static str,
    /// Name of the lightbulb service
    pub light_name: &'static str,
    pub manufacturer: &'static str,
    pub serial_number: &'static str,
    pub model: &'static str,
    /// `<major>.<minor>.<revision>`
    pub firmware_revision: &'static str,
    /// Pairing setup code, `NNN-NN-NNN`
    pub setup_code: &'static str,
}

impl AccessoryConfig {
    pub const DEFAULT: Self = Self {
        accessory_id: 1,
        display_name: "RGB",
        light_name: "HomeKit LED Strip",
        manufacturer: "RGB",
        serial_number: "HKLED-001",
        model: "WS2812",
        firmware_revision: "1.0.0",
        setup_code: "111-22-333",
    };

    #[must_use]
    pub const fn with_display_name(mut self, name: &'static str) -> Self {
        self.display_name = name;
        self
    }

    #[must_use]
    pub const fn with_light_name(mut self, name: &'static str) -> Self {
        self.light_name = name;
        self
    }

    #[must_use]
    pub const fn with_manufacturer(mut self, manufacturer: &'static str) -> Self {
        self.manufacturer = manufacturer;
        self
    }

    #[must_use]
    pub const fn with_serial_number(mut self, serial_number: &'static str) -> Self {
        self.serial_number = serial_number;
        self
    }

    #[must_use]
    pub const fn with_model(mut self, model: &'static str) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub const fn with_firmware_revision(mut self, revision: &'static str) -> Self {
        self.firmware_revision = revision;
        self
    }

    #[must_use]
    pub const fn with_setup_code(mut self, setup_code: &'static str) -> Self {
        self.setup_code = setup_code;
        self
    }
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reason a setup code was refused
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupCodeError {
    #[error("setup code must be 10 characters, NNN-NN-NNN")]
    Length,
    #[error("setup code must be formatted NNN-NN-NNN")]
    Separator,
    #[error("setup code must contain only digits")]
    Digit,
    #[error("setup code is too easy to guess")]
    Trivial,
}

/// Validated pairing setup code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupCode {
    digits: [u8; 8],
    text: String<SETUP_CODE_LEN>,
}

impl SetupCode {
    /// Parse a code formatted as `NNN-NN-NNN`
    pub fn parse(code: &str) -> Result<Self, SetupCodeError> {
        let bytes = code.as_bytes();
        if bytes.len() != SETUP_CODE_LEN {
            return Err(SetupCodeError::Length);
        }
        if bytes[3] != b'-' || bytes[6] != b'-' {
            return Err(SetupCodeError::Separator);
        }

        let mut digits = [0u8; 8];
        let positions = bytes
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != 3 && index != 6);
        for (slot, (_, &byte)) in digits.iter_mut().zip(positions) {
            if !byte.is_ascii_digit() {
                return Err(SetupCodeError::Digit);
            }
            *slot = byte - b'0';
        }

        if digits.iter().all(|&digit| digit == digits[0]) || TRIVIAL_SEQUENCES.contains(&digits) {
            return Err(SetupCodeError::Trivial);
        }

        let mut text = String::new();
        text.push_str(code).map_err(|()| SetupCodeError::Length)?;
        Ok(Self { digits, text })
    }

    /// Code as entered on the controller, `NNN-NN-NNN`
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// The eight digits, separators removed
    pub const fn digits(&self) -> [u8; 8] {
        self.digits
    }
}

impl fmt::Display for SetupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
