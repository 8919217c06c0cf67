//! Characteristic values, formats, permissions and numeric ranges.

use core::fmt;

use bitflags::bitflags;

/// Value format of a characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bool,
    Int,
    Float,
    String,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A characteristic value as exchanged with the protocol layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(&'static str),
}

impl Value {
    /// Format of the value
    pub const fn format(&self) -> Format {
        match self {
            Self::Bool(_) => Format::Bool,
            Self::Int(_) => Format::Int,
            Self::Float(_) => Format::Float,
            Self::String(_) => Format::String,
        }
    }

    /// Read the value as a boolean.
    ///
    /// Numbers are accepted as `0` / `1`, the way HAP encodes bools in JSON.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(value) => Some(value),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Read the value as an integer, rounding floats to the nearest one
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(value) => Some(value),
            Self::Float(value) => Some(libm::roundf(value) as i32),
            Self::Bool(_) | Self::String(_) => None,
        }
    }

    /// Read the value as a float
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(value) => Some(value),
            Self::Int(value) => Some(value as f32),
            Self::Bool(_) | Self::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

bitflags! {
    /// Characteristic permissions
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u8 {
        /// Readable by paired controllers
        const PAIRED_READ = 0x01;
        /// Writable by paired controllers
        const PAIRED_WRITE = 0x02;
        /// Supports event notifications
        const NOTIFY = 0x04;
    }
}

impl Permissions {
    /// Read, write and notify, as used by the light controls
    pub const CONTROL: Self = Self::PAIRED_READ
        .union(Self::PAIRED_WRITE)
        .union(Self::NOTIFY);

    pub const fn is_readable(self) -> bool {
        self.contains(Self::PAIRED_READ)
    }

    pub const fn is_writable(self) -> bool {
        self.contains(Self::PAIRED_WRITE)
    }
}

/// Closed numeric range with a step, as advertised to controllers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp a float into the range.
    ///
    /// NaN saturates to `min` so the range holds for every input.
    pub fn clamp_f32(&self, value: f32) -> f32 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Clamp an integer into the range
    #[allow(clippy::cast_possible_truncation)]
    pub fn clamp_i32(&self, value: i32) -> i32 {
        let min = libm::ceilf(self.min) as i32;
        let max = libm::floorf(self.max) as i32;
        value.clamp(min, max)
    }
}
