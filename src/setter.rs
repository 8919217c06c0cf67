//! Validated setters for the light controls
//!
//! Out-of-range numbers are clamped to the nearest bound, never rejected.

use crate::bridge::TargetState;
use crate::error::AccessError;
use crate::value::{Format, Range, Value};

/// Brightness range, percent
pub const BRIGHTNESS_RANGE: Range = Range::new(0.0, 100.0, 1.0);
/// Hue range, degrees
pub const HUE_RANGE: Range = Range::new(0.0, 360.0, 1.0);
/// Saturation range, percent
pub const SATURATION_RANGE: Range = Range::new(0.0, 100.0, 1.0);

/// Write handler of a light control, one per bridge field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setter {
    /// On, bool, no clamp
    Power,
    /// Brightness, int clamped to `0..=100`
    Brightness,
    /// Hue, float clamped to `0..=360`
    Hue,
    /// Saturation, float clamped to `0..=100`
    Saturation,
}

impl Setter {
    pub const fn format(self) -> Format {
        match self {
            Self::Power => Format::Bool,
            Self::Brightness => Format::Int,
            Self::Hue | Self::Saturation => Format::Float,
        }
    }

    pub const fn range(self) -> Option<Range> {
        match self {
            Self::Power => None,
            Self::Brightness => Some(BRIGHTNESS_RANGE),
            Self::Hue => Some(HUE_RANGE),
            Self::Saturation => Some(SATURATION_RANGE),
        }
    }

    /// Convert a raw value into the clamped, type-correct value to store
    pub fn accept(self, raw: Value) -> Result<Accepted, AccessError> {
        let invalid = AccessError::InvalidFormat {
            expected: self.format(),
        };
        let accepted = match self {
            Self::Power => Accepted::Power(raw.as_bool().ok_or(invalid)?),
            Self::Brightness => {
                let brightness = raw.as_int().ok_or(invalid)?;
                Accepted::Brightness(BRIGHTNESS_RANGE.clamp_i32(brightness))
            }
            Self::Hue => Accepted::Hue(HUE_RANGE.clamp_f32(raw.as_float().ok_or(invalid)?)),
            Self::Saturation => {
                Accepted::Saturation(SATURATION_RANGE.clamp_f32(raw.as_float().ok_or(invalid)?))
            }
        };
        Ok(accepted)
    }
}

/// A validated light control value, tagged with the bridge field it targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accepted {
    Power(bool),
    /// Percent, already clamped
    Brightness(i32),
    /// Degrees, already clamped
    Hue(f32),
    /// Percent, already clamped
    Saturation(f32),
}

impl Accepted {
    /// Cached form of the value
    pub const fn value(self) -> Value {
        match self {
            Self::Power(power) => Value::Bool(power),
            Self::Brightness(brightness) => Value::Int(brightness),
            Self::Hue(hue) => Value::Float(hue),
            Self::Saturation(saturation) => Value::Float(saturation),
        }
    }

    /// Store the value in its bridge field
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn publish(self, bridge: &TargetState) {
        match self {
            Self::Power(power) => bridge.store_power(power),
            Self::Brightness(brightness) => bridge.store_brightness(brightness as f32),
            Self::Hue(hue) => bridge.store_hue(hue),
            Self::Saturation(saturation) => bridge.store_saturation(saturation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_tags_the_target_field() {
        assert_eq!(Setter::Power.accept(Value::Int(1)), Ok(Accepted::Power(true)));
        assert_eq!(
            Setter::Brightness.accept(Value::Float(150.4)),
            Ok(Accepted::Brightness(100))
        );
        assert_eq!(Setter::Hue.accept(Value::Int(-3)), Ok(Accepted::Hue(0.0)));
        assert_eq!(
            Setter::Saturation.accept(Value::Float(40.0)),
            Ok(Accepted::Saturation(40.0))
        );
        assert_eq!(
            Setter::Brightness.accept(Value::Bool(true)),
            Err(AccessError::InvalidFormat {
                expected: Format::Int
            })
        );
    }

    #[test]
    fn test_publish_writes_only_its_field() {
        let bridge = TargetState::new();
        Accepted::Hue(240.0).publish(&bridge);
        Accepted::Brightness(25).publish(&bridge);

        assert_eq!(bridge.read_hue(), 240.0);
        assert_eq!(bridge.read_brightness(), 25.0);
        assert_eq!(bridge.read_saturation(), 0.0);
        assert!(!bridge.read_power());
        assert_eq!(Accepted::Brightness(25).value(), Value::Int(25));
    }
}
