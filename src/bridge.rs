//! Target state bridge
//!
//! Latest accepted light state, shared between the write handlers and the
//! render loop. Every field is a lock-free atomic: setters store with
//! `Release`, readers load with `Acquire`, so a reader never blocks a writer
//! and always sees a fully written value.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::color::{Hsv, Rgb, hsv2rgb};

/// Default power state
pub const DEFAULT_POWER: bool = false;
/// Default brightness, percent
pub const DEFAULT_BRIGHTNESS: f32 = 100.0;
/// Default hue, degrees
pub const DEFAULT_HUE: f32 = 0.0;
/// Default saturation, percent
pub const DEFAULT_SATURATION: f32 = 0.0;

/// `f32` stored as its bit pattern in an `AtomicU32`
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Shared target state read by the render loop.
///
/// Each field has exactly one writer, the setter of its characteristic.
/// Ordering across fields is not guaranteed.
#[derive(Debug)]
pub struct TargetState {
    power: AtomicBool,
    brightness: AtomicF32,
    hue: AtomicF32,
    saturation: AtomicF32,
}

impl TargetState {
    /// Create a bridge holding the startup defaults
    pub const fn new() -> Self {
        Self {
            power: AtomicBool::new(DEFAULT_POWER),
            brightness: AtomicF32::new(DEFAULT_BRIGHTNESS),
            hue: AtomicF32::new(DEFAULT_HUE),
            saturation: AtomicF32::new(DEFAULT_SATURATION),
        }
    }

    pub fn read_power(&self) -> bool {
        self.power.load(Ordering::Acquire)
    }

    /// Brightness in percent, `0..=100`
    pub fn read_brightness(&self) -> f32 {
        self.brightness.load()
    }

    /// Hue in degrees, `0..=360`
    pub fn read_hue(&self) -> f32 {
        self.hue.load()
    }

    /// Saturation in percent, `0..=100`
    pub fn read_saturation(&self) -> f32 {
        self.saturation.load()
    }

    /// Read all four fields.
    ///
    /// Fields are loaded one by one, so a snapshot taken while two
    /// characteristics are being written may mix old and new values.
    pub fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            power: self.read_power(),
            brightness: self.read_brightness(),
            hue: self.read_hue(),
            saturation: self.read_saturation(),
        }
    }

    pub(crate) fn store_power(&self, power: bool) {
        self.power.store(power, Ordering::Release);
    }

    pub(crate) fn store_brightness(&self, brightness: f32) {
        self.brightness.store(brightness);
    }

    pub(crate) fn store_hue(&self, hue: f32) {
        self.hue.store(hue);
    }

    pub(crate) fn store_saturation(&self, saturation: f32) {
        self.saturation.store(saturation);
    }
}

impl Default for TargetState {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain copy of the target state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub power: bool,
    /// Percent, `0..=100`
    pub brightness: f32,
    /// Degrees, `0..=360`
    pub hue: f32,
    /// Percent, `0..=100`
    pub saturation: f32,
}

impl Default for TargetSnapshot {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
            brightness: DEFAULT_BRIGHTNESS,
            hue: DEFAULT_HUE,
            saturation: DEFAULT_SATURATION,
        }
    }
}

impl TargetSnapshot {
    /// Output level for the strip (0-255), zero while powered off
    pub fn level(&self) -> u8 {
        if !self.power {
            return 0;
        }
        scale_to_u8(self.brightness, 100.0)
    }

    /// Colour at full value, with hue and saturation mapped to 8 bits.
    ///
    /// Hue 360 wraps to 0, which is the same point on the colour wheel.
    pub fn to_hsv(&self) -> Hsv {
        let hue = if self.hue >= 360.0 { 0.0 } else { self.hue };
        Hsv {
            hue: scale_to_u8(hue, 360.0),
            sat: scale_to_u8(self.saturation, 100.0),
            val: 255,
        }
    }

    /// Colour at full value. Brightness and power are left to
    /// [`level`](Self::level) so the renderer can fade them on its own.
    pub fn to_rgb(&self) -> Rgb {
        hsv2rgb(self.to_hsv())
    }
}

/// Map `0..=full` onto `0..=255`, rounding to the nearest step
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_to_u8(value: f32, full: f32) -> u8 {
    let scaled = libm::roundf(value / full * 255.0);
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_to_u8() {
        assert_eq!(scale_to_u8(0.0, 100.0), 0);
        assert_eq!(scale_to_u8(50.0, 100.0), 128);
        assert_eq!(scale_to_u8(100.0, 100.0), 255);
        assert_eq!(scale_to_u8(180.0, 360.0), 128);
        assert_eq!(scale_to_u8(-3.0, 100.0), 0);
        assert_eq!(scale_to_u8(400.0, 360.0), 255);
    }

    #[test]
    fn test_atomic_f32_keeps_bits() {
        let value = AtomicF32::new(12.5);
        assert_eq!(value.load(), 12.5);
        value.store(-0.25);
        assert_eq!(value.load(), -0.25);
    }
}
