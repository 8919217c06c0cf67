//! Characteristics of the light accessory
//!
//! Every characteristic keeps its current value in a critical-section cell.
//! Writes go through a [`WriteHandler`]: validated setters update the cached
//! value and the bridge field inside one critical section, identify only
//! fires its callback.

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

use crate::bridge::TargetState;
use crate::error::AccessError;
use crate::hap_type::HapType;
use crate::setter::Setter;
use crate::value::{Format, Permissions, Range, Value};

/// Characteristics known to the accessory, in topology order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CharacteristicId {
    // Accessory information service
    AccessoryName = 0,
    Manufacturer = 1,
    SerialNumber = 2,
    Model = 3,
    FirmwareRevision = 4,
    Identify = 5,
    // Lightbulb service
    On = 6,
    Brightness = 7,
    Hue = 8,
    Saturation = 9,
    LightName = 10,
}

impl CharacteristicId {
    /// Number of characteristics in the topology
    pub const COUNT: usize = 11;

    pub const ALL: [Self; Self::COUNT] = [
        Self::AccessoryName,
        Self::Manufacturer,
        Self::SerialNumber,
        Self::Model,
        Self::FirmwareRevision,
        Self::Identify,
        Self::On,
        Self::Brightness,
        Self::Hue,
        Self::Saturation,
        Self::LightName,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// HAP type of the characteristic
    pub const fn hap_type(self) -> HapType {
        match self {
            Self::AccessoryName | Self::LightName => HapType::NAME,
            Self::Manufacturer => HapType::MANUFACTURER,
            Self::SerialNumber => HapType::SERIAL_NUMBER,
            Self::Model => HapType::MODEL,
            Self::FirmwareRevision => HapType::FIRMWARE_REVISION,
            Self::Identify => HapType::IDENTIFY,
            Self::On => HapType::ON,
            Self::Brightness => HapType::BRIGHTNESS,
            Self::Hue => HapType::HUE,
            Self::Saturation => HapType::SATURATION,
        }
    }
}

/// What happens when the protocol layer writes a characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteHandler {
    /// Validate, cache and publish to the bridge
    Setter(Setter),
    /// Fire the identify callback, nothing is stored
    Identify,
}

/// A single characteristic
pub struct Characteristic {
    id: CharacteristicId,
    description: &'static str,
    format: Format,
    permissions: Permissions,
    range: Option<Range>,
    handler: Option<WriteHandler>,
    instance_id: u64,
    value: Mutex<Cell<Value>>,
}

impl Characteristic {
    /// Read-only string characteristic
    pub(crate) const fn read_only_string(
        id: CharacteristicId,
        description: &'static str,
        value: &'static str,
    ) -> Self {
        Self {
            id,
            description,
            format: Format::String,
            permissions: Permissions::PAIRED_READ,
            range: None,
            handler: None,
            instance_id: 0,
            value: Mutex::new(Cell::new(Value::String(value))),
        }
    }

    /// Light control backed by a setter
    pub(crate) const fn control(
        id: CharacteristicId,
        setter: Setter,
        description: &'static str,
        initial: Value,
    ) -> Self {
        Self {
            id,
            description,
            format: setter.format(),
            permissions: Permissions::CONTROL,
            range: setter.range(),
            handler: Some(WriteHandler::Setter(setter)),
            instance_id: 0,
            value: Mutex::new(Cell::new(initial)),
        }
    }

    /// Write-only identify trigger
    pub(crate) const fn identify() -> Self {
        Self {
            id: CharacteristicId::Identify,
            description: "Identify",
            format: Format::Bool,
            permissions: Permissions::PAIRED_WRITE,
            range: None,
            handler: Some(WriteHandler::Identify),
            instance_id: 0,
            value: Mutex::new(Cell::new(Value::Bool(false))),
        }
    }

    pub(crate) fn set_instance_id(&mut self, instance_id: u64) {
        self.instance_id = instance_id;
    }

    pub const fn id(&self) -> CharacteristicId {
        self.id
    }

    pub const fn hap_type(&self) -> HapType {
        self.id.hap_type()
    }

    /// Human-readable name
    pub const fn description(&self) -> &'static str {
        self.description
    }

    pub const fn format(&self) -> Format {
        self.format
    }

    pub const fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Advertised range of numeric characteristics
    pub const fn range(&self) -> Option<Range> {
        self.range
    }

    pub const fn handler(&self) -> Option<WriteHandler> {
        self.handler
    }

    /// HAP instance id, unique within the accessory
    pub const fn instance_id(&self) -> u64 {
        self.instance_id
    }

    /// Cached value, regardless of permissions
    pub fn value(&self) -> Value {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    /// Read on behalf of the protocol layer
    pub fn read(&self) -> Result<Value, AccessError> {
        if !self.permissions.is_readable() {
            return Err(AccessError::WriteOnly);
        }
        Ok(self.value())
    }

    /// Validate `raw` with `setter`, then store it in the cache and the
    /// bridge as one step.
    ///
    /// Returns the committed value.
    pub(crate) fn commit(
        &self,
        setter: Setter,
        raw: Value,
        bridge: &TargetState,
    ) -> Result<Value, AccessError> {
        let accepted = setter.accept(raw)?;
        let value = accepted.value();
        critical_section::with(|cs| {
            self.value.borrow(cs).set(value);
            accepted.publish(bridge);
        });
        Ok(value)
    }
}

impl fmt::Debug for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Characteristic")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("format", &self.format)
            .field("permissions", &self.permissions)
            .field("range", &self.range)
            .field("handler", &self.handler)
            .field("instance_id", &self.instance_id)
            .field("value", &self.value())
            .finish()
    }
}
