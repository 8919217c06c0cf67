//! Characteristic registry
//!
//! Holds the fixed accessory topology and routes protocol-layer reads and
//! writes to the characteristics. The topology is built once; afterwards only
//! characteristic values change.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::accessory::{Accessory, Category, Service};
use crate::bridge::TargetState;
use crate::characteristic::{Characteristic, CharacteristicId, WriteHandler};
use crate::config::{AccessoryConfig, SetupCode};
use crate::error::{AccessError, TopologyError};
use crate::hap_type::HapType;
use crate::identify::IdentifyHandler;
use crate::setter::{BRIGHTNESS_RANGE, Setter};
use crate::value::Value;

/// Longest string a characteristic may hold, in bytes
pub const MAX_STRING_LEN: usize = 64;

/// Characteristics of the accessory information service, in order
const INFORMATION_CHARACTERISTICS: [CharacteristicId; 6] = [
    CharacteristicId::AccessoryName,
    CharacteristicId::Manufacturer,
    CharacteristicId::SerialNumber,
    CharacteristicId::Model,
    CharacteristicId::FirmwareRevision,
    CharacteristicId::Identify,
];

/// Characteristics of the lightbulb service, in order
const LIGHTBULB_CHARACTERISTICS: [CharacteristicId; 5] = [
    CharacteristicId::On,
    CharacteristicId::Brightness,
    CharacteristicId::Hue,
    CharacteristicId::Saturation,
    CharacteristicId::LightName,
];

/// Registry of the light accessory.
///
/// Writes to light controls are published to the shared [`TargetState`];
/// identify writes fire the [`IdentifyHandler`].
pub struct Registry<'a, I: IdentifyHandler> {
    bridge: &'a TargetState,
    identify: &'a I,
    setup_code: SetupCode,
    accessory: Accessory,
    characteristics: [Characteristic; CharacteristicId::COUNT],
}

impl<'a, I: IdentifyHandler> Registry<'a, I> {
    /// Build the accessory topology.
    ///
    /// # Panics
    ///
    /// Panics if the configuration yields a malformed topology. The accessory
    /// cannot start in that case.
    pub fn build(config: &AccessoryConfig, bridge: &'a TargetState, identify: &'a I) -> Self {
        match Self::try_build(config, bridge, identify) {
            Ok(registry) => registry,
            Err(error) => panic!("malformed accessory topology: {error}"),
        }
    }

    /// Build the accessory topology, reporting malformed data as an error
    pub fn try_build(
        config: &AccessoryConfig,
        bridge: &'a TargetState,
        identify: &'a I,
    ) -> Result<Self, TopologyError> {
        let setup_code = SetupCode::parse(config.setup_code)?;

        let mut accessory = Accessory::new(config.accessory_id, Category::Lightbulb);
        let information = service(
            HapType::ACCESSORY_INFORMATION,
            false,
            &INFORMATION_CHARACTERISTICS,
        )?;
        let lightbulb = service(HapType::LIGHTBULB, true, &LIGHTBULB_CHARACTERISTICS)?;
        accessory.push(information).map_err(|_| TopologyError::Capacity)?;
        accessory.push(lightbulb).map_err(|_| TopologyError::Capacity)?;

        let mut registry = Self {
            bridge,
            identify,
            setup_code,
            accessory,
            characteristics: characteristics(config, bridge),
        };
        registry.assign_instance_ids();
        registry.validate()?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[Registry.build] accessory {} with {} services, {} characteristics",
            registry.accessory.id(),
            registry.accessory.services().len(),
            registry.characteristics.len()
        );

        Ok(registry)
    }

    /// Characteristic by id
    pub fn get(&self, id: CharacteristicId) -> &Characteristic {
        &self.characteristics[id.index()]
    }

    /// Cached value of a readable characteristic
    pub fn read(&self, id: CharacteristicId) -> Result<Value, AccessError> {
        self.get(id).read()
    }

    /// Write a raw value from the protocol layer.
    ///
    /// Light controls clamp and publish the value before returning. Identify
    /// fires the callback. Everything else is read-only and rejects the write
    /// without touching any state.
    pub fn write(&self, id: CharacteristicId, raw: Value) -> Result<(), AccessError> {
        let characteristic = self.get(id);
        if !characteristic.permissions().is_writable() {
            #[cfg(feature = "esp32-log")]
            println!("[Registry.write] rejected write to read-only {:?}", id);
            return Err(AccessError::ReadOnly);
        }

        match characteristic.handler() {
            Some(WriteHandler::Setter(setter)) => {
                let _value = characteristic.commit(setter, raw, self.bridge)?;
                #[cfg(feature = "esp32-log")]
                println!("[Registry.write] {:?} = {:?} (raw {:?})", id, _value, raw);
                Ok(())
            }
            Some(WriteHandler::Identify) => {
                self.identify();
                Ok(())
            }
            None => Err(AccessError::ReadOnly),
        }
    }

    /// Trigger the identify callback once
    pub fn identify(&self) {
        #[cfg(feature = "esp32-log")]
        println!("[Registry.identify] identify requested");
        self.identify.identify();
    }

    /// Characteristic with the given HAP instance id
    pub fn lookup(&self, instance_id: u64) -> Option<CharacteristicId> {
        self.characteristics
            .iter()
            .find(|characteristic| characteristic.instance_id() == instance_id)
            .map(Characteristic::id)
    }

    /// Characteristics of a service, in presentation order
    pub fn service_characteristics<'s>(
        &'s self,
        service: &'s Service,
    ) -> impl Iterator<Item = &'s Characteristic> + 's {
        service.characteristics().iter().map(|&id| self.get(id))
    }

    /// All characteristics, indexed by [`CharacteristicId::index`]
    pub fn characteristics(&self) -> &[Characteristic] {
        &self.characteristics
    }

    pub const fn accessory(&self) -> &Accessory {
        &self.accessory
    }

    /// Setup code handed to the pairing server
    pub const fn setup_code(&self) -> &SetupCode {
        &self.setup_code
    }

    /// The bridge this registry publishes to
    pub const fn bridge(&self) -> &'a TargetState {
        self.bridge
    }

    /// Number services and their characteristics from 1, in order
    fn assign_instance_ids(&mut self) {
        let mut instance_id = 1;
        for service in self.accessory.services_mut() {
            service.set_instance_id(instance_id);
            instance_id += 1;
            for &id in service.characteristics() {
                self.characteristics[id.index()].set_instance_id(instance_id);
                instance_id += 1;
            }
        }
    }

    fn validate(&self) -> Result<(), TopologyError> {
        for characteristic in &self.characteristics {
            let id = characteristic.id();
            if self.accessory.service_of(id).is_none() {
                return Err(TopologyError::Unplaced(id));
            }
            if let Some(text) = characteristic.value().as_str() {
                if text.is_empty() {
                    return Err(TopologyError::EmptyIdentity(id));
                }
                if text.len() > MAX_STRING_LEN {
                    return Err(TopologyError::StringTooLong {
                        id,
                        len: text.len(),
                        max: MAX_STRING_LEN,
                    });
                }
            }
        }

        for service in self.accessory.services() {
            let ids = service.characteristics();
            for (position, id) in ids.iter().enumerate() {
                let kind = id.hap_type();
                if ids[position + 1..].iter().any(|other| other.hap_type() == kind) {
                    return Err(TopologyError::DuplicateType {
                        service: service.hap_type(),
                        kind,
                    });
                }
            }
        }

        let primary = self
            .accessory
            .services()
            .iter()
            .filter(|service| service.is_primary())
            .count();
        if primary != 1 {
            return Err(TopologyError::PrimaryServiceCount(primary));
        }

        Ok(())
    }
}

/// Create a service holding `ids` in order
fn service(
    kind: HapType,
    primary: bool,
    ids: &[CharacteristicId],
) -> Result<Service, TopologyError> {
    let mut service = Service::new(kind, primary);
    for &id in ids {
        service.push(id).map_err(|_| TopologyError::Capacity)?;
    }
    Ok(service)
}

/// Create every characteristic, light controls seeded from the bridge
fn characteristics(
    config: &AccessoryConfig,
    bridge: &TargetState,
) -> [Characteristic; CharacteristicId::COUNT] {
    let target = bridge.snapshot();
    CharacteristicId::ALL.map(|id| match id {
        CharacteristicId::AccessoryName => {
            Characteristic::read_only_string(id, "Name", config.display_name)
        }
        CharacteristicId::Manufacturer => {
            Characteristic::read_only_string(id, "Manufacturer", config.manufacturer)
        }
        CharacteristicId::SerialNumber => {
            Characteristic::read_only_string(id, "Serial Number", config.serial_number)
        }
        CharacteristicId::Model => Characteristic::read_only_string(id, "Model", config.model),
        CharacteristicId::FirmwareRevision => {
            Characteristic::read_only_string(id, "Firmware Revision", config.firmware_revision)
        }
        CharacteristicId::Identify => Characteristic::identify(),
        CharacteristicId::On => {
            Characteristic::control(id, Setter::Power, "On", Value::Bool(target.power))
        }
        CharacteristicId::Brightness => Characteristic::control(
            id,
            Setter::Brightness,
            "Brightness",
            Value::Int(brightness_percent(target.brightness)),
        ),
        CharacteristicId::Hue => {
            Characteristic::control(id, Setter::Hue, "Hue", Value::Float(target.hue))
        }
        CharacteristicId::Saturation => Characteristic::control(
            id,
            Setter::Saturation,
            "Saturation",
            Value::Float(target.saturation),
        ),
        CharacteristicId::LightName => {
            Characteristic::read_only_string(id, "Name", config.light_name)
        }
    })
}

/// Whole-percent brightness for the integer characteristic
#[allow(clippy::cast_possible_truncation)]
fn brightness_percent(brightness: f32) -> i32 {
    BRIGHTNESS_RANGE.clamp_i32(libm::roundf(brightness) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_percent_rounds_and_clamps() {
        assert_eq!(brightness_percent(100.0), 100);
        assert_eq!(brightness_percent(42.6), 43);
        assert_eq!(brightness_percent(180.0), 100);
        assert_eq!(brightness_percent(-1.0), 0);
    }

    #[test]
    fn test_service_keeps_order() {
        let lightbulb = service(HapType::LIGHTBULB, true, &LIGHTBULB_CHARACTERISTICS).unwrap();
        assert_eq!(lightbulb.characteristics(), &LIGHTBULB_CHARACTERISTICS);
        assert!(lightbulb.is_primary());
    }
}
