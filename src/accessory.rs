//! Services and the accessory that groups them

use heapless::Vec;

use crate::characteristic::CharacteristicId;
use crate::hap_type::HapType;

/// Maximum number of services in the accessory
pub const MAX_SERVICES: usize = 4;

/// Maximum number of characteristics in one service
pub const MAX_SERVICE_CHARACTERISTICS: usize = 8;

/// HAP accessory category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Category {
    Lightbulb = 5,
}

impl Category {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// A group of characteristics presented as one function
#[derive(Debug, Clone)]
pub struct Service {
    kind: HapType,
    instance_id: u64,
    primary: bool,
    characteristics: Vec<CharacteristicId, MAX_SERVICE_CHARACTERISTICS>,
}

impl Service {
    pub(crate) const fn new(kind: HapType, primary: bool) -> Self {
        Self {
            kind,
            instance_id: 0,
            primary,
            characteristics: Vec::new(),
        }
    }

    /// Append a characteristic
    ///
    /// Returns the id back if the service is full
    pub(crate) fn push(&mut self, id: CharacteristicId) -> Result<(), CharacteristicId> {
        self.characteristics.push(id)
    }

    pub(crate) fn set_instance_id(&mut self, instance_id: u64) {
        self.instance_id = instance_id;
    }

    pub const fn hap_type(&self) -> HapType {
        self.kind
    }

    pub const fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Characteristics in presentation order
    pub fn characteristics(&self) -> &[CharacteristicId] {
        &self.characteristics
    }

    pub fn contains(&self, id: CharacteristicId) -> bool {
        self.characteristics.contains(&id)
    }
}

/// The single accessory exposed by the firmware
#[derive(Debug, Clone)]
pub struct Accessory {
    id: u64,
    category: Category,
    services: Vec<Service, MAX_SERVICES>,
}

impl Accessory {
    pub(crate) const fn new(id: u64, category: Category) -> Self {
        Self {
            id,
            category,
            services: Vec::new(),
        }
    }

    /// Append a service
    ///
    /// Returns the service back if the accessory is full
    pub(crate) fn push(&mut self, service: Service) -> Result<(), Service> {
        self.services.push(service)
    }

    pub(crate) fn services_mut(&mut self) -> &mut [Service] {
        &mut self.services
    }

    /// Accessory id, `aid` in HAP
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    /// Services in presentation order
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// The service marked primary
    pub fn primary_service(&self) -> Option<&Service> {
        self.services.iter().find(|service| service.is_primary())
    }

    /// Service holding `id`
    pub fn service_of(&self, id: CharacteristicId) -> Option<&Service> {
        self.services.iter().find(|service| service.contains(id))
    }
}
