#![no_std]

//! HomeKit light strip accessory.
//!
//! The [`Registry`] holds the fixed accessory topology the HAP server exposes
//! and routes its writes through validated setters into the shared
//! [`TargetState`], which the LED render loop polls.

pub mod accessory;
pub mod bridge;
pub mod characteristic;
pub mod color;
pub mod config;
pub mod error;
pub mod hap_type;
pub mod identify;
pub mod registry;
pub mod setter;
pub mod value;

pub use accessory::{Accessory, Category, Service};
pub use bridge::{TargetSnapshot, TargetState};
pub use characteristic::{Characteristic, CharacteristicId, WriteHandler};
pub use config::{AccessoryConfig, SetupCode, SetupCodeError};
pub use error::{AccessError, TopologyError};
pub use hap_type::HapType;
pub use identify::{IdentifyBlink, IdentifyHandler, IdentifyRequest};
pub use registry::Registry;
pub use setter::{Accepted, Setter};
pub use value::{Format, Permissions, Range, Value};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};
