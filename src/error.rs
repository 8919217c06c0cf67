//! Error types

use crate::characteristic::CharacteristicId;
use crate::config::SetupCodeError;
use crate::hap_type::HapType;
use crate::value::Format;

/// Error returned to the protocol layer for a rejected read or write.
///
/// A rejected access never changes any state.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("characteristic is read-only")]
    ReadOnly,
    #[error("characteristic is write-only")]
    WriteOnly,
    #[error("value does not fit format {expected}")]
    InvalidFormat { expected: Format },
}

/// Malformed accessory topology, detected once at startup
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    #[error("identity string {0:?} is empty")]
    EmptyIdentity(CharacteristicId),
    #[error("string {id:?} is {len} bytes, limit is {max}")]
    StringTooLong {
        id: CharacteristicId,
        len: usize,
        max: usize,
    },
    #[error("service {service} holds characteristic type {kind} twice")]
    DuplicateType { service: HapType, kind: HapType },
    #[error("characteristic {0:?} is not part of any service")]
    Unplaced(CharacteristicId),
    #[error("expected exactly one primary service, found {0}")]
    PrimaryServiceCount(usize),
    #[error("topology exceeds fixed capacity")]
    Capacity,
    #[error("invalid setup code: {0}")]
    SetupCode(#[from] SetupCodeError),
}
