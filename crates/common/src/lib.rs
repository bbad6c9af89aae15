//! Shared vocabulary between the host input system and the action layer.
//!
//! # Invariants
//! - Nothing here holds state across callbacks; every value is recomputed per event.

pub mod device;
pub mod types;

pub use device::{DeviceClass, DeviceConnectivity, DeviceDescriptor};
pub use types::{ControlScheme, InputPhase};
