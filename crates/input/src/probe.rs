use crate::error::InputError;
use actionhub_common::DeviceConnectivity;

/// Best-effort inspection of connected pointer and controller hardware.
pub trait DeviceProbe {
    fn connectivity(&self) -> Result<DeviceConnectivity, InputError>;
}

/// Probe that always reports the same hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProbe(pub DeviceConnectivity);

impl StaticProbe {
    pub fn new(mouse: bool, gamepads: usize) -> Self {
        Self(DeviceConnectivity { mouse, gamepads })
    }
}

impl DeviceProbe for StaticProbe {
    fn connectivity(&self) -> Result<DeviceConnectivity, InputError> {
        Ok(self.0)
    }
}
