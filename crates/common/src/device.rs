use serde::{Deserialize, Serialize};

/// The device a raw callback originated from, as described by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceDescriptor {
    pub name: String,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Classify this device by its name.
    pub fn class(&self) -> DeviceClass {
        DeviceClass::classify(&self.name)
    }
}

/// Coarse hardware family of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mouse,
    Gamepad,
    Other,
}

impl DeviceClass {
    /// Mouse matches the name `Mouse` exactly; gamepads match any name containing
    /// `Gamepad` (host names such as `XInputGamepad` or `DualShock4GamepadHID`).
    pub fn classify(name: &str) -> Self {
        if name == "Mouse" {
            Self::Mouse
        } else if name.contains("Gamepad") {
            Self::Gamepad
        } else {
            Self::Other
        }
    }
}

/// Pointer and controller hardware seen at the last probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConnectivity {
    pub mouse: bool,
    pub gamepads: usize,
}

impl DeviceConnectivity {
    pub fn gamepad_connected(&self) -> bool {
        self.gamepads > 0
    }
}

impl Default for DeviceConnectivity {
    /// Assume a desktop: mouse present, no controller.
    fn default() -> Self {
        Self {
            mouse: true,
            gamepads: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_requires_exact_name() {
        assert_eq!(DeviceClass::classify("Mouse"), DeviceClass::Mouse);
        assert_eq!(DeviceClass::classify("mouse"), DeviceClass::Other);
        assert_eq!(DeviceClass::classify("VirtualMouse"), DeviceClass::Other);
    }

    #[test]
    fn gamepad_matches_substring() {
        assert_eq!(DeviceClass::classify("Gamepad"), DeviceClass::Gamepad);
        assert_eq!(DeviceClass::classify("XInputGamepadWindows"), DeviceClass::Gamepad);
        assert_eq!(DeviceClass::classify("Keyboard"), DeviceClass::Other);
    }

    #[test]
    fn descriptor_class() {
        assert_eq!(DeviceDescriptor::new("Mouse").class(), DeviceClass::Mouse);
        assert_eq!(
            DeviceDescriptor::new("DualShock4GamepadHID").class(),
            DeviceClass::Gamepad
        );
    }

    #[test]
    fn connectivity_defaults() {
        let c = DeviceConnectivity::default();
        assert!(c.mouse);
        assert!(!c.gamepad_connected());
    }
}
