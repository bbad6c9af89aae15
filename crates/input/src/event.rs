use crate::action::ActionId;
use crate::error::InputError;
use actionhub_common::{DeviceClass, DeviceDescriptor, InputPhase};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Typed value read from a raw callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Button(bool),
    Axis1(f32),
    Axis2(Vec2),
}

impl Default for RawValue {
    fn default() -> Self {
        Self::Button(false)
    }
}

impl RawValue {
    fn shape(&self) -> &'static str {
        match self {
            Self::Button(_) => "boolean",
            Self::Axis1(_) => "float",
            Self::Axis2(_) => "vector2",
        }
    }

    pub(crate) fn read_vec2(&self, action: ActionId) -> Result<Vec2, InputError> {
        match *self {
            Self::Axis2(v) => Ok(v),
            _ => Err(InputError::ValueMismatch {
                action,
                expected: "vector2",
                found: self.shape(),
            }),
        }
    }

    /// Scroll wheels report either a scalar or a 2D delta; only the vertical part counts.
    pub(crate) fn read_scroll(&self, action: ActionId) -> Result<f32, InputError> {
        match *self {
            Self::Axis1(v) => Ok(v),
            Self::Axis2(v) => Ok(v.y),
            Self::Button(_) => Err(InputError::ValueMismatch {
                action,
                expected: "float",
                found: self.shape(),
            }),
        }
    }
}

/// A callback delivered by the host input system for one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCallback {
    pub action: ActionId,
    pub phase: InputPhase,
    #[serde(default)]
    pub value: RawValue,
    pub device: DeviceDescriptor,
}

impl RawCallback {
    pub fn new(
        action: ActionId,
        phase: InputPhase,
        value: RawValue,
        device: impl Into<String>,
    ) -> Self {
        Self {
            action,
            phase,
            value,
            device: DeviceDescriptor::new(device),
        }
    }

    /// A performed axis callback, the usual shape for continuous controls.
    pub fn axis2(action: ActionId, value: Vec2, device: impl Into<String>) -> Self {
        Self::new(action, InputPhase::Performed, RawValue::Axis2(value), device)
    }

    /// A button callback; the value follows the phase.
    pub fn button(action: ActionId, phase: InputPhase, device: impl Into<String>) -> Self {
        let held = matches!(phase, InputPhase::Started | InputPhase::Performed);
        Self::new(action, phase, RawValue::Button(held), device)
    }
}

/// Normalized payload published on an action channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalValue {
    Axis2(Vec2),
    Axis1(f32),
    Button(bool),
}

/// What the reader publishes to subscribers for a single accepted callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSignal {
    pub action: ActionId,
    pub value: SignalValue,
    /// Class of the device that produced the callback.
    pub device: DeviceClass,
}
