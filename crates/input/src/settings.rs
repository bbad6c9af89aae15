//! Hub and reader settings, loaded from YAML.
//!
//! ```yaml
//! can_receive_input: true
//! invert_x: false
//! invert_y: true
//! analog_movement: false
//! control_scheme: gamepad
//! policies:
//!   jump: hold
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use crate::action::ButtonAction;
use crate::error::InputError;
use crate::phase::PhasePolicy;
use actionhub_common::ControlScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub can_receive_input: bool,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Informational flag for gameplay: movement comes from an analog stick.
    pub analog_movement: bool,
    pub control_scheme: ControlScheme,
    /// Per-button phase policy overrides.
    pub policies: BTreeMap<ButtonAction, PhasePolicy>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            can_receive_input: true,
            invert_x: false,
            invert_y: true,
            analog_movement: false,
            control_scheme: ControlScheme::KeyboardMouse,
            policies: BTreeMap::new(),
        }
    }
}

impl InputSettings {
    pub fn from_yaml_str(text: &str) -> Result<Self, InputError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn policy_for(&self, button: ButtonAction) -> PhasePolicy {
        PhasePolicy::for_button(&self.policies, button)
    }
}
