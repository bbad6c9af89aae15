//! Replay scripts: a device setup and an ordered list of steps driven through a
//! fresh reader and hub.
//!
//! ```yaml
//! devices:
//!   mouse: true
//!   gamepads: 1
//! steps:
//!   - op: callback
//!     action: jump
//!     phase: started
//!     value: true
//!     device: Keyboard
//!   - op: invert_y
//!     value: false
//! ```

use actionhub_common::{ControlScheme, DeviceConnectivity};
use actionhub_input::{
    ActionMap, HubSnapshot, InputHub, InputReader, InputSettings, RawCallback, StaticProbe,
};
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub devices: DeviceConnectivity,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Callback(RawCallback),
    Enable,
    Disable,
    CanReceiveInput { value: bool },
    InvertX { value: bool },
    InvertY { value: bool },
    ControlScheme { scheme: ControlScheme },
}

impl Script {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

/// A step the reader refused.
#[derive(Debug, Clone)]
pub struct StepError {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub snapshot: HubSnapshot,
    pub steps_run: usize,
    pub errors: Vec<StepError>,
}

/// Run `script` against a new reader/hub pair. The hub is enabled before the
/// first step, the way a host enables it when the owning object activates.
pub fn replay(script: &Script, settings: &InputSettings) -> ReplayOutcome {
    let reader = Rc::new(InputReader::from_settings(
        Box::new(ActionMap::new()),
        settings,
    ));
    let mut hub = InputHub::with_reader(
        Rc::clone(&reader),
        Box::new(StaticProbe(script.devices)),
        settings,
    );
    hub.enable();

    let mut errors = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Callback(callback) => {
                if let Err(e) = reader.dispatch(callback.clone()) {
                    warn!(index, "step rejected: {e}");
                    errors.push(StepError {
                        index,
                        message: e.to_string(),
                    });
                }
            }
            Step::Enable => hub.enable(),
            Step::Disable => hub.disable(),
            Step::CanReceiveInput { value } => hub.set_can_receive_input(*value),
            Step::InvertX { value } => hub.set_invert_x(*value),
            Step::InvertY { value } => hub.set_invert_y(*value),
            Step::ControlScheme { scheme } => hub.change_control_scheme(*scheme),
        }
    }
    info!(
        steps = script.steps.len(),
        errors = errors.len(),
        "replay finished"
    );

    ReplayOutcome {
        snapshot: hub.snapshot(),
        steps_run: script.steps.len(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionhub_input::ButtonAction;
    use glam::Vec2;

    const SCRIPT: &str = r#"
devices:
  mouse: true
  gamepads: 1
steps:
  - op: callback
    action: jump
    phase: started
    value: true
    device: Keyboard
  - op: callback
    action: move
    phase: performed
    value: [0.5, -0.3]
    device: Keyboard
  - op: callback
    action: rotate
    phase: performed
    value: [2.0, 1.0]
    device: Mouse
  - op: callback
    action: rotate
    phase: performed
    value: [9.0, 9.0]
    device: XInputGamepad
  - op: callback
    action: jump
    phase: performed
    device: Keyboard
  - op: callback
    action: attack
    phase: performed
    device: Mouse
  - op: control_scheme
    scheme: gamepad
"#;

    #[test]
    fn replays_mixed_script() {
        let script = Script::from_yaml_str(SCRIPT).unwrap();
        let outcome = replay(&script, &InputSettings::default());
        let snap = outcome.snapshot;

        assert_eq!(outcome.steps_run, 7);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 4);
        assert!(outcome.errors[0].message.contains("performed"));

        assert_eq!(snap.move_input, Vec2::new(0.5, -0.3));
        // invert_y defaults on; the gamepad-tagged rotate is dropped.
        assert_eq!(snap.rotate_input, Vec2::new(2.0, -1.0));
        assert!(snap.buttons[&ButtonAction::Jump]);
        assert!(snap.buttons[&ButtonAction::Attack]);
        assert!(snap.gamepad_connected);
        assert_eq!(snap.control_scheme, ControlScheme::Gamepad);
    }

    #[test]
    fn disable_step_freezes_state() {
        let script = Script::from_yaml_str(
            r#"
steps:
  - op: callback
    action: crouch
    phase: started
    device: Keyboard
  - op: disable
  - op: callback
    action: crouch
    phase: canceled
    device: Keyboard
"#,
        )
        .unwrap();
        let outcome = replay(&script, &InputSettings::default());
        assert!(outcome.errors.is_empty());
        assert!(!outcome.snapshot.enabled);
        assert!(outcome.snapshot.buttons[&ButtonAction::Crouch]);
    }

    #[test]
    fn policy_override_from_settings() {
        let settings = InputSettings::from_yaml_str("policies:\n  jump: hold\n").unwrap();
        let script = Script::from_yaml_str(
            r#"
steps:
  - op: callback
    action: jump
    phase: performed
    device: Keyboard
"#,
        )
        .unwrap();
        let outcome = replay(&script, &settings);
        assert!(outcome.errors.is_empty());
        assert!(outcome.snapshot.buttons[&ButtonAction::Jump]);
    }
}
