use serde::{Deserialize, Serialize};

/// Lifecycle stage of a raw action callback as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPhase {
    /// The action is enabled but no control has actuated it yet.
    Waiting,
    /// A control started actuating the action.
    Started,
    /// The action's interaction completed (or repeated while held).
    Performed,
    /// The control was released or the interaction was aborted.
    Canceled,
    /// The action is not currently enabled.
    Disabled,
}

impl InputPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Started => "started",
            Self::Performed => "performed",
            Self::Canceled => "canceled",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for InputPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input modality the player is currently using.
///
/// Recorded on explicit request only. Nothing in the action layer keys off it;
/// the host's binding layer may use it to swap binding groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    #[default]
    KeyboardMouse,
    Gamepad,
    Mobile,
}

impl std::fmt::Display for ControlScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::KeyboardMouse => "keyboard_mouse",
            Self::Gamepad => "gamepad",
            Self::Mobile => "mobile",
        };
        f.write_str(name)
    }
}
