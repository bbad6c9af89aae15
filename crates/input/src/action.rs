use crate::phase::PhasePolicy;
use serde::{Deserialize, Serialize};

/// Shape of the value an action carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Continuous 2D axis (sticks, mouse delta).
    Axis2,
    /// Continuous 1D axis (scroll wheel).
    Axis1,
    /// Momentary or held button.
    Button,
}

/// A named semantic input, decoupled from the control that produced it.
///
/// Gameplay consumes actions, never raw device events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Move,
    /// Look rotation from the mouse. Events from other devices are dropped.
    Rotate,
    /// Look rotation from a gamepad stick. Events from other devices are dropped.
    RotateController,
    ScrollWheel,
    Jump,
    Run,
    Reload,
    Attack,
    Crouch,
    Block,
    Interact,
    Escape,
    OpenUi,
    Emote,
    CommandKey,
    NumOne,
}

impl ActionId {
    pub const ALL: [ActionId; 16] = [
        Self::Move,
        Self::Rotate,
        Self::RotateController,
        Self::ScrollWheel,
        Self::Jump,
        Self::Run,
        Self::Reload,
        Self::Attack,
        Self::Crouch,
        Self::Block,
        Self::Interact,
        Self::Escape,
        Self::OpenUi,
        Self::Emote,
        Self::CommandKey,
        Self::NumOne,
    ];

    pub fn kind(self) -> ActionKind {
        match self {
            Self::Move | Self::Rotate | Self::RotateController => ActionKind::Axis2,
            Self::ScrollWheel => ActionKind::Axis1,
            _ => ActionKind::Button,
        }
    }

    /// The button this action maps to, if it is a button action.
    pub fn button(self) -> Option<ButtonAction> {
        let button = match self {
            Self::Jump => ButtonAction::Jump,
            Self::Run => ButtonAction::Run,
            Self::Reload => ButtonAction::Reload,
            Self::Attack => ButtonAction::Attack,
            Self::Crouch => ButtonAction::Crouch,
            Self::Block => ButtonAction::Block,
            Self::Interact => ButtonAction::Interact,
            Self::Escape => ButtonAction::Escape,
            Self::OpenUi => ButtonAction::OpenUi,
            Self::Emote => ButtonAction::Emote,
            Self::CommandKey => ButtonAction::CommandKey,
            Self::NumOne => ButtonAction::NumOne,
            Self::Move | Self::Rotate | Self::RotateController | Self::ScrollWheel => {
                return None;
            }
        };
        Some(button)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::RotateController => "rotate_controller",
            Self::ScrollWheel => "scroll_wheel",
            _ => self.button().map(ButtonAction::name).unwrap_or("unknown"),
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The boolean subset of [`ActionId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Jump,
    Run,
    Reload,
    Attack,
    Crouch,
    Block,
    Interact,
    Escape,
    OpenUi,
    Emote,
    CommandKey,
    NumOne,
}

impl ButtonAction {
    pub const ALL: [ButtonAction; 12] = [
        Self::Jump,
        Self::Run,
        Self::Reload,
        Self::Attack,
        Self::Crouch,
        Self::Block,
        Self::Interact,
        Self::Escape,
        Self::OpenUi,
        Self::Emote,
        Self::CommandKey,
        Self::NumOne,
    ];

    /// Sustained actions must not lose a held press between polls.
    pub fn is_sustained(self) -> bool {
        matches!(self, Self::Attack | Self::Block)
    }

    /// Hold for sustained actions, edge for momentary ones.
    pub fn default_policy(self) -> PhasePolicy {
        if self.is_sustained() {
            PhasePolicy::Hold
        } else {
            PhasePolicy::Edge
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Run => "run",
            Self::Reload => "reload",
            Self::Attack => "attack",
            Self::Crouch => "crouch",
            Self::Block => "block",
            Self::Interact => "interact",
            Self::Escape => "escape",
            Self::OpenUi => "open_ui",
            Self::Emote => "emote",
            Self::CommandKey => "command_key",
            Self::NumOne => "num_one",
        }
    }
}

impl From<ButtonAction> for ActionId {
    fn from(button: ButtonAction) -> Self {
        match button {
            ButtonAction::Jump => Self::Jump,
            ButtonAction::Run => Self::Run,
            ButtonAction::Reload => Self::Reload,
            ButtonAction::Attack => Self::Attack,
            ButtonAction::Crouch => Self::Crouch,
            ButtonAction::Block => Self::Block,
            ButtonAction::Interact => Self::Interact,
            ButtonAction::Escape => Self::Escape,
            ButtonAction::OpenUi => Self::OpenUi,
            ButtonAction::Emote => Self::Emote,
            ButtonAction::CommandKey => Self::CommandKey,
            ButtonAction::NumOne => Self::NumOne,
        }
    }
}

impl std::fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
