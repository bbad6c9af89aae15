//! Phase-to-boolean translation for button actions.

use crate::action::ButtonAction;
use actionhub_common::InputPhase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a button action turns callback phases into pressed/released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePolicy {
    /// `started` presses, `canceled` releases, anything else is undefined.
    Edge,
    /// `started`, `performed` and `waiting` press; `canceled` and `disabled` release.
    Hold,
}

impl PhasePolicy {
    /// Policy for `button`: an explicit override, else the button's default.
    pub fn for_button(
        overrides: &BTreeMap<ButtonAction, PhasePolicy>,
        button: ButtonAction,
    ) -> Self {
        overrides
            .get(&button)
            .copied()
            .unwrap_or_else(|| button.default_policy())
    }

    /// Pressed state for `phase`, or `None` when the policy does not define it.
    pub fn resolve(self, phase: InputPhase) -> Option<bool> {
        match (self, phase) {
            (Self::Edge, InputPhase::Started) => Some(true),
            (Self::Edge, InputPhase::Canceled) => Some(false),
            (Self::Edge, _) => None,
            (Self::Hold, InputPhase::Started | InputPhase::Performed | InputPhase::Waiting) => {
                Some(true)
            }
            (Self::Hold, InputPhase::Canceled | InputPhase::Disabled) => Some(false),
        }
    }
}
