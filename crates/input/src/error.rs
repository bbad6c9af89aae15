use crate::action::ActionId;
use actionhub_common::InputPhase;

/// Errors from the action layer.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("undefined phase `{phase}` for action `{action}`")]
    UndefinedPhase { action: ActionId, phase: InputPhase },
    #[error("action `{action}` expects a {expected} value, got {found}")]
    ValueMismatch {
        action: ActionId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("input reader unavailable: {0}")]
    ReaderUnavailable(String),
    #[error("device probe failed: {0}")]
    Probe(String),
    #[error("settings parse error: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
