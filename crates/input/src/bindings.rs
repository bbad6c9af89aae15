use actionhub_common::ControlScheme;
use tracing::debug;

/// Host-owned binding layer: turns the physical controls behind the actions on
/// and off, and regroups them when the control scheme changes.
pub trait InputBindings {
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;

    /// Rebind for `scheme`. Hosts without per-scheme bindings ignore it.
    fn apply_control_scheme(&mut self, _scheme: ControlScheme) {}
}

/// In-process binding layer for hosts that feed callbacks directly.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    enabled: bool,
    scheme: ControlScheme,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control_scheme(&self) -> ControlScheme {
        self.scheme
    }
}

impl InputBindings for ActionMap {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn apply_control_scheme(&mut self, scheme: ControlScheme) {
        debug!(from = %self.scheme, to = %scheme, "action map rebinding");
        self.scheme = scheme;
    }
}
