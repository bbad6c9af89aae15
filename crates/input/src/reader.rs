use crate::action::{ActionId, ActionKind, ButtonAction};
use crate::bindings::InputBindings;
use crate::bus::{EventBus, SubscriptionId};
use crate::error::InputError;
use crate::event::{ActionSignal, RawCallback, SignalValue};
use crate::phase::PhasePolicy;
use crate::settings::InputSettings;
use actionhub_common::{ControlScheme, DeviceClass};
use glam::{Vec2, Vec3};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Device-facing half of the action layer.
///
/// The host calls [`InputReader::dispatch`] once per raw callback. The reader
/// classifies the originating device, normalizes the value (phase to pressed for
/// buttons, pass-through for axes) and publishes an [`ActionSignal`] on the
/// action's channel.
///
/// All methods take `&self` so a single reader can be shared through `Rc`
/// between the host driver and any number of hubs.
pub struct InputReader {
    bindings: RefCell<Box<dyn InputBindings>>,
    bus: EventBus,
    policies: BTreeMap<ButtonAction, PhasePolicy>,
    last_move: Cell<Vec2>,
}

impl InputReader {
    pub fn new(bindings: Box<dyn InputBindings>) -> Self {
        Self {
            bindings: RefCell::new(bindings),
            bus: EventBus::new(),
            policies: BTreeMap::new(),
            last_move: Cell::new(Vec2::ZERO),
        }
    }

    /// Override the phase policy of individual buttons.
    pub fn with_policies(mut self, overrides: BTreeMap<ButtonAction, PhasePolicy>) -> Self {
        self.policies.extend(overrides);
        self
    }

    /// Reader with the phase policy overrides from `settings`.
    pub fn from_settings(bindings: Box<dyn InputBindings>, settings: &InputSettings) -> Self {
        Self::new(bindings).with_policies(settings.policies.clone())
    }

    pub fn policy(&self, button: ButtonAction) -> PhasePolicy {
        PhasePolicy::for_button(&self.policies, button)
    }

    /// Turn host bindings on. A no-op when they already are.
    pub fn enable(&self) {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.is_enabled() {
            debug!("input bindings already enabled");
            return;
        }
        bindings.enable();
        info!("input bindings enabled");
    }

    /// Turn host bindings off. A no-op when they already are.
    pub fn disable(&self) {
        let mut bindings = self.bindings.borrow_mut();
        if !bindings.is_enabled() {
            debug!("input bindings already disabled");
            return;
        }
        bindings.disable();
        info!("input bindings disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.bindings.borrow().is_enabled()
    }

    pub fn set_control_scheme(&self, scheme: ControlScheme) {
        self.bindings.borrow_mut().apply_control_scheme(scheme);
    }

    pub fn subscribe(
        &self,
        action: ActionId,
        handler: impl Fn(&ActionSignal) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(action, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn subscriber_count(&self, action: ActionId) -> usize {
        self.bus.subscriber_count(action)
    }

    /// Most recent move vector as a 3D direction `(x, y, 0)`.
    pub fn direction(&self) -> Vec3 {
        self.last_move.get().extend(0.0)
    }

    /// Normalize one raw callback and publish it.
    ///
    /// Callbacks arriving while bindings are disabled, and rotation callbacks
    /// from the wrong device class, are dropped and return `Ok`.
    pub fn dispatch(&self, callback: RawCallback) -> Result<(), InputError> {
        if !self.is_enabled() {
            debug!(action = %callback.action, "bindings disabled, dropping callback");
            return Ok(());
        }
        let Some(signal) = self.normalize(&callback)? else {
            return Ok(());
        };
        let delivered = self.bus.publish(&signal);
        debug!(action = %signal.action, delivered, "published");
        Ok(())
    }

    fn normalize(&self, callback: &RawCallback) -> Result<Option<ActionSignal>, InputError> {
        let action = callback.action;
        let device = callback.device.class();

        let value = match action.kind() {
            ActionKind::Axis2 => {
                let v = callback.value.read_vec2(action)?;
                let required = match action {
                    ActionId::Rotate => Some(DeviceClass::Mouse),
                    ActionId::RotateController => Some(DeviceClass::Gamepad),
                    _ => None,
                };
                if let Some(required) = required {
                    if device != required {
                        debug!(
                            %action,
                            device = %callback.device.name,
                            "device class mismatch, dropped"
                        );
                        return Ok(None);
                    }
                }
                if action == ActionId::Move {
                    self.last_move.set(v);
                }
                SignalValue::Axis2(v)
            }
            ActionKind::Axis1 => SignalValue::Axis1(callback.value.read_scroll(action)?),
            ActionKind::Button => {
                let Some(button) = action.button() else {
                    return Ok(None);
                };
                let pressed = self.policy(button).resolve(callback.phase).ok_or_else(|| {
                    error!(%action, phase = %callback.phase, "undefined phase for edge action");
                    InputError::UndefinedPhase {
                        action,
                        phase: callback.phase,
                    }
                })?;
                SignalValue::Button(pressed)
            }
        };

        Ok(Some(ActionSignal {
            action,
            value,
            device,
        }))
    }
}

impl std::fmt::Debug for InputReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputReader")
            .field("enabled", &self.is_enabled())
            .field("bus", &self.bus)
            .field("policies", &self.policies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::ActionMap;
    use crate::event::RawValue;
    use actionhub_common::InputPhase;
    use std::rc::Rc;

    fn enabled_reader() -> InputReader {
        let reader = InputReader::new(Box::new(ActionMap::new()));
        reader.enable();
        reader
    }

    fn record(reader: &InputReader, action: ActionId) -> Rc<RefCell<Vec<ActionSignal>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        reader.subscribe(action, move |s| sink.borrow_mut().push(*s));
        seen
    }

    #[test]
    fn move_passes_through() {
        let reader = enabled_reader();
        let seen = record(&reader, ActionId::Move);
        reader
            .dispatch(RawCallback::axis2(ActionId::Move, Vec2::new(0.5, -0.3), "Keyboard"))
            .unwrap();
        assert_eq!(seen.borrow()[0].value, SignalValue::Axis2(Vec2::new(0.5, -0.3)));
        assert_eq!(reader.direction(), Vec3::new(0.5, -0.3, 0.0));
    }

    #[test]
    fn rotate_requires_mouse() {
        let reader = enabled_reader();
        let seen = record(&reader, ActionId::Rotate);
        let v = Vec2::new(1.0, 2.0);
        reader.dispatch(RawCallback::axis2(ActionId::Rotate, v, "XInputGamepad")).unwrap();
        reader.dispatch(RawCallback::axis2(ActionId::Rotate, v, "Pen")).unwrap();
        assert!(seen.borrow().is_empty());
        reader.dispatch(RawCallback::axis2(ActionId::Rotate, v, "Mouse")).unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].device, DeviceClass::Mouse);
    }

    #[test]
    fn rotate_controller_requires_gamepad() {
        let reader = enabled_reader();
        let seen = record(&reader, ActionId::RotateController);
        let v = Vec2::new(0.2, 0.1);
        reader.dispatch(RawCallback::axis2(ActionId::RotateController, v, "Mouse")).unwrap();
        assert!(seen.borrow().is_empty());
        reader
            .dispatch(RawCallback::axis2(ActionId::RotateController, v, "DualSenseGamepadHID"))
            .unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn scroll_accepts_scalar_and_vector() {
        let reader = enabled_reader();
        let seen = record(&reader, ActionId::ScrollWheel);
        reader
            .dispatch(RawCallback::new(
                ActionId::ScrollWheel,
                InputPhase::Performed,
                RawValue::Axis2(Vec2::new(0.0, 120.0)),
                "Mouse",
            ))
            .unwrap();
        reader
            .dispatch(RawCallback::new(
                ActionId::ScrollWheel,
                InputPhase::Performed,
                RawValue::Axis1(-1.0),
                "Mouse",
            ))
            .unwrap();
        let values: Vec<_> = seen.borrow().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![SignalValue::Axis1(120.0), SignalValue::Axis1(-1.0)]);
    }

    #[test]
    fn edge_button_rejects_performed() {
        let reader = enabled_reader();
        let seen = record(&reader, ActionId::Jump);
        let err = reader
            .dispatch(RawCallback::button(ActionId::Jump, InputPhase::Performed, "Keyboard"))
            .unwrap_err();
        assert!(matches!(
            err,
            InputError::UndefinedPhase {
                action: ActionId::Jump,
                phase: InputPhase::Performed
            }
        ));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn every_momentary_button_rejects_non_edge_phases() {
        let reader = enabled_reader();
        for button in ButtonAction::ALL.into_iter().filter(|b| !b.is_sustained()) {
            for phase in [InputPhase::Performed, InputPhase::Waiting, InputPhase::Disabled] {
                let result = reader.dispatch(RawCallback::button(button.into(), phase, "Keyboard"));
                assert!(result.is_err(), "{button} {phase}");
            }
        }
    }

    #[test]
    fn hold_button_stays_pressed_while_performed() {
        let reader = enabled_reader();
        let seen = record(&reader, ActionId::Attack);
        for phase in [InputPhase::Started, InputPhase::Performed, InputPhase::Canceled] {
            reader
                .dispatch(RawCallback::button(ActionId::Attack, phase, "Mouse"))
                .unwrap();
        }
        let values: Vec<_> = seen.borrow().iter().map(|s| s.value).collect();
        assert_eq!(
            values,
            vec![
                SignalValue::Button(true),
                SignalValue::Button(true),
                SignalValue::Button(false)
            ]
        );
    }

    #[test]
    fn policy_override_applies() {
        let reader = InputReader::new(Box::new(ActionMap::new()))
            .with_policies(BTreeMap::from([(ButtonAction::Jump, PhasePolicy::Hold)]));
        reader.enable();
        assert_eq!(reader.policy(ButtonAction::Jump), PhasePolicy::Hold);
        assert_eq!(reader.policy(ButtonAction::Run), PhasePolicy::Edge);
        reader
            .dispatch(RawCallback::button(ActionId::Jump, InputPhase::Performed, "Keyboard"))
            .unwrap();
    }

    #[test]
    fn from_settings_carries_policy_overrides() {
        let settings = InputSettings::from_yaml_str("policies:\n  crouch: hold\n").unwrap();
        let reader = InputReader::from_settings(Box::new(ActionMap::new()), &settings);
        reader.enable();
        assert_eq!(reader.policy(ButtonAction::Crouch), PhasePolicy::Hold);
        assert_eq!(reader.policy(ButtonAction::Crouch), settings.policy_for(ButtonAction::Crouch));
        let seen = record(&reader, ActionId::Crouch);
        reader
            .dispatch(RawCallback::button(ActionId::Crouch, InputPhase::Performed, "Keyboard"))
            .unwrap();
        assert_eq!(seen.borrow()[0].value, SignalValue::Button(true));
    }

    #[test]
    fn wrong_value_shape_is_an_error() {
        let reader = enabled_reader();
        let err = reader
            .dispatch(RawCallback::new(
                ActionId::Move,
                InputPhase::Performed,
                RawValue::Button(true),
                "Keyboard",
            ))
            .unwrap_err();
        assert!(matches!(err, InputError::ValueMismatch { .. }));
    }

    #[test]
    fn disabled_reader_drops_callbacks() {
        let reader = InputReader::new(Box::new(ActionMap::new()));
        let seen = record(&reader, ActionId::Jump);
        reader
            .dispatch(RawCallback::button(ActionId::Jump, InputPhase::Started, "Keyboard"))
            .unwrap();
        assert!(seen.borrow().is_empty());
        // Undefined phases are not reported while disabled either.
        reader
            .dispatch(RawCallback::button(ActionId::Jump, InputPhase::Performed, "Keyboard"))
            .unwrap();
    }

    struct CountingBindings {
        enabled: bool,
        enables: Rc<Cell<u32>>,
    }

    impl InputBindings for CountingBindings {
        fn enable(&mut self) {
            self.enabled = true;
            self.enables.set(self.enables.get() + 1);
        }
        fn disable(&mut self) {
            self.enabled = false;
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    #[test]
    fn enable_is_idempotent() {
        let enables = Rc::new(Cell::new(0));
        let reader = InputReader::new(Box::new(CountingBindings {
            enabled: false,
            enables: Rc::clone(&enables),
        }));
        reader.enable();
        reader.enable();
        assert_eq!(enables.get(), 1);
        reader.disable();
        reader.disable();
        assert!(!reader.is_enabled());
        reader.enable();
        assert_eq!(enables.get(), 2);
    }
}
