use crate::action::{ActionId, ButtonAction};
use crate::bus::SubscriptionId;
use crate::error::InputError;
use crate::event::{ActionSignal, SignalValue};
use crate::probe::DeviceProbe;
use crate::reader::InputReader;
use crate::settings::InputSettings;
use actionhub_common::{ControlScheme, DeviceClass, DeviceConnectivity};
use glam::Vec2;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

/// Produces the reader a hub attaches to on its first enable.
pub type ReaderFactory = Box<dyn FnMut() -> Result<Rc<InputReader>, InputError>>;

/// Latest value of every action signal, plus the inversion flags the rotation
/// handlers need. Shared between the hub and its subscriptions.
#[derive(Debug, Clone)]
struct SignalCache {
    move_input: Vec2,
    rotate_input: Vec2,
    rotate_controller_input: Vec2,
    scroll_wheel_input: f32,
    buttons: BTreeMap<ButtonAction, bool>,
    invert_x: bool,
    invert_y: bool,
}

impl SignalCache {
    fn new(settings: &InputSettings) -> Self {
        Self {
            move_input: Vec2::ZERO,
            rotate_input: Vec2::ZERO,
            rotate_controller_input: Vec2::ZERO,
            scroll_wheel_input: 0.0,
            buttons: ButtonAction::ALL.into_iter().map(|b| (b, false)).collect(),
            invert_x: settings.invert_x,
            invert_y: settings.invert_y,
        }
    }

    fn invert(&self, mut v: Vec2) -> Vec2 {
        if self.invert_y {
            v.y = -v.y;
        }
        if self.invert_x {
            v.x = -v.x;
        }
        v
    }

    fn apply(&mut self, signal: &ActionSignal) {
        match (signal.action, signal.value) {
            (ActionId::Move, SignalValue::Axis2(v)) => self.move_input = v,
            (ActionId::Rotate, SignalValue::Axis2(v)) if signal.device == DeviceClass::Mouse => {
                self.rotate_input = self.invert(v);
            }
            (ActionId::RotateController, SignalValue::Axis2(v))
                if signal.device == DeviceClass::Gamepad =>
            {
                self.rotate_controller_input = self.invert(v);
            }
            (ActionId::ScrollWheel, SignalValue::Axis1(s)) => self.scroll_wheel_input = s,
            (action, SignalValue::Button(pressed)) => match action.button() {
                Some(button) => {
                    self.buttons.insert(button, pressed);
                }
                None => debug!(%action, pressed, "button signal on axis action ignored"),
            },
            (action, value) => {
                debug!(%action, ?value, device = ?signal.device, "signal ignored by hub");
            }
        }
    }
}

/// Caches the latest value of every action signal for gameplay code to poll.
///
/// The hub receives its reader through a factory at construction; the reader is
/// created on the first successful [`InputHub::enable`] and reused afterwards.
/// If the factory fails the hub stays inert: operations that need a reader log
/// a warning and do nothing.
pub struct InputHub {
    factory: ReaderFactory,
    reader: Option<Rc<InputReader>>,
    probe: Box<dyn DeviceProbe>,
    cache: Rc<RefCell<SignalCache>>,
    subscriptions: Vec<SubscriptionId>,
    can_receive_input: bool,
    control_scheme: ControlScheme,
    connectivity: DeviceConnectivity,
    analog_movement: bool,
}

impl InputHub {
    pub fn new(
        factory: ReaderFactory,
        probe: Box<dyn DeviceProbe>,
        settings: &InputSettings,
    ) -> Self {
        Self {
            factory,
            reader: None,
            probe,
            cache: Rc::new(RefCell::new(SignalCache::new(settings))),
            subscriptions: Vec::new(),
            can_receive_input: settings.can_receive_input,
            control_scheme: settings.control_scheme,
            connectivity: DeviceConnectivity::default(),
            analog_movement: settings.analog_movement,
        }
    }

    /// Hub bound to an existing reader.
    pub fn with_reader(
        reader: Rc<InputReader>,
        probe: Box<dyn DeviceProbe>,
        settings: &InputSettings,
    ) -> Self {
        Self::new(Box::new(move || Ok(Rc::clone(&reader))), probe, settings)
    }

    /// Attach to the reader, subscribe to every channel and, if input is
    /// allowed, probe devices and enable the reader.
    ///
    /// Calling this on an enabled hub does nothing, so a raw callback is never
    /// delivered twice.
    pub fn enable(&mut self) {
        if self.is_enabled() {
            debug!("input hub already enabled");
            return;
        }
        let reader = match self.acquire_reader() {
            Ok(reader) => reader,
            Err(e) => {
                error!("input hub failed to initialize: {e}");
                return;
            }
        };

        for action in ActionId::ALL {
            let cache = Rc::clone(&self.cache);
            let id = reader.subscribe(action, move |signal| cache.borrow_mut().apply(signal));
            self.subscriptions.push(id);
        }

        if self.can_receive_input {
            self.check_connected_devices();
            reader.enable();
        }
        info!(
            subscriptions = self.subscriptions.len(),
            can_receive_input = self.can_receive_input,
            "input hub enabled"
        );
    }

    /// Unsubscribe from every channel and disable input. Cached values are kept.
    pub fn disable(&mut self) {
        let Some(reader) = self.reader.as_ref() else {
            warn!("input hub has no reader, disable ignored");
            return;
        };
        for id in self.subscriptions.drain(..) {
            reader.unsubscribe(id);
        }
        reader.disable();
        info!("input hub disabled");
    }

    pub fn is_enabled(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Enable or disable the reader without touching subscriptions.
    pub fn set_can_receive_input(&mut self, value: bool) {
        self.can_receive_input = value;
        let Some(reader) = self.reader.as_ref() else {
            warn!(value, "input hub has no reader, can_receive_input recorded only");
            return;
        };
        if value {
            reader.enable();
        } else {
            reader.disable();
        }
    }

    /// Record the scheme, let the bindings rebind, and re-enable input.
    pub fn change_control_scheme(&mut self, scheme: ControlScheme) {
        self.control_scheme = scheme;
        let Some(reader) = self.reader.as_ref() else {
            warn!(%scheme, "input hub has no reader, control scheme recorded only");
            return;
        };
        reader.set_control_scheme(scheme);
        reader.enable();
        info!(%scheme, "control scheme changed");
    }

    pub fn set_invert_x(&mut self, value: bool) {
        self.cache.borrow_mut().invert_x = value;
    }

    pub fn set_invert_y(&mut self, value: bool) {
        self.cache.borrow_mut().invert_y = value;
    }

    pub fn reader(&self) -> Option<&Rc<InputReader>> {
        self.reader.as_ref()
    }

    pub fn can_receive_input(&self) -> bool {
        self.can_receive_input
    }

    pub fn is_mouse_connected(&self) -> bool {
        self.connectivity.mouse
    }

    pub fn is_gamepad_connected(&self) -> bool {
        self.connectivity.gamepad_connected()
    }

    pub fn invert_x(&self) -> bool {
        self.cache.borrow().invert_x
    }

    pub fn invert_y(&self) -> bool {
        self.cache.borrow().invert_y
    }

    pub fn analog_movement(&self) -> bool {
        self.analog_movement
    }

    pub fn control_scheme(&self) -> ControlScheme {
        self.control_scheme
    }

    pub fn move_input(&self) -> Vec2 {
        self.cache.borrow().move_input
    }

    pub fn rotate_input(&self) -> Vec2 {
        self.cache.borrow().rotate_input
    }

    pub fn rotate_controller_input(&self) -> Vec2 {
        self.cache.borrow().rotate_controller_input
    }

    pub fn scroll_wheel_input(&self) -> f32 {
        self.cache.borrow().scroll_wheel_input
    }

    pub fn pressed(&self, button: ButtonAction) -> bool {
        self.cache.borrow().buttons.get(&button).copied().unwrap_or(false)
    }

    pub fn jump_pressed(&self) -> bool {
        self.pressed(ButtonAction::Jump)
    }

    pub fn run_pressed(&self) -> bool {
        self.pressed(ButtonAction::Run)
    }

    pub fn reload_pressed(&self) -> bool {
        self.pressed(ButtonAction::Reload)
    }

    pub fn attack_pressed(&self) -> bool {
        self.pressed(ButtonAction::Attack)
    }

    pub fn crouch_pressed(&self) -> bool {
        self.pressed(ButtonAction::Crouch)
    }

    pub fn block_pressed(&self) -> bool {
        self.pressed(ButtonAction::Block)
    }

    pub fn interact_pressed(&self) -> bool {
        self.pressed(ButtonAction::Interact)
    }

    pub fn escape_pressed(&self) -> bool {
        self.pressed(ButtonAction::Escape)
    }

    pub fn open_ui_pressed(&self) -> bool {
        self.pressed(ButtonAction::OpenUi)
    }

    pub fn emote_pressed(&self) -> bool {
        self.pressed(ButtonAction::Emote)
    }

    pub fn command_key_pressed(&self) -> bool {
        self.pressed(ButtonAction::CommandKey)
    }

    pub fn num_one_pressed(&self) -> bool {
        self.pressed(ButtonAction::NumOne)
    }

    /// Read-only copy of everything the hub holds.
    pub fn snapshot(&self) -> HubSnapshot {
        let cache = self.cache.borrow();
        HubSnapshot {
            enabled: self.is_enabled(),
            can_receive_input: self.can_receive_input,
            control_scheme: self.control_scheme,
            mouse_connected: self.connectivity.mouse,
            gamepad_connected: self.connectivity.gamepad_connected(),
            invert_x: cache.invert_x,
            invert_y: cache.invert_y,
            analog_movement: self.analog_movement,
            move_input: cache.move_input,
            rotate_input: cache.rotate_input,
            rotate_controller_input: cache.rotate_controller_input,
            scroll_wheel_input: cache.scroll_wheel_input,
            buttons: cache.buttons.clone(),
        }
    }

    fn acquire_reader(&mut self) -> Result<Rc<InputReader>, InputError> {
        if let Some(reader) = &self.reader {
            return Ok(Rc::clone(reader));
        }
        let reader = (self.factory)()?;
        // Bindings start on the configured scheme, not their own default.
        reader.set_control_scheme(self.control_scheme);
        self.reader = Some(Rc::clone(&reader));
        Ok(reader)
    }

    /// Queried once per enable; hot-plugging is not tracked.
    fn check_connected_devices(&mut self) {
        match self.probe.connectivity() {
            Ok(connectivity) => {
                debug!(
                    mouse = connectivity.mouse,
                    gamepads = connectivity.gamepads,
                    "device probe"
                );
                self.connectivity = connectivity;
            }
            Err(e) => warn!("device probe failed, keeping previous connectivity: {e}"),
        }
    }
}

impl Drop for InputHub {
    fn drop(&mut self) {
        if self.is_enabled() {
            self.disable();
        }
    }
}

impl std::fmt::Debug for InputHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputHub")
            .field("reader", &self.reader)
            .field("subscriptions", &self.subscriptions.len())
            .field("cache", &self.cache.borrow())
            .finish_non_exhaustive()
    }
}

/// Every cached value of a hub at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubSnapshot {
    pub enabled: bool,
    pub can_receive_input: bool,
    pub control_scheme: ControlScheme,
    pub mouse_connected: bool,
    pub gamepad_connected: bool,
    pub invert_x: bool,
    pub invert_y: bool,
    pub analog_movement: bool,
    pub move_input: Vec2,
    pub rotate_input: Vec2,
    pub rotate_controller_input: Vec2,
    pub scroll_wheel_input: f32,
    pub buttons: BTreeMap<ButtonAction, bool>,
}

impl std::fmt::Display for HubSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Hub: enabled={} receive={} scheme={} mouse={} gamepad={} invert=({}, {})",
            self.enabled,
            self.can_receive_input,
            self.control_scheme,
            self.mouse_connected,
            self.gamepad_connected,
            self.invert_x,
            self.invert_y,
        )?;
        let (m, r, c) = (
            self.move_input,
            self.rotate_input,
            self.rotate_controller_input,
        );
        writeln!(
            f,
            "  move=({:.2}, {:.2}) rotate=({:.2}, {:.2}) rotate_controller=({:.2}, {:.2}) \
             scroll={:.2}",
            m.x, m.y, r.x, r.y, c.x, c.y, self.scroll_wheel_input,
        )?;
        let held: Vec<&str> = self
            .buttons
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(button, _)| button.name())
            .collect();
        if held.is_empty() {
            write!(f, "  pressed: none")
        } else {
            write!(f, "  pressed: {}", held.join(", "))
        }
    }
}
