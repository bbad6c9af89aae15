//! Action layer: a reader that turns raw host callbacks into action signals, and
//! a hub that caches the latest value of every signal for gameplay code.
//!
//! # Invariants
//! - Cached values always reflect the most recent accepted callback.
//! - No history, interpolation or buffering.
//! - All handlers for one raw callback run, in subscription order, before
//!   `InputReader::dispatch` returns.

pub mod action;
pub mod bindings;
pub mod bus;
pub mod error;
pub mod event;
pub mod hub;
pub mod phase;
pub mod probe;
pub mod reader;
pub mod settings;

pub use action::{ActionId, ActionKind, ButtonAction};
pub use bindings::{ActionMap, InputBindings};
pub use bus::{EventBus, SubscriptionId};
pub use error::InputError;
pub use event::{ActionSignal, RawCallback, RawValue, SignalValue};
pub use hub::{HubSnapshot, InputHub, ReaderFactory};
pub use phase::PhasePolicy;
pub use probe::{DeviceProbe, StaticProbe};
pub use reader::InputReader;
pub use settings::InputSettings;

pub fn crate_info() -> &'static str {
    "actionhub-input v0.1.0"
}
