//! Audio device seam and its gesture-gated lifecycle.

use crate::patch::TonePatch;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("audio synthesis is not supported on this platform")]
    Unsupported,

    #[error("audio device was rejected: {0}")]
    Rejected(String),

    #[error("failed to build tone graph: {0}")]
    Graph(String),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Something that can sound a [`TonePatch`] starting at its own "now".
///
/// Implementations schedule on their own clock and return immediately.
pub trait AudioDevice {
    fn play(&self, patch: &TonePatch) -> DeviceResult<()>;
}

impl<D: AudioDevice + ?Sized> AudioDevice for Rc<D> {
    fn play(&self, patch: &TonePatch) -> DeviceResult<()> {
        (**self).play(patch)
    }
}

pub type Connect<D> = Box<dyn FnOnce() -> DeviceResult<D>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    /// No gesture seen yet.
    Uninitialized,
    Primed,
    /// Priming was attempted and failed; silent for the rest of the session.
    Unavailable,
}

/// Holds the device constructor until the first gesture, then the device.
///
/// The constructor is an `FnOnce` consumed by the first [`prime`](Self::prime),
/// so a second construction attempt cannot happen.
pub enum DeviceSlot<D> {
    Uninitialized(Connect<D>),
    Primed(Rc<D>),
    Unavailable,
}

impl<D> DeviceSlot<D> {
    pub fn new(connect: impl FnOnce() -> DeviceResult<D> + 'static) -> Self {
        DeviceSlot::Uninitialized(Box::new(connect))
    }

    pub fn state(&self) -> DeviceState {
        match self {
            DeviceSlot::Uninitialized(_) => DeviceState::Uninitialized,
            DeviceSlot::Primed(_) => DeviceState::Primed,
            DeviceSlot::Unavailable => DeviceState::Unavailable,
        }
    }

    pub fn device(&self) -> Option<&Rc<D>> {
        match self {
            DeviceSlot::Primed(device) => Some(device),
            _ => None,
        }
    }

    pub fn prime(&mut self) {
        let connect = match std::mem::replace(self, DeviceSlot::Unavailable) {
            DeviceSlot::Uninitialized(connect) => connect,
            already => {
                *self = already;
                return;
            }
        };
        match connect() {
            Ok(device) => {
                log::info!("[audio] device primed");
                *self = DeviceSlot::Primed(Rc::new(device));
            }
            Err(e) => {
                log::warn!("[audio] device unavailable, staying silent: {}", e);
            }
        }
    }
}

impl<D> std::fmt::Debug for DeviceSlot<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DeviceSlot").field(&self.state()).finish()
    }
}
