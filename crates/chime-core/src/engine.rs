use crate::constants::{DEFAULT_TONE_GAIN_SCALE, SHIMMER_COOLDOWN_MS};
use crate::cooldown::Cooldown;
use crate::cue::{Cue, Field};
use crate::device::{AudioDevice, DeviceResult, DeviceSlot, DeviceState};
use crate::patch::{TonePatch, ToneSpec};
use crate::prefs::Preferences;
use crate::schedule::Scheduler;
use crate::store::KeyValueStore;
use std::rc::Rc;
use std::time::Duration;

/// Turns UI events into short synthesized tones.
///
/// Every `play_*` call is fire-and-forget: it either hands a patch to the
/// device (and possibly schedules a follow-up note) or does nothing. Nothing
/// here ever reports an error to the caller; failures are logged and become
/// silence.
///
/// A tone sounds only when all of these hold:
/// - the user has sound enabled
/// - the platform did not ask for reduced motion
/// - a device has been primed by a user gesture
pub struct ToneEngine<D: AudioDevice + 'static, S: KeyValueStore> {
    prefs: Preferences,
    store: S,
    reduced_motion: bool,
    device: DeviceSlot<D>,
    scheduler: Rc<dyn Scheduler>,
    shimmer: Cooldown,
}

impl<D: AudioDevice + 'static, S: KeyValueStore> ToneEngine<D, S> {
    /// Load preferences from `store`. `connect` is held until the first
    /// [`prime`](Self::prime) and never called more than once.
    pub fn new(
        store: S,
        reduced_motion: bool,
        scheduler: Rc<dyn Scheduler>,
        connect: impl FnOnce() -> DeviceResult<D> + 'static,
    ) -> Self {
        let prefs = Preferences::load(&store);
        log::info!(
            "[prefs] enabled={} volume={:.2} shimmer={} reduced_motion={}",
            prefs.enabled,
            prefs.volume(),
            prefs.keypress_shimmer,
            reduced_motion
        );
        Self {
            prefs,
            store,
            reduced_motion,
            device: DeviceSlot::new(connect),
            scheduler,
            shimmer: Cooldown::new(Duration::from_millis(SHIMMER_COOLDOWN_MS)),
        }
    }

    // ---------------- Device lifecycle ----------------

    /// Call on any pointer-down or key-down. Idempotent.
    pub fn prime(&mut self) {
        self.device.prime();
    }

    pub fn device_state(&self) -> DeviceState {
        self.device.state()
    }

    pub fn is_primed(&self) -> bool {
        self.device.state() == DeviceState::Primed
    }

    // ---------------- Playback ----------------

    pub fn play_tone(&self, spec: ToneSpec) {
        let Some(device) = self.audible_device() else {
            return;
        };
        let requested = spec;
        let spec = spec.sanitized();
        if spec != requested {
            log::debug!("[tone] replaced unusable request {:?} with {:?}", requested, spec);
        }
        let gain = spec
            .gain
            .unwrap_or(self.prefs.volume() * DEFAULT_TONE_GAIN_SCALE);
        sound(device, &TonePatch::chime(spec.frequency_hz, spec.duration_sec, gain));
    }

    pub fn play_success(&self) {
        self.play_cue(Cue::Success);
    }

    pub fn play_delete(&self) {
        self.play_cue(Cue::Delete);
    }

    pub fn play_shimmer(&self) {
        self.play_cue(Cue::Shimmer);
    }

    pub fn play_field_blur(&self, field: Field) {
        self.play_cue(Cue::FieldBlur(field));
    }

    /// Play a catalog cue. The first note sounds now; later notes are
    /// deferred with their patch and device captured, so they still sound
    /// if preferences change before they fire.
    pub fn play_cue(&self, cue: Cue) {
        if cue == Cue::Shimmer && !self.prefs.keypress_shimmer {
            return;
        }
        let Some(device) = self.audible_device() else {
            return;
        };
        if cue == Cue::Shimmer && !self.shimmer.try_begin(self.scheduler.as_ref()) {
            log::debug!("[audio] shimmer suppressed during cooldown");
            return;
        }
        let volume = self.prefs.volume();
        for note in cue.notes() {
            let patch = note.patch(volume);
            if note.offset.is_zero() {
                sound(device, &patch);
            } else {
                let device = Rc::clone(device);
                self.scheduler
                    .defer(note.offset, Box::new(move || sound(&device, &patch)));
            }
        }
    }

    fn audible_device(&self) -> Option<&Rc<D>> {
        if !self.prefs.enabled || self.reduced_motion {
            return None;
        }
        self.device.device()
    }

    pub fn shimmer_cooling(&self) -> bool {
        self.shimmer.is_cooling()
    }

    // ---------------- Preferences ----------------

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn enabled(&self) -> bool {
        self.prefs.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.prefs.enabled = enabled;
        self.persist();
    }

    pub fn volume(&self) -> f32 {
        self.prefs.volume()
    }

    /// Out-of-range values are clamped to \[0, 1\].
    pub fn set_volume(&mut self, volume: f32) {
        self.prefs.set_volume(volume);
        self.persist();
    }

    pub fn keypress_shimmer(&self) -> bool {
        self.prefs.keypress_shimmer
    }

    pub fn set_keypress_shimmer(&mut self, on: bool) {
        self.prefs.keypress_shimmer = on;
        self.persist();
    }

    fn persist(&self) {
        log::info!(
            "[prefs] enabled={} volume={:.2} shimmer={}",
            self.prefs.enabled,
            self.prefs.volume(),
            self.prefs.keypress_shimmer
        );
        if let Err(e) = self.prefs.save(&self.store) {
            log::warn!("[prefs] could not persist preferences: {}", e);
        }
    }
}

fn sound<D: AudioDevice>(device: &D, patch: &TonePatch) {
    if let Err(e) = device.play(patch) {
        log::warn!("[audio] tone at {} Hz dropped: {}", patch.fundamental_hz(), e);
    }
}
