#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use chime_core::{ToneEngine, ToneSpec};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod audio;
mod dom;
mod events;
mod markup;
mod storage;
mod timer;
mod ui;

use audio::WebAudioDevice;
use storage::WebStorage;
use timer::TimeoutScheduler;

type WebEngine = ToneEngine<WebAudioDevice, WebStorage>;
pub(crate) type SharedEngine = Rc<RefCell<WebEngine>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("chime-web starting");
    Ok(())
}

/// Handle to the page's tone engine. Create one at startup and hand it to
/// whatever needs sound.
#[wasm_bindgen]
pub struct SoundEngine {
    inner: SharedEngine,
}

#[wasm_bindgen]
impl SoundEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SoundEngine {
        let reduced_motion = storage::prefers_reduced_motion(markup::REDUCED_MOTION_QUERY);
        let engine = ToneEngine::new(
            WebStorage::local(),
            reduced_motion,
            Rc::new(TimeoutScheduler),
            WebAudioDevice::connect,
        );
        SoundEngine {
            inner: Rc::new(RefCell::new(engine)),
        }
    }

    /// Wire gesture priming, field cues and settings controls under the
    /// element with id `root_id`.
    pub fn attach(&self, root_id: &str) -> Result<(), JsValue> {
        self.try_attach(root_id)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    pub fn prime(&self) {
        self.inner.borrow_mut().prime();
    }

    /// Neutral tone; omitted arguments take the usual defaults
    /// (880 Hz, 0.22 s, 90% of the master volume).
    #[wasm_bindgen(js_name = playTone)]
    pub fn play_tone(&self, frequency_hz: Option<f32>, duration_sec: Option<f64>, gain: Option<f32>) {
        let defaults = ToneSpec::default();
        self.inner.borrow().play_tone(ToneSpec {
            frequency_hz: frequency_hz.unwrap_or(defaults.frequency_hz),
            duration_sec: duration_sec.unwrap_or(defaults.duration_sec),
            gain,
        });
    }

    #[wasm_bindgen(js_name = playSuccess)]
    pub fn play_success(&self) {
        self.inner.borrow().play_success();
    }

    #[wasm_bindgen(js_name = playDelete)]
    pub fn play_delete(&self) {
        self.inner.borrow().play_delete();
    }

    #[wasm_bindgen(js_name = playShimmer)]
    pub fn play_shimmer(&self) {
        self.inner.borrow().play_shimmer();
    }

    #[wasm_bindgen(getter)]
    pub fn enabled(&self) -> bool {
        self.inner.borrow().enabled()
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().set_enabled(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> f32 {
        self.inner.borrow().volume()
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        self.inner.borrow_mut().set_volume(volume);
    }

    #[wasm_bindgen(getter, js_name = keypressShimmer)]
    pub fn keypress_shimmer(&self) -> bool {
        self.inner.borrow().keypress_shimmer()
    }

    #[wasm_bindgen(js_name = setKeypressShimmer)]
    pub fn set_keypress_shimmer(&self, on: bool) {
        self.inner.borrow_mut().set_keypress_shimmer(on);
    }

    #[wasm_bindgen(getter, js_name = reducedMotion)]
    pub fn reduced_motion(&self) -> bool {
        self.inner.borrow().reduced_motion()
    }
}

impl SoundEngine {
    fn try_attach(&self, root_id: &str) -> anyhow::Result<()> {
        let document = dom::window_document().context("no document")?;
        let root = document
            .get_element_by_id(root_id)
            .with_context(|| format!("missing #{}", root_id))?;
        events::wire_gesture_priming(&root, &self.inner);
        events::wire_field_cues(&root, &self.inner);
        ui::wire_settings(&document, &self.inner);
        log::info!("[dom] sound wired under #{}", root_id);
        Ok(())
    }
}

impl Default for SoundEngine {
    fn default() -> Self {
        Self::new()
    }
}
