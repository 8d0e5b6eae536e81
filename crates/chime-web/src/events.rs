use crate::dom;
use crate::markup::{blur_tone, BLUR_ATTR, SHIMMER_ATTR};
use crate::SharedEngine;
use web_sys as web;

/// Any pointer-down or key-down inside `root` primes the audio device.
/// Priming is idempotent, so the listeners stay registered.
pub fn wire_gesture_priming(root: &web::Element, engine: &SharedEngine) {
    for event in ["pointerdown", "keydown"] {
        let engine = engine.clone();
        dom::listen(root, event, move |_ev| {
            engine.borrow_mut().prime();
        });
    }
}

/// Delegated field cues: `focusout` on an element with `data-chime-blur`
/// plays its tone, `input` on an element with `data-chime-shimmer` requests
/// a shimmer tick.
pub fn wire_field_cues(root: &web::Element, engine: &SharedEngine) {
    let blur_engine = engine.clone();
    dom::listen(root, "focusout", move |ev| {
        let Some(el) = dom::event_element(&ev) else {
            return;
        };
        if let Some(raw) = el.get_attribute(BLUR_ATTR) {
            match blur_tone(&raw) {
                Some(spec) => blur_engine.borrow().play_tone(spec),
                None => log::debug!("[dom] ignoring {}={:?}", BLUR_ATTR, raw),
            }
        }
    });

    let input_engine = engine.clone();
    dom::listen(root, "input", move |ev| {
        if let Some(el) = dom::event_element(&ev) {
            if el.has_attribute(SHIMMER_ATTR) {
                input_engine.borrow().play_shimmer();
            }
        }
    });
}
