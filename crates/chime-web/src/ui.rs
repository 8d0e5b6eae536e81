use crate::dom;
use crate::markup::{
    aria_pressed, parse_volume_input, KEYPRESS_SHIMMER_ID, SOUND_TOGGLE_ID, SOUND_VOLUME_ID,
};
use crate::SharedEngine;
use web_sys as web;

/// Wire whichever settings controls exist on the page and seed them from the
/// loaded preferences. Missing controls are skipped.
pub fn wire_settings(document: &web::Document, engine: &SharedEngine) {
    if let Some(toggle) = document.get_element_by_id(SOUND_TOGGLE_ID) {
        _ = toggle.set_attribute("aria-pressed", aria_pressed(engine.borrow().enabled()));
        let engine = engine.clone();
        let el = toggle.clone();
        dom::listen(&toggle, "click", move |_ev| {
            let mut eng = engine.borrow_mut();
            let on = !eng.enabled();
            eng.set_enabled(on);
            _ = el.set_attribute("aria-pressed", aria_pressed(on));
        });
    }

    if let Some(slider) = dom::input_by_id(document, SOUND_VOLUME_ID) {
        slider.set_value(&engine.borrow().volume().to_string());
        let engine = engine.clone();
        let el = slider.clone();
        dom::listen(&slider, "input", move |_ev| {
            if let Some(v) = parse_volume_input(&el.value()) {
                engine.borrow_mut().set_volume(v);
            }
        });
    }

    if let Some(checkbox) = dom::input_by_id(document, KEYPRESS_SHIMMER_ID) {
        checkbox.set_checked(engine.borrow().keypress_shimmer());
        let engine = engine.clone();
        let el = checkbox.clone();
        dom::listen(&checkbox, "change", move |_ev| {
            engine.borrow_mut().set_keypress_shimmer(el.checked());
        });
    }
}
