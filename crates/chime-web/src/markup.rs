// DOM contract shared with the page: element ids, data attributes and the
// parsing of their values. Pure Rust so it can be tested on the host.

use chime_core::{Field, ToneSpec};

// Settings controls
pub const SOUND_TOGGLE_ID: &str = "sound-toggle";
pub const SOUND_VOLUME_ID: &str = "sound-volume";
pub const KEYPRESS_SHIMMER_ID: &str = "keypress-shimmer";

// Field elements opt in to cues through data attributes
pub const BLUR_ATTR: &str = "data-chime-blur"; // value: Hz, field name, or empty
pub const SHIMMER_ATTR: &str = "data-chime-shimmer";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Tone to play when an element carrying [`BLUR_ATTR`] loses focus.
///
/// An empty value gives the neutral tone, a positive number is a pitch in Hz,
/// and a field name (`name`, `major`, `year`, `tags`, `search`) uses that
/// field's pitch. Anything else plays nothing.
pub fn blur_tone(raw: &str) -> Option<ToneSpec> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(ToneSpec::default());
    }
    if let Ok(hz) = raw.parse::<f32>() {
        return (hz.is_finite() && hz > 0.0).then(|| ToneSpec::at(hz));
    }
    Field::from_name(raw).map(|f| ToneSpec::at(f.frequency_hz()))
}

/// Value of the volume range input. Clamping is left to the engine.
pub fn parse_volume_input(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[inline]
pub fn aria_pressed(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}
