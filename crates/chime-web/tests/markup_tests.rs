// Host-side tests for the DOM contract helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod markup {
    include!("../src/markup.rs");
}

use chime_core::ToneSpec;
use markup::*;

#[test]
fn empty_blur_attribute_plays_the_neutral_tone() {
    assert_eq!(blur_tone(""), Some(ToneSpec::default()));
    assert_eq!(blur_tone("   "), Some(ToneSpec::default()));
}

#[test]
fn numeric_blur_attribute_is_a_pitch() {
    let spec = blur_tone("784").unwrap();
    assert_eq!(spec.frequency_hz, 784.0);
    assert_eq!(spec.duration_sec, 0.22);
    assert_eq!(spec.gain, None);
    assert_eq!(blur_tone(" 698.5 ").unwrap().frequency_hz, 698.5);
}

#[test]
fn bad_pitches_play_nothing() {
    assert_eq!(blur_tone("0"), None);
    assert_eq!(blur_tone("-440"), None);
    assert_eq!(blur_tone("NaN"), None);
    assert_eq!(blur_tone("inf"), None);
    assert_eq!(blur_tone("loud"), None);
}

#[test]
fn field_names_use_field_pitches() {
    assert_eq!(blur_tone("name").unwrap().frequency_hz, 880.0);
    assert_eq!(blur_tone("Major").unwrap().frequency_hz, 784.0);
    assert_eq!(blur_tone("year").unwrap().frequency_hz, 698.0);
    assert_eq!(blur_tone("tags").unwrap().frequency_hz, 988.0);
}

#[test]
fn volume_input_parsing() {
    assert_eq!(parse_volume_input("0.45"), Some(0.45));
    assert_eq!(parse_volume_input("1.5"), Some(1.5));
    assert_eq!(parse_volume_input(""), None);
    assert_eq!(parse_volume_input("NaN"), None);
}

#[test]
fn aria_pressed_strings() {
    assert_eq!(aria_pressed(true), "true");
    assert_eq!(aria_pressed(false), "false");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn control_ids_are_distinct() {
    let ids = [SOUND_TOGGLE_ID, SOUND_VOLUME_ID, KEYPRESS_SHIMMER_ID];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(BLUR_ATTR.starts_with("data-"));
    assert!(SHIMMER_ATTR.starts_with("data-"));
}
