//! Catalog of named sound events.
//!
//! A cue expands into one or two notes. Each note carries its offset from the
//! triggering call and a gain expressed as a fraction of the master volume,
//! so the catalog stays independent of the current preferences.

use crate::constants::*;
use crate::patch::TonePatch;
use smallvec::{smallvec, SmallVec};
use std::time::Duration;

/// Roster form fields that chime when they lose focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Search,
    Name,
    Major,
    Year,
    Tags,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Search,
        Field::Name,
        Field::Major,
        Field::Year,
        Field::Tags,
    ];

    pub fn frequency_hz(self) -> f32 {
        match self {
            Field::Search => FIELD_SEARCH_HZ,
            Field::Name => FIELD_NAME_HZ,
            Field::Major => FIELD_MAJOR_HZ,
            Field::Year => FIELD_YEAR_HZ,
            Field::Tags => FIELD_TAGS_HZ,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Search => "search",
            Field::Name => "name",
            Field::Major => "major",
            Field::Year => "year",
            Field::Tags => "tags",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Plain neutral tone at the default pitch.
    Neutral,
    FieldBlur(Field),
    Success,
    Delete,
    Shimmer,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Neutral => "neutral",
            Cue::FieldBlur(field) => field.name(),
            Cue::Success => "success",
            Cue::Delete => "delete",
            Cue::Shimmer => "shimmer",
        }
    }

    /// Parse a cue by name; field names map to their blur cue.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "neutral" => Some(Cue::Neutral),
            "success" => Some(Cue::Success),
            "delete" => Some(Cue::Delete),
            "shimmer" => Some(Cue::Shimmer),
            other => Field::from_name(other).map(Cue::FieldBlur),
        }
    }

    pub fn notes(self) -> SmallVec<[CueNote; 2]> {
        match self {
            Cue::Neutral => smallvec![CueNote::now(
                DEFAULT_TONE_HZ,
                DEFAULT_TONE_DURATION,
                DEFAULT_TONE_GAIN_SCALE
            )],
            Cue::FieldBlur(field) => smallvec![CueNote::now(
                field.frequency_hz(),
                DEFAULT_TONE_DURATION,
                DEFAULT_TONE_GAIN_SCALE
            )],
            Cue::Success => smallvec![
                CueNote::now(
                    SUCCESS_FIRST_HZ,
                    SUCCESS_FIRST_DURATION,
                    SUCCESS_FIRST_GAIN_SCALE
                ),
                CueNote::now(
                    SUCCESS_SECOND_HZ,
                    SUCCESS_SECOND_DURATION,
                    SUCCESS_SECOND_GAIN_SCALE
                )
                .after(Duration::from_millis(SUCCESS_SECOND_DELAY_MS)),
            ],
            Cue::Delete => smallvec![
                CueNote::now(
                    DELETE_FIRST_HZ,
                    DELETE_FIRST_DURATION,
                    DELETE_FIRST_GAIN_SCALE
                ),
                CueNote::now(
                    DELETE_SECOND_HZ,
                    DELETE_SECOND_DURATION,
                    DELETE_SECOND_GAIN_SCALE
                )
                .after(Duration::from_millis(DELETE_SECOND_DELAY_MS)),
            ],
            Cue::Shimmer => smallvec![CueNote::now(
                SHIMMER_HZ,
                SHIMMER_DURATION,
                SHIMMER_GAIN_SCALE
            )],
        }
    }
}

/// One note of a cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CueNote {
    pub offset: Duration,
    pub frequency_hz: f32,
    pub duration_sec: f64,
    pub gain_scale: f32,
}

impl CueNote {
    const fn now(frequency_hz: f32, duration_sec: f64, gain_scale: f32) -> Self {
        Self {
            offset: Duration::ZERO,
            frequency_hz,
            duration_sec,
            gain_scale,
        }
    }

    const fn after(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    pub fn patch(&self, volume: f32) -> TonePatch {
        TonePatch::chime(self.frequency_hz, self.duration_sec, volume * self.gain_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_an_ascending_dyad() {
        let notes = Cue::Success.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].offset, Duration::ZERO);
        assert_eq!(notes[1].offset, Duration::from_millis(70));
        assert!(notes[1].frequency_hz > notes[0].frequency_hz);
        assert_eq!(notes[0].frequency_hz, 932.0);
        assert_eq!(notes[1].frequency_hz, 1244.0);
    }

    #[test]
    fn delete_is_a_descending_pair() {
        let notes = Cue::Delete.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].offset, Duration::from_millis(60));
        assert!(notes[1].frequency_hz < notes[0].frequency_hz);
        assert_eq!(notes[0].gain_scale, 0.7);
        assert_eq!(notes[1].gain_scale, 0.6);
    }

    #[test]
    fn single_note_cues_play_immediately() {
        for cue in [Cue::Neutral, Cue::Shimmer, Cue::FieldBlur(Field::Year)] {
            let notes = cue.notes();
            assert_eq!(notes.len(), 1, "{cue:?}");
            assert_eq!(notes[0].offset, Duration::ZERO);
        }
    }

    #[test]
    fn field_pitches() {
        assert_eq!(Field::Name.frequency_hz(), 880.0);
        assert_eq!(Field::Major.frequency_hz(), 784.0);
        assert_eq!(Field::Year.frequency_hz(), 698.0);
        assert_eq!(Field::Tags.frequency_hz(), 988.0);
    }

    #[test]
    fn names_round_trip() {
        for cue in [Cue::Neutral, Cue::Success, Cue::Delete, Cue::Shimmer] {
            assert_eq!(Cue::from_name(cue.name()), Some(cue));
        }
        for field in Field::ALL {
            assert_eq!(Cue::from_name(field.name()), Some(Cue::FieldBlur(field)));
        }
        assert_eq!(Cue::from_name(" Success "), Some(Cue::Success));
        assert_eq!(Cue::from_name("fanfare"), None);
    }

    #[test]
    fn note_gain_scales_with_volume() {
        let note = Cue::Shimmer.notes()[0];
        let patch = note.patch(0.5);
        assert!((patch.envelope.peak - 0.1).abs() < 1e-6);
        assert_eq!(patch.fundamental_hz(), 740.0);
    }
}
