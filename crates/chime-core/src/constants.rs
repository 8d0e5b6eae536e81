// Tuning constants for the tone engine. Times are in seconds unless the
// name says otherwise.

// Persisted preference keys
pub const KEY_ENABLED: &str = "sound-enabled";
pub const KEY_VOLUME: &str = "sound-volume";
pub const KEY_KEYPRESS_SHIMMER: &str = "keypress-shimmer";

// Preference defaults
pub const DEFAULT_ENABLED: bool = true;
pub const DEFAULT_VOLUME: f32 = 0.3;
pub const DEFAULT_KEYPRESS_SHIMMER: bool = false;

// Neutral tone defaults
pub const DEFAULT_TONE_HZ: f32 = 880.0;
pub const DEFAULT_TONE_DURATION: f64 = 0.22;
pub const DEFAULT_TONE_GAIN_SCALE: f32 = 0.9; // fraction of master volume

// Timbre
pub const OVERTONE_RATIO: f32 = 1.997; // slightly flat of an octave
pub const LOWPASS_RATIO: f32 = 6.0; // cutoff relative to the fundamental
pub const LOWPASS_MAX_HZ: f32 = 8000.0;

// Envelope
pub const ENVELOPE_FLOOR: f32 = 0.0001; // exponential ramps cannot reach zero
pub const ATTACK: f64 = 0.005;
pub const STOP_TAIL: f64 = 0.02; // oscillators outlive the decay by this much

// Success dyad (ascending)
pub const SUCCESS_FIRST_HZ: f32 = 932.0;
pub const SUCCESS_FIRST_DURATION: f64 = 0.18;
pub const SUCCESS_FIRST_GAIN_SCALE: f32 = 0.9;
pub const SUCCESS_SECOND_HZ: f32 = 1244.0;
pub const SUCCESS_SECOND_DURATION: f64 = 0.16;
pub const SUCCESS_SECOND_GAIN_SCALE: f32 = 0.8;
pub const SUCCESS_SECOND_DELAY_MS: u64 = 70;

// Delete motif (descending)
pub const DELETE_FIRST_HZ: f32 = 392.0;
pub const DELETE_FIRST_DURATION: f64 = 0.16;
pub const DELETE_FIRST_GAIN_SCALE: f32 = 0.7;
pub const DELETE_SECOND_HZ: f32 = 330.0;
pub const DELETE_SECOND_DURATION: f64 = 0.12;
pub const DELETE_SECOND_GAIN_SCALE: f32 = 0.6;
pub const DELETE_SECOND_DELAY_MS: u64 = 60;

// Keystroke shimmer
pub const SHIMMER_HZ: f32 = 740.0;
pub const SHIMMER_DURATION: f64 = 0.08;
pub const SHIMMER_GAIN_SCALE: f32 = 0.2;
pub const SHIMMER_COOLDOWN_MS: u64 = 300;

// Per-field blur pitches for the roster form
pub const FIELD_NAME_HZ: f32 = 880.0;
pub const FIELD_MAJOR_HZ: f32 = 784.0;
pub const FIELD_YEAR_HZ: f32 = 698.0;
pub const FIELD_TAGS_HZ: f32 = 988.0;
pub const FIELD_SEARCH_HZ: f32 = 880.0;
