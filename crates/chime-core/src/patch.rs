use crate::constants::{
    ATTACK, DEFAULT_TONE_DURATION, DEFAULT_TONE_HZ, ENVELOPE_FLOOR, LOWPASS_MAX_HZ, LOWPASS_RATIO,
    OVERTONE_RATIO, STOP_TAIL,
};

/// Oscillator shape. The chime only needs a smooth body and a brighter
/// overtone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

impl Waveform {
    /// Sample the waveform at a normalized phase (cycles; only the fractional
    /// part matters). Output is in \[-1, 1\].
    pub fn sample(self, phase: f64) -> f32 {
        let t = phase - phase.floor();
        match self {
            Waveform::Sine => (t * std::f64::consts::TAU).sin() as f32,
            Waveform::Triangle => {
                let v = if t < 0.25 {
                    4.0 * t
                } else if t < 0.75 {
                    2.0 - 4.0 * t
                } else {
                    4.0 * t - 4.0
                };
                v as f32
            }
        }
    }
}

/// What a caller asks for: pitch, length and an optional explicit gain.
/// When `gain` is `None` the engine derives it from the master volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub duration_sec: f64,
    pub gain: Option<f32>,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_TONE_HZ,
            duration_sec: DEFAULT_TONE_DURATION,
            gain: None,
        }
    }
}

impl ToneSpec {
    pub fn at(frequency_hz: f32) -> Self {
        Self {
            frequency_hz,
            ..Self::default()
        }
    }

    /// Replace any pitch or length that is not finite and positive with the
    /// neutral default, and drop an unusable explicit gain.
    pub fn sanitized(self) -> Self {
        let default = Self::default();
        Self {
            frequency_hz: if self.frequency_hz.is_finite() && self.frequency_hz > 0.0 {
                self.frequency_hz
            } else {
                default.frequency_hz
            },
            duration_sec: if self.duration_sec.is_finite() && self.duration_sec > 0.0 {
                self.duration_sec
            } else {
                default.duration_sec
            },
            gain: self.gain.filter(|g| g.is_finite() && *g >= 0.0),
        }
    }
}

/// One oscillator feeding the shared envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partial {
    pub waveform: Waveform,
    pub frequency_hz: f32,
}

/// Attack/decay envelope with exponential segments, expressed relative to the
/// moment the tone starts.
///
/// `floor -> peak` over `attack`, then `peak -> floor` until `decay_end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub floor: f32,
    pub peak: f32,
    pub attack: f64,
    pub decay_end: f64,
}

impl Envelope {
    pub fn pluck(gain: f32, duration_sec: f64) -> Self {
        Self {
            floor: ENVELOPE_FLOOR,
            peak: gain.max(ENVELOPE_FLOOR),
            attack: ATTACK,
            decay_end: duration_sec.max(ATTACK),
        }
    }

    /// Amplitude at `t` seconds after the start, following the same
    /// exponential interpolation as WebAudio's `exponentialRampToValueAtTime`.
    pub fn amplitude_at(&self, t: f64) -> f32 {
        if t <= 0.0 {
            self.floor
        } else if t < self.attack {
            exp_ramp(self.floor, self.peak, t / self.attack)
        } else if t < self.decay_end {
            let span = self.decay_end - self.attack;
            if span <= 0.0 {
                return self.floor;
            }
            exp_ramp(self.peak, self.floor, (t - self.attack) / span)
        } else {
            self.floor
        }
    }
}

#[inline]
fn exp_ramp(from: f32, to: f32, progress: f64) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    (from as f64 * (to as f64 / from as f64).powf(p)) as f32
}

/// Fully resolved description of one chime voice, ready for a device to
/// realise: oscillators -> envelope -> low-pass -> output.
#[derive(Clone, Debug, PartialEq)]
pub struct TonePatch {
    pub partials: [Partial; 2],
    pub envelope: Envelope,
    pub lowpass_hz: f32,
    /// Seconds after start at which the oscillators are stopped.
    pub stop_after: f64,
}

impl TonePatch {
    pub fn chime(frequency_hz: f32, duration_sec: f64, gain: f32) -> Self {
        Self {
            partials: [
                Partial {
                    waveform: Waveform::Sine,
                    frequency_hz,
                },
                Partial {
                    waveform: Waveform::Triangle,
                    frequency_hz: (frequency_hz * OVERTONE_RATIO).round(),
                },
            ],
            envelope: Envelope::pluck(gain, duration_sec),
            lowpass_hz: (frequency_hz * LOWPASS_RATIO).min(LOWPASS_MAX_HZ),
            stop_after: duration_sec + STOP_TAIL,
        }
    }

    pub fn fundamental_hz(&self) -> f32 {
        self.partials[0].frequency_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overtone_is_rounded_and_detuned() {
        let p = TonePatch::chime(880.0, 0.22, 0.27);
        assert_eq!(p.partials[0].waveform, Waveform::Sine);
        assert_eq!(p.partials[0].frequency_hz, 880.0);
        assert_eq!(p.partials[1].waveform, Waveform::Triangle);
        // 880 * 1.997 = 1757.36
        assert_eq!(p.partials[1].frequency_hz, 1757.0);
    }

    #[test]
    fn lowpass_is_capped() {
        assert_eq!(TonePatch::chime(392.0, 0.16, 0.2).lowpass_hz, 2352.0);
        assert_eq!(TonePatch::chime(1244.0, 0.16, 0.2).lowpass_hz, 7464.0);
        assert_eq!(TonePatch::chime(2000.0, 0.1, 0.2).lowpass_hz, 8000.0);
    }

    #[test]
    fn oscillators_stop_after_a_short_tail() {
        let p = TonePatch::chime(740.0, 0.08, 0.06);
        assert!((p.stop_after - 0.10).abs() < 1e-12);
    }

    #[test]
    fn envelope_peak_never_below_floor() {
        let env = Envelope::pluck(0.0, 0.2);
        assert_eq!(env.peak, ENVELOPE_FLOOR);
        assert_eq!(env.amplitude_at(0.1), ENVELOPE_FLOOR);
    }

    #[test]
    fn envelope_shape_is_a_pluck() {
        let env = Envelope::pluck(0.27, 0.22);
        assert_eq!(env.amplitude_at(0.0), ENVELOPE_FLOOR);
        assert!((env.amplitude_at(ATTACK) - 0.27).abs() < 1e-6);
        let early = env.amplitude_at(0.05);
        let late = env.amplitude_at(0.2);
        assert!(early > late);
        assert!(late > ENVELOPE_FLOOR);
        assert_eq!(env.amplitude_at(0.3), ENVELOPE_FLOOR);
        // halfway through the attack is the geometric mean
        let mid = env.amplitude_at(ATTACK / 2.0);
        assert!((mid - (ENVELOPE_FLOOR * 0.27).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn waveforms_hit_their_extremes() {
        assert!(Waveform::Sine.sample(0.25) > 0.999);
        assert!(Waveform::Triangle.sample(0.25) > 0.999);
        assert!(Waveform::Triangle.sample(0.75) < -0.999);
        assert!(Waveform::Triangle.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Triangle.sample(1.25) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn default_spec_is_the_neutral_tone() {
        let spec = ToneSpec::default();
        assert_eq!(spec.frequency_hz, 880.0);
        assert_eq!(spec.duration_sec, 0.22);
        assert_eq!(spec.gain, None);
    }

    #[test]
    fn sanitized_spec_keeps_valid_values() {
        let spec = ToneSpec {
            frequency_hz: 440.0,
            duration_sec: 0.5,
            gain: Some(0.1),
        };
        assert_eq!(spec.sanitized(), spec);
    }

    #[test]
    fn sanitized_spec_replaces_unusable_values() {
        let spec = ToneSpec {
            frequency_hz: f32::NAN,
            duration_sec: -1.0,
            gain: Some(f32::INFINITY),
        }
        .sanitized();
        assert_eq!(spec, ToneSpec::default());
        assert_eq!(ToneSpec::at(0.0).sanitized().frequency_hz, 880.0);
        assert_eq!(
            ToneSpec { duration_sec: f64::INFINITY, ..ToneSpec::at(440.0) }
                .sanitized()
                .duration_sec,
            0.22
        );
    }
}
