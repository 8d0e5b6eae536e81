// Software realisation of a TonePatch for devices without a node graph.

use biquad::{Biquad, Coefficients, DirectForm1, ToHertz, Type, Q_BUTTERWORTH_F32};
use chime_core::{Envelope, TonePatch, Waveform};

// Keep the filter comfortably below Nyquist
const MAX_CUTOFF_FRACTION: f32 = 0.45;

#[derive(Clone, Copy)]
struct Oscillator {
    waveform: Waveform,
    phase: f64,     // cycles
    phase_inc: f64, // cycles per sample
}

pub struct RenderedVoice {
    oscillators: [Oscillator; 2],
    envelope: Envelope,
    filter: Option<DirectForm1<f32>>,
    t: f64,
    dt: f64,
    stop_after: f64,
}

impl RenderedVoice {
    pub fn new(patch: &TonePatch, sample_rate: f32) -> Self {
        let sr = sample_rate as f64;
        let oscillators = patch.partials.map(|p| Oscillator {
            waveform: p.waveform,
            phase: 0.0,
            phase_inc: p.frequency_hz as f64 / sr,
        });
        let cutoff = patch.lowpass_hz.min(sample_rate * MAX_CUTOFF_FRACTION);
        let filter = Coefficients::<f32>::from_params(
            Type::LowPass,
            sample_rate.hz(),
            cutoff.hz(),
            Q_BUTTERWORTH_F32,
        )
        .map(DirectForm1::<f32>::new)
        .map_err(|e| log::warn!("[render] lowpass bypassed: {:?}", e))
        .ok();
        Self {
            oscillators,
            envelope: patch.envelope,
            filter,
            t: 0.0,
            dt: 1.0 / sr,
            stop_after: patch.stop_after,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.t >= self.stop_after
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }
        let mut sum = 0.0f32;
        for osc in &mut self.oscillators {
            sum += osc.waveform.sample(osc.phase);
            osc.phase += osc.phase_inc;
            if osc.phase >= 1.0 {
                osc.phase -= 1.0;
            }
        }
        let x = sum * self.envelope.amplitude_at(self.t);
        self.t += self.dt;
        match &mut self.filter {
            Some(f) => f.run(x),
            None => x,
        }
    }
}

/// Sums active voices into a mono signal.
pub struct Mixer {
    sample_rate: f32,
    voices: Vec<RenderedVoice>,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            voices: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn add(&mut self, patch: &TonePatch) {
        self.voices.push(RenderedVoice::new(patch, self.sample_rate));
    }

    pub fn next_sample(&mut self) -> f32 {
        let mut out = 0.0f32;
        let mut i = 0usize;
        while i < self.voices.len() {
            out += self.voices[i].next_sample();
            if self.voices[i].is_finished() {
                self.voices.swap_remove(i);
                continue;
            }
            i += 1;
        }
        out.tanh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    fn render(patch: &TonePatch, seconds: f64) -> Vec<f32> {
        let mut mixer = Mixer::new(SR);
        mixer.add(patch);
        (0..(seconds * SR as f64) as usize)
            .map(|_| mixer.next_sample())
            .collect()
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn voice_is_silent_after_stop() {
        let patch = TonePatch::chime(880.0, 0.22, 0.27);
        let out = render(&patch, 0.5);
        let stop_sample = (patch.stop_after * SR as f64).ceil() as usize + 1;
        assert!(out[stop_sample..].iter().all(|s| *s == 0.0));
        assert!(peak(&out[..stop_sample]) > 0.05);
    }

    #[test]
    fn mixer_drops_finished_voices() {
        let mut mixer = Mixer::new(SR);
        mixer.add(&TonePatch::chime(740.0, 0.08, 0.06));
        mixer.add(&TonePatch::chime(932.0, 0.18, 0.27));
        assert_eq!(mixer.active_voices(), 2);
        for _ in 0..(0.15 * SR) as usize {
            mixer.next_sample();
        }
        assert_eq!(mixer.active_voices(), 1);
        for _ in 0..(0.2 * SR) as usize {
            mixer.next_sample();
        }
        assert_eq!(mixer.active_voices(), 0);
    }

    #[test]
    fn output_stays_bounded_at_full_volume() {
        let mut mixer = Mixer::new(SR);
        for hz in [932.0, 1244.0, 392.0, 330.0] {
            mixer.add(&TonePatch::chime(hz, 0.2, 1.0));
        }
        for _ in 0..(0.3 * SR) as usize {
            let s = mixer.next_sample();
            assert!(s.is_finite() && s.abs() <= 1.0);
        }
    }

    #[test]
    fn louder_gain_renders_louder() {
        let quiet = peak(&render(&TonePatch::chime(440.0, 0.2, 0.05), 0.25));
        let loud = peak(&render(&TonePatch::chime(440.0, 0.2, 0.5), 0.25));
        assert!(loud > quiet * 3.0);
    }

    #[test]
    fn low_sample_rate_still_filters() {
        // 8000 Hz cutoff would exceed Nyquist at 11.025 kHz
        let voice = RenderedVoice::new(&TonePatch::chime(2000.0, 0.1, 0.2), 11_025.0);
        assert!(voice.filter.is_some());
    }
}
