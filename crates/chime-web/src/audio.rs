use chime_core::{AudioDevice, DeviceError, DeviceResult, TonePatch, Waveform};
use web_sys as web;

fn graph_err(label: &str, e: wasm_bindgen::JsValue) -> DeviceError {
    log::error!("{} error: {:?}", label, e);
    DeviceError::Graph(format!("{}: {:?}", label, e))
}

/// WebAudio output. Built on the first user gesture so the browser's
/// autoplay policy lets it run.
pub struct WebAudioDevice {
    ctx: web::AudioContext,
}

impl WebAudioDevice {
    pub fn connect() -> DeviceResult<Self> {
        let ctx = web::AudioContext::new()
            .map_err(|e| DeviceError::Rejected(format!("{:?}", e)))?;
        Ok(Self { ctx })
    }
}

impl AudioDevice for WebAudioDevice {
    // oscillators -> envelope gain -> lowpass -> destination
    fn play(&self, patch: &TonePatch) -> DeviceResult<()> {
        let now = self.ctx.current_time();
        let env = &patch.envelope;

        let gain = web::GainNode::new(&self.ctx).map_err(|e| graph_err("GainNode", e))?;
        let param = gain.gain();
        param
            .set_value_at_time(env.floor, now)
            .map_err(|e| graph_err("gain setValueAtTime", e))?;
        param
            .exponential_ramp_to_value_at_time(env.peak, now + env.attack)
            .map_err(|e| graph_err("gain attack ramp", e))?;
        param
            .exponential_ramp_to_value_at_time(env.floor, now + env.decay_end)
            .map_err(|e| graph_err("gain decay ramp", e))?;

        let filter =
            web::BiquadFilterNode::new(&self.ctx).map_err(|e| graph_err("BiquadFilterNode", e))?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(patch.lowpass_hz);

        let mut oscillators = Vec::with_capacity(patch.partials.len());
        for partial in &patch.partials {
            let osc =
                web::OscillatorNode::new(&self.ctx).map_err(|e| graph_err("OscillatorNode", e))?;
            match partial.waveform {
                Waveform::Sine => osc.set_type(web::OscillatorType::Sine),
                Waveform::Triangle => osc.set_type(web::OscillatorType::Triangle),
            }
            osc.frequency().set_value(partial.frequency_hz);
            osc.connect_with_audio_node(&gain)
                .map_err(|e| graph_err("connect", e))?;
            oscillators.push(osc);
        }
        gain.connect_with_audio_node(&filter)
            .map_err(|e| graph_err("connect", e))?;
        filter
            .connect_with_audio_node(&self.ctx.destination())
            .map_err(|e| graph_err("connect", e))?;

        for osc in &oscillators {
            osc.start_with_when(now)
                .map_err(|e| graph_err("oscillator start", e))?;
            osc.stop_with_when(now + patch.stop_after)
                .map_err(|e| graph_err("oscillator stop", e))?;
        }
        Ok(())
    }
}
