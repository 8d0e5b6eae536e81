use crate::render::Mixer;
use chime_core::{AudioDevice, DeviceError, DeviceResult, TonePatch};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex, MutexGuard};

/// Default cpal output, mixing chimes in software on the audio thread.
pub struct CpalDevice {
    mixer: Arc<Mutex<Mixer>>,
    // Dropping the stream stops playback.
    _stream: cpal::Stream,
}

fn lock(mixer: &Mutex<Mixer>) -> MutexGuard<'_, Mixer> {
    mixer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CpalDevice {
    pub fn connect() -> DeviceResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(DeviceError::Unsupported)?;
        let config = device
            .default_output_config()
            .map_err(|e| DeviceError::Rejected(e.to_string()))?;
        let sample_format = config.sample_format();
        let stream_config: cpal::StreamConfig = config.into();
        let mixer = Arc::new(Mutex::new(Mixer::new(stream_config.sample_rate.0 as f32)));

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, &mixer),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, &mixer),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, &mixer),
            other => {
                return Err(DeviceError::Rejected(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }
        .map_err(|e| DeviceError::Rejected(e.to_string()))?;
        stream
            .play()
            .map_err(|e| DeviceError::Rejected(e.to_string()))?;

        log::info!(
            "[audio] output '{}' at {} Hz, {} ch",
            device.name().unwrap_or_else(|_| "unknown".into()),
            stream_config.sample_rate.0,
            stream_config.channels
        );
        Ok(Self {
            mixer,
            _stream: stream,
        })
    }
}

impl AudioDevice for CpalDevice {
    fn play(&self, patch: &TonePatch) -> DeviceResult<()> {
        lock(&self.mixer).add(patch);
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mixer: &Arc<Mutex<Mixer>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mixer = Arc::clone(mixer);
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut mixer = lock(&mixer);
            for frame in data.chunks_mut(channels.max(1)) {
                let value = T::from_sample(mixer.next_sample());
                for out in frame.iter_mut() {
                    *out = value;
                }
            }
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )
}
