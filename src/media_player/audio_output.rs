// SPDX-License-Identifier: MPL-2.0
//! Audio output through the system's default device, using cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

/// Sample rate and channel count the decoder resamples to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug)]
pub enum AudioOutputCommand {
    Play(AudioSamples),
    Pause,
    Resume,
    /// Pause and drop everything still buffered.
    Stop,
}

/// State read by the device callback.
struct SharedState {
    /// Volume as the bits of an f32.
    volume_bits: AtomicU32,
    paused: AtomicBool,
}

impl SharedState {
    fn new(volume: f32) -> Self {
        Self {
            volume_bits: AtomicU32::new(volume.to_bits()),
            paused: AtomicBool::new(false),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }
}

/// Audio output stream on the default device.
pub struct AudioOutput {
    command_tx: mpsc::UnboundedSender<AudioOutputCommand>,
    config: AudioOutputConfig,
    /// Kept alive for as long as playback runs.
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device and starts its stream.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no output device, its configuration cannot
    /// be read, or the stream fails to start.
    pub fn new(volume: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Playback("no audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Playback(format!("failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let channels = supported_config.channels();

        let shared_state = Arc::new(SharedState::new(volume));
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<AudioOutputCommand>();

        // About one second of audio
        let max_buffer_size = (sample_rate as usize) * (channels as usize);
        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_size)));

        let buffer_for_task = Arc::clone(&buffer);
        let shared_for_task = Arc::clone(&shared_state);
        tokio::spawn(async move {
            while let Some(cmd) = command_rx.recv().await {
                match cmd {
                    AudioOutputCommand::Play(samples) => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            enqueue(&mut buf, &samples, max_buffer_size);
                        }
                    }
                    AudioOutputCommand::Pause => shared_for_task.set_paused(true),
                    AudioOutputCommand::Resume => shared_for_task.set_paused(false),
                    AudioOutputCommand::Stop => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                        shared_for_task.set_paused(true);
                    }
                }
            }
        });

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &supported_config.into(), buffer, shared_state)?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &supported_config.into(), buffer, shared_state)?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &supported_config.into(), buffer, shared_state)?
            }
            _ => return Err(Error::Playback("unsupported audio sample format".to_string())),
        };

        stream
            .play()
            .map_err(|e| Error::Playback(format!("failed to start audio stream: {e}")))?;

        Ok(Self {
            command_tx,
            config: AudioOutputConfig {
                sample_rate,
                channels,
            },
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if shared_state.is_paused() {
                        data.fill(T::from_sample(0.0f32));
                        return;
                    }
                    let Ok(mut buf) = buffer.lock() else {
                        data.fill(T::from_sample(0.0f32));
                        return;
                    };
                    fill(data, &mut buf, shared_state.volume());
                },
                |err| {
                    tracing::warn!(error = %err, "audio output error");
                },
                None,
            )
            .map_err(|e| Error::Playback(format!("failed to build audio stream: {e}")))
    }

    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }

    fn send_command(&self, command: AudioOutputCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Playback("audio output channel closed".into()))
    }

    /// Queues samples for playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio output channel is closed.
    pub fn play(&self, samples: AudioSamples) -> Result<()> {
        self.send_command(AudioOutputCommand::Play(samples))
    }

    /// # Errors
    ///
    /// Returns an error if the audio output channel is closed.
    pub fn pause(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Pause)
    }

    /// # Errors
    ///
    /// Returns an error if the audio output channel is closed.
    pub fn resume(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Resume)
    }

    /// # Errors
    ///
    /// Returns an error if the audio output channel is closed.
    pub fn stop(&self) -> Result<()> {
        self.send_command(AudioOutputCommand::Stop)
    }
}

/// Appends as many samples as fit under `max_len`; the rest is dropped.
fn enqueue(buf: &mut Vec<f32>, samples: &[f32], max_len: usize) {
    let room = max_len.saturating_sub(buf.len());
    buf.extend_from_slice(&samples[..samples.len().min(room)]);
}

/// Moves buffered samples into the device buffer, padding with silence.
///
/// Volume goes through a quadratic curve; the result is clamped just below
/// 1.0 since i16 conversion overflows at exactly 1.0.
fn fill<T: cpal::Sample + cpal::FromSample<f32>>(data: &mut [T], buf: &mut Vec<f32>, volume: f32) {
    let gain = volume * volume;
    let consumed = data.len().min(buf.len());

    for (out, sample) in data.iter_mut().zip(buf.iter()) {
        *out = T::from_sample((sample * gain).clamp(-1.0, 0.999_999_9));
    }
    for out in &mut data[consumed..] {
        *out = T::from_sample(0.0f32);
    }

    buf.drain(..consumed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_state_starts_unpaused_with_volume() {
        let state = SharedState::new(0.8);
        assert!((state.volume() - 0.8).abs() < 0.001);
        assert!(!state.is_paused());

        state.set_paused(true);
        assert!(state.is_paused());
    }

    #[test]
    fn enqueue_respects_capacity() {
        let mut buf = vec![0.0; 6];
        enqueue(&mut buf, &[0.5; 8], 10);
        assert_eq!(buf.len(), 10);

        enqueue(&mut buf, &[0.5; 4], 10);
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn fill_applies_perceptual_volume_and_drains() {
        let mut buf = vec![1.0, -1.0, 0.5];
        let mut data = [0.0f32; 2];
        fill(&mut data, &mut buf, 0.5);

        assert!((data[0] - 0.25).abs() < 1e-6);
        assert!((data[1] + 0.25).abs() < 1e-6);
        assert_eq!(buf, vec![0.5]);
    }

    #[test]
    fn fill_pads_with_silence_when_starved() {
        let mut buf = vec![0.5];
        let mut data = [1.0f32; 3];
        fill(&mut data, &mut buf, 1.0);

        assert!((data[0] - 0.5).abs() < 1e-6);
        assert_eq!(&data[1..], &[0.0, 0.0]);
        assert!(buf.is_empty());
    }

    #[test]
    fn fill_clamps_loud_samples() {
        let mut buf = vec![2.0];
        let mut data = [0i16; 1];
        fill(&mut data, &mut buf, 1.0);
        assert_eq!(data[0], i16::MAX);
    }
}
