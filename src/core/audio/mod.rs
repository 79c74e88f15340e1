//! Audio output through rodio: one output stream per session, one detached sink per note.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use crate::core::note::pitch_to_frequency;
use crate::core::sink::{NoteDuration, PlaybackSink};
use crate::error::TrainerError;

/// Short ramp at the start of each note so it does not click.
const FADE_IN: Duration = Duration::from_millis(10);

/// The open output stream. Dropping it silences every note.
pub struct AudioOutput {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    pub device_name: String,
}

impl AudioOutput {
    /// Open the default output device.
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        log::info!("Using audio host: {}", host.id().name());

        let device = host.default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
        let device_name = device.name().unwrap_or_else(|_| "(unnamed device)".to_string());
        log::info!("Using output device: {}", device_name);

        let (stream, stream_handle) = OutputStream::try_from_device(&device)
            .context("Failed to open audio output stream")?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            device_name,
        })
    }

    /// A playback sink that sounds notes on this stream.
    pub fn playback(&self, tempo_bpm: f32, volume: Arc<RwLock<f32>>) -> RodioPlayback {
        RodioPlayback {
            stream_handle: self.stream_handle.clone(),
            tempo_bpm,
            volume,
        }
    }
}

/// Build the sound for one note: a sine at the pitch's frequency, cut to length with a
/// fade at both ends.
pub fn note_source(pitch: i32, seconds: f32) -> crate::error::Result<impl Source<Item = f32> + Send> {
    if !(0..=127).contains(&pitch) {
        return Err(TrainerError::InvalidArgument(format!("pitch {} is outside 0..=127", pitch)));
    }
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(TrainerError::InvalidArgument(format!("note length must be positive (got {})", seconds)));
    }

    let mut source = SineWave::new(pitch_to_frequency(pitch)).take_duration(Duration::from_secs_f32(seconds));
    source.set_filter_fadeout();
    Ok(source.fade_in(FADE_IN))
}

/// Playback sink backed by rodio. Each note gets its own sink that plays out and is dropped.
#[derive(Clone)]
pub struct RodioPlayback {
    stream_handle: OutputStreamHandle,
    tempo_bpm: f32,
    volume: Arc<RwLock<f32>>,
}

impl PlaybackSink for RodioPlayback {
    fn play(&self, pitch: i32, duration: NoteDuration) -> crate::error::Result<()> {
        let source = note_source(pitch, duration.seconds(self.tempo_bpm))?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| TrainerError::Playback(e.to_string()))?;

        sink.set_volume(self.volume.read().map(|v| *v).unwrap_or(0.5));
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

/// Playback sink used when no output device could be opened.
pub struct NoAudio;

impl PlaybackSink for NoAudio {
    fn play(&self, _pitch: i32, _duration: NoteDuration) -> crate::error::Result<()> {
        Err(TrainerError::Playback("no audio output device".to_string()))
    }
}
