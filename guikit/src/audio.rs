//! Sound feedback
//!
//! [`SoundBuffer`]s are decoded once and shared by reference count. Every
//! interactive widget owns one [`Voice`]: starting a sound on a voice that is
//! still playing restarts it from the beginning.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to read sound file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to decode sound: {0}")]
    DecodeError(#[from] rodio::decoder::DecoderError),
    #[error("Failed to open audio output: {0}")]
    StreamError(#[from] rodio::StreamError),
    #[error("Failed to start playback: {0}")]
    PlayError(#[from] rodio::PlayError),
}

struct SoundData {
    channels: u16,
    sample_rate: u32,
    samples: Vec<f32>,
}

impl SoundData {
    fn duration(&self) -> Duration {
        let frames = self.samples.len() as f64 / self.channels as f64;
        Duration::from_secs_f64(frames / self.sample_rate as f64)
    }
}

/// Decoded PCM samples, shared between any number of widgets.
#[derive(Clone)]
pub struct SoundBuffer(Arc<SoundData>);

impl SoundBuffer {
    /// Decode a sound file (wav, ogg, flac, mp3).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let decoder = Decoder::new(BufReader::new(file))?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples().collect();
        log::info!(
            "Loaded sound {} ({} samples, {} ch, {} Hz)",
            path.display(),
            samples.len(),
            channels,
            sample_rate
        );
        Ok(Self::from_samples(channels, sample_rate, samples))
    }

    /// Wrap interleaved samples already in memory.
    pub fn from_samples(channels: u16, sample_rate: u32, samples: Vec<f32>) -> Self {
        Self(Arc::new(SoundData {
            channels: channels.max(1),
            sample_rate: sample_rate.max(1),
            samples,
        }))
    }

    pub fn channels(&self) -> u16 {
        self.0.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.0.sample_rate
    }

    pub fn duration(&self) -> Duration {
        self.0.duration()
    }

    /// True when both handles share the same samples.
    pub fn ptr_eq(&self, other: &SoundBuffer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Playback source reading the shared samples in place.
    fn source(&self) -> SharedSamples {
        SharedSamples {
            data: Arc::clone(&self.0),
            next: 0,
        }
    }
}

/// Cursor over a [`SoundBuffer`]'s samples; starting a play copies no PCM data.
struct SharedSamples {
    data: Arc<SoundData>,
    next: usize,
}

impl Iterator for SharedSamples {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.data.samples.get(self.next).copied()?;
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.data.samples.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl Source for SharedSamples {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.data.channels
    }

    fn sample_rate(&self) -> u32 {
        self.data.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.data.duration())
    }
}

impl std::fmt::Debug for SoundBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBuffer")
            .field("channels", &self.0.channels)
            .field("sample_rate", &self.0.sample_rate)
            .field("samples", &self.0.samples.len())
            .finish()
    }
}

/// The default audio device. Keep it alive for as long as sounds should play.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: AudioHandle,
}

impl AudioOutput {
    pub fn open_default() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle: AudioHandle(handle),
        })
    }

    pub fn handle(&self) -> AudioHandle {
        self.handle.clone()
    }
}

/// Cloneable handle onto an [`AudioOutput`].
#[derive(Clone)]
pub struct AudioHandle(OutputStreamHandle);

/// One playback channel owned by a widget.
///
/// Without an output handle the voice still records which buffer is loaded
/// and how often it was started, it just makes no noise.
#[derive(Default)]
pub struct Voice {
    output: Option<AudioHandle>,
    loaded: Option<SoundBuffer>,
    sink: Option<Sink>,
    plays: u32,
}

impl Voice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_output(&mut self, output: &AudioHandle) {
        self.output = Some(output.clone());
    }

    /// Load `buffer` unless it is already loaded, then start it from the beginning.
    pub fn play(&mut self, buffer: &SoundBuffer) {
        let already_loaded = self.loaded.as_ref().is_some_and(|b| b.ptr_eq(buffer));
        if !already_loaded {
            self.loaded = Some(buffer.clone());
        }
        self.plays += 1;

        let Some(output) = &self.output else {
            return;
        };
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        match Sink::try_new(&output.0) {
            Ok(sink) => {
                sink.append(buffer.source());
                self.sink = Some(sink);
            }
            Err(e) => log::warn!("Failed to start sound: {}", AudioError::from(e)),
        }
    }

    /// Play `buffer` if one is configured for this transition.
    pub fn play_opt(&mut self, buffer: Option<&SoundBuffer>) {
        if let Some(buffer) = buffer {
            self.play(buffer);
        }
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// The buffer most recently played on this voice.
    pub fn loaded(&self) -> Option<&SoundBuffer> {
        self.loaded.as_ref()
    }

    /// How many times a sound was started on this voice.
    pub fn play_count(&self) -> u32 {
        self.plays
    }
}

impl std::fmt::Debug for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voice")
            .field("has_output", &self.output.is_some())
            .field("loaded", &self.loaded)
            .field("plays", &self.plays)
            .finish()
    }
}

/// Sounds for buttons and sliders. Unset entries stay silent.
#[derive(Debug, Clone, Default)]
pub struct SoundSet {
    pub click: Option<SoundBuffer>,
    pub release: Option<SoundBuffer>,
    pub hover_start: Option<SoundBuffer>,
    pub hover_end: Option<SoundBuffer>,
}

impl SoundSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_click(mut self, buffer: SoundBuffer) -> Self {
        self.click = Some(buffer);
        self
    }

    pub fn with_release(mut self, buffer: SoundBuffer) -> Self {
        self.release = Some(buffer);
        self
    }

    pub fn with_hover_start(mut self, buffer: SoundBuffer) -> Self {
        self.hover_start = Some(buffer);
        self
    }

    pub fn with_hover_end(mut self, buffer: SoundBuffer) -> Self {
        self.hover_end = Some(buffer);
        self
    }

    /// Take every sound `other` sets, keep the rest.
    pub fn merge(&mut self, other: SoundSet) {
        if other.click.is_some() {
            self.click = other.click;
        }
        if other.release.is_some() {
            self.release = other.release;
        }
        if other.hover_start.is_some() {
            self.hover_start = other.hover_start;
        }
        if other.hover_end.is_some() {
            self.hover_end = other.hover_end;
        }
    }
}

/// Sounds for checkboxes. Unset entries stay silent.
#[derive(Debug, Clone, Default)]
pub struct CheckSoundSet {
    pub checked: Option<SoundBuffer>,
    pub unchecked: Option<SoundBuffer>,
    pub hover_start: Option<SoundBuffer>,
    pub hover_end: Option<SoundBuffer>,
}

impl CheckSoundSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checked(mut self, buffer: SoundBuffer) -> Self {
        self.checked = Some(buffer);
        self
    }

    pub fn with_unchecked(mut self, buffer: SoundBuffer) -> Self {
        self.unchecked = Some(buffer);
        self
    }

    pub fn with_hover_start(mut self, buffer: SoundBuffer) -> Self {
        self.hover_start = Some(buffer);
        self
    }

    pub fn with_hover_end(mut self, buffer: SoundBuffer) -> Self {
        self.hover_end = Some(buffer);
        self
    }

    /// Take every sound `other` sets, keep the rest.
    pub fn merge(&mut self, other: CheckSoundSet) {
        if other.checked.is_some() {
            self.checked = other.checked;
        }
        if other.unchecked.is_some() {
            self.unchecked = other.unchecked;
        }
        if other.hover_start.is_some() {
            self.hover_start = other.hover_start;
        }
        if other.hover_end.is_some() {
            self.hover_end = other.hover_end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beep() -> SoundBuffer {
        SoundBuffer::from_samples(1, 100, vec![0.0; 50])
    }

    #[test]
    fn test_duration() {
        let stereo = SoundBuffer::from_samples(2, 100, vec![0.0; 100]);
        assert_eq!(stereo.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_source_reads_shared_samples() {
        let mut samples = vec![0.0; 100];
        samples[0] = 0.25;
        samples[99] = -0.5;
        let sound = SoundBuffer::from_samples(2, 100, samples.clone());
        let source = sound.source();
        assert!(Arc::ptr_eq(&source.data, &sound.0));
        assert_eq!(source.channels(), 2);
        assert_eq!(source.total_duration(), Some(Duration::from_millis(500)));
        assert_eq!(source.collect::<Vec<_>>(), samples);
    }

    #[test]
    fn test_voice_restarts_loaded_buffer() {
        let sound = beep();
        let mut voice = Voice::new();
        voice.play(&sound);
        voice.play(&sound);
        assert_eq!(voice.play_count(), 2);
        assert!(voice.loaded().unwrap().ptr_eq(&sound));
    }

    #[test]
    fn test_voice_switches_buffer() {
        let first = beep();
        let second = beep();
        let mut voice = Voice::new();
        voice.play(&first);
        voice.play(&second);
        assert!(voice.loaded().unwrap().ptr_eq(&second));
        voice.play_opt(None);
        assert_eq!(voice.play_count(), 2);
    }

    #[test]
    fn test_merge_keeps_unset() {
        let click = beep();
        let hover = beep();
        let mut set = SoundSet::new().with_click(click.clone());
        set.merge(SoundSet::new().with_hover_start(hover.clone()));
        assert!(set.click.as_ref().unwrap().ptr_eq(&click));
        assert!(set.hover_start.as_ref().unwrap().ptr_eq(&hover));
        assert!(set.release.is_none());
    }
}
