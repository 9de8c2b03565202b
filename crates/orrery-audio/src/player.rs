//! rodio-backed playback: the one piece of this crate that touches an
//! audio device.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::Source;
use rodio::{Decoder, OutputStream, Sink};

use crate::fader::VolumeSink;

/// Errors raised while opening the audio device or loading the clip.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No usable audio output device.
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    /// The clip file could not be read.
    #[error("failed to open audio file: {0}")]
    Open(#[source] std::io::Error),

    /// The clip could not be decoded.
    #[error("failed to decode audio file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    /// The playback sink could not be created.
    #[error("failed to create playback sink: {0}")]
    Sink(#[from] rodio::PlayError),
}

/// A looping clip bound to the default output device, paused and silent
/// until the fader starts it.
pub struct Playback {
    // Dropping the stream kills playback; keep it alive with the sink.
    _stream: OutputStream,
    sink: Sink,
}

impl Playback {
    /// Open the default output device and bind the clip at `path`, looped,
    /// paused, at volume zero.
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let file = File::open(path).map_err(AudioError::Open)?;
        let source = Decoder::new(BufReader::new(file))?.repeat_infinite();

        let sink = Sink::try_new(&handle)?;
        sink.pause();
        sink.set_volume(0.0);
        sink.append(source);

        log::info!("audio clip bound from {}", path.display());
        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl VolumeSink for Playback {
    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn play(&mut self) {
        self.sink.play();
    }
}
