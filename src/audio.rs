//! Audio playback for synthesized speech using rodio.
//!
//! One `AudioPlayback` wraps one output stream and one sink. Replacing it
//! drops the previous stream handle, which releases the device resource, so
//! at most one playable handle is ever live.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, info};

pub struct AudioPlayback {
    _stream: OutputStream,
    sink: Sink,
}

impl AudioPlayback {
    /// Decode the synthesized audio bytes into a paused sink; `resume`
    /// starts playback.
    pub fn load(audio: Vec<u8>) -> Result<Self> {
        let (_stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        sink.pause();
        let byte_count = audio.len();
        let source = Decoder::new(Cursor::new(audio)).context("Decoding synthesized audio")?;
        sink.append(source);
        info!(byte_count, "Loaded synthesized audio");
        Ok(Self { _stream, sink })
    }

    pub fn pause(&self) {
        debug!("Pausing playback");
        self.sink.pause();
    }

    pub fn resume(&self) {
        debug!("Resuming playback");
        self.sink.play();
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    /// Playback position from the sink's own clock.
    pub fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    pub fn position_ms(&self) -> f64 {
        self.position().as_secs_f64() * 1000.0
    }

    /// True once the appended source has fully drained.
    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    pub fn stop(self) {
        debug!("Stopping playback");
        self.sink.stop();
        // stream dropped automatically
    }
}
