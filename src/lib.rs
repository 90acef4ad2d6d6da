//! A headless rendition of the "Ethereal Echoes" audio-visual toy.
//!
//! The page state is modelled as plain handler objects that can be driven with
//! synthetic event data: a sound canvas that records a marker per pointer
//! click, a symbol library with single-selection semantics, slider controls
//! mapped onto a live sine tone, and a meditation mode that plays a calming
//! tone for a countdown-driven duration. Audio output goes through `cpal`,
//! or through a device-less backend for tests and machines without a sound
//! card.
//!
//! # Example
//! ```rust
//! use ethereal_echoes::app::EtherealEchoes;
//! use ethereal_echoes::canvas::{PointerClick, Rect};
//! use ethereal_echoes::controls::{ControlChange, ControlId};
//! use ethereal_echoes::engine::{Sink, ToneEngineOptions};
//!
//! // render without a sound device; use `ToneEngineOptions::default()` to
//! // play on the default output
//! let options = ToneEngineOptions {
//!     sink: Sink::None,
//!     ..ToneEngineOptions::default()
//! };
//!
//! let bounds = Rect {
//!     left: 0.,
//!     top: 0.,
//!     width: 640.,
//!     height: 480.,
//! };
//! let mut page = EtherealEchoes::new(bounds, ["chime", "wave", "leaf"], options);
//!
//! // start the tone, then raise the pitch one octave
//! page.audio_button_click();
//! page.control_change(ControlChange {
//!     id: ControlId::Pitch,
//!     value: 100,
//! });
//!
//! // drop a marker on the canvas
//! let updates = page.pointer_click(PointerClick {
//!     client_x: 10.,
//!     client_y: 20.,
//! });
//! assert_eq!(updates.len(), 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

pub mod app;
pub mod canvas;
pub mod controls;
pub mod engine;
pub mod meditation;
pub mod symbols;

/// Audio is rendered in blocks of this size (frames per render quantum)
pub const RENDER_QUANTUM_SIZE: usize = 128;

/// Lock-free float, used to share tone parameters between the control side
/// and the render callback
#[derive(Debug)]
pub(crate) struct AtomicF32 {
    inner: AtomicU32,
}

impl AtomicF32 {
    pub fn new(v: f32) -> Self {
        Self {
            inner: AtomicU32::new(v.to_bits()),
        }
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.inner.load(Ordering::SeqCst))
    }

    pub fn store(&self, v: f32) {
        self.inner.store(v.to_bits(), Ordering::SeqCst);
    }
}

/// The audio output could not be opened.
///
/// Returned from [`engine::ToneEngine::init`] so the page can render an
/// "audio unsupported" notice instead of going silent or crashing.
#[derive(Debug)]
pub struct AudioUnavailable {
    reason: String,
}

impl AudioUnavailable {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AudioUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audio unsupported: {}", self.reason)
    }
}

impl std::error::Error for AudioUnavailable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_f32() {
        let cell = AtomicF32::new(440.);
        assert_eq!(cell.load(), 440.);
        cell.store(220.5);
        assert_eq!(cell.load(), 220.5);
    }

    #[test]
    fn test_audio_unavailable_display() {
        let err = AudioUnavailable::new("no output device available");
        assert_eq!(
            err.to_string(),
            "audio unsupported: no output device available"
        );
    }
}
