//! The tone engine: one sine oscillator, one gain control, one output stream
//!
//! The engine exists in one of three states and its lifetime equals the page
//! session; there is no teardown beyond dropping it.
//!
//! ```text
//! Uninitialized --init()--> Running --stop()--> Suspended --resume()--> Running
//! ```

mod backend;
mod render;

use std::sync::Arc;

use backend::{AudioBackend, CpalBackend, NoneBackend};

use crate::{AtomicF32, AudioUnavailable};

/// Frequency in Hertz right after `init` (A4)
pub const DEFAULT_FREQUENCY: f32 = 440.;

/// Gain right after `init` (50% volume)
pub const DEFAULT_GAIN: f32 = 0.5;

/// Current state of a [`ToneEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEngineState {
    /// No signal path exists yet
    Uninitialized,
    /// The tone is being rendered
    Running,
    /// The signal path exists but rendering is halted; frequency and gain
    /// are retained
    Suspended,
}

/// Where the rendered audio goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sink {
    /// The default output device
    #[default]
    Default,
    /// No device; render and discard (tests, machines without a sound card)
    None,
}

/// Construction options for a [`ToneEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneEngineOptions {
    /// Requested sample rate; `None` takes the device default
    pub sample_rate: Option<f32>,
    pub sink: Sink,
}

/// The oscillator → gain → output signal path.
///
/// At most one signal path ever exists per engine: `init` is idempotent, and
/// every operation on an uninitialized engine other than `init` is a safe
/// no-op.
pub struct ToneEngine {
    frequency: Arc<AtomicF32>,
    gain: Arc<AtomicF32>,
    state: ToneEngineState,
    output: Option<Box<dyn AudioBackend>>,
    options: ToneEngineOptions,
}

impl ToneEngine {
    pub fn new(options: ToneEngineOptions) -> Self {
        Self {
            frequency: Arc::new(AtomicF32::new(DEFAULT_FREQUENCY)),
            gain: Arc::new(AtomicF32::new(DEFAULT_GAIN)),
            state: ToneEngineState::Uninitialized,
            output: None,
            options,
        }
    }

    pub fn state(&self) -> ToneEngineState {
        self.state
    }

    /// Build the signal path and start continuous tone generation at 440 Hz,
    /// gain 0.5.
    ///
    /// Calling `init` on an engine that already has a signal path is a no-op.
    /// When the audio output cannot be opened the engine stays
    /// `Uninitialized` and the error carries a displayable reason.
    pub fn init(&mut self) -> Result<(), AudioUnavailable> {
        if self.output.is_some() {
            log::debug!("tone engine already initialized");
            return Ok(());
        }

        self.frequency.store(DEFAULT_FREQUENCY);
        self.gain.store(DEFAULT_GAIN);

        let output: Box<dyn AudioBackend> = match self.options.sink {
            Sink::Default => Box::new(CpalBackend::build(
                &self.options,
                Arc::clone(&self.frequency),
                Arc::clone(&self.gain),
            )?),
            Sink::None => Box::new(NoneBackend::build(
                &self.options,
                Arc::clone(&self.frequency),
                Arc::clone(&self.gain),
            )),
        };

        log::info!(
            "tone engine running at {} Hz, {} channels",
            output.sample_rate(),
            output.number_of_channels()
        );

        self.output = Some(output);
        self.state = ToneEngineState::Running;
        Ok(())
    }

    /// Transition a suspended engine back to running; no-op otherwise
    pub fn resume(&mut self) {
        if self.state != ToneEngineState::Suspended {
            return;
        }
        if let Some(output) = &self.output {
            if output.resume() {
                self.state = ToneEngineState::Running;
            }
        }
    }

    /// Suspend a running engine; frequency and gain are retained and take
    /// effect again on resume. No-op otherwise, never an error.
    pub fn stop(&mut self) {
        if self.state != ToneEngineState::Running {
            return;
        }
        if let Some(output) = &self.output {
            if output.suspend() {
                self.state = ToneEngineState::Suspended;
            }
        }
    }

    /// Set the oscillator frequency in Hertz, effective immediately.
    ///
    /// Safe in every state; on an uninitialized engine the value is stored
    /// but `init` resets it to the 440 Hz default.
    pub fn set_frequency(&self, hz: f32) {
        self.frequency.store(hz);
    }

    /// Set the output gain, effective immediately. Safe in every state.
    pub fn set_gain(&self, gain: f32) {
        self.gain.store(gain);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency.load()
    }

    pub fn gain(&self) -> f32 {
        self.gain.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn headless_engine() -> ToneEngine {
        ToneEngine::new(ToneEngineOptions {
            sink: Sink::None,
            ..ToneEngineOptions::default()
        })
    }

    #[allow(dead_code)]
    fn ensure_send() {
        fn require_send<T: Send>() {}
        require_send::<ToneEngine>();
    }

    #[test]
    fn test_state_machine() {
        let mut engine = headless_engine();
        assert_eq!(engine.state(), ToneEngineState::Uninitialized);

        engine.init().unwrap();
        assert_eq!(engine.state(), ToneEngineState::Running);

        engine.stop();
        assert_eq!(engine.state(), ToneEngineState::Suspended);

        engine.resume();
        assert_eq!(engine.state(), ToneEngineState::Running);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut engine = headless_engine();
        engine.init().unwrap();
        engine.set_frequency(880.);

        engine.init().unwrap();
        assert_eq!(engine.state(), ToneEngineState::Running);
        // a second init must not rebuild the signal path or reset params
        assert_float_eq!(engine.frequency(), 880., abs_all <= 0.);
    }

    #[test]
    fn test_ops_on_uninitialized_engine_are_no_ops() {
        let mut engine = headless_engine();

        engine.stop();
        engine.resume();
        engine.set_frequency(660.);
        engine.set_gain(0.9);

        assert_eq!(engine.state(), ToneEngineState::Uninitialized);
    }

    #[test]
    fn test_stop_when_suspended_is_a_no_op() {
        let mut engine = headless_engine();
        engine.init().unwrap();
        engine.stop();
        engine.stop();
        assert_eq!(engine.state(), ToneEngineState::Suspended);
    }

    #[test]
    fn test_resume_when_running_is_a_no_op() {
        let mut engine = headless_engine();
        engine.init().unwrap();
        engine.resume();
        assert_eq!(engine.state(), ToneEngineState::Running);
    }

    #[test]
    fn test_init_applies_defaults() {
        let mut engine = headless_engine();
        engine.set_frequency(100.);
        engine.set_gain(0.1);

        engine.init().unwrap();
        assert_float_eq!(engine.frequency(), DEFAULT_FREQUENCY, abs_all <= 0.);
        assert_float_eq!(engine.gain(), DEFAULT_GAIN, abs_all <= 0.);
    }

    #[test]
    fn test_params_retained_across_suspend_resume() {
        let mut engine = headless_engine();
        engine.init().unwrap();
        engine.set_frequency(523.25);
        engine.set_gain(0.8);

        engine.stop();
        engine.resume();

        assert_float_eq!(engine.frequency(), 523.25, abs_all <= 0.);
        assert_float_eq!(engine.gain(), 0.8, abs_all <= 0.);
    }
}
