//! Shared page state and the typed event contract
//!
//! [`EtherealEchoes`] aggregates every stateful behavior of the page. Each
//! handler takes typed event data and returns the list of [`UiUpdate`]s a
//! front-end must apply, so all observable behavior can be exercised without
//! a real UI.

use crate::canvas::{Marker, PointerClick, Rect, SoundCanvas};
use crate::controls::{frequency_from_pitch, gain_from_volume, ControlChange, ControlId};
use crate::engine::{ToneEngine, ToneEngineOptions, ToneEngineState};
use crate::meditation::{MeditationTimer, Tick};
use crate::symbols::SymbolLibrary;

/// Label of the audio toggle while the tone is stopped
pub const START_AUDIO_LABEL: &str = "Start Audio";
/// Label of the audio toggle while the tone is playing
pub const STOP_AUDIO_LABEL: &str = "Stop";
/// Label of the meditation toggle while no session runs
pub const START_MEDITATION_LABEL: &str = "Start Meditation";
/// Label of the meditation toggle during a session
pub const STOP_MEDITATION_LABEL: &str = "Stop Meditation";

/// A DOM-visible effect of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Render a dot at this position on the canvas
    MarkerPlaced(Marker),
    /// Move the "active" highlight to this symbol
    SymbolActivated(String),
    /// Update the numeric readout next to a slider
    ControlReadout { id: ControlId, value: i32 },
    /// Relabel the audio toggle button
    AudioButtonLabel(&'static str),
    /// Relabel the meditation toggle button
    MeditationButtonLabel(&'static str),
    /// Render the countdown as `M:SS`
    CountdownDisplay(String),
    /// Clear the countdown display
    CountdownCleared,
    /// Show a user-visible "audio unsupported" notice
    AudioUnsupported,
}

/// The page: canvas, symbol library, sound controls, tone engine and
/// meditation mode.
///
/// Playback and session state live in explicit booleans, never in display
/// text.
pub struct EtherealEchoes {
    engine: ToneEngine,
    canvas: SoundCanvas,
    symbols: SymbolLibrary,
    timer: MeditationTimer,
    audio_playing: bool,
    audio_notice_shown: bool,
}

impl EtherealEchoes {
    pub fn new<I, S>(canvas_bounds: Rect, symbol_keys: I, engine_options: ToneEngineOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            engine: ToneEngine::new(engine_options),
            canvas: SoundCanvas::new(canvas_bounds),
            symbols: SymbolLibrary::new(symbol_keys),
            timer: MeditationTimer::new(),
            audio_playing: false,
            audio_notice_shown: false,
        }
    }

    /// A click inside the sound canvas
    pub fn pointer_click(&mut self, click: PointerClick) -> Vec<UiUpdate> {
        let marker = self.canvas.place_marker(click);
        vec![UiUpdate::MarkerPlaced(marker)]
    }

    /// A click on a symbol in the library
    pub fn symbol_click(&mut self, key: &str) -> Vec<UiUpdate> {
        if self.symbols.activate(key) {
            vec![UiUpdate::SymbolActivated(key.to_string())]
        } else {
            Vec::new()
        }
    }

    /// A slider moved: update its readout and apply the value to the tone.
    ///
    /// An uninitialized engine is lazily initialized first, so the slider is
    /// always audible; a control change never crashes the page even when no
    /// audio device exists.
    pub fn control_change(&mut self, change: ControlChange) -> Vec<UiUpdate> {
        let ControlChange { id, value } = change;
        let mut updates = vec![UiUpdate::ControlReadout { id, value }];

        match id {
            ControlId::Pitch => {
                self.ensure_engine(&mut updates);
                self.engine.set_frequency(frequency_from_pitch(value));
            }
            ControlId::Volume => {
                self.ensure_engine(&mut updates);
                self.engine.set_gain(gain_from_volume(value));
            }
            ControlId::Reverb => {
                // deliberate stub, kept as a logged no-op
                log::info!("reverb not yet implemented");
            }
        }

        updates
    }

    /// The audio toggle button: start/resume the tone, or suspend it
    pub fn audio_button_click(&mut self) -> Vec<UiUpdate> {
        if self.audio_playing {
            self.engine.stop();
            self.audio_playing = false;
            return vec![UiUpdate::AudioButtonLabel(START_AUDIO_LABEL)];
        }

        let mut updates = Vec::new();
        match self.engine.state() {
            ToneEngineState::Uninitialized => {
                self.ensure_engine(&mut updates);
            }
            ToneEngineState::Suspended => {
                self.engine.resume();
                self.audio_playing = true;
                updates.push(UiUpdate::AudioButtonLabel(STOP_AUDIO_LABEL));
            }
            // unreachable through this handler, but harmless: just resync
            // the flag
            ToneEngineState::Running => {
                self.audio_playing = true;
                updates.push(UiUpdate::AudioButtonLabel(STOP_AUDIO_LABEL));
            }
        }
        updates
    }

    /// The meditation toggle button: start a session of `minutes`, or end
    /// the running one.
    ///
    /// Starting plays the calming tone (initializing or resuming the engine
    /// as needed); ending suspends it, clears the countdown and restores both
    /// button labels.
    pub fn meditation_button_click(&mut self, minutes: u32) -> Vec<UiUpdate> {
        match self.timer.start(minutes) {
            Some(display) => {
                let mut updates = vec![
                    UiUpdate::CountdownDisplay(display),
                    UiUpdate::MeditationButtonLabel(STOP_MEDITATION_LABEL),
                ];

                match self.engine.state() {
                    ToneEngineState::Uninitialized => self.ensure_engine(&mut updates),
                    ToneEngineState::Suspended => {
                        self.engine.resume();
                        self.audio_playing = true;
                        updates.push(UiUpdate::AudioButtonLabel(STOP_AUDIO_LABEL));
                    }
                    ToneEngineState::Running => {}
                }

                updates
            }
            None => self.end_meditation(),
        }
    }

    /// One second of the meditation countdown elapsed.
    ///
    /// No-op while no session runs, so a stray ticker can never restart or
    /// double-finish a session.
    pub fn meditation_tick(&mut self) -> Vec<UiUpdate> {
        match self.timer.tick() {
            Tick::Remaining(display) => vec![UiUpdate::CountdownDisplay(display)],
            Tick::Finished => {
                let mut updates = vec![UiUpdate::CountdownDisplay(self.timer.display())];
                updates.extend(self.end_meditation());
                updates
            }
            Tick::Idle => Vec::new(),
        }
    }

    /// Shared stop path for the meditation mode; runs at most once per
    /// session
    fn end_meditation(&mut self) -> Vec<UiUpdate> {
        self.timer.stop();

        let mut updates = vec![
            UiUpdate::CountdownCleared,
            UiUpdate::MeditationButtonLabel(START_MEDITATION_LABEL),
        ];

        if self.audio_playing {
            self.engine.stop();
            self.audio_playing = false;
            updates.push(UiUpdate::AudioButtonLabel(START_AUDIO_LABEL));
        }

        updates
    }

    /// Lazily initialize the tone engine, syncing the audio toggle state.
    ///
    /// On failure the notice is surfaced once per session; the page keeps
    /// working silently.
    fn ensure_engine(&mut self, updates: &mut Vec<UiUpdate>) {
        if self.engine.state() != ToneEngineState::Uninitialized {
            return;
        }

        match self.engine.init() {
            Ok(()) => {
                self.audio_playing = true;
                updates.push(UiUpdate::AudioButtonLabel(STOP_AUDIO_LABEL));
            }
            Err(e) => {
                log::warn!("{e}");
                if !self.audio_notice_shown {
                    self.audio_notice_shown = true;
                    updates.push(UiUpdate::AudioUnsupported);
                }
            }
        }
    }

    pub fn engine(&self) -> &ToneEngine {
        &self.engine
    }

    pub fn canvas(&self) -> &SoundCanvas {
        &self.canvas
    }

    pub fn symbols(&self) -> &SymbolLibrary {
        &self.symbols
    }

    pub fn audio_playing(&self) -> bool {
        self.audio_playing
    }

    pub fn meditation_running(&self) -> bool {
        self.timer.is_running()
    }
}
