//! Sine rendering for the tone engine

use std::f32::consts::TAU;
use std::sync::Arc;

use crate::AtomicF32;

/// Fills output buffers with a continuous sine, reading the shared frequency
/// and gain parameters once per callback
pub(crate) struct ToneRenderer {
    frequency: Arc<AtomicF32>,
    gain: Arc<AtomicF32>,
    sample_rate: f32,
    phase: f32,
}

impl ToneRenderer {
    pub fn new(sample_rate: f32, frequency: Arc<AtomicF32>, gain: Arc<AtomicF32>) -> Self {
        Self {
            frequency,
            gain,
            sample_rate,
            phase: 0.,
        }
    }

    /// Render one callback worth of interleaved frames, the same sample in
    /// every channel
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        let frequency = self.frequency.load();
        let gain = self.gain.load();
        let incr_phase = TAU * frequency / self.sample_rate;

        for frame in buffer.chunks_mut(channels) {
            let sample = self.phase.sin() * gain;
            frame.fill(sample);

            // cheap float modulo, incr_phase stays below TAU for any audible
            // frequency
            self.phase = if self.phase + incr_phase >= TAU {
                self.phase + incr_phase - TAU
            } else {
                self.phase + incr_phase
            };
        }
    }
}
