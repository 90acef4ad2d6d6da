//! Audio output backends for the tone engine
//!
//! `CpalBackend` plays on a real output device; `NoneBackend` renders on a
//! deadline-driven thread without touching any audio hardware, for tests and
//! machines without a sound card.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use crossbeam_channel::{Receiver, Sender};

use super::render::ToneRenderer;
use super::ToneEngineOptions;
use crate::{AtomicF32, AudioUnavailable, RENDER_QUANTUM_SIZE};

/// Sample rate of the device-less backend when none is requested
const FALLBACK_SAMPLE_RATE: f32 = 48000.;

/// Channel count of the device-less backend
const NONE_NUMBER_OF_CHANNELS: usize = 2;

/// Interface for the audio output of a tone engine
pub(crate) trait AudioBackend: Send + 'static {
    /// Resume the stream. Returns whether the stream acknowledged.
    fn resume(&self) -> bool;

    /// Suspend the stream. Returns whether the stream acknowledged.
    fn suspend(&self) -> bool;

    /// Sample rate of the stream
    fn sample_rate(&self) -> f32;

    /// Number of output channels of the stream
    fn number_of_channels(&self) -> usize;
}

mod private {
    use super::*;

    #[derive(Clone)]
    pub struct ThreadSafeClosableStream(Arc<Mutex<Option<Stream>>>);

    impl ThreadSafeClosableStream {
        pub fn new(stream: Stream) -> Self {
            Self(Arc::new(Mutex::new(Some(stream))))
        }

        pub fn resume(&self) -> bool {
            if let Some(s) = self.0.lock().unwrap().as_ref() {
                if let Err(e) = s.play() {
                    log::warn!("error resuming cpal stream: {:?}", e);
                    return false;
                }
                return true;
            }
            false
        }

        pub fn suspend(&self) -> bool {
            if let Some(s) = self.0.lock().unwrap().as_ref() {
                if let Err(e) = s.pause() {
                    log::warn!("error suspending cpal stream: {:?}", e);
                    return false;
                }
                return true;
            }
            false
        }
    }

    // SAFETY:
    // The cpal `Stream` is marked !Sync and !Send because some platforms are
    // not thread-safe. Since we wrap the Stream in a Mutex, we should be fine.
    unsafe impl Sync for ThreadSafeClosableStream {}
    unsafe impl Send for ThreadSafeClosableStream {}
}
use private::ThreadSafeClosableStream;

/// Audio backend using the `cpal` library
pub(crate) struct CpalBackend {
    stream: ThreadSafeClosableStream,
    sample_rate: f32,
    number_of_channels: usize,
}

impl CpalBackend {
    /// Open the default output device and start a continuous sine stream.
    ///
    /// Every failure path (no device, unsupported sample format, stream
    /// build error) surfaces as `AudioUnavailable` so the page can render a
    /// notice instead of crashing.
    pub fn build(
        options: &ToneEngineOptions,
        frequency: Arc<AtomicF32>,
        gain: Arc<AtomicF32>,
    ) -> Result<Self, AudioUnavailable> {
        let host = cpal::default_host();
        log::info!("audio host: {:?}", host.id());

        let device = host
            .default_output_device()
            .ok_or_else(|| AudioUnavailable::new("no output device available"))?;
        log::info!("output device: {:?}", device.name());

        let supported = device
            .default_output_config()
            .map_err(|e| AudioUnavailable::new(format!("error querying output config: {e}")))?;

        if supported.sample_format() != SampleFormat::F32 {
            return Err(AudioUnavailable::new(format!(
                "unsupported sample format {:?}",
                supported.sample_format()
            )));
        }

        let mut config: StreamConfig = supported.config();
        if let Some(sample_rate) = options.sample_rate {
            config.sample_rate = cpal::SampleRate(sample_rate as u32);
        }

        let sample_rate = config.sample_rate.0 as f32;
        let number_of_channels = config.channels as usize;

        let mut renderer = ToneRenderer::new(sample_rate, frequency, gain);
        let err_fn =
            |err: cpal::StreamError| log::error!("error on the output audio stream: {err}");

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    renderer.render(data, number_of_channels);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioUnavailable::new(format!("error building output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| AudioUnavailable::new(format!("error starting output stream: {e}")))?;

        Ok(Self {
            stream: ThreadSafeClosableStream::new(stream),
            sample_rate,
            number_of_channels,
        })
    }
}

impl AudioBackend for CpalBackend {
    fn resume(&self) -> bool {
        self.stream.resume()
    }

    fn suspend(&self) -> bool {
        self.stream.suspend()
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn number_of_channels(&self) -> usize {
        self.number_of_channels
    }
}

enum NoneBackendMessage {
    Resume,
    Suspend,
    Close,
}

/// Device-less backend: renders the tone on its own thread at the pace the
/// hardware would, then discards the frames
pub(crate) struct NoneBackend {
    sender: Sender<NoneBackendMessage>,
    sample_rate: f32,
}

struct Callback {
    receiver: Receiver<NoneBackendMessage>,
    renderer: ToneRenderer,
    sample_rate: f32,
    running: bool,
}

impl Callback {
    fn run(mut self) {
        let mut buffer = vec![0.; RENDER_QUANTUM_SIZE * NONE_NUMBER_OF_CHANNELS];
        let interval = Duration::from_secs_f32(RENDER_QUANTUM_SIZE as f32 / self.sample_rate);

        // for an isochronous callback the deadline is recalculated every
        // render quantum
        let mut deadline = Instant::now() + interval;

        loop {
            // poll the receiver as long as the deadline is in the future
            while let Ok(msg) = self.receiver.recv_deadline(deadline) {
                match msg {
                    NoneBackendMessage::Close => return,
                    NoneBackendMessage::Resume => {
                        self.running = true;
                        deadline = Instant::now() + interval;
                        break; // start rendering right away
                    }
                    NoneBackendMessage::Suspend => self.running = false,
                }
            }

            if self.running {
                self.renderer.render(&mut buffer, NONE_NUMBER_OF_CHANNELS);
            }

            deadline += interval;
        }
    }
}

impl NoneBackend {
    pub fn build(
        options: &ToneEngineOptions,
        frequency: Arc<AtomicF32>,
        gain: Arc<AtomicF32>,
    ) -> Self {
        let sample_rate = options.sample_rate.unwrap_or(FALLBACK_SAMPLE_RATE);
        let (sender, receiver) = crossbeam_channel::unbounded();

        let callback = Callback {
            receiver,
            renderer: ToneRenderer::new(sample_rate, frequency, gain),
            sample_rate,
            running: true,
        };
        thread::spawn(move || callback.run());

        Self {
            sender,
            sample_rate,
        }
    }
}

impl AudioBackend for NoneBackend {
    fn resume(&self) -> bool {
        self.sender.send(NoneBackendMessage::Resume).is_ok()
    }

    fn suspend(&self) -> bool {
        self.sender.send(NoneBackendMessage::Suspend).is_ok()
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn number_of_channels(&self) -> usize {
        NONE_NUMBER_OF_CHANNELS
    }
}

impl Drop for NoneBackend {
    fn drop(&mut self) {
        let _ = self.sender.send(NoneBackendMessage::Close);
    }
}
