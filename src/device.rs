//! CPAL device discovery and playback.
//!
//! This module provides [`CpalDevice`] for picking an output device and playing
//! a [`Renderer`] on it. The graph is moved into the device callback, which
//! ticks it once per block.
//!
//! # Example
//!
//! ```no_run
//! use strom::{CpalDevice, Graph, Renderer};
//!
//! let device = CpalDevice::default_output().expect("no output device");
//! let mut graph = Graph::new(device.sample_rate());
//! let freq = graph.constant(220.0).unwrap();
//! let duty = graph.constant(0.5).unwrap();
//! let osc = graph.triangle(freq, duty).unwrap();
//!
//! let renderer = Renderer::new(graph, &[osc]).unwrap();
//! let _playback = device.play(renderer).unwrap();
//! std::thread::sleep(std::time::Duration::from_secs(2));
//! ```

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tracing::{debug, error, info, warn};

use crate::error::DeviceError;
use crate::render::Renderer;

/// An output device together with the stream format strom will open it with.
///
/// The format is the device's default output config, read once at discovery.
/// Build the [`Graph`](crate::Graph) at [`sample_rate`](Self::sample_rate)
/// and pick outputs for [`channels`](Self::channels) before calling
/// [`play`](Self::play).
pub struct CpalDevice {
    device: cpal::Device,
    stream_config: StreamConfig,
    format: SampleFormat,
    name: String,
}

impl CpalDevice {
    /// The host's default output, or `None` when there is none (or it reports
    /// no usable output config).
    pub fn default_output() -> Option<Self> {
        cpal::default_host()
            .default_output_device()
            .and_then(Self::from_device)
    }

    /// [`default_output`](Self::default_output) for callers that want a
    /// [`DeviceError::NoDevice`] instead of `None`.
    pub fn try_default_output() -> Result<Self, DeviceError> {
        Self::default_output().ok_or(DeviceError::NoDevice)
    }

    /// Every output the host can describe. Devices without a default output
    /// config are skipped.
    pub fn list_outputs() -> Vec<Self> {
        match cpal::default_host().output_devices() {
            Ok(devices) => devices.filter_map(Self::from_device).collect(),
            Err(err) => {
                warn!(%err, "could not enumerate output devices");
                Vec::new()
            }
        }
    }

    fn from_device(device: cpal::Device) -> Option<Self> {
        let name = device.name().unwrap_or_else(|_| "unnamed device".into());
        let supported = match device.default_output_config() {
            Ok(supported) => supported,
            Err(err) => {
                debug!(device = %name, %err, "skipping output without a default config");
                return None;
            }
        };
        Some(Self {
            format: supported.sample_format(),
            stream_config: supported.config(),
            device,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rate the device runs at. A graph built at another rate still plays,
    /// but pitched and timed wrong.
    pub fn sample_rate(&self) -> u32 {
        self.stream_config.sample_rate.0
    }

    /// Interleaved channel count; a renderer with fewer outputs repeats its
    /// last one across the remaining channels.
    pub fn channels(&self) -> u16 {
        self.stream_config.channels
    }

    /// Whether [`play`](Self::play) can open this device (f32 output only).
    pub fn is_playable(&self) -> bool {
        self.format == SampleFormat::F32
    }

    /// Start playing `renderer` on this device.
    ///
    /// Audio stops when the returned [`Playback`] is dropped.
    pub fn play(&self, mut renderer: Renderer) -> Result<Playback, DeviceError> {
        if !self.is_playable() {
            return Err(DeviceError::UnsupportedFormat(self.format));
        }

        let graph_rate = renderer.graph().sample_rate();
        if graph_rate != self.sample_rate() {
            warn!(graph_rate, device_rate = self.sample_rate(), "graph and device sample rates differ");
        }

        let channels = self.channels() as usize;
        let stream = self.device.build_output_stream(
            &self.stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                renderer.fill_interleaved(data, channels);
            },
            |err| error!(%err, "output stream error"),
            None,
        )?;
        stream.play()?;

        info!(device = %self.name, sample_rate = self.sample_rate(), channels, "playback started");
        Ok(Playback { _stream: stream })
    }
}

/// A running output stream. Dropping it stops playback.
pub struct Playback {
    _stream: cpal::Stream,
}
