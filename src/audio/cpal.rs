// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::{error::Error, fmt, sync::Arc, thread};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, span, Level};

use super::{AudioBuffer, AudioError};
use crate::config;

/// The name that selects the host's default output device.
const DEFAULT_DEVICE: &str = "default";

/// Describes an output device found while listing.
pub struct DeviceInfo {
    name: String,
    host_id: cpal::HostId,
    max_channels: u16,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Channels={}) ({})",
            self.name,
            self.max_channels,
            self.host_id.name()
        )
    }
}

/// An output device backed by a cpal stream. The stream lives on its own thread;
/// buffers reach it over a channel and are summed with anything still sounding.
pub struct Device {
    /// The name of the device.
    name: String,
    /// The sample rate the stream was opened at.
    sample_rate: u32,
    /// The number of output channels.
    channels: u16,
    /// Sends buffers to the stream callback.
    buffer_tx: Sender<Arc<AudioBuffer>>,
    /// Dropping this stops the output thread and closes the stream.
    _shutdown_tx: Sender<()>,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Channels={}) ({}Hz)",
            self.name, self.channels, self.sample_rate
        )
    }
}

impl Device {
    /// Lists output devices across every available host.
    pub fn list() -> Result<Vec<DeviceInfo>, Box<dyn Error>> {
        let mut devices = quietly(|| {
            let mut devices = Vec::new();
            for (host_id, device) in Self::output_devices()? {
                let max_channels = match device.supported_output_configs() {
                    Ok(configs) => configs.map(|c| c.channels()).max().unwrap_or(0),
                    Err(_) => continue,
                };

                if max_channels > 0 {
                    devices.push(DeviceInfo {
                        name: device.name()?,
                        host_id,
                        max_channels,
                    });
                }
            }
            Ok(devices)
        })?;

        devices.sort_by_key(|device| device.name.to_string());
        Ok(devices)
    }

    fn output_devices() -> Result<Vec<(cpal::HostId, cpal::Device)>, Box<dyn Error>> {
        let mut devices = Vec::new();
        for host_id in cpal::available_hosts() {
            match cpal::host_from_id(host_id)?.output_devices() {
                Ok(host_devices) => devices.extend(host_devices.map(|device| (host_id, device))),
                Err(e) => error!(
                    err = e.to_string(),
                    host = host_id.name(),
                    "Unable to list devices for host"
                ),
            }
        }
        Ok(devices)
    }

    fn find(name: &str) -> Result<cpal::Device, Box<dyn Error>> {
        quietly(|| {
            if name == DEFAULT_DEVICE {
                return cpal::default_host()
                    .default_output_device()
                    .ok_or_else(|| "no default output device".into());
            }

            Self::output_devices()?
                .into_iter()
                .map(|(_, device)| device)
                .find(|device| device.name().is_ok_and(|n| n.trim() == name))
                .ok_or_else(|| format!("no device found with name {}", name).into())
        })
    }

    /// Opens the configured device and starts its output stream.
    pub fn get(config: &config::Audio) -> Result<Device, Box<dyn Error>> {
        let span = span!(Level::INFO, "open device (cpal)");
        let _enter = span.enter();

        let device = Self::find(config.device())?;
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let mut stream_config: cpal::StreamConfig = supported.config();
        stream_config.sample_rate = config.sample_rate();
        let channels = stream_config.channels;

        let (buffer_tx, buffer_rx) = crossbeam_channel::unbounded::<Arc<AudioBuffer>>();
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<Result<(), String>>(1);

        // Some hosts require the stream to stay on the thread that created it, so the
        // stream is built and owned by the output thread.
        thread::spawn(move || {
            let stream = match sample_format {
                cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, buffer_rx),
                cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, buffer_rx),
                cpal::SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, buffer_rx),
                cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, buffer_rx),
                other => Err(format!("unsupported sample format {:?}", other)),
            }
            .and_then(|stream| {
                stream.play().map_err(|e| e.to_string())?;
                Ok(stream)
            });

            match stream {
                Ok(stream) => {
                    let _ = ready_tx.send(Ok(()));
                    // Blocks until the device is dropped.
                    let _ = shutdown_rx.recv();
                    drop(stream);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            }
        });

        ready_rx.recv()??;

        let name = config.device().to_string();
        info!(
            device = name,
            channels,
            sample_rate = config.sample_rate(),
            "Output stream started."
        );

        Ok(Device {
            name,
            sample_rate: config.sample_rate(),
            channels,
            buffer_tx,
            _shutdown_tx: shutdown_tx,
        })
    }
}

impl super::Device for Device {
    fn play(&self, buffer: Arc<AudioBuffer>) -> Result<(), AudioError> {
        if buffer.sample_rate() != self.sample_rate {
            return Err(AudioError::SampleRateMismatch {
                buffer: buffer.sample_rate(),
                device: self.sample_rate,
            });
        }

        self.buffer_tx
            .send(buffer)
            .map_err(|_| AudioError::Device(format!("output stream for {} has stopped", self.name)))
    }
}

/// Runs `f` with stdout and stderr suppressed. Host backends print noise while
/// probing devices.
fn quietly<T>(
    f: impl FnOnce() -> Result<T, Box<dyn Error>>,
) -> Result<T, Box<dyn Error>> {
    let _shh_stdout = shh::stdout()?;
    let _shh_stderr = shh::stderr()?;
    f()
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer_rx: Receiver<Arc<AudioBuffer>>,
) -> Result<cpal::Stream, String>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let mut voices = Voices::new(config.channels);
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                while let Ok(buffer) = buffer_rx.try_recv() {
                    voices.add(buffer);
                }

                scratch.resize(data.len(), 0.0);
                voices.render(&mut scratch);
                for (dst, &src) in data.iter_mut().zip(scratch.iter()) {
                    *dst = T::from_sample(src);
                }
            },
            |err| error!("CPAL output stream error: {}", err),
            None,
        )
        .map_err(|e| e.to_string())
}

/// A buffer being played and how far into it playback has reached.
struct Voice {
    buffer: Arc<AudioBuffer>,
    frame: usize,
}

/// The buffers currently sounding on an output stream.
struct Voices {
    output_channels: usize,
    active: Vec<Voice>,
}

impl Voices {
    fn new(output_channels: u16) -> Voices {
        Voices {
            output_channels: usize::from(output_channels),
            active: Vec::with_capacity(16),
        }
    }

    fn add(&mut self, buffer: Arc<AudioBuffer>) {
        self.active.push(Voice { buffer, frame: 0 });
    }

    /// Mixes the next frames of every voice into `output`, which is interleaved with
    /// the stream's channel count. Buffer channels are spread across output channels
    /// cyclically, so a mono buffer reaches every output channel.
    fn render(&mut self, output: &mut [f32]) {
        output.fill(0.0);
        if self.output_channels == 0 {
            return;
        }

        let frames = output.len() / self.output_channels;
        for voice in self.active.iter_mut() {
            let channels = usize::from(voice.buffer.channels());
            if channels == 0 {
                voice.frame = voice.buffer.frames();
                continue;
            }

            let samples = voice.buffer.samples();
            let remaining = voice.buffer.frames() - voice.frame;
            let count = remaining.min(frames);
            for frame in 0..count {
                let source = (voice.frame + frame) * channels;
                let target = frame * self.output_channels;
                for channel in 0..self.output_channels {
                    output[target + channel] += samples[source + channel % channels];
                }
            }
            voice.frame += count;
        }

        self.active
            .retain(|voice| voice.frame < voice.buffer.frames());
        for sample in output.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}
