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
use std::any::Any;
use std::{error::Error, fmt, sync::Arc};

use crate::config;

pub mod buffer;
pub mod cpal;
pub mod decode;
pub mod error;
pub mod mixer;
pub mod mock;

pub use buffer::AudioBuffer;
pub use error::AudioError;
pub use mixer::SoundMixer;

/// An audio output. Playback is fire-and-forget: `play` queues the buffer and
/// returns without waiting for it to finish sounding. Buffers queued while others
/// are still sounding play on top of them.
pub trait Device: Any + fmt::Display + std::marker::Send + std::marker::Sync {
    /// Queues the given buffer for playback.
    fn play(&self, buffer: Arc<AudioBuffer>) -> Result<(), AudioError>;
}

/// Lists output devices known to cpal.
pub fn list_devices() -> Result<Vec<cpal::DeviceInfo>, Box<dyn Error>> {
    cpal::Device::list()
}

/// Gets the device described by the configuration. Device names starting with
/// "mock" produce a device that plays nothing.
pub fn get_device(config: &config::Audio) -> Result<Arc<dyn Device>, Box<dyn Error>> {
    let device = config.device();
    if device.starts_with("mock") {
        return Ok(Arc::new(mock::Device::get(device)));
    };

    Ok(Arc::new(cpal::Device::get(config)?))
}
