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
use serde::Deserialize;

const DEFAULT_DEVICE: &str = "default";
const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// The audio output configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct Audio {
    /// The audio device. "default" picks the host's default output, and names
    /// starting with "mock" play nothing.
    device: Option<String>,

    /// The sample rate to open the device at. Samples must already be at this rate.
    sample_rate: Option<u32>,
}

impl Default for Audio {
    fn default() -> Self {
        Audio::new(DEFAULT_DEVICE)
    }
}

impl Audio {
    /// New will create a new Audio configuration.
    pub fn new(device: &str) -> Audio {
        Audio {
            device: Some(device.to_string()),
            sample_rate: None,
        }
    }

    /// Returns the device from the configuration.
    pub fn device(&self) -> &str {
        self.device.as_deref().unwrap_or(DEFAULT_DEVICE)
    }

    /// Returns the target sample rate (default: 44100)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)
    }
}
