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
use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use tracing::info;

use super::{AudioBuffer, AudioError};

/// A mock device. Doesn't actually play anything, but remembers what it was given.
#[derive(Clone)]
pub struct Device {
    name: String,
    played: Arc<Mutex<Vec<Arc<AudioBuffer>>>>,
}

impl Device {
    /// Gets the given mock device.
    pub fn get(name: &str) -> Device {
        Device {
            name: name.to_string(),
            played: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns every buffer played so far, oldest first.
    #[cfg(test)]
    pub fn played(&self) -> Vec<Arc<AudioBuffer>> {
        self.played.lock().clone()
    }
}

impl super::Device for Device {
    fn play(&self, buffer: Arc<AudioBuffer>) -> Result<(), AudioError> {
        info!(
            device = self.name,
            channels = buffer.channels(),
            sample_rate = buffer.sample_rate(),
            duration = format!("{:?}", buffer.duration()),
            "Playing buffer."
        );
        self.played.lock().push(buffer);
        Ok(())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name)
    }
}
