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
//! Turns a [`Sound`] into a single buffer and hands it to the audio device.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::buffer::db_to_gain;
use super::decode::decode_file;
use super::{AudioBuffer, AudioError, Device};
use crate::sound::{MixMode, SampleKey, Sound};

/// Every overlaid layer is lowered by this much before summing to avoid clipping.
pub const OVERLAY_HEADROOM_DB: f32 = -6.0;

/// Loads samples, combines them according to a sound's mix mode and plays the
/// result.
pub struct SoundMixer {
    /// Where the output goes.
    device: Arc<dyn Device>,
    /// The root of the sample library.
    samples_path: PathBuf,
    /// Decoded samples by file path.
    cache: Mutex<HashMap<PathBuf, Arc<AudioBuffer>>>,
}

impl SoundMixer {
    pub fn new(device: Arc<dyn Device>, samples_path: impl Into<PathBuf>) -> SoundMixer {
        SoundMixer {
            device,
            samples_path: samples_path.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn samples_path(&self) -> &Path {
        &self.samples_path
    }

    /// Loads a single sample. Decoded samples are cached for the life of the mixer.
    pub fn load(&self, key: &SampleKey) -> Result<Arc<AudioBuffer>, AudioError> {
        let path = key.path(&self.samples_path);

        if let Some(buffer) = self.cache.lock().get(&path) {
            debug!(sample = %key, "Using cached sample");
            return Ok(buffer.clone());
        }

        info!(sample = %key, path = ?path, "Loading sample into memory");
        let buffer = Arc::new(decode_file(&path)?);
        self.cache.lock().insert(path, buffer.clone());

        Ok(buffer)
    }

    /// Builds the buffer for a sound without playing it.
    pub fn mix(&self, sound: &Sound) -> Result<Arc<AudioBuffer>, AudioError> {
        let buffers = sound
            .samples()
            .iter()
            .map(|key| self.load(key))
            .collect::<Result<Vec<_>, _>>()?;

        match buffers.as_slice() {
            [] => Err(AudioError::EmptySound),
            [single] => Ok(single.clone()),
            _ => {
                let layers: Vec<&AudioBuffer> = buffers.iter().map(|b| b.as_ref()).collect();
                let mixed = match sound.mode() {
                    MixMode::Sequential => AudioBuffer::concat(&layers)?,
                    MixMode::Overlaid => {
                        AudioBuffer::overlay(&layers, db_to_gain(OVERLAY_HEADROOM_DB))?
                    }
                };
                Ok(Arc::new(mixed))
            }
        }
    }

    /// Mixes and plays a sound. Returns once the buffer has been handed to the
    /// device, not when it finishes sounding.
    pub fn play(&self, sound: &Sound) -> Result<(), AudioError> {
        let buffer = self.mix(sound)?;
        self.device.play(buffer)
    }
}
