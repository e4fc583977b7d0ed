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
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use duration_string::DurationString;
use serde::Deserialize;

use super::error::ConfigError;

const DEFAULT_SAMPLES_PATH: &str = "./samples";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Timing and range settings shared by every program.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// The first and last octave to drill, inclusive.
    octave_range: Vec<i32>,

    /// How long each note or chord step lasts, in milliseconds.
    note_duration: i64,

    /// How long each announcement step lasts, in milliseconds.
    identity_duration: i64,

    /// The root of the sample library (default: ./samples).
    samples_path: Option<String>,

    /// How long the runner sleeps between polls, e.g. "5ms" (default: 5ms).
    poll_interval: Option<String>,
}

impl Settings {
    /// Returns the octaves to drill. Fails unless the range has exactly two entries
    /// in ascending order.
    pub fn octave_range(&self) -> Result<RangeInclusive<i32>, ConfigError> {
        match self.octave_range.as_slice() {
            [start, end] if start <= end => Ok(*start..=*end),
            _ => Err(ConfigError::InvalidOctaveRange(self.octave_range.clone())),
        }
    }

    /// Returns the duration of note and chord steps. Negative values are treated as
    /// zero.
    pub fn note_duration(&self) -> Duration {
        millis(self.note_duration)
    }

    /// Returns the duration of announcement steps. Negative values are treated as
    /// zero.
    pub fn identity_duration(&self) -> Duration {
        millis(self.identity_duration)
    }

    pub fn samples_path(&self) -> PathBuf {
        PathBuf::from(self.samples_path.as_deref().unwrap_or(DEFAULT_SAMPLES_PATH))
    }

    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        match &self.poll_interval {
            Some(poll_interval) => Ok(DurationString::from_string(poll_interval.clone())
                .map_err(|e| ConfigError::InvalidDuration {
                    value: poll_interval.clone(),
                    message: e.to_string(),
                })?
                .into()),
            None => Ok(DEFAULT_POLL_INTERVAL),
        }
    }
}

fn millis(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}
