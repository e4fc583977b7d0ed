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
use std::time::Duration;

use super::error::AudioError;

/// Converts a level change in decibels to a linear gain factor.
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Decoded audio held entirely in memory as interleaved f32 samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Creates a buffer from interleaved samples.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> AudioBuffer {
        AudioBuffer {
            samples,
            channels,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Concatenates buffers in order. All buffers must share a channel count and
    /// sample rate.
    pub fn concat(buffers: &[&AudioBuffer]) -> Result<AudioBuffer, AudioError> {
        let first = buffers.first().ok_or(AudioError::EmptySound)?;
        let mut samples = Vec::with_capacity(buffers.iter().map(|b| b.samples.len()).sum());

        for buffer in buffers {
            first.check_compatible(buffer)?;
            samples.extend_from_slice(&buffer.samples);
        }

        Ok(AudioBuffer::new(samples, first.channels, first.sample_rate))
    }

    /// Sums buffers starting at the same instant, scaling every layer by `gain`.
    /// The result is as long as the longest layer.
    pub fn overlay(buffers: &[&AudioBuffer], gain: f32) -> Result<AudioBuffer, AudioError> {
        let first = buffers.first().ok_or(AudioError::EmptySound)?;
        let length = buffers.iter().map(|b| b.samples.len()).max().unwrap_or(0);
        let mut samples = vec![0.0f32; length];

        for buffer in buffers {
            first.check_compatible(buffer)?;
            for (out, sample) in samples.iter_mut().zip(buffer.samples.iter()) {
                *out += sample * gain;
            }
        }

        Ok(AudioBuffer::new(samples, first.channels, first.sample_rate))
    }

    fn check_compatible(&self, other: &AudioBuffer) -> Result<(), AudioError> {
        if self.channels != other.channels || self.sample_rate != other.sample_rate {
            return Err(AudioError::FormatMismatch {
                expected_channels: self.channels,
                expected_rate: self.sample_rate,
                channels: other.channels,
                rate: other.sample_rate,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_to_gain() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-6.0) - 0.501_187).abs() < 1e-4);
        assert!((db_to_gain(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = AudioBuffer::new(vec![0.1, 0.2], 1, 44100);
        let b = AudioBuffer::new(vec![0.3], 1, 44100);
        let c = AudioBuffer::new(vec![0.4, 0.5], 1, 44100);

        let joined = AudioBuffer::concat(&[&a, &b, &c]).unwrap();
        assert_eq!(vec![0.1, 0.2, 0.3, 0.4, 0.5], joined.samples());
        assert_eq!(5, joined.frames());
    }

    #[test]
    fn test_overlay_attenuates_every_layer() {
        let a = AudioBuffer::new(vec![1.0, 1.0, 1.0, 1.0], 2, 48000);
        let b = AudioBuffer::new(vec![0.5, -0.5], 2, 48000);

        let mixed = AudioBuffer::overlay(&[&a, &b], 0.5).unwrap();
        assert_eq!(vec![0.75, 0.25, 0.5, 0.5], mixed.samples());
        assert_eq!(2, mixed.frames());
        assert_eq!(2, mixed.channels());
    }

    #[test]
    fn test_mismatched_formats_are_rejected() {
        let mono = AudioBuffer::new(vec![0.0; 4], 1, 44100);
        let stereo = AudioBuffer::new(vec![0.0; 4], 2, 44100);
        let other_rate = AudioBuffer::new(vec![0.0; 4], 1, 48000);

        assert!(matches!(
            AudioBuffer::concat(&[&mono, &stereo]),
            Err(AudioError::FormatMismatch { .. })
        ));
        assert!(matches!(
            AudioBuffer::overlay(&[&mono, &other_rate], 0.5),
            Err(AudioError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            AudioBuffer::concat(&[]),
            Err(AudioError::EmptySound)
        ));
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::new(vec![0.0; 44100 * 2], 2, 44100);
        assert_eq!(Duration::from_secs(1), buffer.duration());
    }
}
