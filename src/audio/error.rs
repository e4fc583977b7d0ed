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
use std::path::PathBuf;

/// Errors raised while loading, mixing or playing samples.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("sample not found: {}", .0.display())]
    MissingSample(PathBuf),

    #[error("unable to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("audio file error: {0}")]
    Symphonia(#[from] symphonia::core::errors::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot mix a sound with no samples")]
    EmptySound,

    #[error(
        "sample format mismatch: {expected_channels} channels at {expected_rate}Hz, \
         got {channels} channels at {rate}Hz"
    )]
    FormatMismatch {
        expected_channels: u16,
        expected_rate: u32,
        channels: u16,
        rate: u32,
    },

    #[error("sample rate {buffer}Hz does not match device rate {device}Hz")]
    SampleRateMismatch { buffer: u32, device: u32 },

    #[error("audio device error: {0}")]
    Device(String),
}
