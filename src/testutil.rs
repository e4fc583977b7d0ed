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

//! Helpers for writing sample libraries in tests.

use std::{error::Error, fs, fs::File, path::Path, path::PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::sound::SampleKey;

/// Sample rate of every sample written by [`write_sample`].
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Writes interleaved samples to a WAV file. The bit depth follows the sample type.
pub fn write_wav<S: hound::Sample + Copy + 'static>(
    path: PathBuf,
    samples: Vec<S>,
    channels: u16,
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    let tempwav = File::create(path)?;

    // Determine sample format based on the type
    let (sample_format, bits_per_sample) =
        if std::any::TypeId::of::<S>() == std::any::TypeId::of::<f32>() {
            (SampleFormat::Float, 32)
        } else if std::any::TypeId::of::<S>() == std::any::TypeId::of::<i32>() {
            (SampleFormat::Int, 32)
        } else if std::any::TypeId::of::<S>() == std::any::TypeId::of::<i16>() {
            (SampleFormat::Int, 16)
        } else {
            return Err("Unsupported sample format".into());
        };

    let mut writer = WavWriter::new(
        tempwav,
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        },
    )?;

    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Writes a mono sample for the given key beneath a sample library root.
pub fn write_sample(root: &Path, key: &SampleKey, samples: &[f32]) -> Result<(), Box<dyn Error>> {
    let path = key.path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_wav(path, samples.to_vec(), 1, TEST_SAMPLE_RATE)
}

/// Writes a short sample for every key of every sound given.
pub fn write_samples<'a>(
    root: &Path,
    keys: impl IntoIterator<Item = &'a SampleKey>,
) -> Result<(), Box<dyn Error>> {
    for key in keys {
        write_sample(root, key, &[0.1, 0.2, 0.3, 0.4])?;
    }
    Ok(())
}
