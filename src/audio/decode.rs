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
use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};
use tracing::debug;

use super::buffer::AudioBuffer;
use super::error::AudioError;

/// Decodes an entire audio file (WAV, FLAC, MP3 or anything else symphonia probes)
/// into memory.
pub fn decode_file(path: &Path) -> Result<AudioBuffer, AudioError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AudioError::MissingSample(path.to_path_buf()),
        _ => AudioError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        )),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Help the format registry guess the format.
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let decode_error = |message: String| AudioError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let probed = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_error(e.to_string()))?;
    let mut format_reader = probed.format;

    let track = format_reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_error("no audio track found".to_string()))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_error("sample rate not specified".to_string()))?;

    let mut decoder = get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_error(e.to_string()))?;

    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format_reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // A corrupt packet is skipped, the rest of the file may still be usable.
            Err(SymphoniaError::DecodeError(message)) => {
                debug!(path = ?path, message, "Skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        if channels == 0 {
            channels = spec.channels.count() as u16;
        }
        let mut packet_samples = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        packet_samples.copy_interleaved_ref(decoded);
        samples.extend_from_slice(packet_samples.samples());
    }

    if channels == 0 {
        return Err(decode_error("unable to determine channel count".to_string()));
    }

    debug!(
        path = ?path,
        channels,
        sample_rate,
        frames = samples.len() / channels as usize,
        "Decoded sample"
    );

    Ok(AudioBuffer::new(samples, channels, sample_rate))
}
