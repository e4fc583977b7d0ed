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
use std::time::Duration;

use tracing::info;

use super::{Program, ProgramStep};
use crate::config::{self, ConfigError};
use crate::theory::{Chord, ChordQuality, Interval, IntervalKind, Note, PitchClass};

/// How long each kind of step lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub note: Duration,
    pub identity: Duration,
}

impl Timing {
    pub fn new(settings: &config::Settings) -> Timing {
        Timing {
            note: settings.note_duration(),
            identity: settings.identity_duration(),
        }
    }
}

/// Builds the full program catalogue from the configuration: note programs, then
/// interval programs, then chord programs. Every token is parsed before anything is
/// built, so a bad configuration yields no programs at all.
pub fn generate(config: &config::Trainer) -> Result<Vec<Program>, ConfigError> {
    let settings = config.settings();
    let octaves = settings.octave_range()?;
    let notes = config.programs().notes()?;
    let intervals = config.programs().intervals()?;
    let chords = config.programs().chords()?;
    let timing = Timing::new(settings);

    let mut programs = note_programs(&notes, octaves.clone(), timing);
    let note_count = programs.len();
    programs.extend(interval_programs(&intervals, octaves.clone(), timing));
    let interval_count = programs.len() - note_count;
    programs.extend(chord_programs(&chords, octaves, timing));

    info!(
        notes = note_count,
        intervals = interval_count,
        chords = programs.len() - note_count - interval_count,
        "Generated programs."
    );
    Ok(programs)
}

/// One program per pitch class and octave: the note, then its name.
pub fn note_programs(
    pitch_classes: &[PitchClass],
    octaves: RangeInclusive<i32>,
    timing: Timing,
) -> Vec<Program> {
    let mut programs = Vec::with_capacity(pitch_classes.len() * octaves.clone().count());
    for pitch_class in pitch_classes {
        for octave in octaves.clone() {
            let note = Note::new(*pitch_class, octave);
            programs.push(Program::new(
                format!("Note - {}", note),
                vec![
                    ProgramStep::play_note(note, timing.note),
                    ProgramStep::play_identity(note.identity(), timing.identity),
                ],
            ));
        }
    }
    programs
}

/// One program per interval, root pitch class and octave: both notes in turn, then
/// the interval's name.
pub fn interval_programs(
    kinds: &[IntervalKind],
    octaves: RangeInclusive<i32>,
    timing: Timing,
) -> Vec<Program> {
    let mut programs = Vec::new();
    for kind in kinds {
        for root in PitchClass::ALL {
            for octave in octaves.clone() {
                let interval = Interval::new(*kind, Note::new(root, octave));
                programs.push(Program::new(
                    format!("Interval - {} ({})", interval.name(), interval.first_note()),
                    vec![
                        ProgramStep::play_note(interval.first_note(), timing.note),
                        ProgramStep::play_note(interval.second_note(), timing.note),
                        ProgramStep::play_identity(interval.identity(), timing.identity),
                    ],
                ));
            }
        }
    }
    programs
}

/// One program per chord quality, root pitch class and octave: the chord, then its
/// name.
pub fn chord_programs(
    qualities: &[ChordQuality],
    octaves: RangeInclusive<i32>,
    timing: Timing,
) -> Vec<Program> {
    let mut programs = Vec::new();
    for quality in qualities {
        for root in PitchClass::ALL {
            for octave in octaves.clone() {
                let chord = Chord::new(*quality, Note::new(root, octave));
                let identity = chord.identity();
                programs.push(Program::new(
                    format!("Chord - {}", chord),
                    vec![
                        ProgramStep::play_chord(chord, timing.note),
                        ProgramStep::play_identity(identity, timing.identity),
                    ],
                ));
            }
        }
    }
    programs
}
