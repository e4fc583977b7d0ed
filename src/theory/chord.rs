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
use std::fmt;
use std::str::FromStr;

use super::{Identity, IntervalKind, Note, PitchClass, TheoryError};
use crate::sound::{SampleKey, Sound};

/// The quality of a triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 3] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
    ];

    /// The token used for this quality in configuration and announcements.
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
        }
    }

    /// The intervals stacked on the root, in ascending order.
    pub fn intervals(self) -> &'static [IntervalKind] {
        match self {
            ChordQuality::Major => &[IntervalKind::MajorThird, IntervalKind::Fifth],
            ChordQuality::Minor => &[IntervalKind::MinorThird, IntervalKind::Fifth],
            ChordQuality::Diminished => &[IntervalKind::MinorThird, IntervalKind::DiminishedFifth],
        }
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::ALL
            .into_iter()
            .find(|quality| quality.name() == s)
            .ok_or_else(|| TheoryError::InvalidChordQuality(s.to_string()))
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A triad built on a root note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    quality: ChordQuality,
    /// Root first, then one note per interval of the quality.
    notes: Vec<Note>,
}

impl Chord {
    /// Builds the chord of the given quality on the root.
    pub fn new(quality: ChordQuality, root: Note) -> Chord {
        let notes = std::iter::once(root)
            .chain(
                quality
                    .intervals()
                    .iter()
                    .map(|interval| root.add_interval(*interval)),
            )
            .collect();

        Chord { quality, notes }
    }

    /// Parses a chord written as "<pitch class> <quality>", e.g. "C# min", rooted in
    /// the given octave.
    pub fn parse(name: &str, octave: i32) -> Result<Chord, TheoryError> {
        let (pitch_class, quality) = name
            .split_once(' ')
            .ok_or_else(|| TheoryError::MalformedChord(name.to_string()))?;
        let pitch_class: PitchClass = pitch_class.parse()?;
        let quality: ChordQuality = quality.parse()?;

        Ok(Chord::new(quality, Note::new(pitch_class, octave)))
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn root(&self) -> Note {
        self.notes[0]
    }

    /// The notes of the chord, root first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The name of the chord without its octave, e.g. "C maj". This is what gets
    /// announced.
    pub fn identity_name(&self) -> String {
        format!("{} {}", self.root().pitch_class(), self.quality)
    }

    /// The full name of the chord, e.g. "C maj4".
    pub fn name(&self) -> String {
        format!("{}{}", self.identity_name(), self.root().octave())
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.identity_name())
    }

    /// All notes of the chord sounding together.
    pub fn sound(&self) -> Sound {
        Sound::overlaid(
            self.notes
                .iter()
                .map(|note| SampleKey::note(note.name()))
                .collect(),
        )
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
