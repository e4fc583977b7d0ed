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

use super::{Identity, IntervalKind, TheoryError};
use crate::sound::{SampleKey, Sound};

/// Number of pitch classes in an octave.
const PITCH_CLASS_COUNT: usize = 12;

/// One of the twelve chromatic pitch classes, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in ascending chromatic order, starting at C.
    pub const ALL: [PitchClass; PITCH_CLASS_COUNT] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// The position of this pitch class above C.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the pitch class at the given position above C, wrapping at the octave.
    pub fn from_index(index: usize) -> PitchClass {
        Self::ALL[index % PITCH_CLASS_COUNT]
    }

    /// The canonical name of the pitch class, e.g. "C#".
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::ALL
            .into_iter()
            .find(|pitch_class| pitch_class.name() == s)
            .ok_or_else(|| TheoryError::InvalidPitchClass(s.to_string()))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pitch class in a specific octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pitch_class: PitchClass,
    octave: i32,
}

impl Note {
    /// Creates a new note.
    pub fn new(pitch_class: PitchClass, octave: i32) -> Note {
        Note {
            pitch_class,
            octave,
        }
    }

    /// Gets the pitch class of the note.
    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    /// Gets the octave of the note.
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// The name of the note, e.g. "C#4". This is also the name of its sample.
    pub fn name(&self) -> String {
        format!("{}{}", self.pitch_class, self.octave)
    }

    /// Returns the note the given number of semitones above this one. Crossing B
    /// moves into the next octave. Only 0 to 12 semitones are meaningful here, which
    /// covers every entry of the interval table.
    pub fn add_semitones(&self, semitones: u8) -> Note {
        let position = self.pitch_class.index() + usize::from(semitones);
        Note {
            pitch_class: PitchClass::from_index(position),
            octave: self.octave + (position / PITCH_CLASS_COUNT) as i32,
        }
    }

    /// Returns the note the given interval above this one.
    pub fn add_interval(&self, interval: IntervalKind) -> Note {
        self.add_semitones(interval.semitones())
    }

    /// The announcement for this note, which names the pitch class only.
    pub fn identity(&self) -> Identity {
        Identity::new(self.pitch_class.name())
    }

    /// The sound of this note: its single sample.
    pub fn sound(&self) -> Sound {
        Sound::single(SampleKey::note(self.name()))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::{MixMode, SampleNamespace};

    #[test]
    fn test_pitch_class_round_trip_names() {
        for pitch_class in PitchClass::ALL {
            assert_eq!(Ok(pitch_class), pitch_class.name().parse::<PitchClass>());
        }
        assert_eq!(
            Err(TheoryError::InvalidPitchClass("Db".to_string())),
            "Db".parse::<PitchClass>()
        );
        assert!("c".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_add_semitones_arithmetic() {
        for pitch_class in PitchClass::ALL {
            for semitones in 0..=12u8 {
                let note = Note::new(pitch_class, 4);
                let result = note.add_semitones(semitones);
                let position = pitch_class.index() + semitones as usize;

                assert_eq!(position % 12, result.pitch_class().index());
                assert_eq!(4 + (position / 12) as i32, result.octave());
            }
        }
    }

    #[test]
    fn test_add_semitones_rolls_over_octave() {
        assert_eq!(
            Note::new(PitchClass::C, 4),
            Note::new(PitchClass::B, 3).add_semitones(1)
        );
        assert_eq!(
            Note::new(PitchClass::B, 4),
            Note::new(PitchClass::B, 3).add_semitones(12)
        );
        assert_eq!(
            Note::new(PitchClass::A, -1),
            Note::new(PitchClass::A, -1).add_semitones(0)
        );
    }

    #[test]
    fn test_add_interval() {
        let root = Note::new(PitchClass::G, 2);
        assert_eq!(
            Note::new(PitchClass::D, 3),
            root.add_interval(IntervalKind::Fifth)
        );
    }

    #[test]
    fn test_name_identity_and_sound() {
        let note = Note::new(PitchClass::CSharp, 4);
        assert_eq!("C#4", note.name());
        assert_eq!("C#4", note.to_string());
        assert_eq!("C#", note.identity().name());

        let sound = note.sound();
        assert_eq!(MixMode::Sequential, sound.mode());
        assert_eq!(1, sound.samples().len());
        assert_eq!(SampleNamespace::Note, sound.samples()[0].namespace());
        assert_eq!("C#4", sound.samples()[0].name());
    }
}
