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

use super::{Identity, Note, TheoryError};

/// A named interval. The discriminant is the interval's size in semitones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntervalKind {
    Unison = 0,
    MinorSecond = 1,
    MajorSecond = 2,
    MinorThird = 3,
    MajorThird = 4,
    Fourth = 5,
    DiminishedFifth = 6,
    Fifth = 7,
    MinorSixth = 8,
    MajorSixth = 9,
    MinorSeventh = 10,
    MajorSeventh = 11,
    Octave = 12,
}

impl IntervalKind {
    /// Every interval, smallest first.
    pub const ALL: [IntervalKind; 13] = [
        IntervalKind::Unison,
        IntervalKind::MinorSecond,
        IntervalKind::MajorSecond,
        IntervalKind::MinorThird,
        IntervalKind::MajorThird,
        IntervalKind::Fourth,
        IntervalKind::DiminishedFifth,
        IntervalKind::Fifth,
        IntervalKind::MinorSixth,
        IntervalKind::MajorSixth,
        IntervalKind::MinorSeventh,
        IntervalKind::MajorSeventh,
        IntervalKind::Octave,
    ];

    /// The size of the interval in semitones.
    pub fn semitones(self) -> u8 {
        self as u8
    }

    /// The spoken name of the interval. Multi-word names are announced one word
    /// at a time.
    pub fn name(self) -> &'static str {
        match self {
            IntervalKind::Unison => "unison",
            IntervalKind::MinorSecond => "min 2nd",
            IntervalKind::MajorSecond => "maj 2nd",
            IntervalKind::MinorThird => "min 3rd",
            IntervalKind::MajorThird => "maj 3rd",
            IntervalKind::Fourth => "4th",
            IntervalKind::DiminishedFifth => "dim 5th",
            IntervalKind::Fifth => "5th",
            IntervalKind::MinorSixth => "min 6th",
            IntervalKind::MajorSixth => "maj 6th",
            IntervalKind::MinorSeventh => "min 7th",
            IntervalKind::MajorSeventh => "maj 7th",
            IntervalKind::Octave => "octave",
        }
    }
}

impl FromStr for IntervalKind {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntervalKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TheoryError::InvalidInterval(s.to_string()))
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An interval played upwards from a root note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    kind: IntervalKind,
    first_note: Note,
    second_note: Note,
}

impl Interval {
    /// Creates the interval of the given kind above the root.
    pub fn new(kind: IntervalKind, root: Note) -> Interval {
        Interval {
            kind,
            first_note: root,
            second_note: root.add_interval(kind),
        }
    }

    /// Creates an interval from its spoken name, e.g. "maj 3rd".
    pub fn parse(name: &str, root: Note) -> Result<Interval, TheoryError> {
        Ok(Interval::new(name.parse()?, root))
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn semitones(&self) -> u8 {
        self.kind.semitones()
    }

    /// The root of the interval.
    pub fn first_note(&self) -> Note {
        self.first_note
    }

    /// The note above the root.
    pub fn second_note(&self) -> Note {
        self.second_note
    }

    /// The announcement for this interval, which names the interval only.
    pub fn identity(&self) -> Identity {
        Identity::new(self.kind.name())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{})",
            self.kind, self.first_note, self.second_note
        )
    }
}
