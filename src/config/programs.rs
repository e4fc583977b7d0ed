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
use serde::Deserialize;

use crate::theory::{ChordQuality, IntervalKind, PitchClass, TheoryError};

/// The drills to generate. Every list is optional; a missing list generates no
/// programs of that kind.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Programs {
    /// Pitch classes to drill as single notes, e.g. "C#".
    notes: Option<Vec<String>>,
    /// Intervals to drill above every root, e.g. "maj 3rd".
    intervals: Option<Vec<String>>,
    /// Chord qualities to drill on every root, e.g. "min".
    chords: Option<Vec<String>>,
}

impl Programs {
    pub fn notes(&self) -> Result<Vec<PitchClass>, TheoryError> {
        parse_all(&self.notes)
    }

    pub fn intervals(&self) -> Result<Vec<IntervalKind>, TheoryError> {
        parse_all(&self.intervals)
    }

    pub fn chords(&self) -> Result<Vec<ChordQuality>, TheoryError> {
        parse_all(&self.chords)
    }
}

fn parse_all<T>(tokens: &Option<Vec<String>>) -> Result<Vec<T>, TheoryError>
where
    T: std::str::FromStr<Err = TheoryError>,
{
    tokens
        .iter()
        .flatten()
        .map(|token| token.parse())
        .collect()
}
