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

//! The music theory model behind every drill.
//!
//! Notes, intervals and chords are small value types. Each one knows how to
//! describe itself as a [`Sound`](crate::sound::Sound) and as an [`Identity`],
//! the spoken name announced after it plays.

mod chord;
mod identity;
mod interval;
mod note;

pub use chord::{Chord, ChordQuality};
pub use identity::Identity;
pub use interval::{Interval, IntervalKind};
pub use note::{Note, PitchClass};

/// Errors raised while interpreting music theory tokens.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TheoryError {
    #[error("unknown pitch class '{0}'")]
    InvalidPitchClass(String),

    #[error("unknown interval '{0}'")]
    InvalidInterval(String),

    #[error("unknown chord quality '{0}'")]
    InvalidChordQuality(String),

    #[error("malformed chord name '{0}', expected '<pitch class> <quality>'")]
    MalformedChord(String),
}
