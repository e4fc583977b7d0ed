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

use crate::sound::{SampleKey, Sound};

/// The spoken name of a note, interval or chord. Each word of the name has its own
/// sample, and the words are announced one after another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Identity {
        Identity { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The words of the name, in the order they are spoken.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.name.split_whitespace()
    }

    pub fn sound(&self) -> Sound {
        Sound::sequential(self.parts().map(SampleKey::identity).collect())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
