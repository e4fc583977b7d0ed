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
//! An unattended ear trainer: builds drills of notes, intervals and chords from a
//! configuration file and plays them at random, announcing each one.

pub mod audio;
pub mod config;
pub mod program;
pub mod runner;
pub mod sound;
#[cfg(test)]
mod testutil;
pub mod theory;
