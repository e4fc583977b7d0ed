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
use std::time::{Duration, Instant};

use tracing::debug;

use crate::audio::{AudioError, SoundMixer};
use crate::sound::Sound;
use crate::theory::{Chord, Identity, Note};

/// What a step plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    PlayNote(Note),
    PlayChord(Chord),
    PlayIdentity(Identity),
}

impl StepKind {
    /// The sound of whatever this step plays.
    pub fn sound(&self) -> Sound {
        match self {
            StepKind::PlayNote(note) => note.sound(),
            StepKind::PlayChord(chord) => chord.sound(),
            StepKind::PlayIdentity(identity) => identity.sound(),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::PlayNote(note) => write!(f, "PlayNote: {}", note),
            StepKind::PlayChord(chord) => write!(f, "PlayChord: {}", chord),
            StepKind::PlayIdentity(identity) => write!(f, "PlayIdentity: {}", identity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    NotStarted,
    Running,
    Complete,
}

/// A single timed unit of a program: start a sound, then wait out its duration.
/// Completion is decided by elapsed time alone, not by the sound finishing.
#[derive(Debug, Clone)]
pub struct ProgramStep {
    kind: StepKind,
    duration: Duration,
    state: StepState,
    started_at: Option<Instant>,
}

impl ProgramStep {
    pub fn new(kind: StepKind, duration: Duration) -> ProgramStep {
        ProgramStep {
            kind,
            duration,
            state: StepState::NotStarted,
            started_at: None,
        }
    }

    pub fn play_note(note: Note, duration: Duration) -> ProgramStep {
        ProgramStep::new(StepKind::PlayNote(note), duration)
    }

    pub fn play_chord(chord: Chord, duration: Duration) -> ProgramStep {
        ProgramStep::new(StepKind::PlayChord(chord), duration)
    }

    pub fn play_identity(identity: Identity, duration: Duration) -> ProgramStep {
        ProgramStep::new(StepKind::PlayIdentity(identity), duration)
    }

    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == StepState::Complete
    }

    /// Starts the step now.
    pub fn start(&mut self, mixer: &SoundMixer) -> Result<(), AudioError> {
        self.start_at(Instant::now(), mixer)
    }

    /// Starts the step at the given instant and triggers its sound. Starting a step
    /// again restarts its clock and plays the sound again.
    pub fn start_at(&mut self, now: Instant, mixer: &SoundMixer) -> Result<(), AudioError> {
        debug!(step = %self, "Starting step.");
        self.state = StepState::Running;
        self.started_at = Some(now);
        mixer.play(&self.kind.sound())
    }

    pub fn poll(&mut self) {
        self.poll_at(Instant::now())
    }

    /// Completes the step once its duration has elapsed. Does nothing unless the
    /// step is running.
    pub fn poll_at(&mut self, now: Instant) {
        if self.state != StepState::Running {
            return;
        }

        if let Some(elapsed) = self.elapsed_at(now) {
            if elapsed >= self.duration {
                debug!(step = %self, elapsed = ?elapsed, "Step complete.");
                self.state = StepState::Complete;
                self.started_at = None;
            }
        }
    }

    /// Time since the step started, or `None` if it isn't running.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Option<Duration> {
        self.started_at
            .map(|started_at| now.saturating_duration_since(started_at))
    }

    /// Puts the step back to its initial state so its program can be replayed.
    pub(super) fn reset(&mut self) {
        self.state = StepState::NotStarted;
        self.started_at = None;
    }
}

impl fmt::Display for ProgramStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.kind, self.duration.as_millis())
    }
}
