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
use std::time::Instant;

use tracing::{debug, span, Level};

use crate::audio::{AudioError, SoundMixer};

mod generator;
mod step;

pub use generator::{generate, Timing};
pub use step::{ProgramStep, StepKind, StepState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Idle,
    Running,
    Complete,
}

/// A single drill: an ordered list of steps played one after another.
#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    steps: Vec<ProgramStep>,
    current: usize,
    state: ProgramState,
}

impl Program {
    pub fn new(name: impl Into<String>, steps: Vec<ProgramStep>) -> Program {
        Program {
            name: name.into(),
            steps,
            current: 0,
            state: ProgramState::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[ProgramStep] {
        &self.steps
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ProgramState::Complete
    }

    /// The step currently playing, if the program is running.
    pub fn current_step(&self) -> Option<&ProgramStep> {
        match self.state {
            ProgramState::Running => self.steps.get(self.current),
            _ => None,
        }
    }

    pub fn start(&mut self, mixer: &SoundMixer) -> Result<(), AudioError> {
        self.start_at(Instant::now(), mixer)
    }

    /// Starts the program from its first step. Programs can be started again once
    /// complete.
    pub fn start_at(&mut self, now: Instant, mixer: &SoundMixer) -> Result<(), AudioError> {
        let span = span!(Level::DEBUG, "program", program = self.name);
        let _enter = span.enter();

        self.steps.iter_mut().for_each(ProgramStep::reset);
        self.current = 0;

        let steps = self.steps.len();
        match self.steps.first_mut() {
            Some(step) => {
                debug!(steps, "Starting program.");
                self.state = ProgramState::Running;
                step.start_at(now, mixer)
            }
            None => {
                debug!("Program has no steps, nothing to play.");
                self.state = ProgramState::Complete;
                Ok(())
            }
        }
    }

    pub fn poll(&mut self, mixer: &SoundMixer) -> Result<(), AudioError> {
        self.poll_at(Instant::now(), mixer)
    }

    /// Polls the current step. Once it completes the next one is started within the
    /// same call, and finishing the last step completes the program.
    pub fn poll_at(&mut self, now: Instant, mixer: &SoundMixer) -> Result<(), AudioError> {
        if self.state != ProgramState::Running {
            return Ok(());
        }

        let Some(step) = self.steps.get_mut(self.current) else {
            self.state = ProgramState::Complete;
            return Ok(());
        };

        step.poll_at(now);
        if !step.is_complete() {
            return Ok(());
        }

        self.current += 1;
        match self.steps.get_mut(self.current) {
            Some(next) => next.start_at(now, mixer),
            None => {
                debug!(program = self.name, "Program complete.");
                self.state = ProgramState::Complete;
                Ok(())
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (i, step) in self.steps.iter().enumerate() {
            let separator = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", separator, step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::audio::mock;
    use crate::testutil::write_samples;
    use crate::theory::{Note, PitchClass};

    fn two_step_program() -> Program {
        let note = Note::new(PitchClass::C, 4);
        Program::new(
            "Note - C4",
            vec![
                ProgramStep::play_note(note, Duration::from_millis(100)),
                ProgramStep::play_identity(note.identity(), Duration::from_millis(200)),
            ],
        )
    }

    fn setup(program: &Program) -> (tempfile::TempDir, SoundMixer, mock::Device) {
        let dir = tempfile::tempdir().unwrap();
        for step in program.steps() {
            write_samples(dir.path(), step.kind().sound().samples()).unwrap();
        }
        let device = mock::Device::get("mock");
        let mixer = SoundMixer::new(Arc::new(device.clone()), dir.path());
        (dir, mixer, device)
    }

    #[test]
    fn test_runs_steps_in_order() {
        let mut program = two_step_program();
        let (_dir, mixer, device) = setup(&program);
        assert_eq!(ProgramState::Idle, program.state());
        assert!(program.current_step().is_none());

        let start = Instant::now();
        program.start_at(start, &mixer).unwrap();
        assert_eq!(ProgramState::Running, program.state());
        assert_eq!(StepState::Running, program.steps()[0].state());
        assert_eq!(StepState::NotStarted, program.steps()[1].state());
        assert_eq!(1, device.played().len());

        program
            .poll_at(start + Duration::from_millis(50), &mixer)
            .unwrap();
        assert_eq!(StepState::Running, program.steps()[0].state());

        // The first step finishing starts the second in the same poll.
        let second = start + Duration::from_millis(100);
        program.poll_at(second, &mixer).unwrap();
        assert_eq!(StepState::Complete, program.steps()[0].state());
        assert_eq!(StepState::Running, program.steps()[1].state());
        assert_eq!(2, device.played().len());
        assert!(matches!(
            program.current_step().map(|step| step.kind()),
            Some(StepKind::PlayIdentity(_))
        ));

        program
            .poll_at(second + Duration::from_millis(199), &mixer)
            .unwrap();
        assert_eq!(ProgramState::Running, program.state());

        program
            .poll_at(second + Duration::from_millis(200), &mixer)
            .unwrap();
        assert!(program.is_complete());
        assert!(program.current_step().is_none());

        // Further polls do nothing.
        program
            .poll_at(second + Duration::from_secs(10), &mixer)
            .unwrap();
        assert!(program.is_complete());
        assert_eq!(2, device.played().len());
    }

    #[test]
    fn test_poll_while_idle_is_a_noop() {
        let mut program = two_step_program();
        let (_dir, mixer, device) = setup(&program);

        program.poll(&mixer).unwrap();
        assert_eq!(ProgramState::Idle, program.state());
        assert!(device.played().is_empty());
    }

    #[test]
    fn test_restart_after_completion() {
        let mut program = two_step_program();
        let (_dir, mixer, device) = setup(&program);

        let start = Instant::now();
        program.start_at(start, &mixer).unwrap();
        program
            .poll_at(start + Duration::from_millis(100), &mixer)
            .unwrap();
        program
            .poll_at(start + Duration::from_millis(300), &mixer)
            .unwrap();
        assert!(program.is_complete());

        let restart = start + Duration::from_secs(1);
        program.start_at(restart, &mixer).unwrap();
        assert_eq!(ProgramState::Running, program.state());
        assert_eq!(StepState::Running, program.steps()[0].state());
        assert_eq!(StepState::NotStarted, program.steps()[1].state());
        assert_eq!(3, device.played().len());
    }

    #[test]
    fn test_empty_program_completes_on_start() {
        let mut program = Program::new("Empty", vec![]);
        let (_dir, mixer, device) = setup(&program);

        program.start(&mixer).unwrap();
        assert!(program.is_complete());
        assert!(device.played().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "Note - C4: PlayNote: C4 (100 ms), PlayIdentity: C (200 ms)",
            two_step_program().to_string()
        );
    }
}
