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

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, span, Level, Span};

use crate::audio::{AudioError, SoundMixer};
use crate::program::Program;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no programs to run, check the programs section of the configuration")]
    EmptyCatalogue,

    #[error("playback failed: {0}")]
    Playback(#[from] AudioError),
}

/// Plays programs drawn at random from a catalogue, one at a time, forever.
pub struct ProgramRunner {
    /// Every program the runner can choose from.
    programs: Vec<Program>,
    /// The index of the program currently playing.
    current: Option<usize>,
    /// Source of program selections.
    rng: StdRng,
    /// The logging span.
    span: Span,
}

impl fmt::Display for ProgramRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for program in self.programs.iter() {
            writeln!(f, "Program: {}", program)?;
        }
        write!(f, "{} programs", self.programs.len())
    }
}

impl ProgramRunner {
    /// Creates a new runner. An empty catalogue is rejected, since there would be
    /// nothing to pick from.
    pub fn new(programs: Vec<Program>, rng: StdRng) -> Result<ProgramRunner, RunnerError> {
        if programs.is_empty() {
            return Err(RunnerError::EmptyCatalogue);
        }

        Ok(ProgramRunner {
            programs,
            current: None,
            rng,
            span: span!(Level::INFO, "runner"),
        })
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// The program currently playing, if any.
    pub fn current(&self) -> Option<&Program> {
        self.current.map(|index| &self.programs[index])
    }

    /// Draws a catalogue index uniformly at random.
    pub fn pick(&mut self) -> usize {
        self.rng.gen_range(0..self.programs.len())
    }

    pub fn tick(&mut self, mixer: &SoundMixer) -> Result<(), RunnerError> {
        self.tick_at(Instant::now(), mixer)
    }

    /// Advances the runner by one iteration. With nothing playing a new program is
    /// drawn, started and announced. Otherwise the current program is polled and
    /// released once complete.
    pub fn tick_at(&mut self, now: Instant, mixer: &SoundMixer) -> Result<(), RunnerError> {
        let span = self.span.clone();
        let _enter = span.enter();

        let index = match self.current {
            Some(index) => {
                self.programs[index].poll_at(now, mixer)?;
                index
            }
            None => {
                let index = self.pick();
                let program = &mut self.programs[index];
                program.start_at(now, mixer)?;
                println!("* {}", program.name());
                info!(program = program.name(), "Started program.");
                self.current = Some(index);
                index
            }
        };

        if self.programs[index].is_complete() {
            debug!(program = self.programs[index].name(), "Program finished.");
            self.current = None;
        }

        Ok(())
    }

    /// Runs until an error occurs, sleeping for the poll interval between ticks.
    pub fn run(&mut self, mixer: &SoundMixer, poll_interval: Duration) -> Result<(), RunnerError> {
        info!(
            programs = self.programs.len(),
            poll_interval = format!("{:?}", poll_interval),
            "Starting runner."
        );
        loop {
            self.tick(mixer)?;
            spin_sleep::sleep(poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;

    use super::*;
    use crate::audio::mock;
    use crate::program::ProgramStep;
    use crate::testutil::write_samples;
    use crate::theory::{Note, PitchClass};

    fn program(pitch_class: PitchClass) -> Program {
        let note = Note::new(pitch_class, 4);
        Program::new(
            format!("Note - {}", note),
            vec![ProgramStep::play_note(note, Duration::from_millis(100))],
        )
    }

    fn catalogue(size: usize) -> Vec<Program> {
        PitchClass::ALL.into_iter().take(size).map(program).collect()
    }

    fn setup(programs: &[Program]) -> (tempfile::TempDir, SoundMixer, mock::Device) {
        let dir = tempfile::tempdir().unwrap();
        for program in programs {
            for step in program.steps() {
                write_samples(dir.path(), step.kind().sound().samples()).unwrap();
            }
        }
        let device = mock::Device::get("mock");
        let mixer = SoundMixer::new(Arc::new(device.clone()), dir.path());
        (dir, mixer, device)
    }

    #[test]
    fn test_empty_catalogue() {
        assert!(matches!(
            ProgramRunner::new(vec![], StdRng::seed_from_u64(1)),
            Err(RunnerError::EmptyCatalogue)
        ));
    }

    #[test]
    fn test_pick_is_uniform() {
        let mut runner = ProgramRunner::new(catalogue(4), StdRng::seed_from_u64(42)).unwrap();

        let mut counts = [0usize; 4];
        for _ in 0..40_000 {
            counts[runner.pick()] += 1;
        }

        for count in counts {
            assert!(
                (9_000..=11_000).contains(&count),
                "unexpected distribution: {:?}",
                counts
            );
        }
    }

    #[test]
    fn test_tick_draws_with_pick() {
        let programs = catalogue(12);
        let (_dir, mixer, _) = setup(&programs);

        let mut reference =
            ProgramRunner::new(programs.clone(), StdRng::seed_from_u64(11)).unwrap();
        let mut runner = ProgramRunner::new(programs, StdRng::seed_from_u64(11)).unwrap();

        // Each program lasts 100ms, so every other tick draws a new one.
        let mut now = Instant::now();
        for _ in 0..20 {
            let expected = reference.pick();
            runner.tick_at(now, &mixer).unwrap();
            assert_eq!(
                Some(reference.programs()[expected].name()),
                runner.current().map(Program::name)
            );

            now += Duration::from_millis(100);
            runner.tick_at(now, &mixer).unwrap();
            assert!(runner.current().is_none());
        }
    }

    #[test]
    fn test_tick_cycle() {
        let programs = catalogue(3);
        let (_dir, mixer, device) = setup(&programs);
        let mut runner = ProgramRunner::new(programs, StdRng::seed_from_u64(7)).unwrap();
        assert!(runner.current().is_none());

        let start = Instant::now();
        runner.tick_at(start, &mixer).unwrap();
        let first = runner.current().map(|p| p.name().to_string());
        assert!(first.is_some());
        assert_eq!(1, device.played().len());

        runner
            .tick_at(start + Duration::from_millis(50), &mixer)
            .unwrap();
        assert_eq!(first, runner.current().map(|p| p.name().to_string()));

        // Completion releases the program, and the next tick draws another.
        let done = start + Duration::from_millis(100);
        runner.tick_at(done, &mixer).unwrap();
        assert!(runner.current().is_none());
        assert_eq!(1, device.played().len());

        runner.tick_at(done, &mixer).unwrap();
        assert!(runner.current().is_some());
        assert_eq!(2, device.played().len());
    }

    #[test]
    fn test_playback_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let mixer = SoundMixer::new(Arc::new(mock::Device::get("mock")), dir.path());
        let mut runner = ProgramRunner::new(catalogue(2), StdRng::seed_from_u64(3)).unwrap();

        assert!(matches!(
            runner.tick(&mixer),
            Err(RunnerError::Playback(AudioError::MissingSample(_)))
        ));
    }

    #[test]
    fn test_display() {
        let runner = ProgramRunner::new(catalogue(2), StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(
            "Program: Note - C4: PlayNote: C4 (100 ms)\n\
             Program: Note - C#4: PlayNote: C#4 (100 ms)\n\
             2 programs",
            runner.to_string()
        );
    }
}
