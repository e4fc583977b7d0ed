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
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use eartrainer::audio::{self, SoundMixer};
use eartrainer::config::{Audio, Trainer};
use eartrainer::program::{self, StepKind, StepState};
use eartrainer::runner::ProgramRunner;
use eartrainer::theory::{Chord, ChordQuality, Interval, IntervalKind, Note, PitchClass};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CONFIG: &str = r#"
[settings]
octave_range = [4, 4]
note_duration = 100
identity_duration = 50

[programs]
notes = ["C"]
intervals = ["maj 3rd"]
chords = ["maj"]

[audio]
device = "mock"
"#;

fn write_library(root: &Path, programs: &[program::Program]) {
    let wav_spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    for program in programs {
        for step in program.steps() {
            for key in step.kind().sound().samples() {
                let path = key.path(root);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                let mut writer = hound::WavWriter::create(path, wav_spec).unwrap();
                for sample in [0.1f32, 0.2, 0.3] {
                    writer.write_sample(sample).unwrap();
                }
                writer.finalize().unwrap();
            }
        }
    }
}

#[test]
fn parses_theory_tokens() {
    let interval = Interval::parse("5th", Note::new(PitchClass::A, 3)).unwrap();
    assert_eq!(IntervalKind::Fifth, interval.kind());
    assert_eq!(7, interval.semitones());
    assert_eq!(Note::new(PitchClass::E, 4), interval.second_note());

    let chord = Chord::parse("D min", 4).unwrap();
    assert_eq!(ChordQuality::Minor, chord.quality());
    assert_eq!("D min4", chord.name());
    assert!(Chord::parse("Dmin", 4).is_err());
}

#[test]
fn runs_generated_programs_on_a_mock_device() {
    let trainer = Trainer::from_toml(CONFIG).unwrap();
    let programs = program::generate(&trainer).unwrap();
    assert_eq!(1 + 12 + 12, programs.len());

    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path(), &programs);

    let device = audio::get_device(&Audio::new("mock")).unwrap();
    let mixer = SoundMixer::new(device, dir.path());
    assert_eq!(dir.path(), mixer.samples_path());

    let mut runner = ProgramRunner::new(programs, StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(25, runner.programs().len());

    let mut now = Instant::now();
    for _ in 0..10 {
        runner.tick_at(now, &mixer).unwrap();
        let current = runner.current().unwrap();
        let first = current.current_step().unwrap();
        assert_eq!(StepState::Running, first.state());
        assert!(!matches!(first.kind(), StepKind::PlayIdentity(_)));

        // Step through the program until the runner lets it go.
        while runner.current().is_some() {
            now += Duration::from_millis(50);
            runner.tick_at(now, &mixer).unwrap();
        }
    }
}
