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
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::Deserialize;

mod audio;
pub mod error;
mod programs;
mod settings;

pub use self::audio::Audio;
pub use self::error::ConfigError;
pub use self::programs::Programs;
pub use self::settings::Settings;

/// The ear trainer configuration file.
#[derive(Deserialize, Clone, Debug)]
pub struct Trainer {
    /// Timing, octave range and sample location.
    settings: Settings,
    /// The drills to generate.
    #[serde(default)]
    programs: Programs,
    /// The audio output.
    #[serde(default)]
    audio: Audio,
}

impl Trainer {
    /// Loads and validates a configuration file. The format follows the file
    /// extension (TOML, YAML, JSON and so on).
    pub fn deserialize(path: &Path) -> Result<Trainer, ConfigError> {
        Self::build(Config::builder().add_source(File::from(path)))
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml(contents: &str) -> Result<Trainer, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn build(
        builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Trainer, ConfigError> {
        let trainer = builder.build()?.try_deserialize::<Trainer>()?;
        trainer.validate()?;
        Ok(trainer)
    }

    /// Checks everything that can be checked before any program is generated, so a
    /// bad configuration fails at startup.
    fn validate(&self) -> Result<(), ConfigError> {
        self.settings.octave_range()?;
        self.settings.poll_interval()?;
        self.programs.notes()?;
        self.programs.intervals()?;
        self.programs.chords()?;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn programs(&self) -> &Programs {
        &self.programs
    }

    pub fn audio(&self) -> &Audio {
        &self.audio
    }
}
