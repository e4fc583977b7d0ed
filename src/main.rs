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
use clap::{crate_version, Parser, Subcommand};
use eartrainer::audio::{self, SoundMixer};
use eartrainer::config;
use eartrainer::program;
use eartrainer::runner::ProgramRunner;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "./config.toml";

const SYSTEMD_SERVICE: &str = r#"
[Unit]
Description=unattended ear trainer

[Service]
Type=simple
Restart=on-failure
EnvironmentFile=-/etc/default/eartrainer
ExecStart=/usr/local/bin/eartrainer start "$EARTRAINER_CONFIG"

[Install]
WantedBy=multi-user.target
Alias=eartrainer.service
"#;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "An unattended ear trainer."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start will play programs drawn at random from the configuration until stopped.
    Start {
        /// The path to the trainer config.
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        config_path: String,
    },
    /// Lists the programs generated from the given config.
    Programs {
        /// The path to the trainer config.
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        config_path: String,
    },
    /// Lists the available audio output devices.
    Devices {},
    /// Prints a systemd service definition to stdout.
    Systemd {},
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { config_path } => {
            let trainer = config::Trainer::deserialize(&PathBuf::from(&config_path))?;
            let programs = program::generate(&trainer)?;
            let mut runner = ProgramRunner::new(programs, StdRng::from_entropy())?;
            println!("{}", runner);

            let device = audio::get_device(trainer.audio())?;
            info!(device = device.to_string(), "Using audio device.");
            let mixer = SoundMixer::new(device, trainer.settings().samples_path());

            runner.run(&mixer, trainer.settings().poll_interval()?)?;
        }
        Commands::Programs { config_path } => {
            let trainer = config::Trainer::deserialize(&PathBuf::from(&config_path))?;
            let programs = program::generate(&trainer)?;

            if programs.is_empty() {
                println!("No programs configured in {}.", config_path);
                return Ok(());
            }

            println!("{}", ProgramRunner::new(programs, StdRng::from_entropy())?);
        }
        Commands::Devices {} => {
            let devices = audio::list_devices()?;

            if devices.is_empty() {
                println!("No devices found.");
                return Ok(());
            }

            println!("Devices:");
            for device in devices {
                println!("- {}", device);
            }
        }
        Commands::Systemd {} => {
            println!("{}", SYSTEMD_SERVICE);
        }
    }

    Ok(())
}
