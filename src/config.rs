//! Player settings and command-line options.
//!
//! Settings live in `settings.json` in the platform config directory. On
//! first run the defaults are written there; a broken file is reported and
//! replaced by defaults for this session.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "cube-dash.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play the jump sound.
    pub sound_enabled: bool,
    /// WAV file played on jump. Relative paths resolve against the working
    /// directory.
    pub jump_sound: PathBuf,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            jump_sound: PathBuf::from("jump.wav"),
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Like `load_from`, but writes the defaults to `path` when no file
    /// exists yet.
    pub fn load_or_init(path: &Path) -> io::Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let settings = Self::default();
        settings.save_to(path)?;
        Ok(settings)
    }

    pub fn from_json(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
    }

    /// Fold command-line overrides into the file settings.
    pub fn apply_cli(&mut self, options: &CliOptions) {
        if options.seed.is_some() {
            self.seed = options.seed;
        }
        if options.mute {
            self.sound_enabled = false;
        }
    }
}

/// Platform directories for settings and the log file.
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "cube-dash").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        Ok(Self {
            config_dir: project_dirs.config_dir().to_path_buf(),
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Log file path; creates the data directory if needed.
    pub fn log_path(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(self.data_dir.join(LOG_FILE))
    }
}

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub seed: Option<u64>,
    pub mute: bool,
}

/// What `main` should do after parsing arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Play(CliOptions),
    Help,
    Version,
}

pub const USAGE: &str = "Cube Dash - jump the spikes, dodge the blocks

Usage: cube-dash [options]

Options:
  --seed <n>   Use a fixed random seed
  --mute       Disable the jump sound
  --version    Show version information
  --help       Show this help message

Controls: Space/Up jump, R restart after game over, Q/Esc quit";

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--mute" => options.mute = true,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                let seed = value
                    .as_ref()
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value.as_ref()))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(CliCommand::Play(options))
}
