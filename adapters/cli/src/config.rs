use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tilt_2048_core::{DEFAULT_ANIMATION_DURATION, DEFAULT_COLUMNS, DEFAULT_ROWS};
use tilt_2048_world::WorldConfig;

use crate::keys::KeyBindings;

/// Command-line arguments. Every option overrides the configuration file.
#[derive(Debug, Default, Parser)]
#[command(name = "tilt-2048", about = "Slide and merge numbered tiles in the terminal")]
pub(crate) struct Args {
    /// TOML file providing board size, timing, seed and key bindings
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Number of board columns
    #[arg(long)]
    pub(crate) columns: Option<u32>,

    /// Number of board rows
    #[arg(long)]
    pub(crate) rows: Option<u32>,

    /// Length of tile transitions in milliseconds
    #[arg(long)]
    pub(crate) animation_ms: Option<u64>,

    /// Seed for tile spawns
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Print the board without ANSI colors
    #[arg(long)]
    pub(crate) no_color: bool,

    /// Log game progress to stderr
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Settings read from the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) animation_ms: u64,
    pub(crate) seed: Option<u64>,
    pub(crate) keys: KeyBindings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            animation_ms: u64::try_from(DEFAULT_ANIMATION_DURATION.as_millis()).unwrap_or(100),
            seed: None,
            keys: KeyBindings::default(),
        }
    }
}

impl CliConfig {
    /// Builds the effective configuration: file values first, then flags.
    pub(crate) fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        config.keys.validate()?;
        Ok(config)
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn apply_overrides(&mut self, args: &Args) {
        if let Some(columns) = args.columns {
            self.columns = columns;
        }
        if let Some(rows) = args.rows {
            self.rows = rows;
        }
        if let Some(animation_ms) = args.animation_ms {
            self.animation_ms = animation_ms;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
    }

    pub(crate) fn world_config(&self) -> WorldConfig {
        let config = WorldConfig::new(self.columns, self.rows)
            .with_animation_duration(Duration::from_millis(self.animation_ms));
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
