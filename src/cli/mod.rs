//! The `pokeinfo` command-line shell.
//!
//! Commands write to a caller-supplied writer so they can be driven from
//! tests as well as from `main`.

mod lookup;
mod persisted;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigError};
use crate::fetch::{LifecycleMode, StalePolicy};

pub use persisted::CountState;

#[derive(Debug, Parser)]
#[command(name = "pokeinfo", version, about = "Persisted values and pokemon lookups")]
pub struct Cli {
    /// Config file (default: ~/.config/pokeinfo/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Durable store file, overriding the config.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Greet the persisted name, optionally changing it first.
    Greet {
        /// New name to remember. An empty string clears it.
        #[arg(long)]
        name: Option<String>,
    },

    /// Increment a persisted counter object.
    Counter {
        /// Store key of the counter.
        #[arg(long, default_value = "myValue")]
        key: String,

        /// Amount to add.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        by: i64,
    },

    /// Write a value under a key that is cleaned up on key change and exit.
    Scratch {
        key: String,

        /// JSON value; anything that is not valid JSON is stored as a string.
        value: String,

        /// Move the value to this key before exiting.
        #[arg(long)]
        move_to: Option<String>,
    },

    /// Look up pokemon by name, printing every state the request passes through.
    Lookup {
        /// Names to look up in order. An empty name resets to idle.
        names: Vec<String>,

        #[arg(long, value_enum)]
        mode: Option<LifecycleMode>,

        #[arg(long, value_enum)]
        stale: Option<StalePolicy>,
    },

    /// Apply a JSON array of tagged actions through the reducer.
    Replay { file: PathBuf },
}

impl Cli {
    /// Load the config named by `--config` (or the default file) and apply
    /// command-line overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(store) = &self.store {
            config.storage.path = store.clone();
        }

        Ok(config)
    }
}

/// Run `command` against `config`, writing user-facing output to `out`.
pub async fn run<W: Write>(command: Command, config: &Config, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Greet { name } => persisted::greet(config, name, out),
        Command::Counter { key, by } => persisted::counter(config, &key, by, out),
        Command::Scratch {
            key,
            value,
            move_to,
        } => persisted::scratch(config, &key, &value, move_to, out),
        Command::Lookup { names, mode, stale } => {
            let mode = mode.unwrap_or(config.lifecycle.mode);
            let stale = stale.unwrap_or(config.lifecycle.stale_responses);
            lookup::lookup(config, &names, mode, stale, out).await
        }
        Command::Replay { file } => lookup::replay(&file, out),
    }
}
