// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: TOML file merged with command-line overrides

use clap::Parser;
use lockbot_adapters::IrcConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Channel name prefixes defined by RFC 2812
const CHANNEL_PREFIXES: [char; 4] = ['#', '&', '+', '!'];

/// Command-line arguments; every field overrides the config file
#[derive(Debug, Default, Parser)]
#[command(
    name = "lockbotd",
    version,
    about = "Chat bot coordinating exclusive locks on shared resources"
)]
pub struct Args {
    /// Config file (default: <config dir>/lockbot/config.toml, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// IRC server host
    #[arg(long)]
    pub server: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Channel to join
    #[arg(long)]
    pub channel: Option<String>,
    #[arg(long)]
    pub nick: Option<String>,
    /// Server password
    #[arg(long)]
    pub password: Option<String>,
    /// Directory for the lock table, PID file and log
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("no channel configured (set `channel` or pass --channel)")]
    MissingChannel,
    #[error("nick must not be empty")]
    EmptyNick,
    #[error("could not determine state directory")]
    NoStateDir,
}

/// Config file contents; absent fields fall back to defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub channel: Option<String>,
    pub nick: Option<String>,
    pub password: Option<String>,
    pub realname: Option<String>,
    pub state_dir: Option<PathBuf>,
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub register_timeout: Option<Duration>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }
}

/// Effective daemon settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: String,
    pub port: u16,
    pub channel: String,
    pub nick: String,
    pub password: Option<String>,
    pub realname: String,
    pub state_dir: PathBuf,
    /// Pause between a lost connection and the next attempt
    pub reconnect_delay: Duration,
    pub register_timeout: Duration,
}

impl Settings {
    /// Read the config file named by `args` (or the default one, if it
    /// exists) and apply the command-line overrides.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => FileConfig::from_file(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::merge(file, args)
    }

    /// Combine file values with overrides; overrides win
    pub fn merge(file: FileConfig, args: &Args) -> Result<Self, ConfigError> {
        let channel = args
            .channel
            .clone()
            .or(file.channel)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::MissingChannel)?;
        let nick = args
            .nick
            .clone()
            .or(file.nick)
            .unwrap_or_else(|| "lockbot".to_string());
        if nick.trim().is_empty() {
            return Err(ConfigError::EmptyNick);
        }
        let state_dir = match args.state_dir.clone().or(file.state_dir) {
            Some(dir) => dir,
            None => default_state_dir()?,
        };

        Ok(Self {
            server: args
                .server
                .clone()
                .or(file.server)
                .unwrap_or_else(|| "irc.libera.chat".to_string()),
            port: args.port.or(file.port).unwrap_or(6667),
            channel: normalize_channel(&channel),
            nick: nick.trim().to_string(),
            password: args.password.clone().or(file.password),
            realname: file.realname.unwrap_or_else(|| "lockbot".to_string()),
            state_dir,
            reconnect_delay: file.reconnect_delay.unwrap_or(Duration::from_secs(10)),
            register_timeout: file.register_timeout.unwrap_or(Duration::from_secs(60)),
        })
    }

    pub fn irc(&self) -> IrcConfig {
        IrcConfig {
            server: self.server.clone(),
            port: self.port,
            nick: self.nick.clone(),
            password: self.password.clone(),
            realname: self.realname.clone(),
            channel: self.channel.clone(),
            register_timeout: self.register_timeout,
        }
    }
}

/// Prefix `#` unless the name already carries a channel prefix
pub fn normalize_channel(channel: &str) -> String {
    if channel.starts_with(CHANNEL_PREFIXES) {
        channel.to_string()
    } else {
        format!("#{}", channel)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lockbot").join("config.toml"))
}

/// XDG_STATE_HOME/lockbot, or ~/.local/state/lockbot
fn default_state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = dirs::state_dir() {
        return Ok(dir.join("lockbot"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/lockbot"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
