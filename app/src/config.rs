//! Run configuration
//!
//! Settings come from an optional TOML file, then command-line flags
//! override them:
//!
//! ```toml
//! fill = "zero-based"      # one-based | zero-based
//! overflow = "wrapping"    # wrapping | checked | saturating
//! wide = false
//! scenarios = true
//! ```

use anyhow::{Context, Result};
use bounded_accessor::Fill;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::arith::OverflowMode;

/// Initial array content, as named on the command line and in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillArg {
    /// [1, 2, ..., 200]
    OneBased,
    /// [0, 1, ..., 199]
    ZeroBased,
}

impl From<FillArg> for Fill {
    fn from(arg: FillArg) -> Self {
        match arg {
            FillArg::OneBased => Fill::OneBased,
            FillArg::ZeroBased => Fill::ZeroBased,
        }
    }
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub fill: Option<FillArg>,
    pub overflow: Option<OverflowMode>,
    pub wide: Option<bool>,
    pub scenarios: Option<bool>,
}

impl FileConfig {
    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse config file content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fill: Option<FillArg>,
    pub overflow: Option<OverflowMode>,
    pub wide: bool,
    pub scenarios: bool,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fill: Fill,
    pub overflow: OverflowMode,
    pub wide: bool,
    pub scenarios: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fill: Fill::OneBased,
            overflow: OverflowMode::Checked,
            wide: false,
            scenarios: false,
        }
    }
}

impl Settings {
    /// Merge file values and command-line overrides over the defaults.
    ///
    /// Boolean flags can only switch a setting on.
    pub fn resolve(file: FileConfig, cli: Overrides) -> Self {
        let defaults = Self::default();

        Self {
            fill: cli
                .fill
                .or(file.fill)
                .map(Fill::from)
                .unwrap_or(defaults.fill),
            overflow: cli.overflow.or(file.overflow).unwrap_or(defaults.overflow),
            wide: cli.wide || file.wide.unwrap_or(defaults.wide),
            scenarios: cli.scenarios || file.scenarios.unwrap_or(defaults.scenarios),
        }
    }
}
