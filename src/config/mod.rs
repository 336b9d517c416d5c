//! Tool configuration for `retouch.toml`.
//!
//! The config file is optional; a missing file means all defaults, and CLI
//! options override whatever the file sets. Unknown fields are detected and
//! reported rather than silently dropped.
//!
//! # Example
//!
//! ```toml
//! [input]
//! dir = "public"       # directory scanned for *.html files
//! recursive = false    # scan subdirectories too
//!
//! [fix]
//! parallel = false     # process files with a thread pool
//!
//! [rules]
//! accessibility = true # aria labels, landmarks, skip link, alt text
//! performance = true   # noscript fallback, rel="noopener"
//! ```

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};
use crate::utils::path::normalize_path;
use crate::{debug, log};

// ============================================================================
// Sections
// ============================================================================

/// `[input]` section: where documents come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for `*.html` files.
    pub dir: PathBuf,

    /// Scan subdirectories too (default: top level only).
    pub recursive: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            recursive: false,
        }
    }
}

/// `[fix]` section: how documents are processed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Process files with a thread pool. Reports are collected in scan
    /// order either way, so output is identical.
    pub parallel: bool,
}

/// `[rules]` section: which rule groups are active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub accessibility: bool,
    pub performance: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            accessibility: true,
            performance: true,
        }
    }
}

// ============================================================================
// Root configuration
// ============================================================================

/// Root configuration structure representing `retouch.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was loaded from (internal use only).
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub fix: FixConfig,

    #[serde(default)]
    pub rules: RulesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            input: InputConfig::default(),
            fix: FixConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Reads the config file if it exists, applies CLI overrides, resolves
    /// the input directory to an absolute path, then validates.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.exists() {
            let config = Self::from_path(&cli.config)?;
            debug!("config"; "loaded {}", cli.config.display());
            config
        } else {
            debug!("config"; "{} not found, using defaults", cli.config.display());
            Self::default()
        };

        config.config_path = cli.config.clone();
        config.apply_cli(cli);
        config.input.dir = normalize_path(&config.input.dir);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config = toml::from_str(content).map_err(|e| ConfigError::Toml(Box::new(e)))?;
        Ok(config)
    }

    /// Load configuration from a file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "unknown fields in {}, ignoring:", display_path);
            for field in &ignored {
                eprintln!("- {field}");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(|e| ConfigError::Toml(Box::new(e)))?;
        Ok((config, ignored))
    }

    /// Apply CLI overrides on top of the file configuration.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.input.dir, cli.dir.as_ref());

        match &cli.command {
            Commands::Fix { args } | Commands::Check { args } => {
                crate::logger::set_verbose(args.verbose);
                Self::update_option(&mut self.fix.parallel, args.parallel.as_ref());
            }
            Commands::Rules => {}
        }
    }

    /// Update a config option if a CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate the resolved configuration.
    fn validate(&self) -> Result<()> {
        if !self.input.dir.is_dir() {
            return Err(ConfigError::Validation(format!(
                "input directory `{}` does not exist",
                self.input.dir.display()
            ))
            .into());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
