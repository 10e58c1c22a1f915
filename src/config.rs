//! Configuration management for the NC program annotator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration (`.nc-gloss.toml`)
//! - Dictionary directory and file layering
//! - Model selection

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".nc-gloss.toml";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "nc-gloss")]
#[command(about = "Line-by-line annotator for NC (G-code/M-code) programs")]
#[command(version)]
pub struct Args {
    /// Machine model whose dictionary layer applies
    #[arg(long, global = true, help = "Machine model (e.g. 'BE20-V', 'B012-Ⅲ')")]
    pub model: Option<String>,

    /// Extra dictionary documents merged at startup, in order
    #[arg(long = "dict", global = true, value_name = "FILE")]
    pub dict: Vec<PathBuf>,

    /// Extra directory of dictionary documents
    #[arg(long, global = true, value_name = "DIR")]
    pub dict_dir: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Annotate a program file (or stdin)
    Annotate {
        /// Program file; stdin when omitted
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the current dictionary as JSON
    ExportDict {
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List known machine models
    Models,
    /// Run the language server on stdio
    Serve,
}

impl Default for Command {
    fn default() -> Self {
        Command::Annotate {
            input: None,
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Contents of `.nc-gloss.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub model: Option<String>,
    /// Dictionary documents, relative to the config file
    #[serde(default)]
    pub dictionaries: Vec<PathBuf>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse project config: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Model explicitly set via command line
    pub cli_model: Option<String>,
    /// Model from project configuration
    pub project_model: Option<String>,
    pub project_config_path: Option<PathBuf>,
    /// Directories whose `*.json` files are merged, lowest priority first
    pub dictionary_dirs: Vec<PathBuf>,
    /// Dictionary files merged after the directories, in order
    pub dictionary_files: Vec<PathBuf>,
    pub log_level: String,
    pub command: Command,
}

impl Config {
    /// Create configuration from command-line arguments and the working directory
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::from_args_in(args, &cwd)
    }

    /// Create configuration resolving project files from `cwd` (useful for testing)
    pub fn from_args_in(args: Args, cwd: &Path) -> Result<Self> {
        let project_config_path = find_project_config(cwd);
        let project = match &project_config_path {
            Some(path) => ProjectConfig::load(path)?,
            None => ProjectConfig::default(),
        };

        let mut dictionary_dirs = Vec::new();

        // User-global directory
        if let Some(config_dir) = dirs::config_dir() {
            dictionary_dirs.push(config_dir.join("nc-gloss").join("dictionaries"));
        }

        // Workspace directory
        dictionary_dirs.push(cwd.join(".nc-gloss").join("dictionaries"));

        if let Some(custom_dir) = args.dict_dir {
            dictionary_dirs.push(custom_dir);
        }

        let base_dir = project_config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(cwd);
        let mut dictionary_files: Vec<PathBuf> = project
            .dictionaries
            .iter()
            .map(|p| base_dir.join(p))
            .collect();
        dictionary_files.extend(args.dict);

        Ok(Config {
            cli_model: args.model,
            project_model: project.model,
            project_config_path,
            dictionary_dirs,
            dictionary_files,
            log_level: args.log_level,
            command: args.command.unwrap_or_default(),
        })
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }

    /// Model from configuration alone: CLI, then project config
    pub fn get_effective_model(&self) -> Option<String> {
        self.cli_model
            .clone()
            .or_else(|| self.project_model.clone())
    }

    /// Model for a document: CLI, then modeline, then project config
    pub fn resolve_model(&self, modeline_model: Option<String>) -> Option<String> {
        self.cli_model
            .clone()
            .or(modeline_model)
            .or_else(|| self.project_model.clone())
    }
}

/// Find `.nc-gloss.toml` in `start` or any ancestor
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
