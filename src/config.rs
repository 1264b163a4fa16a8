//! Configuration management for cppstyle.
//!
//! This module provides the [`Config`] struct which controls a stylify run.
//! Configuration can be loaded from:
//! - TOML files (`cppstyle.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being processed up to the filesystem root, plus the user's home directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::includes::DEFAULT_TEST_SUFFIX;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["cppstyle.toml"];

/// C/C++ source and header extensions picked up from directories
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "c++", "h", "hh", "hpp", "hxx", "h++", "inl",
];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// A transformation that can be enabled for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleModule {
    /// Divide includes into sections and sort them
    SortIncludes,
    /// Add and/or remove spaces and tabs
    CorrectSpacing,
}

impl StyleModule {
    /// Every module, in application order
    pub const ALL: [StyleModule; 2] = [StyleModule::SortIncludes, StyleModule::CorrectSpacing];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StyleModule::SortIncludes => "sort_includes",
            StyleModule::CorrectSpacing => "correct_spacing",
        }
    }
}

impl fmt::Display for StyleModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleModule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleModule::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown style module '{s}' (choose from {})",
                    StyleModule::ALL.map(StyleModule::as_str).join(", ")
                )
            })
    }
}

// Serde default functions
fn default_modules() -> Vec<StyleModule> {
    StyleModule::ALL.to_vec()
}
fn default_test_suffix() -> String {
    DEFAULT_TEST_SUFFIX.to_string()
}
fn default_true() -> bool {
    true
}
fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}

/// Main configuration struct for cppstyle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Suppress progress messages (warnings and errors are always shown)
    #[serde(default)]
    pub quiet: bool,

    /// Project root directory, if different from the current directory
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Enabled style modules (default: all)
    #[serde(default = "default_modules")]
    pub modules: Vec<StyleModule>,

    /// Suffix marking test sources whose own header drops it (default: `_test`)
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,

    /// First path components of external library headers (e.g. `glog`)
    #[serde(default)]
    pub external_lib_prefixes: Vec<String>,

    /// External libraries are installed system-wide and included with `<>` (default: true)
    #[serde(default = "default_true")]
    pub system_wide_external_libs: bool,

    /// File extensions processed when walking directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub quiet: Option<bool>,
    pub root: Option<PathBuf>,
    pub modules: Option<Vec<StyleModule>>,
    pub test_suffix: Option<String>,
    pub external_lib_prefixes: Option<Vec<String>>,
    pub system_wide_external_libs: Option<bool>,
    pub extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quiet: false,
            root: None,
            modules: default_modules(),
            test_suffix: default_test_suffix(),
            external_lib_prefixes: Vec::new(),
            system_wide_external_libs: true,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.modules.is_empty() {
            return Some("at least one style module must be enabled".to_string());
        }
        if self.test_suffix.is_empty() {
            return Some("test_suffix must not be empty".to_string());
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.trim().is_empty()) {
            return Some(format!("invalid extension '{ext}'"));
        }
        if let Some(prefix) = self
            .external_lib_prefixes
            .iter()
            .find(|p| p.is_empty() || p.contains(['/', '\\']))
        {
            return Some(format!(
                "external library prefix '{prefix}' must be a single path component"
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial = parse_partial(&contents, path)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.quiet {
            self.quiet = v;
        }
        if let Some(v) = &partial.root {
            self.root = Some(v.clone());
        }
        if let Some(v) = &partial.modules {
            self.modules.clone_from(v);
        }
        if let Some(v) = &partial.test_suffix {
            self.test_suffix.clone_from(v);
        }
        if let Some(v) = &partial.external_lib_prefixes {
            self.external_lib_prefixes.clone_from(v);
        }
        if let Some(v) = partial.system_wide_external_libs {
            self.system_wide_external_libs = v;
        }
        if let Some(v) = &partial.extensions {
            self.extensions.clone_from(v);
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config has the lowest priority
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let dir = std::path::absolute(&dir).unwrap_or(dir);
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so closer configs override
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match parse_partial(&contents, path) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("WARNING: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("WARNING: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

/// Parse a config file body; a relative `root` is taken relative to the file's directory
fn parse_partial(contents: &str, path: &Path) -> anyhow::Result<PartialConfig> {
    let mut partial: PartialConfig = toml::from_str(contents)?;
    if let (Some(root), Some(dir)) = (&partial.root, path.parent()) {
        if root.is_relative() && !dir.as_os_str().is_empty() {
            partial.root = Some(dir.join(root));
        }
    }
    Ok(partial)
}
