//! Command-line interface for cppstyle.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::config::StyleModule;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to stylify (`-` or none reads stdin)
    pub inputs: Vec<PathBuf>,

    /// Enabled style modules (empty = from config, default all)
    pub modules: Vec<StyleModule>,

    /// Don't overwrite source files with stylified output
    pub no_edit: bool,

    /// Print diffs between input and stylified output to stderr
    pub show_diff: bool,

    /// Don't print progress (only warnings and errors)
    pub quiet: bool,

    /// Name of the source read from stdin
    pub filename: Option<String>,

    /// Project root directory, if different from the current directory
    pub root: Option<PathBuf>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Extra C/C++ file extensions (in addition to configured ones)
    pub extensions: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("cppstyle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sort #include blocks and normalize spacing in C/C++ sources")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to stylify (reads stdin when omitted or '-')")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("modules")
                .short('m')
                .long("modules")
                .help("Enabled style module, repeatable (sort_includes, correct_spacing) [default: all]")
                .value_name("MOD")
                .action(ArgAction::Append)
                .value_parser(|s: &str| s.parse::<StyleModule>()),
        )
        .arg(
            Arg::new("no-edit")
                .long("no-edit")
                .alias("no_edit")
                .help("Don't overwrite source files with stylified output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show-diff")
                .short('d')
                .long("show-diff")
                .alias("show_diff")
                .help("Print diffs between input and stylified output to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Don't print progress (only warnings and errors)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("filename")
                .long("filename")
                .help("When reading from stdin, the filename of the processed source")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Path to project root directory, if different from current directory")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to config file (default: discover cppstyle.toml)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively process directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob), repeatable")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .help("Additional C/C++ file extension, repeatable (e.g. 'tcc')")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0 = auto, 1 = sequential) [default: 0]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from the process command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        modules: matches
            .get_many::<StyleModule>("modules")
            .map(|vals| vals.copied().collect())
            .unwrap_or_default(),
        no_edit: matches.get_flag("no-edit"),
        show_diff: matches.get_flag("show-diff"),
        quiet: matches.get_flag("quiet"),
        filename: matches.get_one::<String>("filename").cloned(),
        root: matches.get_one::<PathBuf>("root").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("extension")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        debug: matches.get_flag("debug"),
    }
}
