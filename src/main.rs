//! cppstyle - Sort includes and normalize spacing in C/C++ sources

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use cppstyle::diff::{unified_diff, DEFAULT_CONTEXT};
use cppstyle::error::SortError;
use cppstyle::includes::paths::normalize_path;
use cppstyle::process::{stylify_source, stylify_stream, Stylified};
use cppstyle::{
    build_cli, parse_args, CliArgs, Config, Diagnostics, Result, RunContext, StderrDiagnostics,
};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// Files larger than this are skipped (100 MB)
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What happened to one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Unchanged,
    Changed,
    Skipped,
}

fn main() -> Result<()> {
    let args = parse_args();

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // Nothing piped in and no inputs: show help instead of waiting on the terminal
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        build_cli().print_help()?;
        println!();
        return Ok(());
    }

    let diagnostics = StderrDiagnostics;

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args, &diagnostics);
    }

    // An explicit config applies to every file; otherwise each file discovers its own
    let base_config = match &args.config {
        Some(_) => Some(build_config(&args, None)?),
        None => None,
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("WARNING: failed to configure thread pool: {e}");
            }
        }
    }

    let extensions = match &base_config {
        Some(config) => config.extensions.clone(),
        None => build_config(&args, None)?.extensions,
    };
    let files = collect_files(&args, &extensions);

    if files.is_empty() {
        if !args.quiet {
            eprintln!("No C/C++ files found to stylify.");
        }
        return Ok(());
    }

    // Diffs of concurrent files would interleave on stderr
    let failures = if args.show_diff || args.jobs == Some(1) {
        process_files_sequential(&files, base_config.as_ref(), &args, &diagnostics)
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args, &diagnostics)
    };

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Build configuration from CLI args and config files
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if !args.modules.is_empty() {
        config.modules.clone_from(&args.modules);
    }
    if args.quiet {
        config.quiet = true;
    }
    if let Some(root) = &args.root {
        config.root = Some(root.clone());
    }
    for ext in &args.extensions {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if !config.extensions.iter().any(|e| e == ext) {
            config.extensions.push(ext.to_string());
        }
    }

    if args.debug {
        print_config_debug(&config);
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   quiet: {}", config.quiet);
    match &config.root {
        Some(root) => eprintln!("[DEBUG]   root: {}", root.display()),
        None => eprintln!("[DEBUG]   root: (current directory)"),
    }
    let modules: Vec<String> = config.modules.iter().map(ToString::to_string).collect();
    eprintln!("[DEBUG]   modules: {}", modules.join(", "));
    eprintln!("[DEBUG]   test_suffix: {}", config.test_suffix);
    eprintln!(
        "[DEBUG]   external_lib_prefixes: {:?}",
        config.external_lib_prefixes
    );
    eprintln!(
        "[DEBUG]   system_wide_external_libs: {}",
        config.system_wide_external_libs
    );
    eprintln!("[DEBUG]   extensions: {}", config.extensions.join(", "));
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs, extensions: &[String]) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("WARNING: ignoring invalid exclude pattern '{p}': {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            // Explicit files are taken whatever their extension
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_source_file(path, extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                let mut children: Vec<PathBuf> = entries
                    .filter_map(std::result::Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| {
                        path.is_file()
                            && is_source_file(path, extensions)
                            && !is_excluded(path, &exclude_patterns)
                    })
                    .collect();
                children.sort();
                files.extend(children);
            }
        } else {
            eprintln!("WARNING: no such file or directory: {}", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();
    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Check if a file has one of the configured C/C++ extensions
fn is_source_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|candidate| candidate.strip_prefix('.').unwrap_or(candidate) == ext)
        })
}

/// Resolve the config for one file and stylify it
fn run_single_file(
    path: &Path,
    base_config: Option<&Config>,
    args: &CliArgs,
    diagnostics: &dyn Diagnostics,
) -> Result<FileOutcome> {
    match base_config {
        Some(config) => process_single_file(path, config, args, diagnostics),
        None => {
            let config = build_config(args, Some(path))?;
            process_single_file(path, &config, args, diagnostics)
        }
    }
}

/// Process files one after another; returns the number of failed files
fn process_files_sequential(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
    diagnostics: &dyn Diagnostics,
) -> usize {
    let mut failures = 0;
    for path in files {
        match run_single_file(path, base_config, args, diagnostics) {
            Ok(FileOutcome::Skipped) => failures += 1,
            Ok(_) => {}
            Err(e) => {
                failures += 1;
                diagnostics.error(&format!("failed to stylify {}: {e}", path.display()));
            }
        }
    }
    failures
}

/// Process files in parallel using Rayon; returns the number of failed files
fn process_files_parallel(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
    diagnostics: &dyn Diagnostics,
) -> usize {
    let changed_count = AtomicUsize::new(0);
    let failure_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match run_single_file(path, base_config, args, diagnostics) {
            Ok(FileOutcome::Changed) => {
                changed_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(FileOutcome::Unchanged) => {}
            Ok(FileOutcome::Skipped) => {
                failure_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                failure_count.fetch_add(1, Ordering::Relaxed);
                diagnostics.error(&format!("failed to stylify {}: {e}", path.display()));
            }
        }
    });

    let changed = changed_count.load(Ordering::Relaxed);
    let failures = failure_count.load(Ordering::Relaxed);
    if args.debug {
        eprintln!(
            "[DEBUG] {} files, {changed} changed, {failures} skipped or failed",
            files.len()
        );
    }
    failures
}

/// Stylify one file on disk, writing the result back unless `--no-edit`
fn process_single_file(
    path: &Path,
    config: &Config,
    args: &CliArgs,
    diagnostics: &dyn Diagnostics,
) -> Result<FileOutcome> {
    let ctx = RunContext::new(diagnostics).with_quiet(config.quiet);
    let filename = normalize_path(&path.to_string_lossy());
    ctx.info(&format!("Stylifying file {filename} ..."));

    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        ctx.warn(&format!(
            "{filename} ({} MB) exceeds limit of {} MB",
            file_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        ));
        ctx.info(&format!("Skipping file {filename} ..."));
        return Ok(FileOutcome::Skipped);
    }

    let contents = std::fs::read(path)?;
    let source = String::from_utf8_lossy(&contents);

    // The sorter has already reported the fatal error
    let Ok(stylified) = stylify_source(&source, &filename, config, ctx) else {
        ctx.info(&format!("Skipping file {filename} ..."));
        return Ok(FileOutcome::Skipped);
    };

    let outcome = if stylified.is_changed() {
        if args.show_diff {
            ctx.info(&format!("Modified content of {filename}. Diff:"));
            print_diff(&stylified, &filename);
        }
        if !args.no_edit {
            ctx.info(&format!("Writing changes back to filepath {filename} ..."));
            std::fs::write(path, stylified.text())?;
        }
        FileOutcome::Changed
    } else {
        ctx.info(&format!("No changes for {filename} ..."));
        FileOutcome::Unchanged
    };

    ctx.info(&format!("Done with file {filename} ..."));
    Ok(outcome)
}

/// Write a unified diff of one source to stderr
fn print_diff(stylified: &Stylified, filename: &str) {
    let diff = unified_diff(
        &stylified.original,
        &stylified.lines,
        &format!("{filename} (before)"),
        &format!("{filename} (after)"),
        DEFAULT_CONTEXT,
    );
    let mut stderr = io::stderr().lock();
    for line in diff {
        // Nothing sensible to do if stderr is gone
        let _ = writeln!(stderr, "{line}");
    }
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs, diagnostics: &dyn Diagnostics) -> Result<()> {
    let ctx = RunContext::new(diagnostics).with_quiet(config.quiet);
    let filename = args.filename.as_deref().unwrap_or("-");

    let mut output = Vec::new();
    let stylified = match stylify_stream(io::stdin().lock(), &mut output, filename, config, ctx) {
        Ok(stylified) => stylified,
        Err(e) if e.is::<SortError>() => {
            // Already reported; nothing is written for a skipped input
            ctx.info(&format!("Skipping file {filename} ..."));
            std::process::exit(1);
        }
        Err(e) => return Err(e),
    };

    if stylified.is_changed() && args.show_diff {
        ctx.info(&format!("Modified content of {filename}. Diff:"));
        print_diff(&stylified, filename);
    }

    // Always output to stdout when reading from stdin
    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}
