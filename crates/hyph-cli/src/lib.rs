// hyph-cli: shared utilities for the command-line tools.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use hyph_engine::{Hyphenator, Settings};
use hyph_patterns::DirectoryLoader;

/// Environment variable naming the pattern directory.
pub const PATTERNS_ENV: &str = "HYPH_PATTERN_PATH";

/// Pattern directory name under the data directories searched by default.
const PATTERN_SUBDIR: &str = "hyph/patterns";

/// Options shared by every tool.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// JSON settings file (unknown keys are rejected)
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommonArgs {
    /// Initialize `env_logger`; `RUST_LOG` overrides the verbosity flags.
    pub fn init_logging(&self) {
        let level = match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            _ => "trace",
        };
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .try_init();
    }

    /// Settings from `--settings`, or the defaults.
    pub fn load_settings(&self) -> Result<Settings> {
        let Some(path) = &self.settings else {
            return Ok(Settings::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings = Settings::from_json(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Locate the pattern directory.
///
/// Search order:
/// 1. `explicit` (from `--patterns` or `HYPH_PATTERN_PATH`)
/// 2. `~/.local/share/hyph/patterns`
/// 3. `/usr/local/share/hyph/patterns`, `/usr/share/hyph/patterns`
/// 4. `./patterns`
///
/// The first directory holding at least one `.json` file wins.
pub fn find_pattern_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            bail!("pattern directory {} does not exist", dir.display());
        }
        return Ok(dir.to_path_buf());
    }

    let search_paths = build_search_paths();
    for dir in &search_paths {
        let found = DirectoryLoader::new(dir)
            .available()
            .is_ok_and(|languages| !languages.is_empty());
        if found {
            log::debug!("using pattern directory {}", dir.display());
            return Ok(dir.clone());
        }
    }

    bail!(
        "no pattern files found in any of the search paths:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn build_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".local/share").join(PATTERN_SUBDIR));
    }
    paths.push(PathBuf::from("/usr/local/share").join(PATTERN_SUBDIR));
    paths.push(PathBuf::from("/usr/share").join(PATTERN_SUBDIR));
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("patterns"));
    }
    paths
}

/// Build a hyphenator that loads languages from `pattern_dir` on first use.
pub fn build_hyphenator(settings: &Settings, pattern_dir: &Path) -> Result<Hyphenator> {
    let loader = DirectoryLoader::new(pattern_dir);
    Ok(Hyphenator::from_settings(settings, Some(Arc::new(loader)))?)
}

/// Run `f` over each input line: the positional arguments when given,
/// otherwise stdin. Results are written to stdout one per line.
pub fn for_each_input(
    args: &[String],
    mut f: impl FnMut(&str) -> Result<String>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if args.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            writeln!(out, "{}", f(&line)?)?;
        }
    } else {
        for arg in args {
            writeln!(out, "{}", f(arg)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(settings: Option<PathBuf>) -> CommonArgs {
        CommonArgs {
            settings,
            verbose: 0,
            quiet: true,
        }
    }

    #[test]
    fn default_settings_without_file() {
        let settings = common(None).load_settings().unwrap();
        assert_eq!(settings.min_word_length, 6);
    }

    #[test]
    fn settings_file_is_read_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "min_word_length": 4 }"#).unwrap();
        assert_eq!(common(Some(path.clone())).load_settings().unwrap().min_word_length, 4);

        std::fs::write(&path, r#"{ "min_word_length": 0 }"#).unwrap();
        assert!(common(Some(path)).load_settings().is_err());
    }

    #[test]
    fn explicit_pattern_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_pattern_dir(Some(dir.path())).unwrap(), dir.path());
        assert!(find_pattern_dir(Some(&dir.path().join("missing"))).is_err());
    }
}
