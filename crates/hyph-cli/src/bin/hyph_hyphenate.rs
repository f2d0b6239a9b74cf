// hyph-hyphenate: Insert break markers into words or running text.
//
// Reads lines from stdin (or takes them as arguments) and prints each line
// with soft hyphens at the legal break points of the chosen language. URLs
// and email addresses get zero-width spaces after their delimiters.
//
// Usage:
//   hyph-hyphenate -l LANG [OPTIONS] [TEXT...]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hyph_cli::{CommonArgs, PATTERNS_ENV};
use hyph_engine::hyphenator::break_pattern;

#[derive(Debug, Parser)]
#[command(name = "hyph-hyphenate", version, about = "Hyphenate words or text")]
struct Cli {
    /// Language code of the input (e.g. en, de-CH)
    #[arg(short, long)]
    language: String,

    /// Directory of `<lang>.json` pattern files
    #[arg(short, long, value_name = "DIR", env = PATTERNS_ENV)]
    patterns: Option<PathBuf>,

    /// Show each word with its raw break pattern instead of inserting markers
    #[arg(long, conflicts_with = "separator")]
    pattern: bool,

    /// Print this string in place of the break marker
    #[arg(long, value_name = "SEP")]
    separator: Option<String>,

    /// List the languages available in the pattern directory and exit
    #[arg(long)]
    list: bool,

    #[command(flatten)]
    common: CommonArgs,

    /// Text to hyphenate; read from stdin when omitted
    text: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.common.init_logging();

    let settings = cli.common.load_settings()?;
    let dir = hyph_cli::find_pattern_dir(cli.patterns.as_deref())?;

    if cli.list {
        let loader = hyph_patterns::DirectoryLoader::new(&dir);
        for language in loader.available()? {
            println!("{language}");
        }
        return Ok(());
    }

    let hyphenator = hyph_cli::build_hyphenator(&settings, &dir)?;
    let break_marker = hyphenator.markers().break_marker;

    if cli.pattern {
        let table = hyphenator.registry().table(&cli.language)?;
        return hyph_cli::for_each_input(&cli.text, |word| {
            let word = word.trim();
            Ok(format!("{word} {}", break_pattern(&table, word)))
        });
    }

    hyph_cli::for_each_input(&cli.text, |line| {
        let text = hyphenator.hyphenate_text(&cli.language, line)?;
        Ok(match &cli.separator {
            Some(sep) => text.replace(break_marker, sep),
            None => text,
        })
    })
}
