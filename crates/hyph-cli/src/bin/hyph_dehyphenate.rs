// hyph-dehyphenate: Strip break and URL markers from text.
//
// Reads lines from stdin (or takes them as arguments) and prints each line
// with every break marker and URL marker removed. The markers come from the
// settings file when one is given.
//
// Usage:
//   hyph-dehyphenate [-s SETTINGS] [TEXT...]

use anyhow::Result;
use clap::Parser;
use hyph_cli::CommonArgs;
use hyph_engine::text::remove_markers;

#[derive(Debug, Parser)]
#[command(name = "hyph-dehyphenate", version, about = "Remove hyphenation markers")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Text to clean; read from stdin when omitted
    text: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.common.init_logging();

    let markers = cli.common.load_settings()?.markers();
    hyph_cli::for_each_input(&cli.text, |line| Ok(remove_markers(&markers, line)))
}
