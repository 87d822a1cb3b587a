use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use shiftpal::*;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Red channel of the tint.
    #[arg(value_parser = parse_channel, allow_negative_numbers = true)]
    r: i64,
    /// Green channel of the tint.
    #[arg(value_parser = parse_channel, allow_negative_numbers = true)]
    g: i64,
    /// Blue channel of the tint.
    #[arg(value_parser = parse_channel, allow_negative_numbers = true)]
    b: i64,
    /// Opacity of the tint, where 0 leaves the palette untouched and 255 replaces it.
    ///
    /// Channels are not range checked; blended colors are clamped to 0..=255.
    #[arg(value_parser = parse_channel, allow_negative_numbers = true)]
    a: i64,
    /// Path to the palette file.
    ///
    /// Text files hold one `r,g,b` line per entry. Files ending in .json or .ron
    /// hold a list of [r, g, b] triples instead.
    #[arg(short, long, default_value = "palette")]
    palette: PathBuf,
    /// Number of parallel threads.
    #[arg(short, long, default_value_t = 1)]
    threads: usize,
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Report timing information on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_channel(token: &str) -> Result<i64, ShiftError> {
    parse_int("tint channel", token)
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig { threads: self.threads }
    }
}

fn run() -> Result<(), ShiftError> {
    let cli = Cli::try_parse()?;
    let tint = Tint::from_rgba(cli.r, cli.g, cli.b, cli.a);

    let before_load = Instant::now();
    let palette = Palette::from_file(&cli.palette)?.ensure_len(PALETTE_LEN)?;

    if cli.verbose {
        eprintln!(
            "Loaded {} colors from '{}' in {} ms",
            palette.len(),
            cli.palette.display(),
            before_load.elapsed().as_millis()
        );
    }

    let before_run = Instant::now();
    let indices = palette.shift(tint, cli.run_config())?;
    let dur = before_run.elapsed();

    if cli.verbose {
        eprintln!(
            "Matched {} slots in {}.{:03} seconds",
            indices.len(),
            dur.as_secs(),
            dur.subsec_millis()
        );
    }

    indices.write_to(io::stdout().lock(), cli.format)
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(ShiftError::Usage(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
