//! Quire CLI - render document manifests
//!
//! Usage:
//!   quire <manifest.json> -o out.pdf
//!   quire <manifest.json> -o out.png --dpi 150
//!   quire <manifest.json> -o out.json -v

mod manifest;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use owo_colors::OwoColorize;
use quire_layout::WritingDirection;
use quire_render::{FontSet, FontdueFontMetrics, render_json, render_pdf, render_png};

use crate::manifest::{Document, Manifest};

/// Quire - declarative box layout for paginated documents
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Render a manifest to PDF
    quire demos/invoice.json -o invoice.pdf

    # Rasterize at 150 dpi, pages stacked top to bottom
    quire demos/invoice.json -o invoice.png --dpi 150

    # Dump the display lists, with layout diagnostics
    quire demos/invoice.json -o invoice.json -vv

    # Lay out right to left regardless of the manifest
    quire demos/invoice.json -o invoice.pdf --rtl
"#)]
struct Cli {
    /// Path to the JSON document manifest
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Output format (default: from the output file extension)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Resolution in dots per inch, overriding the manifest
    #[arg(long)]
    dpi: Option<f32>,

    /// Lay out right to left, overriding the manifest
    #[arg(long)]
    rtl: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pdf,
    Png,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// PDF viewers draw with Helvetica, so PDF text is measured with a
    /// metric-compatible face or approximately.
    fn fonts(self) -> FontSet {
        match self {
            Self::Pdf => FontSet::load_helvetica_compatible(),
            Self::Png | Self::Json => FontSet::load_system(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(pages) => {
            println!(
                "{} {pages} page{} to {}",
                "Wrote".green().bold(),
                if pages == 1 { "" } else { "s" },
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<usize> {
    let format = match cli.format {
        Some(format) => format,
        None => Format::from_path(&cli.output).with_context(|| {
            format!(
                "cannot tell the output format of '{}'; pass --format",
                cli.output.display()
            )
        })?,
    };

    let text = fs::read_to_string(&cli.manifest)
        .with_context(|| format!("failed to read '{}'", cli.manifest.display()))?;
    let manifest = Manifest::from_json(&text)
        .with_context(|| format!("invalid manifest '{}'", cli.manifest.display()))?;

    let mut env = manifest.environment();
    if let Some(dpi) = cli.dpi {
        anyhow::ensure!(dpi.is_finite() && dpi > 0.0, "--dpi must be positive, got {dpi}");
        env = env.with_dpi(dpi);
    }
    if cli.rtl {
        env = env.with_writing_direction(WritingDirection::RightToLeft);
    }

    let Document { mut tree, pages } = manifest.build().context("failed to build the box tree")?;
    log::info!(
        "laying out {} pages at {} dpi ({:?})",
        pages.len(),
        env.dpi(),
        format
    );

    let fonts = format.fonts();
    let bytes = match format {
        Format::Pdf => render_pdf(&mut env, &mut tree, &pages, &FontdueFontMetrics::new(&fonts))?,
        Format::Png => render_png(&mut env, &mut tree, &pages, &fonts)?,
        Format::Json => {
            render_json(&mut env, &mut tree, &pages, &FontdueFontMetrics::new(&fonts))?.into_bytes()
        }
    };

    fs::write(&cli.output, bytes)
        .with_context(|| format!("failed to write '{}'", cli.output.display()))?;
    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("out.pdf")), Some(Format::Pdf));
        assert_eq!(Format::from_path(Path::new("OUT.PNG")), Some(Format::Png));
        assert_eq!(Format::from_path(Path::new("dir/out.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("out.txt")), None);
        assert_eq!(Format::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "quire", "doc.json", "-o", "doc.bin", "--format", "png", "--dpi", "150", "--rtl", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.manifest, PathBuf::from("doc.json"));
        assert_eq!(cli.format, Some(Format::Png));
        assert_eq!(cli.dpi, Some(150.0));
        assert!(cli.rtl);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_requires_output() {
        assert!(Cli::try_parse_from(["quire", "doc.json"]).is_err());
    }
}
