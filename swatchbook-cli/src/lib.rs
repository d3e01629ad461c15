use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use serde::Serialize;
use swatchbook::catalog::NAMED_COLORS;
use swatchbook::{CatalogFile, Color, PaletteManager, TextTone, interpolate};
use tracing::{debug, info};

/// Largest color count any subcommand will produce.
pub const MAX_COUNT: u64 = 4096;

fn count_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(0..=MAX_COUNT)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "swatchbook",
    author,
    version,
    about = "Cycle, pick and stretch HSL color catalogs",
    long_about = None
)]
pub struct Cli {
    /// Catalog file to merge over the built-in catalogs
    #[arg(long, value_name = "FILE", global = true)]
    pub catalogs: Option<PathBuf>,

    /// Catalog to make active before running the command
    #[arg(long, value_name = "NAME", global = true)]
    pub catalog: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List the available catalogs
    Catalogs,
    /// Print every color of the active catalog
    Show,
    /// Draw colors round-robin from the active catalog
    Next {
        /// Number of colors to draw
        #[arg(long, default_value_t = 1, value_parser = count_parser())]
        count: usize,
        /// Cursor position to start from
        #[arg(long)]
        start: Option<usize>,
    },
    /// Pick the most mutually distinct colors of the active catalog
    Distinct {
        /// Number of colors to pick
        #[arg(value_parser = count_parser())]
        count: usize,
    },
    /// Stretch a color list to COUNT entries (defaults to the active catalog)
    Interpolate {
        #[arg(value_parser = count_parser())]
        count: usize,
        colors: Vec<Color>,
    },
    /// Suggest a readable text tone for a background color
    Tone { color: Color },
    /// Lighten a color
    Lighten {
        color: Color,
        #[arg(long, default_value_t = 1.0)]
        amount: f64,
    },
    /// Darken a color
    Darken {
        color: Color,
        #[arg(long, default_value_t = 1.0)]
        amount: f64,
    },
    /// List the named accent colors
    Named,
}

#[derive(Debug, Serialize)]
struct CatalogSummary<'a> {
    name: &'a str,
    colors: usize,
    active: bool,
}

#[derive(Debug, Serialize)]
struct ToneReport {
    color: Color,
    tone: TextTone,
    class: &'static str,
}

#[derive(Debug, Serialize)]
struct NamedColor {
    name: &'static str,
    color: Color,
}

/// Builds the palette manager the command line asks for.
pub fn load_manager(cli: &Cli) -> Result<PaletteManager> {
    let file = match &cli.catalogs {
        Some(path) => CatalogFile::load_from_path(path)
            .with_context(|| format!("failed to read catalog file '{}'", path.display()))?,
        None => CatalogFile::load().context("failed to read default catalog file")?,
    };

    let mut manager = file
        .into_manager()
        .context("catalog file contains an invalid catalog")?;

    if let Some(name) = &cli.catalog {
        if manager.catalog(name).is_none() {
            let known: Vec<&str> = manager.catalog_names().collect();
            bail!("unknown catalog '{name}' (available: {})", known.join(", "));
        }
        manager.switch_catalog(name);
    }

    debug!(active = manager.active_name(), "palette manager ready");
    Ok(manager)
}

pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut manager = load_manager(&cli)?;

    match &cli.command {
        Command::Catalogs => {
            let active = manager.active_name();
            let summaries: Vec<CatalogSummary<'_>> = manager
                .catalogs()
                .map(|catalog| CatalogSummary {
                    name: catalog.name(),
                    colors: catalog.len(),
                    active: catalog.name() == active,
                })
                .collect();

            if cli.json {
                write_json(out, &summaries)?;
            } else {
                for summary in &summaries {
                    let marker = if summary.active { '*' } else { ' ' };
                    writeln!(out, "{marker} {} ({})", summary.name, summary.colors)?;
                }
            }
        }
        Command::Show => {
            let colors = manager.active_catalog().colors().to_vec();
            write_colors(out, &colors, cli.json)?;
        }
        Command::Next { count, start } => {
            if let Some(start) = start {
                manager.reset_cursor(*start);
            }
            let colors: Vec<Color> = (0..*count).map(|_| manager.next_color()).collect();
            write_colors(out, &colors, cli.json)?;
        }
        Command::Distinct { count } => {
            let colors = manager
                .most_distinct_colors(*count)
                .with_context(|| format!("cannot pick {count} distinct colors"))?;
            info!(
                target: "swatchbook::cli",
                catalog = manager.active_name(),
                requested = count,
                "picked distinct colors"
            );
            write_colors(out, &colors, cli.json)?;
        }
        Command::Interpolate { count, colors } => {
            let source = if colors.is_empty() {
                manager.active_catalog().colors().to_vec()
            } else {
                colors.clone()
            };
            write_colors(out, &interpolate(&source, *count), cli.json)?;
        }
        Command::Tone { color } => {
            let tone = TextTone::for_color(color);
            if cli.json {
                let report = ToneReport {
                    color: *color,
                    tone,
                    class: tone.css_class(),
                };
                write_json(out, &report)?;
            } else {
                writeln!(out, "{}", tone.css_class())?;
            }
        }
        Command::Lighten { color, amount } => {
            write_colors(out, &[color.lighten(*amount)], cli.json)?;
        }
        Command::Darken { color, amount } => {
            write_colors(out, &[color.darken(*amount)], cli.json)?;
        }
        Command::Named => {
            let named: Vec<NamedColor> = NAMED_COLORS
                .iter()
                .map(|&(name, color)| NamedColor { name, color })
                .collect();

            if cli.json {
                write_json(out, &named)?;
            } else {
                for entry in &named {
                    writeln!(out, "{:<16}{}", entry.name, entry.color)?;
                }
            }
        }
    }

    Ok(())
}

fn write_colors<W: Write>(out: &mut W, colors: &[Color], json: bool) -> Result<()> {
    if json {
        return write_json(out, &colors);
    }
    for color in colors {
        writeln!(out, "{color}")?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use clap::CommandFactory;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Points `--catalogs` at a file that does not exist so only the
    /// built-ins are loaded regardless of the host's config directory.
    fn isolated(temp: &assert_fs::TempDir) -> String {
        temp.child("none.json").path().display().to_string()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn next_draws_round_robin_from_pastels() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let output = run_args(&[
            "swatchbook", "--catalogs", &catalogs, "next", "--count", "11",
        ])
        .expect("run next");

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "hsl(140, 37%, 75%)");
        assert_eq!(lines[9], "hsl(187, 25%, 89%)");
        assert_eq!(lines[10], lines[0]);
    }

    #[test]
    fn next_honours_start_position() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let output = run_args(&[
            "swatchbook", "--catalogs", &catalogs, "--catalog", "base", "next", "--start", "15",
        ])
        .expect("run next");

        assert_eq!(output.trim(), "hsl(22, 33%, 64%)");
    }

    #[test]
    fn distinct_json_starts_with_catalog_head() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let output = run_args(&[
            "swatchbook", "--catalogs", &catalogs, "--json", "distinct", "4",
        ])
        .expect("run distinct");

        let colors: Vec<Color> = serde_json::from_str(&output).expect("parse json");
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], Color::new(140, 37, 75));
    }

    #[test]
    fn distinct_zero_is_an_error() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let result = run_args(&["swatchbook", "--catalogs", &catalogs, "distinct", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_catalog_is_an_error() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let err = run_args(&["swatchbook", "--catalogs", &catalogs, "--catalog", "neon", "show"])
            .expect_err("unknown catalog");
        assert!(err.to_string().contains("available: base, pastels"));
    }

    #[test]
    fn catalog_file_adds_catalogs() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let file = temp.child("catalogs.json");
        file.write_str(r#"{"active": "duo", "catalogs": {"duo": ["hsl(0, 50%, 50%)", "hsl(120, 50%, 50%)"]}}"#)
            .expect("write catalog file");

        let path = file.path().display().to_string();
        let output = run_args(&["swatchbook", "--catalogs", &path, "catalogs"]).expect("run catalogs");

        assert_eq!(output, "  base (14)\n* duo (2)\n  pastels (10)\n");
    }

    #[test]
    fn interpolate_accepts_explicit_colors() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let output = run_args(&[
            "swatchbook",
            "--catalogs",
            &catalogs,
            "interpolate",
            "3",
            "hsl(0, 50%, 50%)",
            "hsl(120, 50%, 50%)",
        ])
        .expect("run interpolate");

        assert_eq!(
            output,
            "hsl(0, 50%, 50%)\nhsl(40, 50%, 50%)\nhsl(80, 50%, 50%)\n"
        );
    }

    #[test]
    fn tone_reports_tailwind_class() {
        let temp = assert_fs::TempDir::new().expect("temp dir");
        let catalogs = isolated(&temp);
        let output = run_args(&["swatchbook", "--catalogs", &catalogs, "tone", "hsl(209, 23%, 32%)"])
            .expect("run tone");
        assert_eq!(output.trim(), "text-gray-200");
    }

    #[test]
    fn oversized_counts_are_rejected_at_parse_time() {
        let too_many = (MAX_COUNT + 1).to_string();
        for args in [
            vec!["swatchbook", "interpolate", "18446744073709551615"],
            vec!["swatchbook", "interpolate", too_many.as_str()],
            vec!["swatchbook", "distinct", too_many.as_str()],
            vec!["swatchbook", "next", "--count", too_many.as_str()],
        ] {
            assert!(Cli::try_parse_from(&args).is_err(), "accepted {args:?}");
        }

        let cli = Cli::try_parse_from(["swatchbook", "interpolate", "4096"]).expect("max count");
        assert!(matches!(cli.command, Command::Interpolate { count: 4096, .. }));
    }

    #[test]
    fn malformed_color_argument_is_rejected() {
        let result = Cli::try_parse_from(["swatchbook", "tone", "red"]);
        assert!(result.is_err());
    }
}
