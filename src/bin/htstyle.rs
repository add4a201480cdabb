//! Command-line front end for inspecting and converting stylesheets.
//!
//! ```text
//! htstyle check  <sheet>          validate a sheet file
//! htstyle list   <sheet>          list styles in order
//! htstyle convert <from> <to>     convert between text and YAML
//! htstyle preview [sheet]         render each style in the terminal
//! htstyle default [out]           write the built-in sheet
//! ```
//!
//! `HTSTYLE_SHEET` supplies the sheet path where one is optional.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use htstyle::{color_label, default_sheet, AttributeTarget, StyleSheet, TerminalTarget};

#[derive(Debug, Parser)]
#[command(name = "htstyle", version, about = "Inspect and convert hypertext stylesheets")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a sheet and report whether it is valid
    Check { sheet: PathBuf },
    /// List the styles of a sheet in order
    List { sheet: PathBuf },
    /// Convert a sheet between formats, chosen by file extension
    Convert { from: PathBuf, to: PathBuf },
    /// Render every style of a sheet with terminal colors
    Preview {
        /// Sheet to preview; falls back to the built-in sheet if unreadable
        #[arg(env = "HTSTYLE_SHEET")]
        sheet: Option<PathBuf>,
        /// Emit ANSI codes even when stdout is not a terminal
        #[arg(long)]
        color: bool,
    },
    /// Write the built-in sheet to a file, or to stdout
    Default { out: Option<PathBuf> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check { sheet } => check(sheet),
        Command::List { sheet } => list(sheet),
        Command::Convert { from, to } => convert(from, to),
        Command::Preview { sheet, color } => preview(sheet, color),
        Command::Default { out } => write_default(out),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn check(path: PathBuf) -> Result<()> {
    let sheet = StyleSheet::load(&path)
        .with_context(|| format!("{} is not a valid stylesheet", path.display()))?;
    println!(
        "{}: sheet '{}' with {} styles is valid",
        path.display(),
        sheet.name(),
        sheet.len()
    );
    Ok(())
}

fn list(path: PathBuf) -> Result<()> {
    let sheet = StyleSheet::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for style in &sheet {
        let tag = if style.tag.is_empty() { "-" } else { &style.tag };
        let color = style.color.map(color_label).unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<16} {:<10} {:<7} {:<10} {:<5} {}",
            style.name, tag, style.scope, style.font, style.size, color
        )?;
    }
    Ok(())
}

fn convert(from: PathBuf, to: PathBuf) -> Result<()> {
    let sheet = StyleSheet::load(&from)
        .with_context(|| format!("failed to load {}", from.display()))?;
    sheet
        .save(&to)
        .with_context(|| format!("failed to save {}", to.display()))?;
    log::info!("converted {} to {}", from.display(), to.display());
    Ok(())
}

fn preview(path: Option<PathBuf>, color: bool) -> Result<()> {
    let sheet = match path {
        Some(path) => StyleSheet::load_or_default(path),
        None => default_sheet().clone(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for style in &sheet {
        let mut target = TerminalTarget::new();
        if color {
            target = target.force_styling(true);
        }
        style.apply_to(&mut target);
        target.set_underline(style.anchor.is_some());
        let size = target.font_size().unwrap_or_default();
        writeln!(out, "{} ({}pt)", target.render(&style.name), size)?;
    }
    Ok(())
}

fn write_default(out: Option<PathBuf>) -> Result<()> {
    let sheet = default_sheet();
    match out {
        Some(path) => sheet
            .save(&path)
            .with_context(|| format!("failed to save {}", path.display())),
        None => {
            sheet.write_to(io::stdout().lock())?;
            Ok(())
        }
    }
}
