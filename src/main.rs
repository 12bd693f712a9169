mod content;
mod scanner;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use pulse_core::{
    Chapter, ChapterLayout, DateExpr, Row, TimelineNode, Track, format_anchor_date,
    format_spine_label,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use content::{ContentError, load_story, load_validated, validate_story};

const DEFAULT_STORY_DIR: &str = "data";

#[derive(Parser)]
#[command(
    name = "pulse_diary",
    about = "Chronological layout for two-track diary chapters"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print merged chapter layouts as JSON
    Layout {
        /// Path to chapters.json
        story: PathBuf,
        /// Only this chapter number
        #[arg(long)]
        chapter: Option<u32>,
    },
    /// Print the chapter navigation rail with its spine labels
    Spine {
        /// Path to chapters.json
        story: PathBuf,
    },
    /// Validate story files (a file or a directory of *.json)
    Check {
        #[arg(default_value = DEFAULT_STORY_DIR)]
        path: PathBuf,
        /// Treat unresolved dates as errors
        #[arg(long)]
        strict: bool,
    },
    /// Show how date expressions classify, sort and label
    Date {
        /// Date expressions, e.g. "Early January 2020" "Summer 2020"
        #[arg(required = true)]
        exprs: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pulse_diary=info,pulse_core=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Layout { story, chapter }) => run_layout(&story, chapter),
        Some(Command::Spine { story }) => run_spine(&story),
        Some(Command::Check { path, strict }) => run_check(&path, strict),
        Some(Command::Date { exprs }) => {
            run_date(&exprs);
            Ok(())
        }
        // Default: check the bundled story directory
        None => run_check(Path::new(DEFAULT_STORY_DIR), false),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  LAYOUT MODE: merged rows / interleaved nodes as JSON
// ═══════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ChapterOutput<'a> {
    chapter_number: u32,
    title: &'a str,
    layout: ChapterLayout<'a>,
}

fn run_layout(path: &Path, only: Option<u32>) -> anyhow::Result<()> {
    let story = load_validated(path, false)?;

    let chapters: Vec<&Chapter> = match only {
        Some(n) => vec![
            story
                .chapter(n)
                .with_context(|| format!("no chapter {n} in {}", path.display()))?,
        ],
        None => story.chapters.iter().collect(),
    };

    let output: Vec<ChapterOutput<'_>> = chapters
        .into_iter()
        .map(|c| ChapterOutput {
            chapter_number: c.chapter_number,
            title: &c.title,
            layout: c.arrange(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&output).context("serializing layout")?;
    println!("{json}");
    tracing::info!(chapters = output.len(), "layout written");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  SPINE MODE: navigation rail + per-row spine labels
// ═══════════════════════════════════════════════════════════════════════

fn run_spine(path: &Path) -> anyhow::Result<()> {
    let story = load_validated(path, false)?;

    if !story.meta.title.is_empty() {
        println!("{} · {}", story.meta.title, story.meta.author);
    }

    let total = story.chapters.len();
    for (i, chapter) in story.chapters.iter().enumerate() {
        let style = chapter.style();
        let anchor = chapter
            .anchor_date
            .as_deref()
            .map(format_anchor_date)
            .unwrap_or_default();
        let is_last = i + 1 == total;
        let connector = if is_last { "└─" } else { "├─" };
        let continuation = if is_last { "  " } else { "│ " };

        println!(
            "{connector} {} Ch. {}  {:<9} {}",
            style.icon, chapter.chapter_number, anchor, chapter.title
        );
        for line in spine_lines(&chapter.arrange()) {
            println!("{continuation}   {line}");
        }
    }
    Ok(())
}

/// One text line per row (split) or node (full): spine label, then the
/// clinical and personal labels in their columns.
fn spine_lines(layout: &ChapterLayout<'_>) -> Vec<String> {
    fn one_line(node: &TimelineNode<'_>) -> String {
        format_spine_label(node.event.date()).replace('\n', " ")
    }
    fn cell(node: Option<TimelineNode<'_>>) -> &str {
        node.map_or("", |n| n.event.label.as_str())
    }

    match layout {
        ChapterLayout::Split(rows) => rows
            .iter()
            .map(|row: &Row<'_>| {
                let spine = row
                    .clinical()
                    .or(row.personal())
                    .map(|n| one_line(&n))
                    .unwrap_or_default();
                format!(
                    "{spine:<14} │ {:<32} │ {}",
                    cell(row.clinical()),
                    cell(row.personal())
                )
            })
            .collect(),
        ChapterLayout::Full(nodes) => nodes
            .iter()
            .map(|node| {
                let marker = match node.track {
                    Track::Clinical => "●",
                    Track::Personal => "○",
                };
                format!("{:<14} {marker} {}", one_line(node), node.event.label)
            })
            .collect(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  CHECK MODE: validate every story file under a path
// ═══════════════════════════════════════════════════════════════════════

fn run_check(root: &Path, strict: bool) -> anyhow::Result<()> {
    let files = scanner::scan_story_files(root);
    if files.is_empty() {
        bail!("no story files found under {}", root.display());
    }
    tracing::info!(files = files.len(), strict, "checking stories");

    let mut errors = 0;
    let mut warnings = 0;

    for file in &files {
        let story = match load_story(file) {
            Ok(s) => s,
            Err(e @ (ContentError::Read { .. } | ContentError::Parse { .. })) => {
                tracing::error!("{e}");
                errors += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let issues = validate_story(&story, strict);
        for issue in &issues {
            if issue.is_error() {
                errors += 1;
            } else {
                warnings += 1;
            }
            println!("{}: {issue}", file.display());
        }
        tracing::info!(
            path = %file.display(),
            chapters = story.chapters.len(),
            issues = issues.len(),
            "checked"
        );
    }

    eprintln!(
        "\n{} file(s): {errors} error(s), {warnings} warning(s)",
        files.len()
    );
    if errors > 0 {
        bail!("{errors} content error(s)");
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  DATE MODE: classification table for ad-hoc expressions
// ═══════════════════════════════════════════════════════════════════════

fn run_date(exprs: &[String]) {
    for expr in exprs {
        println!("{}", date_row(expr));
    }
}

fn date_row(expr: &str) -> String {
    let parsed = DateExpr::classify(expr);
    let label = format_spine_label(expr).replace('\n', " / ");
    format!(
        "{:<28} {:<10} {:<12} {label}",
        format!("{expr:?}"),
        parsed.kind(),
        parsed.instant().to_string()
    )
}
