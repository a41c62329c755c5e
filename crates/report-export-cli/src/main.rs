mod capture;
mod logger;

use anyhow::{Context, Result};
use capture::FileCapturer;
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use logger::ConsoleLogger;
use snapshot_layout::layout::place_section_image;
use snapshot_layout::{
    DocumentSource, ExportReport, ExportRequest, LayoutConfig, ManifestEncoder, RasterImage,
    ReportMetadata, SectionStatus, calculate_statistics, paginate, save_deck, save_document,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rexport", about = "Dashboard snapshot export CLI", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export section snapshots to a paginated document and a slide deck
    Export {
        /// Section snapshot as LABEL=PATH, or PATH to label it by file name
        #[arg(short, long = "section", required = true, num_args = 1.., value_parser = parse_section)]
        sections: Vec<SectionArg>,

        /// Report title
        #[arg(long, default_value = "Report")]
        title: String,

        /// Header for pages after the first
        #[arg(long)]
        short_title: Option<String>,

        /// Company shown under the title
        #[arg(long)]
        company: Option<String>,

        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Leave the date off the header and title slide
        #[arg(long, conflicts_with = "date")]
        no_date: bool,

        /// Footer text; {page} and {pages} are substituted
        #[arg(long)]
        footer: Option<String>,

        /// Summary slide bullet (repeatable)
        #[arg(short, long = "bullet")]
        bullets: Vec<String>,

        /// Document paper size (overrides the config file)
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Document orientation (overrides the config file)
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Layout config JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Which snapshots the document paginates
        #[arg(long, default_value = "first", value_enum)]
        document_source: SourceArg,

        /// Directory for document.json and deck.json
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Per-section capture timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Show statistics only, don't write the manifests
        #[arg(long)]
        stats_only: bool,
    },

    /// Show how a snapshot of the given size is split into pages
    Paginate {
        /// Snapshot width in pixels
        #[arg(long)]
        width: u32,

        /// Snapshot height in pixels
        #[arg(long)]
        height: u32,

        /// Document paper size (overrides the config file)
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Document orientation (overrides the config file)
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Layout config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show where a section image of the given size lands on its slide
    Place {
        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Layout config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct SectionArg {
    label: String,
    path: PathBuf,
}

fn parse_section(value: &str) -> std::result::Result<SectionArg, String> {
    let (label, path) = match value.split_once('=') {
        Some((label, path)) if !label.is_empty() => (label.to_string(), PathBuf::from(path)),
        _ => {
            let path = PathBuf::from(value);
            let label = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .ok_or_else(|| format!("Cannot derive a section label from {:?}", value))?;
            (label, path)
        }
    };

    if path.as_os_str().is_empty() {
        return Err(format!("Section {:?} has no snapshot path", value));
    }
    Ok(SectionArg { label, path })
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    First,
    Concatenated,
}

impl From<PaperArg> for snapshot_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for snapshot_layout::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<SourceArg> for DocumentSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::First => Self::First,
            SourceArg::Concatenated => Self::Concatenated,
        }
    }
}

async fn load_config(
    path: Option<&Path>,
    paper: Option<PaperArg>,
    orientation: Option<OrientationArg>,
) -> Result<LayoutConfig> {
    let mut config = match path {
        Some(path) => LayoutConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    if let Some(paper) = paper {
        config.page.paper_size = paper.into();
    }
    if let Some(orientation) = orientation {
        config.page.orientation = orientation.into();
    }
    config.validate()?;
    Ok(config)
}

fn print_statistics(report: &ExportReport) {
    let stats = calculate_statistics(report);
    println!("Export Statistics:");
    println!(
        "  Sections produced: {}/{}",
        stats.sections_produced, stats.sections
    );
    println!("  Document pages: {}", stats.pages);
    println!("  Slides: {}", stats.slides);
    println!("  Scaled snapshot height: {:.1} mm", stats.scaled_height);
    println!("  Unused space on last page: {:.1} mm", stats.blank_tail);

    for (position, outcome) in report.sections.iter().enumerate() {
        let status = match &outcome.status {
            SectionStatus::Produced => "ok".to_string(),
            SectionStatus::Failed(error) => format!("failed ({})", error),
            SectionStatus::NotProduced => "not produced".to_string(),
        };
        println!("  {}. {}: {}", position + 1, outcome.label, status);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ConsoleLogger::new(ConsoleLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Export {
            sections,
            title,
            short_title,
            company,
            date,
            no_date,
            footer,
            bullets,
            paper,
            orientation,
            config,
            document_source,
            out_dir,
            timeout_secs,
            stats_only,
        } => {
            let config = load_config(config.as_deref(), paper, orientation).await?;

            let defaults = ReportMetadata::default();
            let metadata = ReportMetadata {
                title,
                short_title,
                company,
                date: if no_date {
                    None
                } else {
                    Some(date.unwrap_or_else(|| Local::now().date_naive()))
                },
                footer: footer.unwrap_or(defaults.footer),
                summary_title: defaults.summary_title,
            };

            let mut request = ExportRequest::new(metadata)
                .bullets(bullets)
                .document_source(document_source.into());
            for SectionArg { label, path } in sections {
                request = request.section(label, path);
            }
            if let Some(secs) = timeout_secs {
                request = request.capture_timeout(Duration::from_secs(secs));
            }

            let report = snapshot_layout::export(&FileCapturer, request, &config).await?;
            print_statistics(&report);

            if stats_only {
                return Ok(());
            }

            let (document, deck) = report.into_complete()?;
            let pages = document.page_count();
            let slides = deck.slide_count();

            tokio::fs::create_dir_all(&out_dir)
                .await
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;
            let encoder = ManifestEncoder::from_config(&config);

            let document_path = out_dir.join("document.json");
            save_document(encoder, document, &document_path).await?;
            println!("Document ({} pages) → {}", pages, document_path.display());

            let deck_path = out_dir.join("deck.json");
            save_deck(encoder, deck, &deck_path).await?;
            println!("Deck ({} slides) → {}", slides, deck_path.display());
        }

        Commands::Paginate {
            width,
            height,
            paper,
            orientation,
            config,
        } => {
            let config = load_config(config.as_deref(), paper, orientation).await?;
            let image = RasterImage::without_pixels(width, height)?;
            let pagination = paginate(&image, &config.page)?;

            println!(
                "Scaled to {:.1} x {:.1} mm (scale {:.4} mm/px)",
                pagination.scaled_width, pagination.scaled_height, pagination.scale
            );
            for crop in &pagination.crops {
                println!(
                    "  Page {}: {:.2}..{:.2} ({:.2} of {:.2} mm)",
                    crop.page_index,
                    crop.crop_top,
                    crop.crop_top + crop.crop_height,
                    crop.crop_height,
                    crop.drawable_height
                );
            }
        }

        Commands::Place {
            width,
            height,
            config,
        } => {
            let config = load_config(config.as_deref(), None, None).await?;
            let placement = place_section_image(width as f64, height as f64, &config.slide)?;
            let rect = placement.rect;

            println!("{:?}-constrained", placement.constraint);
            println!("  x: {:.4}  y: {:.4}", rect.x, rect.y);
            println!("  w: {:.4}  h: {:.4}", rect.w, rect.h);
        }
    }

    Ok(())
}
