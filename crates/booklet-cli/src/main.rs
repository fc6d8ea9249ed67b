mod logger;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pdf_booklet::{
    BookletOptions, BookletRequest, BookletStatistics, BookletUpdate, BookletWarning, CancelFlag,
    NumberingPolicy, PackingMode, PaperSize, sanitize_file_name,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "booklet", about = "Exam practice booklet generator", version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a booklet PDF from a selection list
    Generate {
        /// Asset root containing one folder per source exam
        #[arg(short, long, default_value = "output")]
        root: PathBuf,

        /// Selection CSV with `year,question` rows, in output order
        #[arg(short, long)]
        selection: PathBuf,

        /// Output PDF path (defaults to the sanitized title in the
        /// current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document title, drawn in page headers and used for the default
        /// file name
        #[arg(short, long, default_value = "Practice Booklet")]
        title: String,

        /// Skip the source-citation line above each question
        #[arg(long)]
        no_citations: bool,

        /// Embed original image bytes instead of re-encoding as JPEG
        #[arg(long)]
        no_compress: bool,

        /// JPEG quality used when re-encoding
        #[arg(long, default_value = "85")]
        quality: u8,

        /// Column packing mode
        #[arg(long, default_value = "balanced", value_enum)]
        packing: PackingArg,

        /// Whether skipped questions still consume a printed number
        #[arg(long, default_value = "contiguous", value_enum)]
        numbering: NumberingArg,

        /// Output paper size
        #[arg(long, default_value = "a3", value_enum)]
        paper: PaperArg,

        /// Candidate font file for citation/number text; repeatable,
        /// probed in order
        #[arg(long = "font")]
        fonts: Vec<PathBuf>,

        /// Stop after layout and print statistics only
        #[arg(long)]
        dry_run: bool,
    },

    /// List collections and their question counts under an asset root
    List {
        #[arg(short, long, default_value = "output")]
        root: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PackingArg {
    Balanced,
    SingleColumn,
}

#[derive(Clone, Copy, ValueEnum)]
enum NumberingArg {
    Contiguous,
    CountSkipped,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    Letter,
}

impl From<PackingArg> for PackingMode {
    fn from(arg: PackingArg) -> Self {
        match arg {
            PackingArg::Balanced => Self::Balanced,
            PackingArg::SingleColumn => Self::SingleColumn,
        }
    }
}

impl From<NumberingArg> for NumberingPolicy {
    fn from(arg: NumberingArg) -> Self {
        match arg {
            NumberingArg::Contiguous => Self::Contiguous,
            NumberingArg::CountSkipped => Self::CountSkipped,
        }
    }
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::init(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            root,
            selection,
            output,
            title,
            no_citations,
            no_compress,
            quality,
            packing,
            numbering,
            paper,
            fonts,
            dry_run,
        } => {
            let picks = pdf_booklet::load_selection_csv(&selection).await?;
            let options = BookletOptions {
                document_title: title.clone(),
                show_citations: !no_citations,
                compress_images: !no_compress,
                jpeg_quality: quality,
                packing_mode: packing.into(),
                numbering: numbering.into(),
                paper_size: paper.into(),
                font_sources: fonts,
            };
            let request = BookletRequest {
                assets_root: root,
                picks,
                options,
            };

            let (update_tx, mut update_rx) = mpsc::unbounded_channel();
            let printer = tokio::spawn(async move {
                while let Some(update) = update_rx.recv().await {
                    match update {
                        BookletUpdate::Progress { processed, total } => {
                            eprint!("\rPreparing {}/{}", processed, total);
                            if processed == total {
                                eprintln!();
                            }
                        }
                        BookletUpdate::ContentLaidOut { pages, items } => {
                            eprintln!("Laid out {} questions on {} pages", items, pages);
                        }
                    }
                }
            });

            let cancel = CancelFlag::new();
            if dry_run {
                let (stats, warnings) =
                    pdf_booklet::plan_booklet(&request, Some(&update_tx), &cancel).await?;
                drop(update_tx);
                let _ = printer.await;
                report_warnings(&warnings);
                print_statistics(&stats);
            } else {
                let output =
                    output.unwrap_or_else(|| PathBuf::from(sanitize_file_name(&title)));
                let artifact = pdf_booklet::generate_booklet_to_file(
                    &request,
                    &output,
                    Some(&update_tx),
                    &cancel,
                )
                .await?;
                drop(update_tx);
                let _ = printer.await;
                report_warnings(&artifact.warnings);
                print_statistics(&artifact.statistics);
                println!(
                    "Generated {} questions → {}",
                    artifact.statistics.rendered,
                    output.display()
                );
            }
        }

        Commands::List { root } => {
            let collections = pdf_booklet::assets::scan_collections(&root).await?;
            if collections.is_empty() {
                println!("No collections under {}", root.display());
            }
            for collection in collections {
                println!(
                    "{}  ({} questions)",
                    collection.folder, collection.question_count
                );
            }
        }
    }

    Ok(())
}

fn print_statistics(stats: &BookletStatistics) {
    println!("Booklet statistics:");
    println!("  Requested questions: {}", stats.requested);
    println!("  Rendered questions: {}", stats.rendered);
    println!("  Skipped questions: {}", stats.skipped);
    println!("  Pages: {}", stats.pages);
}

fn report_warnings(warnings: &[BookletWarning]) {
    for warning in warnings {
        log::warn!("{}", warning);
    }
}
