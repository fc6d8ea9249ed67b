use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No renderable questions in the selection")]
    NoItems,
    #[error("Generation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// One user-chosen question, identified by its source collection year and
/// 1-based question number. Order of these in a request is the output order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionRef {
    pub year: String,
    pub number: u32,
}

impl QuestionRef {
    pub fn new(year: impl Into<String>, number: u32) -> Self {
        Self {
            year: year.into(),
            number,
        }
    }
}

/// Column-assignment policy for the packing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackingMode {
    /// Fill whichever column is currently shorter (default)
    #[default]
    Balanced,
    /// Always place in the left column, breaking pages as needed
    SingleColumn,
}

/// What happens to the running question number when an item is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberingPolicy {
    /// Skipped items do not consume a number; printed numbers have no gaps (default)
    #[default]
    Contiguous,
    /// Skipped items still consume a number, leaving gaps in the printed sequence
    CountSkipped,
}

/// Standard paper sizes (always portrait for the fixed sizes)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Per-item problem encountered during a run. Warnings never abort the run;
/// they are collected and handed back with the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookletWarning {
    /// No collection folder found for the requested year
    CollectionNotFound { year: String },
    /// The collection exists but the question image file does not
    AssetNotFound { year: String, number: u32 },
    /// The image file exists but could not be decoded
    UnreadableImage {
        year: String,
        number: u32,
        reason: String,
    },
    /// None of the configured font files could be used; built-in Helvetica
    /// is used instead (non-Latin citation text may not render)
    FontFallback { reason: String },
}

impl fmt::Display for BookletWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookletWarning::CollectionNotFound { year } => {
                write!(f, "no collection folder for year {}", year)
            }
            BookletWarning::AssetNotFound { year, number } => {
                write!(f, "missing image for {} Q{}", year, number)
            }
            BookletWarning::UnreadableImage {
                year,
                number,
                reason,
            } => {
                write!(f, "unreadable image for {} Q{}: {}", year, number, reason)
            }
            BookletWarning::FontFallback { reason } => {
                write!(f, "falling back to built-in font: {}", reason)
            }
        }
    }
}

/// Summary of a completed (or dry) run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookletStatistics {
    /// Number of questions in the request
    pub requested: usize,
    /// Number of questions actually placed on pages
    pub rendered: usize,
    /// Requested minus rendered
    pub skipped: usize,
    /// Total output pages
    pub pages: usize,
    /// Placed item count per page, in page order
    pub items_per_page: Vec<usize>,
}

/// Shared flag for cooperative cancellation, checked once per processed item
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
