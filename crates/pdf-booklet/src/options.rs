use crate::constants::DEFAULT_JPEG_QUALITY;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Formatting configuration for one generation run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookletOptions {
    /// Title drawn in each page header and used for the artifact file name
    pub document_title: String,

    /// Draw the source-citation line above each question image
    pub show_citations: bool,

    /// Re-encode images as JPEG before embedding
    pub compress_images: bool,

    /// JPEG quality (1-100) used when `compress_images` is on
    pub jpeg_quality: u8,

    /// Column-assignment policy
    pub packing_mode: PackingMode,

    /// Renumbering behavior for skipped items
    pub numbering: NumberingPolicy,

    /// Output page size
    pub paper_size: PaperSize,

    /// Candidate font files probed in order; first parseable one is embedded,
    /// otherwise built-in Helvetica is used
    pub font_sources: Vec<PathBuf>,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            document_title: "Practice Booklet".to_string(),
            show_citations: true,
            compress_images: true,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            packing_mode: PackingMode::Balanced,
            numbering: NumberingPolicy::Contiguous,
            paper_size: PaperSize::A3,
            font_sources: Vec::new(),
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(BookletError::Config(
                "JPEG quality must be between 1 and 100".to_string(),
            ));
        }

        let (width_mm, height_mm) = self.paper_size.dimensions_mm();
        if width_mm <= 0.0 || height_mm <= 0.0 {
            return Err(BookletError::Config(
                "Page dimensions must be positive".to_string(),
            ));
        }

        // Two columns plus gap must fit between the margins
        let geometry = crate::layout::PageGeometry::from_options(self);
        if geometry.column_width <= 0.0 {
            return Err(BookletError::Config(format!(
                "Page width {:.0}mm is too narrow for two columns",
                width_mm
            )));
        }
        if geometry.content_bottom <= geometry.content_top {
            return Err(BookletError::Config(format!(
                "Page height {:.0}mm leaves no usable column height",
                height_mm
            )));
        }

        Ok(())
    }
}
