//! Shared constants for booklet generation
//!
//! This module centralizes the fixed page-geometry and chrome measurements
//! used throughout layout and rendering.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Outer page margin on all four sides (mm)
pub const PAGE_MARGIN_MM: f32 = 20.0;

/// Horizontal gap between the two columns (mm)
pub const COLUMN_GAP_MM: f32 = 12.0;

/// Height reserved at the top of each page for the title line and rule (points)
pub const HEADER_BAND_PT: f32 = 30.0;

/// Height reserved at the bottom of each page for the page-count badge (points)
pub const FOOTER_BAND_PT: f32 = 26.0;

/// Height of the citation line drawn above an image when citations are on (points)
pub const CITATION_LINE_PT: f32 = 20.0;

/// Vertical gap between consecutive items in a column (points)
pub const ITEM_GAP_PT: f32 = 20.0;

// =============================================================================
// Page Chrome
// =============================================================================

/// Gray level of the center divider line (0 = black, 1 = white)
pub const DIVIDER_GRAY: f32 = 0.8;

/// Stroke width of the center divider line (points)
pub const DIVIDER_WIDTH_PT: f32 = 0.5;

/// Font size of the document title in the header band (points)
pub const TITLE_FONT_SIZE_PT: f32 = 10.0;

/// Stroke width of the rule under the header band (points)
pub const HEADER_RULE_WIDTH_PT: f32 = 0.5;

/// Gap between the header rule and the bottom of the header band (points)
pub const HEADER_RULE_RISE_PT: f32 = 8.0;

// =============================================================================
// Item Chrome
// =============================================================================

/// Font size of the source-citation line (points)
pub const CITATION_FONT_SIZE_PT: f32 = 9.0;

/// Gray level of the citation text
pub const CITATION_GRAY: f32 = 0.4;

/// Citation baseline offset from the top of the item block (points)
pub const CITATION_BASELINE_PT: f32 = 12.0;

/// Font size of the replacement question number (points)
pub const NUMBER_FONT_SIZE_PT: f32 = 13.0;

/// Horizontal offset of the replacement number from the image's left edge (mm)
pub const NUMBER_OFFSET_X_MM: f32 = 0.0;

/// Vertical offset of the replacement number from the image's top edge (mm)
pub const NUMBER_OFFSET_Y_MM: f32 = 1.0;

/// Width of the opaque rectangle masking the original printed number (points)
pub const MASK_WIDTH_PT: f32 = 19.0;

/// Height of the opaque rectangle masking the original printed number (points)
pub const MASK_HEIGHT_PT: f32 = 20.0;

/// Horizontal offset of the second strike when simulating a bold weight (points)
pub const BOLD_STRIKE_OFFSET_PT: f32 = 0.7;

// =============================================================================
// Footer Badge
// =============================================================================

/// Font size of the `{page} / {total}` badge text (points)
pub const FOOTER_FONT_SIZE_PT: f32 = 9.0;

/// Height of the footer badge box (points)
pub const FOOTER_BADGE_HEIGHT_PT: f32 = 16.0;

/// Horizontal padding inside the footer badge box (points)
pub const FOOTER_BADGE_PAD_PT: f32 = 6.0;

/// Baseline rise of the badge text above the badge box bottom (points)
pub const FOOTER_TEXT_RISE_PT: f32 = 4.5;

/// Stroke width of the footer badge border (points)
pub const FOOTER_BADGE_BORDER_PT: f32 = 0.5;

// =============================================================================
// Fonts & Images
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// JPEG quality used when "optimize size" is on (0-100 scale)
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// File extensions probed when resolving a question image, in order
pub const ASSET_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
