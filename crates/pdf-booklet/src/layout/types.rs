//! Layout data types
//!
//! Layout works in a top-down coordinate space (y grows toward the page
//! bottom, matching reading order); the renderer converts to PDF
//! bottom-up coordinates when emitting ops.

use crate::constants::{
    CITATION_LINE_PT, COLUMN_GAP_MM, FOOTER_BAND_PT, HEADER_BAND_PT, ITEM_GAP_PT, PAGE_MARGIN_MM,
    mm_to_pt,
};
use crate::options::BookletOptions;

/// Which of the two page columns an item lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

impl Column {
    pub fn other(self) -> Column {
        match self {
            Column::Left => Column::Right,
            Column::Right => Column::Left,
        }
    }
}

/// Fixed page measurements resolved once per run, all in points.
///
/// Invariant: `column_width = (page_width - 2*margin - column_gap) / 2`;
/// never recomputed mid-run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub column_gap: f32,
    pub column_width: f32,
    /// Height reserved for the title line at the top of each page
    pub header_height: f32,
    /// Height reserved for the page-count badge at the bottom of each page
    pub footer_height: f32,
    /// Top-down y where column content starts on every page
    pub content_top: f32,
    /// Top-down y that column content must not cross
    pub content_bottom: f32,
    /// Height of a citation line above an image
    pub citation_line_height: f32,
    /// Vertical gap between consecutive items in a column
    pub item_gap: f32,
}

impl PageGeometry {
    pub fn new(
        page_width: f32,
        page_height: f32,
        margin: f32,
        column_gap: f32,
        header_height: f32,
        footer_height: f32,
    ) -> Self {
        let column_width = (page_width - 2.0 * margin - column_gap) / 2.0;
        Self {
            page_width,
            page_height,
            margin,
            column_gap,
            column_width,
            header_height,
            footer_height,
            content_top: margin + header_height,
            content_bottom: page_height - margin - footer_height,
            citation_line_height: CITATION_LINE_PT,
            item_gap: ITEM_GAP_PT,
        }
    }

    pub fn from_options(options: &BookletOptions) -> Self {
        let (width_mm, height_mm) = options.paper_size.dimensions_mm();
        Self::new(
            mm_to_pt(width_mm),
            mm_to_pt(height_mm),
            mm_to_pt(PAGE_MARGIN_MM),
            mm_to_pt(COLUMN_GAP_MM),
            HEADER_BAND_PT,
            FOOTER_BAND_PT,
        )
    }

    /// Left edge of a column
    pub fn column_x(&self, column: Column) -> f32 {
        match column {
            Column::Left => self.margin,
            Column::Right => self.margin + self.column_width + self.column_gap,
        }
    }

    /// Convert a top-down y to a PDF (bottom-up) y
    pub fn pdf_y(&self, top_down_y: f32) -> f32 {
        self.page_height - top_down_y
    }
}

/// Intrinsic pixel dimensions of one item, in input order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemExtent {
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Next free vertical offset in each column of the in-progress page.
///
/// Both cursors start at `content_top` on every new page and only grow
/// within a page.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCursor {
    pub left_y: f32,
    pub right_y: f32,
    /// 1-based index of the in-progress page
    pub page_index: usize,
}

impl LayoutCursor {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            left_y: geometry.content_top,
            right_y: geometry.content_top,
            page_index: 1,
        }
    }

    pub fn column_y(&self, column: Column) -> f32 {
        match column {
            Column::Left => self.left_y,
            Column::Right => self.right_y,
        }
    }

    /// Whether `total_height` fits under the bottom limit in `column`
    pub fn fits(&self, column: Column, total_height: f32, geometry: &PageGeometry) -> bool {
        self.column_y(column) + total_height <= geometry.content_bottom
    }

    /// Advance a column past a placed item and the inter-item gap
    pub fn advance(&mut self, column: Column, total_height: f32, geometry: &PageGeometry) {
        let y = match column {
            Column::Left => &mut self.left_y,
            Column::Right => &mut self.right_y,
        };
        *y += total_height + geometry.item_gap;
    }

    /// Retire the current page and reset both cursors for the next one
    pub fn start_new_page(&mut self, geometry: &PageGeometry) {
        self.left_y = geometry.content_top;
        self.right_y = geometry.content_top;
        self.page_index += 1;
    }

    pub fn is_page_empty(&self, geometry: &PageGeometry) -> bool {
        self.left_y == geometry.content_top && self.right_y == geometry.content_top
    }
}

/// Final placement of one item, produced in processing order
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    /// Index into the input sequence handed to `pack`
    pub item_index: usize,
    /// 1-based target page
    pub page: usize,
    pub column: Column,
    /// Left edge, in points
    pub x: f32,
    /// Top edge of the item block (citation line included), top-down points
    pub y: f32,
    /// Rendered image height after scaling to the column width
    pub image_height: f32,
    /// Image height plus the citation line, when one is drawn
    pub total_height: f32,
    pub with_citation: bool,
}

/// The packing engine's output for a full input sequence
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub placements: Vec<PlacedItem>,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width_formula() {
        let geometry = PageGeometry::new(800.0, 1200.0, 50.0, 30.0, 20.0, 20.0);
        assert!((geometry.column_width - (800.0 - 100.0 - 30.0) / 2.0).abs() < 0.001);
        assert!((geometry.column_x(Column::Left) - 50.0).abs() < 0.001);
        assert!((geometry.column_x(Column::Right) - (50.0 + geometry.column_width + 30.0)).abs() < 0.001);
    }

    #[test]
    fn test_a3_default_geometry() {
        let geometry = PageGeometry::from_options(&BookletOptions::default());
        // 297mm x 420mm in points
        assert!((geometry.page_width - 841.89).abs() < 0.1);
        assert!((geometry.page_height - 1190.55).abs() < 0.1);
        assert!(geometry.content_top < geometry.content_bottom);
        assert!(geometry.column_width > 0.0);
    }

    #[test]
    fn test_cursor_advance_and_reset() {
        let geometry = PageGeometry::new(800.0, 1200.0, 50.0, 30.0, 20.0, 20.0);
        let mut cursor = LayoutCursor::new(&geometry);
        assert!(cursor.is_page_empty(&geometry));

        cursor.advance(Column::Left, 100.0, &geometry);
        assert!((cursor.left_y - (geometry.content_top + 100.0 + geometry.item_gap)).abs() < 0.001);
        assert!((cursor.right_y - geometry.content_top).abs() < 0.001);
        assert!(!cursor.is_page_empty(&geometry));

        cursor.start_new_page(&geometry);
        assert!(cursor.is_page_empty(&geometry));
        assert_eq!(cursor.page_index, 2);
    }
}
