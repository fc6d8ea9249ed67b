//! Greedy column-packing engine
//!
//! Consumes item extents in input order, threading one cursor pair through
//! the sequence and emitting one placement per item. Deterministic: the
//! placement of every item depends only on the input order, the geometry,
//! and the packing mode.

use super::types::{Column, ItemExtent, LayoutCursor, LayoutPlan, PageGeometry, PlacedItem};
use crate::types::PackingMode;

/// Pack a sequence of items into columns and pages.
///
/// Items are scaled uniformly to the column width; an item taller than a
/// full empty column is placed at the top of an empty page and allowed to
/// overflow visually rather than rejected.
pub fn pack(
    items: &[ItemExtent],
    geometry: &PageGeometry,
    mode: PackingMode,
    with_citations: bool,
) -> LayoutPlan {
    let citation_height = if with_citations {
        geometry.citation_line_height
    } else {
        0.0
    };

    let mut cursor = LayoutCursor::new(geometry);
    let mut placements = Vec::with_capacity(items.len());

    for (item_index, item) in items.iter().enumerate() {
        let scale = geometry.column_width / item.pixel_width as f32;
        let image_height = item.pixel_height as f32 * scale;
        let total_height = image_height + citation_height;

        let column = match choose_column(&cursor, total_height, geometry, mode) {
            Some(column) => column,
            // An empty page that still cannot hold the item: place anyway
            // and let it overflow instead of looping on page breaks.
            None if cursor.is_page_empty(geometry) => Column::Left,
            None => {
                cursor.start_new_page(geometry);
                Column::Left
            }
        };

        let y = cursor.column_y(column);
        log::debug!(
            "item {} -> page {} {:?} at y {:.1} (h {:.1})",
            item_index,
            cursor.page_index,
            column,
            y,
            total_height
        );

        placements.push(PlacedItem {
            item_index,
            page: cursor.page_index,
            column,
            x: geometry.column_x(column),
            y,
            image_height,
            total_height,
            with_citation: with_citations,
        });
        cursor.advance(column, total_height, geometry);
    }

    LayoutPlan {
        page_count: cursor.page_index,
        placements,
    }
}

/// Pick a column on the current page, or `None` if the item fits nowhere.
fn choose_column(
    cursor: &LayoutCursor,
    total_height: f32,
    geometry: &PageGeometry,
    mode: PackingMode,
) -> Option<Column> {
    match mode {
        PackingMode::SingleColumn => cursor
            .fits(Column::Left, total_height, geometry)
            .then_some(Column::Left),
        PackingMode::Balanced => {
            // Prefer the shorter column; ties go left.
            let first = if cursor.right_y < cursor.left_y {
                Column::Right
            } else {
                Column::Left
            };
            if cursor.fits(first, total_height, geometry) {
                Some(first)
            } else if cursor.fits(first.other(), total_height, geometry) {
                Some(first.other())
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geometry() -> PageGeometry {
        // 400pt columns, content from y=0 to y=480, 20pt gap
        let mut geometry = PageGeometry::new(830.0, 480.0, 0.0, 30.0, 0.0, 0.0);
        geometry.item_gap = 20.0;
        geometry
    }

    fn item(pixel_width: u32, pixel_height: u32) -> ItemExtent {
        ItemExtent {
            pixel_width,
            pixel_height,
        }
    }

    #[test]
    fn test_prefers_shorter_column() {
        let geometry = test_geometry();
        let items = vec![item(400, 100), item(400, 100), item(400, 100)];
        let plan = pack(&items, &geometry, PackingMode::Balanced, false);

        assert_eq!(plan.placements[0].column, Column::Left);
        assert_eq!(plan.placements[1].column, Column::Right);
        // Tie after one item each: left again
        assert_eq!(plan.placements[2].column, Column::Left);
    }

    #[test]
    fn test_keeps_choosing_the_shorter_column_mid_fill() {
        let geometry = test_geometry();
        // After 100 left and 300 right, the third item prefers the shorter
        // left column (120 + 340 = 460 <= 480).
        let items = vec![item(400, 100), item(400, 300), item(400, 340)];
        let plan = pack(&items, &geometry, PackingMode::Balanced, false);
        assert_eq!(plan.placements[2].column, Column::Left);
        assert_eq!(plan.placements[2].page, 1);

        // Cursors now sit at left=480, right=320. A fourth item of height
        // 150 lands in the right column (320 + 150 = 470 <= 480) without a
        // page break.
        let items = vec![
            item(400, 100),
            item(400, 300),
            item(400, 340),
            item(400, 150),
        ];
        let plan = pack(&items, &geometry, PackingMode::Balanced, false);
        assert_eq!(plan.placements[3].column, Column::Right);
        assert_eq!(plan.placements[3].page, 1);
    }

    #[test]
    fn test_single_column_never_uses_right() {
        let geometry = test_geometry();
        let items = vec![item(400, 150); 6];
        let plan = pack(&items, &geometry, PackingMode::SingleColumn, false);

        assert!(plan.placements.iter().all(|p| p.column == Column::Left));
        // 150+20 per item: y = 0, 170, 340 fit on a page (340+150=490 > 480
        // for the third), so two items per page.
        assert_eq!(plan.page_count, 3);
    }

    #[test]
    fn test_oversized_item_overflows_instead_of_looping() {
        let geometry = test_geometry();
        // Scaled height 600 > 480 column height.
        let items = vec![item(400, 600), item(400, 100)];
        let plan = pack(&items, &geometry, PackingMode::Balanced, false);

        assert_eq!(plan.placements[0].page, 1);
        assert_eq!(plan.placements[0].column, Column::Left);
        assert!((plan.placements[0].y - 0.0).abs() < 0.001);
        // The follower still finds the untouched right column.
        assert_eq!(plan.placements[1].page, 1);
        assert_eq!(plan.placements[1].column, Column::Right);
    }

    #[test]
    fn test_citation_line_adds_to_total_height() {
        let geometry = test_geometry();
        let items = vec![item(400, 100)];
        let plan = pack(&items, &geometry, PackingMode::Balanced, true);

        let placed = &plan.placements[0];
        assert!((placed.image_height - 100.0).abs() < 0.001);
        assert!((placed.total_height - (100.0 + geometry.citation_line_height)).abs() < 0.001);
        assert!(placed.with_citation);
    }
}
