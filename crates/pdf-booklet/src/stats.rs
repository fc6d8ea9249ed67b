use crate::layout::LayoutPlan;
use crate::types::BookletStatistics;

/// Summarize a layout plan against the original request size
pub fn calculate_statistics(requested: usize, plan: &LayoutPlan) -> BookletStatistics {
    let mut items_per_page = vec![0usize; plan.page_count];
    for placement in &plan.placements {
        items_per_page[placement.page - 1] += 1;
    }

    BookletStatistics {
        requested,
        rendered: plan.placements.len(),
        skipped: requested - plan.placements.len(),
        pages: plan.page_count,
        items_per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Column, PlacedItem};

    fn placed(item_index: usize, page: usize) -> PlacedItem {
        PlacedItem {
            item_index,
            page,
            column: Column::Left,
            x: 0.0,
            y: 0.0,
            image_height: 100.0,
            total_height: 100.0,
            with_citation: false,
        }
    }

    #[test]
    fn test_statistics_counts() {
        let plan = LayoutPlan {
            placements: vec![placed(0, 1), placed(1, 1), placed(2, 2)],
            page_count: 2,
        };
        let stats = calculate_statistics(5, &plan);

        assert_eq!(stats.requested, 5);
        assert_eq!(stats.rendered, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.items_per_page, vec![2, 1]);
    }
}
