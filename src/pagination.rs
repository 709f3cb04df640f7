use std::ops::Range;

/// One entry of the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Index range of the items shown on the 1-based `page_index`, clipped to `total_items`.
pub fn page_range(total_items: usize, page_size: usize, page_index: usize) -> Range<usize> {
    let begin = std::cmp::min(page_index.saturating_sub(1) * page_size, total_items);
    let end = std::cmp::min(begin + page_size, total_items);
    begin..end
}

/// Buttons for the pagination strip: the first and last page, the pages next
/// to `current_page`, and one ellipsis for every gap in between.
pub fn page_buttons(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut markers = Vec::new();
    for page in 1..=total_pages {
        if page == 1 || page == total_pages || page.abs_diff(current_page) <= 1 {
            markers.push(PageMarker::Page(page));
        } else if markers.last() != Some(&PageMarker::Ellipsis) {
            markers.push(PageMarker::Ellipsis);
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use PageMarker::{Ellipsis, Page};

    #[test]
    fn single_page_needs_no_controls() {
        assert!(page_buttons(1, 1).is_empty());
        assert!(page_buttons(1, 0).is_empty());
    }

    #[test]
    fn window_around_current_page() {
        assert_eq!(
            page_buttons(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_buttons(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_buttons(10, 10),
            vec![Page(1), Ellipsis, Page(9), Page(10)]
        );
    }

    #[test]
    fn short_strips_have_no_ellipsis() {
        assert_eq!(page_buttons(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(page_buttons(2, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn a_single_hidden_page_is_still_an_ellipsis() {
        assert_eq!(
            page_buttons(4, 5),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn count_and_range() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(15, 10), 2);
        assert_eq!(page_count(20, 10), 2);
        assert_eq!(page_count(15, 0), 0);
        assert_eq!(page_range(15, 10, 2), 10..15);
        assert_eq!(page_range(15, 5, 1), 0..5);
        assert_eq!(page_range(3, 5, 4), 3..3);
    }

    proptest! {
        #[test]
        fn page_count_is_ceiling(total in 0usize..500, size in 1usize..50) {
            let pages = page_count(total, size);
            prop_assert!(pages * size >= total);
            prop_assert!(pages == 0 || (pages - 1) * size < total);
        }

        #[test]
        fn buttons_keep_ends_and_current(total in 2usize..60, current in 1usize..60) {
            prop_assume!(current <= total);
            let buttons = page_buttons(current, total);
            prop_assert_eq!(buttons.first(), Some(&Page(1)));
            prop_assert_eq!(buttons.last(), Some(&Page(total)));
            prop_assert!(buttons.contains(&Page(current)));
            for pair in buttons.windows(2) {
                prop_assert!(!(pair[0] == Ellipsis && pair[1] == Ellipsis));
            }
        }
    }
}
