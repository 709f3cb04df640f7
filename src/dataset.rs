use std::cmp::Ordering;
use std::fmt::Debug;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::pagination::{self, PageMarker};

pub const PAGE_SIZE_CHOICES: [usize; 4] = [5, 10, 15, 20];

/// A row of mock business data that can be listed, searched and filtered.
pub trait Record: Send + Sync {
    type Status: Copy + PartialEq + Debug + Send + Sync;

    /// Header names, in the order returned by `cells`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> String;
    fn searchable_fields(&self) -> Vec<&str>;
    fn status(&self) -> Self::Status;
    fn cells(&self) -> Vec<String>;

    /// Ordering used when sorting by `column`. Compares the rendered cells unless overridden.
    fn compare(&self, other: &Self, column: usize) -> Ordering {
        let a = self.cells();
        let b = other.cells();
        a.get(column).cmp(&b.get(column))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn accepts(&self, status: &S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => s == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<S> {
    pub query: String,
    pub status_filter: StatusFilter<S>,
    pub page_size: usize,
    pub page_index: usize,
}

impl<S> ViewState<S> {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            status_filter: StatusFilter::All,
            page_size,
            page_index: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortOrder {
    pub column: usize,
    pub ascending: bool,
}

pub fn matches_query<R: Record>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Positions in `order` of the records that pass the query and the status filter.
/// The result keeps the order of `order`.
fn filter_order<R: Record>(records: &[R], order: &[usize], state: &ViewState<R::Status>) -> Vec<usize> {
    order
        .par_iter()
        .copied()
        .filter(|&idx| {
            let record = &records[idx];
            matches_query(record, &state.query) && state.status_filter.accepts(&record.status())
        })
        .collect()
}

/// The records shown for `state`. `order` lists record indices in display order
/// (`0..len` when unsorted); matches keep that order and are cut to the current page.
pub fn visible_records<'a, R: Record>(
    records: &'a [R],
    order: &[usize],
    state: &ViewState<R::Status>,
) -> Vec<&'a R> {
    let filtered = filter_order(records, order, state);
    let range = pagination::page_range(filtered.len(), state.page_size, state.page_index);
    filtered[range].iter().map(|&idx| &records[idx]).collect()
}

/// Records plus the view state that decides which of them are listed.
pub struct DatasetView<R: Record> {
    records: Vec<R>,
    state: ViewState<R::Status>,
    order: Vec<usize>, // Mapping of display position to records index. Changed by sorting.
    filtered: Vec<usize>,
    sort: Option<SortOrder>,
    selected_row: usize, // Row on the current page
    sort_column: usize,
}

impl<R: Record> DatasetView<R> {
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        let mut view = Self {
            order: (0..records.len()).collect(),
            records,
            state: ViewState::new(page_size),
            filtered: Vec::new(),
            sort: None,
            selected_row: 0,
            sort_column: 0,
        };
        view.refresh();
        view
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn state(&self) -> &ViewState<R::Status> {
        &self.state
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn sort_column(&self) -> usize {
        self.sort_column
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.filtered.len(), self.state.page_size)
    }

    pub fn page_buttons(&self) -> Vec<PageMarker> {
        pagination::page_buttons(self.state.page_index, self.page_count())
    }

    pub fn page_records(&self) -> Vec<&R> {
        visible_records(&self.records, &self.order, &self.state)
    }

    /// (first, last, total) for the "Showing first to last of total entries" footer.
    pub fn showing_range(&self) -> (usize, usize, usize) {
        let total = self.filtered_len();
        let range = pagination::page_range(total, self.state.page_size, self.state.page_index);
        if range.is_empty() {
            (0, 0, total)
        } else {
            (range.start + 1, range.end, total)
        }
    }

    pub fn selected(&self) -> Option<&R> {
        self.page_records().get(self.selected_row).copied()
    }

    pub fn set_query(&mut self, query: &str) {
        if self.state.query != query {
            self.state.query = query.to_string();
            self.state.page_index = 1;
            self.refresh();
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter<R::Status>) {
        self.state.status_filter = filter;
        self.state.page_index = 1;
        self.refresh();
    }

    /// Steps All -> choices[0] -> ... -> choices[n-1] -> All.
    pub fn cycle_status_filter(&mut self, choices: &[R::Status]) {
        let next = match self.state.status_filter {
            StatusFilter::All => choices.first().copied().map(StatusFilter::Only),
            StatusFilter::Only(current) => choices
                .iter()
                .position(|s| *s == current)
                .and_then(|pos| choices.get(pos + 1))
                .copied()
                .map(StatusFilter::Only),
        };
        self.set_status_filter(next.unwrap_or(StatusFilter::All));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.state.page_size = page_size;
        self.state.page_index = 1;
        self.refresh();
    }

    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_CHOICES
            .iter()
            .position(|&s| s == self.state.page_size)
            .map(|pos| PAGE_SIZE_CHOICES[(pos + 1) % PAGE_SIZE_CHOICES.len()])
            .unwrap_or(PAGE_SIZE_CHOICES[0]);
        self.set_page_size(next);
    }

    /// Switches to `page`. Pages outside [1, page_count] are ignored.
    pub fn goto_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.page_count() {
            trace!("Ignoring change to page {} of {}", page, self.page_count());
            return false;
        }
        self.state.page_index = page;
        self.selected_row = 0;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.goto_page(self.state.page_index + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.state.page_index.checked_sub(1) {
            Some(page) => self.goto_page(page),
            None => false,
        }
    }

    pub fn first_page(&mut self) -> bool {
        self.goto_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.goto_page(self.page_count())
    }

    pub fn select_next(&mut self) {
        let rows = self.page_records().len();
        if self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn next_sort_column(&mut self) {
        if self.sort_column + 1 < R::COLUMNS.len() {
            self.sort_column += 1;
        }
    }

    pub fn previous_sort_column(&mut self) {
        self.sort_column = self.sort_column.saturating_sub(1);
    }

    pub fn sort_by(&mut self, column: usize, ascending: bool) {
        if column >= R::COLUMNS.len() {
            return;
        }
        let records = &self.records;
        // sort_by is stable, rows with equal keys keep their previous order.
        self.order.sort_by(|&a, &b| {
            let ordering = records[a].compare(&records[b], column);
            if ascending { ordering } else { ordering.reverse() }
        });
        self.sort = Some(SortOrder { column, ascending });
        debug!("Sorted by {} ({})", R::COLUMNS[column], if ascending { "asc" } else { "desc" });
        self.refresh();
    }

    pub fn sort_by_selected_column(&mut self, ascending: bool) {
        self.sort_by(self.sort_column, ascending);
    }

    pub fn add(&mut self, record: R) {
        self.records.push(record);
        self.order.push(self.records.len() - 1);
        if let Some(sort) = self.sort {
            self.sort_by(sort.column, sort.ascending);
        } else {
            self.refresh();
        }
    }

    /// Removes the record with `id`, leaving every other record untouched.
    pub fn delete(&mut self, id: &str) -> Option<R> {
        let idx = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(idx);
        self.order.retain(|&i| i != idx);
        for i in self.order.iter_mut() {
            if *i > idx {
                *i -= 1;
            }
        }
        self.refresh();
        Some(removed)
    }

    // Recomputes the filtered rows and pulls the page index and row selection back in range.
    fn refresh(&mut self) {
        self.filtered = filter_order(&self.records, &self.order, &self.state);
        let pages = self.page_count();
        self.state.page_index = self.state.page_index.clamp(1, std::cmp::max(pages, 1));
        let rows = self.page_records().len();
        self.selected_row = std::cmp::min(self.selected_row, rows.saturating_sub(1));
        trace!(
            "Dataset: {} of {} records match, page {}/{}",
            self.filtered.len(),
            self.records.len(),
            self.state.page_index,
            pages
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Blue,
    }

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
        name: String,
        color: Color,
        size: u32,
    }

    impl Record for Item {
        type Status = Color;
        const COLUMNS: &'static [&'static str] = &["Id", "Name", "Size"];

        fn id(&self) -> String {
            self.id.clone()
        }

        fn searchable_fields(&self) -> Vec<&str> {
            vec![&self.id, &self.name]
        }

        fn status(&self) -> Color {
            self.color
        }

        fn cells(&self) -> Vec<String> {
            vec![self.id.clone(), self.name.clone(), self.size.to_string()]
        }

        fn compare(&self, other: &Self, column: usize) -> Ordering {
            match column {
                2 => self.size.cmp(&other.size),
                _ => self.cells()[column].cmp(&other.cells()[column]),
            }
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                id: format!("IT{:03}", i + 1),
                name: if i % 3 == 0 { format!("Apple {i}") } else { format!("Pear {i}") },
                color: if i % 2 == 0 { Color::Red } else { Color::Blue },
                size: (n - i) as u32,
            })
            .collect()
    }

    fn natural(records: &[Item]) -> Vec<usize> {
        (0..records.len()).collect()
    }

    fn ids(records: &[&Item]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn query_is_case_insensitive() {
        let records = items(6);
        let mut state = ViewState::new(10);
        state.query = "aPPLE".to_string();
        assert_eq!(ids(&visible_records(&records, &natural(&records), &state)), vec!["IT001", "IT004"]);
    }

    #[test]
    fn query_and_status_must_both_match() {
        let records = items(6);
        let mut state = ViewState::new(10);
        state.query = "apple".to_string();
        state.status_filter = StatusFilter::Only(Color::Blue);
        assert_eq!(ids(&visible_records(&records, &natural(&records), &state)), vec!["IT004"]);
    }

    #[test]
    fn slices_the_requested_page() {
        let records = items(12);
        let mut state = ViewState::new(5);
        state.page_index = 3;
        assert_eq!(ids(&visible_records(&records, &natural(&records), &state)), vec!["IT011", "IT012"]);
        state.page_index = 4;
        assert!(visible_records(&records, &natural(&records), &state).is_empty());
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut view = DatasetView::new(items(30), 5);
        assert!(view.goto_page(4));
        view.set_query("pear");
        assert_eq!(view.state().page_index, 1);

        assert!(view.goto_page(2));
        view.set_status_filter(StatusFilter::Only(Color::Red));
        assert_eq!(view.state().page_index, 1);

        assert!(view.goto_page(2));
        view.cycle_page_size();
        assert_eq!(view.state().page_size, 10);
        assert_eq!(view.state().page_index, 1);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut view = DatasetView::new(items(12), 5);
        assert!(!view.goto_page(0));
        assert!(!view.goto_page(4));
        assert!(!view.previous_page());
        assert!(view.last_page());
        assert_eq!(view.state().page_index, 3);
        assert!(!view.next_page());
        assert_eq!(view.showing_range(), (11, 12, 12));
    }

    #[test]
    fn empty_result_keeps_page_one() {
        let mut view = DatasetView::new(items(12), 5);
        view.set_query("banana");
        assert_eq!(view.page_count(), 0);
        assert_eq!(view.state().page_index, 1);
        assert!(view.page_records().is_empty());
        assert!(view.page_buttons().is_empty());
        assert_eq!(view.showing_range(), (0, 0, 0));
        assert!(view.selected().is_none());
    }

    #[test]
    fn cycling_status_returns_to_all() {
        let mut view = DatasetView::new(items(4), 5);
        let choices = [Color::Red, Color::Blue];
        view.cycle_status_filter(&choices);
        assert_eq!(view.state().status_filter, StatusFilter::Only(Color::Red));
        view.cycle_status_filter(&choices);
        assert_eq!(view.state().status_filter, StatusFilter::Only(Color::Blue));
        view.cycle_status_filter(&choices);
        assert_eq!(view.state().status_filter, StatusFilter::All);
    }

    #[test]
    fn sort_reorders_and_survives_filtering() {
        let mut view = DatasetView::new(items(6), 10);
        view.sort_by(2, true);
        assert_eq!(ids(&view.page_records()), vec!["IT006", "IT005", "IT004", "IT003", "IT002", "IT001"]);
        view.set_query("apple");
        assert_eq!(ids(&view.page_records()), vec!["IT004", "IT001"]);
        view.sort_by(0, true);
        assert_eq!(ids(&view.page_records()), vec!["IT001", "IT004"]);
    }

    #[test]
    fn delete_clamps_page_and_keeps_ids() {
        let mut view = DatasetView::new(items(11), 5);
        assert!(view.last_page());
        assert!(view.delete("IT011").is_some());
        assert_eq!(view.state().page_index, 2);
        assert!(view.delete("IT011").is_none());
        assert_eq!(view.records().len(), 10);
    }

    #[test]
    fn add_appends_after_existing_rows() {
        let mut view = DatasetView::new(items(2), 5);
        view.add(Item { id: "IT100".into(), name: "Apple new".into(), color: Color::Red, size: 0 });
        assert_eq!(ids(&view.page_records()), vec!["IT001", "IT002", "IT100"]);
    }

    #[test]
    fn selection_stays_on_page() {
        let mut view = DatasetView::new(items(7), 5);
        for _ in 0..10 {
            view.select_next();
        }
        assert_eq!(view.selected_row(), 4);
        assert!(view.next_page());
        assert_eq!(view.selected_row(), 0);
        view.select_next();
        view.select_next();
        assert_eq!(view.selected().map(|r| r.id.clone()), Some("IT007".to_string()));
    }

    proptest! {
        #[test]
        fn visible_records_contain_query(n in 0usize..60, query in "[a-zA-Z0-9 ]{0,4}") {
            let records = items(n);
            let mut state = ViewState::new(100);
            state.query = query.clone();
            let needle = query.to_lowercase();
            for record in visible_records(&records, &natural(&records), &state) {
                prop_assert!(record.searchable_fields().iter().any(|f| f.to_lowercase().contains(&needle)));
            }
        }

        #[test]
        fn page_count_matches_filtered(n in 0usize..80, page_size in 1usize..25, blue in any::<bool>()) {
            let mut view = DatasetView::new(items(n), page_size);
            if blue {
                view.set_status_filter(StatusFilter::Only(Color::Blue));
            }
            prop_assert_eq!(view.page_count(), view.filtered_len().div_ceil(page_size));
        }

        #[test]
        fn delete_removes_exactly_one(n in 1usize..40, pick in 0usize..40) {
            let mut view = DatasetView::new(items(n), 5);
            let target = format!("IT{:03}", (pick % n) + 1);
            let before: Vec<String> = view.records().iter().map(|r| r.id.clone()).collect();
            prop_assert!(view.delete(&target).is_some());
            let after: Vec<String> = view.records().iter().map(|r| r.id.clone()).collect();
            prop_assert_eq!(after.len(), before.len() - 1);
            let expected: Vec<String> = before.into_iter().filter(|id| *id != target).collect();
            prop_assert_eq!(after, expected);
        }
    }
}
