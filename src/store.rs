use crate::charts::{ChartSeries, ChartKind, build_series};
use crate::filter::{filter_records, normalize_keyword};
use crate::models::{CatchId, CatchRecord, CatchRow, PageResponse};
use crate::pager::{PAGE_SIZE, Page, clamp_page, page};
use crate::sort::sort_records;

/// Issued by [`CatchStore::begin_refresh`]; only the most recent ticket may
/// replace the store's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Client-side cache of every catch plus the filtered, sorted view the table
/// pages through. It is only ever rebuilt wholesale from a backend listing.
#[derive(Debug)]
pub struct CatchStore {
    all: Vec<CatchRecord>,
    view: Vec<CatchRecord>,
    keyword: String,
    current_page: usize,
    issued: u64,
    applied: u64,
    notice: Option<String>,
}

impl Default for CatchStore {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            view: Vec::new(),
            keyword: String::new(),
            current_page: 1,
            issued: 0,
            applied: 0,
            notice: None,
        }
    }
}

impl CatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Applies a finished listing if `ticket` is still the latest one issued.
    /// Returns whether the records were applied.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        records: Vec<CatchRecord>,
        keep_page: bool,
    ) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.applied = ticket.0;
        self.replace_all(records, keep_page);
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.applied > 0
    }

    pub fn replace_all(&mut self, mut records: Vec<CatchRecord>, keep_page: bool) {
        sort_records(&mut records);
        self.all = records;
        self.rebuild_view();
        self.current_page = if keep_page {
            clamp_page(self.current_page, self.view.len(), PAGE_SIZE)
        } else {
            1
        };
    }

    /// Narrows the view to `keyword`. A different keyword always starts over
    /// at page 1; one that differs only in case or padding does not.
    pub fn set_filter(&mut self, keyword: &str) {
        let keyword = keyword.trim();
        let unchanged = normalize_keyword(keyword) == normalize_keyword(&self.keyword);
        self.keyword = keyword.to_string();
        if unchanged {
            return;
        }
        self.rebuild_view();
        self.current_page = 1;
    }

    fn rebuild_view(&mut self) {
        let mut view = filter_records(&self.all, &self.keyword);
        sort_records(&mut view);
        self.view = view;
    }

    /// The keyword as the user typed it, minus surrounding whitespace.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn all(&self) -> &[CatchRecord] {
        &self.all
    }

    pub fn view(&self) -> &[CatchRecord] {
        &self.view
    }

    pub fn find(&self, id: CatchId) -> Option<&CatchRecord> {
        self.all.iter().find(|record| record.id == id)
    }

    pub fn go_to_page(&mut self, page_number: usize) -> usize {
        self.current_page = clamp_page(page_number, self.view.len(), PAGE_SIZE);
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn current_page(&self) -> Page<'_> {
        page(&self.view, self.current_page, PAGE_SIZE)
    }

    pub fn page_response(&self) -> PageResponse {
        let current = self.current_page();
        PageResponse {
            rows: current.rows.iter().map(CatchRow::from).collect(),
            page: current.page_number,
            total_pages: current.total_pages,
            total_matches: self.view.len(),
            has_previous: current.has_previous(),
            has_next: current.has_next(),
            keyword: self.keyword.clone(),
        }
    }

    /// Chart data always covers every record, regardless of the filter.
    pub fn series(&self, kind: ChartKind) -> ChartSeries {
        build_series(kind, &self.all)
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    fn forty() -> Vec<CatchRecord> {
        (1..=40)
            .map(|id| {
                let species = if id % 4 == 0 { "Trout" } else { "Bass" };
                record(id, &format!("2024-06-{:02}", (id % 28) + 1), "06:30", species)
            })
            .collect()
    }

    fn loaded(records: Vec<CatchRecord>) -> CatchStore {
        let mut store = CatchStore::new();
        let ticket = store.begin_refresh();
        assert!(store.complete_refresh(ticket, records, false));
        store
    }

    #[test]
    fn refresh_sorts_and_rebuilds_view() {
        let store = loaded(vec![
            record(1, "2024-01-01", "08:00", "Bass"),
            record(2, "2024-01-02", "08:00", "Bass"),
        ]);
        assert!(store.is_loaded());
        assert_eq!(store.all()[0].id, 2);
        assert_eq!(store.view().len(), 2);
    }

    #[test]
    fn stale_refresh_is_discarded() {
        let mut store = CatchStore::new();
        let first = store.begin_refresh();
        let second = store.begin_refresh();

        assert!(store.complete_refresh(second, vec![record(2, "2024-01-02", "08:00", "Bass")], false));
        assert!(!store.complete_refresh(first, vec![record(1, "2024-01-01", "08:00", "Bass")], false));
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id, 2);
    }

    #[test]
    fn changing_filter_resets_to_first_page() {
        let mut store = loaded(forty());
        assert_eq!(store.next_page(), 2);

        store.set_filter("bass");
        assert_eq!(store.current_page().page_number, 1);
        assert_eq!(store.view().len(), 30);
        assert!(store.series(ChartKind::Species).get("Trout").is_some());

        store.next_page();
        store.set_filter(" BASS ");
        assert_eq!(store.current_page().page_number, 2);
        assert_eq!(store.keyword(), "BASS");
        assert_eq!(store.page_response().keyword, "BASS");
        assert_eq!(store.view().len(), 30);
    }

    #[test]
    fn navigation_stops_at_the_edges() {
        let mut store = loaded(forty());
        assert_eq!(store.previous_page(), 1);
        assert_eq!(store.next_page(), 2);
        assert_eq!(store.next_page(), 2);
        assert!(!store.current_page().has_next());
    }

    #[test]
    fn keep_page_survives_refresh_and_is_clamped() {
        let mut store = loaded(forty());
        store.go_to_page(2);

        store.replace_all(forty(), true);
        assert_eq!(store.current_page().page_number, 2);

        store.replace_all(forty().into_iter().take(10).collect(), true);
        assert_eq!(store.current_page().page_number, 1);

        store.replace_all(forty(), false);
        assert_eq!(store.current_page().page_number, 1);
    }

    #[test]
    fn page_response_formats_rows() {
        let store = loaded(vec![record(5, "2024-03-05", "13:05", "Bass")]);
        let response = store.page_response();
        assert_eq!(response.rows[0].date, "03/05/2024");
        assert_eq!(response.rows[0].time, "1:05 PM");
        assert_eq!(response.total_pages, 1);
        assert!(!response.has_next);
    }

    #[test]
    fn notice_is_taken_once() {
        let mut store = CatchStore::new();
        store.notify("Catch not found");
        assert_eq!(store.take_notice().as_deref(), Some("Catch not found"));
        assert!(store.take_notice().is_none());
    }
}
