use crate::models::CatchRecord;

pub const PAGE_SIZE: usize = 25;

/// One page of an already ordered collection. Page numbers are 1-based and
/// there is always at least one page, even when empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    pub rows: &'a [CatchRecord],
    pub page_number: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page_number: usize, count: usize, page_size: usize) -> usize {
    page_number.clamp(1, total_pages(count, page_size))
}

pub fn page(records: &[CatchRecord], page_number: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let page_number = clamp_page(page_number, records.len(), page_size);
    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(records.len());

    Page {
        rows: &records[start.min(end)..end],
        page_number,
        total_pages: total_pages(records.len(), page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::sort_records;
    use crate::testing::record;
    use proptest::prelude::*;

    fn thirty_days() -> Vec<CatchRecord> {
        let mut rows: Vec<CatchRecord> = (1..=30)
            .map(|day| record(day, &format!("2024-04-{day:02}"), "07:00", "Bass"))
            .collect();
        sort_records(&mut rows);
        rows
    }

    #[test]
    fn thirty_records_split_into_two_pages() {
        let rows = thirty_days();

        let first = page(&rows, 1, PAGE_SIZE);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.rows.len(), 25);
        assert_eq!(first.rows[0].id, 30);
        assert_eq!(first.rows[24].id, 6);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let second = page(&rows, 2, PAGE_SIZE);
        assert_eq!(second.rows.len(), 5);
        assert_eq!(second.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        assert!(second.has_previous());
        assert!(!second.has_next());
    }

    #[test]
    fn empty_collection_has_one_page_with_no_navigation() {
        let empty = page(&[], 1, PAGE_SIZE);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.rows.is_empty());
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let rows = thirty_days();
        assert_eq!(page(&rows, 0, PAGE_SIZE).page_number, 1);
        assert_eq!(page(&rows, 99, PAGE_SIZE).page_number, 2);
    }

    proptest! {
        #[test]
        fn pages_concatenate_to_the_whole(count in 0usize..120) {
            let rows: Vec<CatchRecord> = (0..count)
                .map(|i| record(i as i64, "2024-01-01", "10:00", "Bass"))
                .collect();
            let total = total_pages(rows.len(), PAGE_SIZE);
            let joined: Vec<CatchRecord> = (1..=total)
                .flat_map(|n| page(&rows, n, PAGE_SIZE).rows.to_vec())
                .collect();
            prop_assert_eq!(joined, rows);
        }
    }
}
