//! Paginated post list state.
//!
//! [`PostList`] owns the cumulative list of posts for one filter. It never
//! performs I/O itself: every operation that needs data returns a
//! [`ListRequest`] for the caller to run, and the result comes back through
//! [`PostList::apply`] tagged with the request's ticket. Results for any
//! ticket other than the latest one are dropped, so a slow response for an
//! old filter can never overwrite a newer one.

use tracing::debug;

use crate::api::types::normalize_labels;
use crate::api::{Issue, IssueQuery, RepoRef};

/// Posts requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// What the list is filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostFilter {
    pub repo: RepoRef,
    /// Comma separated label names.
    pub labels: Option<String>,
}

impl PostFilter {
    /// Build a filter, normalizing the label list.
    ///
    /// Labels are trimmed and empty entries dropped; no labels means no filter.
    pub fn new(repo: RepoRef, labels: Option<&str>) -> Self {
        Self {
            repo,
            labels: labels.and_then(normalize_labels),
        }
    }
}

/// Identifies one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    generation: u64,
    page: u32,
}

impl ListTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// A fetch the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub ticket: ListTicket,
    pub query: IssueQuery,
}

/// What the list view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDisplay {
    /// First page in flight.
    Loading,
    /// First page failed.
    Failed,
    /// The filter matched nothing.
    Empty,
    /// At least one post.
    Ready,
}

/// Cumulative, paginated list of posts for one filter.
#[derive(Debug, Clone)]
pub struct PostList {
    filter: PostFilter,
    page_size: u32,
    items: Vec<Issue>,
    current_page: u32,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
    pending: Option<ListTicket>,
    selected: usize,
}

impl PostList {
    /// Create an idle, empty list. Call [`reload`](Self::reload) to start loading.
    pub fn new(filter: PostFilter, page_size: u32) -> Self {
        Self {
            filter,
            page_size: page_size.max(1),
            items: Vec::new(),
            current_page: 1,
            has_more: false,
            loading: false,
            error: None,
            generation: 0,
            pending: None,
            selected: 0,
        }
    }

    /// Replace the filter and start over from page 1.
    pub fn set_filter(&mut self, filter: PostFilter) -> ListRequest {
        debug!(repo = %filter.repo, labels = ?filter.labels, "Post filter changed");
        self.filter = filter;
        self.reload()
    }

    /// Discard everything and fetch page 1 of the current filter.
    pub fn reload(&mut self) -> ListRequest {
        self.items.clear();
        self.current_page = 1;
        self.has_more = false;
        self.selected = 0;
        self.request(1)
    }

    /// Fetch the next page, if there is one and nothing is in flight.
    pub fn load_more(&mut self) -> Option<ListRequest> {
        if !self.has_more || self.loading {
            return None;
        }
        Some(self.request(self.current_page + 1))
    }

    fn request(&mut self, page: u32) -> ListRequest {
        self.generation += 1;
        let ticket = ListTicket {
            generation: self.generation,
            page,
        };
        self.pending = Some(ticket);
        self.loading = true;
        self.error = None;

        let query = IssueQuery::new(self.filter.repo.clone(), page, self.page_size)
            .with_labels(self.filter.labels.clone());
        ListRequest { ticket, query }
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale.
    pub fn apply(&mut self, ticket: ListTicket, result: Result<Vec<Issue>, String>) -> bool {
        if self.pending != Some(ticket) {
            debug!(?ticket, "Dropping stale post list result");
            return false;
        }
        self.pending = None;
        self.loading = false;

        match result {
            Ok(issues) => {
                self.has_more = issues.len() == self.page_size as usize;
                if ticket.page == 1 {
                    self.items = issues;
                    self.selected = 0;
                } else {
                    self.items.extend(issues);
                }
                self.current_page = ticket.page;
                self.error = None;
            }
            Err(message) => {
                // A failed later page keeps what is shown and stays retryable.
                if ticket.page == 1 {
                    self.items.clear();
                    self.has_more = false;
                }
                self.error = Some(message);
            }
        }
        true
    }

    pub fn display(&self) -> ListDisplay {
        if self.items.is_empty() {
            if self.loading {
                ListDisplay::Loading
            } else if self.error.is_some() {
                ListDisplay::Failed
            } else {
                ListDisplay::Empty
            }
        } else {
            ListDisplay::Ready
        }
    }

    /// Whether the "load more" action should be offered.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.items.is_empty()
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    pub fn items(&self) -> &[Issue] {
        &self.items
    }

    #[cfg(test)]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Issue> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::testing::{issue, FakeSource};
    use crate::api::{notice_channel, IssueGateway};

    fn page(numbers: std::ops::RangeInclusive<u64>) -> Vec<Issue> {
        numbers.rev().map(issue).collect()
    }

    fn list() -> PostList {
        PostList::new(PostFilter::default(), DEFAULT_PAGE_SIZE)
    }

    #[test]
    fn test_filter_normalizes_labels() {
        let filter = PostFilter::new(RepoRef::default(), Some(" bug , ,docs "));
        assert_eq!(filter.labels.as_deref(), Some("bug,docs"));
        assert_eq!(PostFilter::new(RepoRef::default(), Some(" , ")).labels, None);
    }

    #[test]
    fn test_first_page_then_short_second_page() {
        let mut list = list();
        let first = list.reload();
        assert_eq!(list.display(), ListDisplay::Loading);
        assert_eq!(first.query.page, 1);

        assert!(list.apply(first.ticket, Ok(page(5..=14))));
        assert_eq!(list.items().len(), 10);
        assert!(list.has_more());

        let second = list.load_more().unwrap();
        assert_eq!(second.query.page, 2);
        assert!(list.is_loading());
        assert_eq!(list.items().len(), 10);
        assert_eq!(list.display(), ListDisplay::Ready);

        assert!(list.apply(second.ticket, Ok(page(1..=4))));
        assert_eq!(list.items().len(), 14);
        assert!(!list.has_more());
        assert_eq!(list.current_page, 2);
        assert_eq!(list.items()[10].number, 4);
        assert!(list.load_more().is_none());
    }

    #[test]
    fn test_load_more_refused_while_loading() {
        let mut list = list();
        let first = list.reload();
        list.apply(first.ticket, Ok(page(1..=10)));
        assert!(list.load_more().is_some());
        assert!(list.load_more().is_none());
    }

    #[test]
    fn test_filter_change_discards_items_and_stale_results() {
        let mut list = list();
        let first = list.reload();
        list.apply(first.ticket, Ok(page(1..=10)));
        let more = list.load_more().unwrap();

        let fresh = list.set_filter(PostFilter::new(RepoRef::new("rust-lang", "rust"), None));
        assert!(list.items().is_empty());
        assert_eq!(fresh.query.repo.to_string(), "rust-lang/rust");
        assert_eq!(fresh.query.page, 1);

        // The old load-more resolves late and is ignored.
        assert!(!list.apply(more.ticket, Ok(page(11..=20))));
        assert!(list.items().is_empty());

        assert!(list.apply(fresh.ticket, Ok(page(1..=3))));
        assert_eq!(list.items().len(), 3);
        assert!(!list.has_more());
    }

    #[test]
    fn test_empty_is_distinct_from_failed() {
        let mut list = list();
        let req = list.reload();
        list.apply(req.ticket, Ok(Vec::new()));
        assert_eq!(list.display(), ListDisplay::Empty);
        assert!(!list.can_load_more());

        let req = list.reload();
        list.apply(req.ticket, Err("Failed to load posts.".to_string()));
        assert_eq!(list.display(), ListDisplay::Failed);
        assert_eq!(list.error(), Some("Failed to load posts."));
        assert!(!list.can_load_more());
    }

    #[test]
    fn test_failed_load_more_keeps_items_and_stays_retryable() {
        let mut list = list();
        let req = list.reload();
        list.apply(req.ticket, Ok(page(11..=20)));

        let more = list.load_more().unwrap();
        list.apply(more.ticket, Err("boom".to_string()));

        assert_eq!(list.items().len(), 10);
        assert_eq!(list.current_page, 1);
        assert_eq!(list.error(), Some("boom"));
        assert_eq!(list.display(), ListDisplay::Ready);

        let retry = list.load_more().unwrap();
        assert_eq!(retry.query.page, 2);
    }

    #[test]
    fn test_labels_flow_into_query() {
        let mut list = list();
        let req = list.set_filter(PostFilter::new(RepoRef::default(), Some("blog")));
        assert_eq!(req.query.labels.as_deref(), Some("blog"));
        assert_eq!(req.query.per_page, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_selection_clamps() {
        let mut list = list();
        list.select_next();
        assert_eq!(list.selected_index(), 0);

        let req = list.reload();
        list.apply(req.ticket, Ok(page(1..=3)));
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_index(), 2);
        assert_eq!(list.selected().unwrap().number, 1);
        list.select_first();
        list.select_previous();
        assert_eq!(list.selected_index(), 0);
        list.select_last();
        assert_eq!(list.selected_index(), 2);
    }

    #[test]
    fn test_item_count_is_min_of_total_and_pages_loaded() {
        for (total, page_size) in [(0u64, 10u32), (7, 10), (10, 10), (25, 10), (23, 5)] {
            let (tx, _rx) = notice_channel();
            let gateway = IssueGateway::new(Arc::new(FakeSource::with_issues(total)), tx);
            let mut list = PostList::new(PostFilter::default(), page_size);

            let mut request = Some(list.reload());
            let mut loads = 0u64;
            while let Some(req) = request {
                let result = tokio_test::block_on(gateway.try_list_issues(&req.query))
                    .map_err(|e| e.to_string());
                assert!(list.apply(req.ticket, result));
                loads += 1;

                let expected = total.min(loads * u64::from(page_size));
                assert_eq!(list.items().len() as u64, expected);
                request = list.load_more();
            }

            let last_page_len = list.items().len() as u64 - (loads - 1) * u64::from(page_size);
            assert!(last_page_len < u64::from(page_size));
            assert!(!list.has_more());
        }
    }
}
