//! # Transaction Feed
//!
//! Paginated, de-duplicated transaction history with day grouping.
//!
//! ```text
//! Idle -> Loading -> Ready <-> LoadingMore
//!            |          \-> LoadMoreError (recoverable, keeps data)
//!            \-> Error (page 1 failed, nothing to show)
//! ```
//!
//! Pages are 1-based and fixed-size. Appends are de-duplicated by id so
//! overlapping pages from a shifting server window never show a record
//! twice. `has_more = false` halts automatic fetching for the session.
//! A generation counter discards responses that resolve after a `reset`,
//! so a stale page never lands in a feed that was reloaded for a
//! different wallet.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Local};
use shared::dto::transaction::Transaction;

use crate::core::service::TransactionApi;
use crate::services::api::ApiError;

/// Feed lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing requested yet.
    Idle,
    /// First page in flight.
    Loading,
    /// At least one page shown; more may be available.
    Ready,
    /// A later page in flight; existing rows stay visible.
    LoadingMore,
    /// Page 1 failed; nothing to show.
    Error(String),
    /// A later page failed; data kept, retry offered.
    LoadMoreError(String),
}

impl FeedPhase {
    fn is_busy(&self) -> bool {
        matches!(self, FeedPhase::Loading | FeedPhase::LoadingMore)
    }
}

/// One calendar day of transactions, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub label: String,
    pub transactions: Vec<Transaction>,
}

pub struct TransactionFeed {
    api: Arc<dyn TransactionApi>,
    page_size: u32,
    phase: FeedPhase,
    transactions: Vec<Transaction>,
    seen: HashSet<i64>,
    next_page: u32,
    has_more: bool,
    generation: u64,
}

impl TransactionFeed {
    pub fn new(api: Arc<dyn TransactionApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            phase: FeedPhase::Idle,
            transactions: Vec::new(),
            seen: HashSet::new(),
            next_page: 1,
            has_more: true,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Drop all loaded data and invalidate in-flight fetches.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = FeedPhase::Idle;
        self.transactions.clear();
        self.seen.clear();
        self.next_page = 1;
        self.has_more = true;
    }

    /// Whether a near-bottom scroll position should trigger the next page.
    /// Suppressed while a fetch is in flight, after `has_more = false`, and
    /// in error states (those require an explicit retry).
    pub fn should_fetch_next(&self, near_bottom: bool) -> bool {
        near_bottom && self.has_more && self.phase == FeedPhase::Ready
    }

    /// Load the first page, replacing any previous content.
    #[tracing::instrument(skip(self), fields(wallet = %shared::utils::truncate_address(wallet)))]
    pub async fn load_first(&mut self, wallet: &str) {
        self.reset();
        self.phase = FeedPhase::Loading;
        let generation = self.generation;

        let result = self.api.list_transactions(wallet, 1, self.page_size).await;
        if self.generation != generation {
            tracing::debug!("Discarding stale first-page response");
            return;
        }

        match result {
            Ok(page) => {
                self.append(page.transactions);
                self.has_more = page.has_more;
                self.next_page = 2;
                self.phase = FeedPhase::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "First history page failed");
                self.phase = FeedPhase::Error(e.to_string());
            }
        }
    }

    /// Load the next page, appending new rows. No-op while busy, after the
    /// last page, or before the first page has loaded.
    pub async fn load_more(&mut self, wallet: &str) {
        if self.phase.is_busy() || !self.has_more || self.next_page < 2 {
            return;
        }

        self.phase = FeedPhase::LoadingMore;
        let generation = self.generation;
        let page_number = self.next_page;

        let result = self
            .api
            .list_transactions(wallet, page_number, self.page_size)
            .await;
        if self.generation != generation {
            tracing::debug!("Discarding stale page response");
            return;
        }

        match result {
            Ok(page) => {
                self.append(page.transactions);
                self.has_more = page.has_more;
                self.next_page = page_number + 1;
                self.phase = FeedPhase::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, page = page_number, "History page failed");
                self.phase = FeedPhase::LoadMoreError(e.to_string());
            }
        }
    }

    /// Retry after a failed later page. Only meaningful in `LoadMoreError`.
    pub async fn retry_load_more(&mut self, wallet: &str) {
        if matches!(self.phase, FeedPhase::LoadMoreError(_)) {
            self.phase = FeedPhase::Ready;
            self.load_more(wallet).await;
        }
    }

    /// Ask the server to seed mock transactions. Best-effort; the caller
    /// may ignore the result.
    pub async fn seed_mock(&self, wallet: &str) -> Result<(), ApiError> {
        self.api.seed_mock_transactions(wallet).await
    }

    fn append(&mut self, incoming: Vec<Transaction>) {
        for tx in incoming {
            if self.seen.insert(tx.id) {
                self.transactions.push(tx);
            }
        }
    }

    /// Partition loaded transactions by calendar day in local time, with
    /// Today/Yesterday labels. Server order is preserved within and across
    /// groups.
    pub fn day_groups(&self) -> Vec<DayGroup> {
        let mut groups: Vec<DayGroup> = Vec::new();
        let mut last_day = None;

        for tx in &self.transactions {
            let day = local_day(tx.timestamp);
            if last_day != Some(day) {
                groups.push(DayGroup {
                    label: day_label(day),
                    transactions: Vec::new(),
                });
                last_day = Some(day);
            }
            if let Some(group) = groups.last_mut() {
                group.transactions.push(tx.clone());
            }
        }
        groups
    }
}

/// Local calendar day of a millisecond timestamp. Out-of-range values
/// collapse to the epoch day rather than panicking.
fn local_day(timestamp_ms: i64) -> chrono::NaiveDate {
    DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(&Local)
        .date_naive()
}

fn day_label(day: chrono::NaiveDate) -> String {
    let today = Local::now().date_naive();
    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else if day.year() == today.year() {
        day.format("%B %d").to_string()
    } else {
        day.format("%B %d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::dto::transaction::{TransactionPage, TransactionType};

    struct MockTransactionApi {
        pages: Mutex<Vec<Result<TransactionPage, ApiError>>>,
        fetches: Mutex<u32>,
    }

    impl MockTransactionApi {
        fn new(pages: Vec<Result<TransactionPage, ApiError>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                fetches: Mutex::new(0),
            }
        }

        fn fetch_count(&self) -> u32 {
            *self.fetches.lock()
        }
    }

    #[async_trait]
    impl TransactionApi for MockTransactionApi {
        async fn list_transactions(
            &self,
            _wallet: &str,
            _page: u32,
            _limit: u32,
        ) -> Result<TransactionPage, ApiError> {
            *self.fetches.lock() += 1;
            let mut pages = self.pages.lock();
            if pages.is_empty() {
                Ok(TransactionPage {
                    success: true,
                    transactions: Vec::new(),
                    has_more: false,
                })
            } else {
                pages.remove(0)
            }
        }

        async fn seed_mock_transactions(&self, _wallet: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn tx(id: i64, timestamp: i64) -> Transaction {
        Transaction {
            id,
            wallet: "Addr1".to_string(),
            tx_type: TransactionType::Received,
            amount: 1.0,
            token: "SOL".to_string(),
            address: "Addr2".to_string(),
            timestamp,
            signature: None,
        }
    }

    fn page(ids: &[i64], has_more: bool) -> Result<TransactionPage, ApiError> {
        Ok(TransactionPage {
            success: true,
            transactions: ids.iter().map(|&id| tx(id, 1_700_000_000_000)).collect(),
            has_more,
        })
    }

    fn feed(api: MockTransactionApi) -> (TransactionFeed, Arc<MockTransactionApi>) {
        let api = Arc::new(api);
        (TransactionFeed::new(api.clone(), 10), api)
    }

    #[tokio::test]
    async fn overlapping_pages_are_deduplicated() {
        let (mut feed, _) = feed(MockTransactionApi::new(vec![
            page(&[1, 2, 3], true),
            page(&[3, 4], false),
        ]));

        feed.load_first("Addr1").await;
        feed.load_more("Addr1").await;

        let ids: Vec<i64> = feed.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn has_more_false_halts_fetching() {
        let (mut feed, api) = feed(MockTransactionApi::new(vec![page(&[1], false)]));

        feed.load_first("Addr1").await;
        assert_eq!(feed.phase(), &FeedPhase::Ready);
        assert!(!feed.should_fetch_next(true));

        feed.load_more("Addr1").await;
        assert_eq!(api.fetch_count(), 1);
    }

    #[tokio::test]
    async fn page_one_failure_is_fatal() {
        let (mut feed, _) = feed(MockTransactionApi::new(vec![Err(ApiError::Timeout)]));

        feed.load_first("Addr1").await;
        assert!(matches!(feed.phase(), FeedPhase::Error(_)));
        assert!(feed.transactions().is_empty());
    }

    #[tokio::test]
    async fn later_page_failure_keeps_data() {
        let (mut feed, _) = feed(MockTransactionApi::new(vec![
            page(&[1, 2], true),
            Err(ApiError::Timeout),
            page(&[3], false),
        ]));

        feed.load_first("Addr1").await;
        feed.load_more("Addr1").await;
        assert!(matches!(feed.phase(), FeedPhase::LoadMoreError(_)));
        assert_eq!(feed.transactions().len(), 2);

        feed.retry_load_more("Addr1").await;
        assert_eq!(feed.phase(), &FeedPhase::Ready);
        assert_eq!(feed.transactions().len(), 3);
    }

    #[tokio::test]
    async fn load_more_before_first_page_is_noop() {
        let (mut feed, api) = feed(MockTransactionApi::new(vec![page(&[1], true)]));

        feed.load_more("Addr1").await;
        assert_eq!(api.fetch_count(), 0);
        assert_eq!(feed.phase(), &FeedPhase::Idle);
    }

    #[tokio::test]
    async fn scroll_trigger_requires_ready_and_near_bottom() {
        let (mut feed, _) = feed(MockTransactionApi::new(vec![page(&[1], true)]));
        assert!(!feed.should_fetch_next(true));

        feed.load_first("Addr1").await;
        assert!(feed.should_fetch_next(true));
        assert!(!feed.should_fetch_next(false));
    }

    #[tokio::test]
    async fn day_groups_label_today_and_yesterday() {
        let now = Local::now();
        let today_ms = now.timestamp_millis();
        let yesterday_ms = today_ms - 24 * 60 * 60 * 1000;
        let older_ms = 1_600_000_000_000;

        let (mut feed, _) = feed(MockTransactionApi::new(vec![Ok(TransactionPage {
            success: true,
            transactions: vec![
                tx(1, today_ms),
                tx(2, today_ms),
                tx(3, yesterday_ms),
                tx(4, older_ms),
            ],
            has_more: false,
        })]));
        feed.load_first("Addr1").await;

        let groups = feed.day_groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label, "Today");
        assert_eq!(groups[0].transactions.len(), 2);
        assert_eq!(groups[1].label, "Yesterday");
        assert!(groups[2].label.contains("September"));
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let (mut feed, _) = feed(MockTransactionApi::new(vec![page(&[1, 2], true)]));
        feed.load_first("Addr1").await;
        assert_eq!(feed.transactions().len(), 2);

        feed.reset();
        assert!(feed.transactions().is_empty());
        assert_eq!(feed.phase(), &FeedPhase::Idle);
    }
}
