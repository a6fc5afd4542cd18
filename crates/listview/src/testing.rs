//! # テスト用のスタブ
//!
//! コントローラのテストで使うデータソース・通知先のスタブ実装。
//! 呼び出しを記録し、返す結果をテストから差し替えられる。

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use shienflow_domain::StatusAction;
use shienflow_shared::PageResult;

use crate::{
    filter::QueryString,
    notify::{Notice, Notifier},
    source::{ActionSink, BulkOutcome, ListSource, SourceError},
    views::ListView,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 受け取った通知を記録する
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn errors(&self) -> Vec<String> {
        lock(&self.notices)
            .iter()
            .filter(|notice| notice.is_error())
            .map(|notice| notice.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

/// 一覧・統計・操作のスタブ
///
/// 既定では空のページとデフォルトの統計を返し、操作はすべて成功する。
pub struct StubSource<V: ListView> {
    page:          Mutex<Result<PageResult<V::Item>, SourceError>>,
    stats:         Mutex<Result<V::Stats, SourceError>>,
    action_error:  Mutex<Option<SourceError>>,
    bulk_failures: Mutex<Vec<String>>,
    queries:       Mutex<Vec<String>>,
    stats_calls:   Mutex<usize>,
    performed:     Mutex<Vec<(String, StatusAction)>>,
}

impl<V: ListView> StubSource<V> {
    pub fn new() -> Self {
        Self {
            page:          Mutex::new(Ok(PageResult::empty())),
            stats:         Mutex::new(Ok(V::Stats::default())),
            action_error:  Mutex::new(None),
            bulk_failures: Mutex::new(Vec::new()),
            queries:       Mutex::new(Vec::new()),
            stats_calls:   Mutex::new(0),
            performed:     Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(self, page: PageResult<V::Item>) -> Self {
        *lock(&self.page) = Ok(page);
        self
    }

    pub fn with_stats(self, stats: V::Stats) -> Self {
        *lock(&self.stats) = Ok(stats);
        self
    }

    pub fn fail_page(&self, error: SourceError) {
        *lock(&self.page) = Err(error);
    }

    pub fn fail_stats(&self, error: SourceError) {
        *lock(&self.stats) = Err(error);
    }

    pub fn fail_actions(&self, error: SourceError) {
        *lock(&self.action_error) = Some(error);
    }

    /// 一括操作で失敗扱いにする ID
    pub fn fail_bulk_for(&self, ids: &[&str]) {
        *lock(&self.bulk_failures) = ids.iter().map(|id| id.to_string()).collect();
    }

    /// 受け取った一覧取得のクエリ（呼び出し順）
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }

    pub fn stats_calls(&self) -> usize {
        *lock(&self.stats_calls)
    }

    /// 実行された操作（呼び出し順）
    pub fn performed(&self) -> Vec<(String, StatusAction)> {
        lock(&self.performed).clone()
    }
}

impl<V: ListView> Default for StubSource<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V: ListView> ListSource<V> for StubSource<V> {
    async fn fetch_page(
        &self,
        query: &QueryString,
    ) -> Result<PageResult<V::Item>, SourceError> {
        lock(&self.queries).push(query.to_string());
        lock(&self.page).clone()
    }

    async fn fetch_stats(&self) -> Result<V::Stats, SourceError> {
        *lock(&self.stats_calls) += 1;
        lock(&self.stats).clone()
    }
}

#[async_trait]
impl<V: ListView> ActionSink<V> for StubSource<V> {
    async fn perform(&self, id: &str, action: StatusAction) -> Result<(), SourceError> {
        if let Some(error) = lock(&self.action_error).clone() {
            return Err(error);
        }
        lock(&self.performed).push((id.to_string(), action));
        Ok(())
    }

    async fn perform_bulk(
        &self,
        ids: &[String],
        action: StatusAction,
    ) -> Result<BulkOutcome, SourceError> {
        if let Some(error) = lock(&self.action_error).clone() {
            return Err(error);
        }
        let failures = lock(&self.bulk_failures).clone();
        let (failed, succeeded): (Vec<String>, Vec<String>) =
            ids.iter().cloned().partition(|id| failures.contains(id));
        lock(&self.performed).extend(succeeded.iter().map(|id| (id.clone(), action)));
        Ok(BulkOutcome { succeeded, failed })
    }
}
