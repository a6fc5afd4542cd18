//! # 一覧画面コントローラ
//!
//! 絞り込み状態・URL 同期・取得制御・ページ情報を 1 つの画面単位で束ねる。
//!
//! ## 処理の流れ
//!
//! 1. 操作（絞り込み変更、ページ移動など）で [`FilterState`] を更新する
//! 2. 変化があれば URL に書き込む（ユーザー操作は `Push`、マウント時の正規化は `Replace`）
//! 3. [`ListViewController::dispatch`] で取得要求（[`Dispatch`]）を発行する
//! 4. [`ListViewController::settle`] でバックエンドを呼び出し、最新の要求の結果だけを反映する
//!
//! 一覧と統計パネルは独立に取得する。統計の失敗は一覧の表示に影響しない。
//!
//! ## 変更操作
//!
//! 状態遷移操作は楽観的更新をしない。成功したら再取得カウンタを進めて
//! 一覧と統計を取り直す。

use std::{future::Future, sync::Arc};

use shienflow_domain::{
    DomainError,
    StatusAction,
    lifecycle::EntityStatus,
    principal::Principal,
};
use shienflow_shared::PageResult;

use crate::{
    fetch::{Completion, FetchOrchestrator, FetchTicket, LoadState},
    filter::{FilterState, QueryString},
    notify::{Notice, Notifier},
    pagination::Pagination,
    query_sync::{HistoryMode, Navigator, QuerySynchronizer},
    source::{ActionSink, BulkOutcome, ListSource, SourceError},
    views::{ListRow, ListView},
};

/// 一覧取得の要求キー
///
/// 同じクエリでも再取得カウンタが進めば別の要求として扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListKey {
    pub query:   QueryString,
    pub refresh: u64,
}

/// 発行した取得要求
///
/// 重複のため発行しなかった側は `None`。
#[derive(Debug, Default)]
#[must_use = "取得要求は settle に渡して完了させる"]
pub struct Dispatch {
    pub list:  Option<FetchTicket<ListKey>>,
    pub stats: Option<FetchTicket<u64>>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.list.is_none() && self.stats.is_none()
    }
}

/// 一覧画面コントローラ
pub struct ListViewController<V: ListView> {
    filters:         FilterState,
    sync:            QuerySynchronizer,
    list:            FetchOrchestrator<ListKey, PageResult<V::Item>>,
    stats:           FetchOrchestrator<u64, V::Stats>,
    refresh_trigger: u64,
    source:          Arc<dyn ListSource<V>>,
    notifier:        Arc<dyn Notifier>,
    principal:       Principal,
}

impl<V: ListView> ListViewController<V> {
    /// 現在の URL から絞り込み状態を復元して作成する
    pub fn new(
        source: Arc<dyn ListSource<V>>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        principal: Principal,
    ) -> Self {
        let sync = QuerySynchronizer::new(navigator, V::SCHEMA);
        Self {
            filters: sync.read(),
            sync,
            list: FetchOrchestrator::new(),
            stats: FetchOrchestrator::new(),
            refresh_trigger: 0,
            source,
            notifier,
            principal,
        }
    }

    // --- 操作 ---

    /// 画面を開く
    ///
    /// ディープリンクのクエリを正規形に置き換え（履歴は増やさない）、初回の取得を発行する。
    pub fn mount(&mut self) -> Dispatch {
        self.sync.push(&self.filters, HistoryMode::Replace);
        self.dispatch()
    }

    /// 戻る・進むなどで URL が外部から変わったときに呼ぶ
    pub fn on_navigation(&mut self) -> Dispatch {
        if let Some(next) = self.sync.pull(&self.filters) {
            tracing::debug!(view = V::ENDPOINT, "URL から絞り込み状態を復元しました");
            self.filters = next;
        }
        self.sync.push(&self.filters, HistoryMode::Replace);
        self.dispatch()
    }

    /// クエリ文字列を直接開く
    ///
    /// 正規形にした結果が現在の状態と同じなら履歴も取得も変えない。
    pub fn open(&mut self, search: &str) -> Dispatch {
        let next = FilterState::from_query(V::SCHEMA, &QueryString::parse(search));
        let changed = next != self.filters;
        self.filters = next;
        self.commit(changed)
    }

    /// 絞り込み項目を 1 つ設定する（空文字で解除）
    pub fn set_filter(&mut self, key: &str, value: &str) -> Dispatch {
        let changed = self.filters.set(key, value);
        self.commit(changed)
    }

    /// クイックフィルタを適用する
    pub fn apply_quick_filter(&mut self, name: &str) -> Dispatch {
        let Some(quick) = V::quick_filter(name) else {
            tracing::warn!(view = V::ENDPOINT, name, "未定義のクイックフィルタです");
            return Dispatch::default();
        };

        let current_user = self.principal.user_id().map(ToString::to_string);
        let changed = self
            .filters
            .apply_quick_filter(quick, current_user.as_deref());
        self.commit(changed)
    }

    /// すべての絞り込みを解除する
    pub fn reset_filters(&mut self) -> Dispatch {
        let changed = self.filters.reset();
        self.commit(changed)
    }

    /// 指定ページへ移動する（範囲外は丸める）
    pub fn go_to_page(&mut self, page: i64) -> Dispatch {
        let changed = self.pagination().go_to_page(&mut self.filters, page);
        self.commit(changed)
    }

    pub fn next_page(&mut self) -> Dispatch {
        if !self.pagination().has_next_page {
            return Dispatch::default();
        }
        let next = i64::try_from(self.filters.page()).unwrap_or(i64::MAX).saturating_add(1);
        self.go_to_page(next)
    }

    pub fn prev_page(&mut self) -> Dispatch {
        if !self.pagination().has_prev_page {
            return Dispatch::default();
        }
        let prev = i64::try_from(self.filters.page()).unwrap_or(i64::MAX) - 1;
        self.go_to_page(prev)
    }

    /// 絞り込みを変えずに一覧と統計を取り直す
    pub fn refresh(&mut self) -> Dispatch {
        self.refresh_trigger += 1;
        self.dispatch()
    }

    fn commit(&mut self, changed: bool) -> Dispatch {
        if !changed {
            return Dispatch::default();
        }
        self.sync.push(&self.filters, HistoryMode::Push);
        self.dispatch()
    }

    // --- 取得 ---

    /// 現在の絞り込みで取得要求を発行する
    ///
    /// 直前と同じ要求キーの取得は発行しない。
    pub fn dispatch(&mut self) -> Dispatch {
        Dispatch {
            list:  self.list.begin(ListKey {
                query:   self.filters.to_query(),
                refresh: self.refresh_trigger,
            }),
            stats: self.stats.begin(self.refresh_trigger),
        }
    }

    /// 一覧のレスポンスを反映する
    pub fn receive_list(
        &mut self,
        ticket: FetchTicket<ListKey>,
        result: Result<PageResult<V::Item>, SourceError>,
    ) -> Completion {
        let completion = self.list.complete(ticket, result);
        if let Completion::Failed(message) = &completion {
            tracing::error!(view = V::ENDPOINT, error = %message, "一覧の取得に失敗しました");
            self.notifier.notify(Notice::error(format!(
                "{}一覧の取得に失敗しました: {message}",
                V::NAME
            )));
        }
        completion
    }

    /// 統計のレスポンスを反映する
    pub fn receive_stats(
        &mut self,
        ticket: FetchTicket<u64>,
        result: Result<V::Stats, SourceError>,
    ) -> Completion {
        let completion = self.stats.complete(ticket, result);
        if let Completion::Failed(message) = &completion {
            tracing::error!(view = V::ENDPOINT, error = %message, "統計の取得に失敗しました");
            self.notifier.notify(Notice::error(format!(
                "{}の統計の取得に失敗しました: {message}",
                V::NAME
            )));
        }
        completion
    }

    /// 発行済みの要求をバックエンドに送り、完了した順に反映する
    pub async fn settle(&mut self, dispatch: Dispatch) {
        let Dispatch { list, stats } = dispatch;

        let source = Arc::clone(&self.source);
        let list_task = async move {
            match list {
                Some(ticket) => {
                    let result = source.fetch_page(&ticket.key().query).await;
                    Some((ticket, result))
                }
                None => None,
            }
        };

        let source = Arc::clone(&self.source);
        let stats_task = async move {
            match stats {
                Some(ticket) => {
                    let result = source.fetch_stats().await;
                    Some((ticket, result))
                }
                None => None,
            }
        };

        tokio::pin!(list_task, stats_task);
        let mut list_done = false;
        let mut stats_done = false;

        while !(list_done && stats_done) {
            tokio::select! {
                outcome = &mut list_task, if !list_done => {
                    list_done = true;
                    if let Some((ticket, result)) = outcome {
                        self.receive_list(ticket, result);
                    }
                }
                outcome = &mut stats_task, if !stats_done => {
                    stats_done = true;
                    if let Some((ticket, result)) = outcome {
                        self.receive_stats(ticket, result);
                    }
                }
            }
        }
    }

    // --- 変更操作 ---

    /// 状態遷移操作を実行する
    ///
    /// 変更権限がなければ `operation` を実行せずエラーを通知する。
    /// 成功したら一覧と統計を取り直す。
    pub async fn run_mutation<T, F>(&mut self, action: StatusAction, operation: F) -> Option<T>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        if let Err(e) = self.principal.require(&V::write_permission()) {
            self.notify_mutation_failure(action, &e);
            return None;
        }

        match operation.await {
            Ok(value) => {
                tracing::info!(view = V::ENDPOINT, %action, "操作が完了しました");
                self.notifier
                    .notify(Notice::success(format!("{}を{}しました", V::NAME, action.label())));
                let dispatch = self.refresh();
                self.settle(dispatch).await;
                Some(value)
            }
            Err(e) => {
                self.notify_mutation_failure(action, &e);
                None
            }
        }
    }

    /// 1 件に操作を実行する
    ///
    /// 表示中の行なら、現在のステータスで実行できるかを送信前に確認する。
    pub async fn perform(
        &mut self,
        sink: &dyn ActionSink<V>,
        id: &str,
        action: StatusAction,
    ) -> bool {
        if let Err(e) = self.guard_action(id, action) {
            self.notify_mutation_failure(action, &e);
            return false;
        }
        self.run_mutation(action, sink.perform(id, action))
            .await
            .is_some()
    }

    /// 複数件に同じ操作を実行する
    ///
    /// 一部だけ失敗した場合は失敗した ID を通知する。
    pub async fn perform_bulk(
        &mut self,
        sink: &dyn ActionSink<V>,
        ids: &[String],
        action: StatusAction,
    ) -> Option<BulkOutcome> {
        if ids.is_empty() {
            return None;
        }

        let outcome = self
            .run_mutation(action, sink.perform_bulk(ids, action))
            .await?;
        if !outcome.failed.is_empty() {
            self.notifier.notify(Notice::error(format!(
                "{}件の{}に失敗しました: {}",
                outcome.failed.len(),
                action.label(),
                outcome.failed.join(", ")
            )));
        }
        Some(outcome)
    }

    /// 表示中の行に対して操作が実行できるかを確認する
    ///
    /// 表示中でない ID はバックエンドの判定に委ねる。
    pub fn guard_action(&self, id: &str, action: StatusAction) -> Result<(), DomainError> {
        match self.items().iter().find(|item| item.row_id() == id) {
            Some(item) => item.status().transition(action).map(|_| ()),
            None => Ok(()),
        }
    }

    fn notify_mutation_failure(&self, action: StatusAction, error: &dyn std::error::Error) {
        tracing::error!(view = V::ENDPOINT, %action, error = %error, "操作に失敗しました");
        self.notifier.notify(Notice::error(format!(
            "{}の{}に失敗しました: {error}",
            V::NAME,
            action.label()
        )));
    }

    // --- 参照 ---

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> u64 {
        self.filters.page()
    }

    pub fn items(&self) -> &[V::Item] {
        &self.list.data().items
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::of(self.list.data())
    }

    pub fn stats(&self) -> &V::Stats {
        self.stats.data()
    }

    pub fn load_state(&self) -> LoadState {
        self.list.state()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    pub fn is_stats_loading(&self) -> bool {
        self.stats.is_loading()
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn stats_error(&self) -> Option<&str> {
        self.stats.error()
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
