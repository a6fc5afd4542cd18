//! # 取得制御（Fetch Orchestrator）
//!
//! 一覧・統計パネルの取得要求を管理する。
//!
//! ## 不変条件
//!
//! - 要求ごとに単調増加する [`FetchToken`] を割り当てる
//! - 最新トークン以外のレスポンスは表示データに反映しない（到着順ではなく要求順で判定）
//! - 直前に発行した要求と同じキーでは再発行しない
//! - 取得失敗時は古いデータを残さず、`T::default()` に戻す
//!
//! ## 状態遷移
//!
//! ```text
//! Loading ──成功──▶ Loaded
//!    ▲    ──失敗──▶ Errored
//!    └────── begin ────┘
//! ```
//!
//! マウントした画面は即座に取得を始めるため、初期状態は `Loading`。

use std::fmt;

use derive_more::Display;

/// 取得要求のトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("#{_0}")]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// 取得の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Errored,
}

/// 発行済みの取得要求
///
/// `key` は要求内容（一覧ならクエリと再取得カウンタ）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    token: FetchToken,
    key:   K,
}

impl<K> FetchTicket<K> {
    pub fn token(&self) -> FetchToken {
        self.token
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

/// レスポンス適用の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// 表示データを置き換えた
    Applied,
    /// 新しい要求が発行済みのため破棄した
    Stale,
    /// 取得に失敗し、表示データをデフォルトに戻した
    Failed(String),
}

/// 取得要求の管理
#[derive(Debug)]
pub struct FetchOrchestrator<K, T> {
    latest:     FetchToken,
    dispatched: Option<K>,
    state:      LoadState,
    data:       T,
    error:      Option<String>,
}

impl<K, T> FetchOrchestrator<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
    T: Default,
{
    pub fn new() -> Self {
        Self {
            latest:     FetchToken(0),
            dispatched: None,
            state:      LoadState::Loading,
            data:       T::default(),
            error:      None,
        }
    }

    /// 取得要求を発行する
    ///
    /// 直前の要求と同じキーなら `None`（重複した取得をしない）。
    pub fn begin(&mut self, key: K) -> Option<FetchTicket<K>> {
        if self.dispatched.as_ref() == Some(&key) {
            return None;
        }

        self.latest = FetchToken(self.latest.0 + 1);
        self.dispatched = Some(key.clone());
        self.state = LoadState::Loading;

        tracing::debug!(token = %self.latest, ?key, "取得要求を発行しました");

        Some(FetchTicket {
            token: self.latest,
            key,
        })
    }

    /// レスポンスを適用する
    pub fn complete<E: fmt::Display>(
        &mut self,
        ticket: FetchTicket<K>,
        result: Result<T, E>,
    ) -> Completion {
        if ticket.token != self.latest {
            tracing::debug!(
                token = %ticket.token,
                latest = %self.latest,
                "古いレスポンスを破棄しました"
            );
            return Completion::Stale;
        }

        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
                self.state = LoadState::Loaded;
                Completion::Applied
            }
            Err(e) => {
                let message = e.to_string();
                self.data = T::default();
                self.error = Some(message.clone());
                self.state = LoadState::Errored;
                Completion::Failed(message)
            }
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<K, T> Default for FetchOrchestrator<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
    T: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    type Orchestrator = FetchOrchestrator<&'static str, Vec<&'static str>>;

    #[test]
    fn test_初期状態はloading() {
        let orchestrator = Orchestrator::new();

        assert_eq!(orchestrator.state(), LoadState::Loading);
        assert!(orchestrator.data().is_empty());
    }

    #[test]
    fn test_トークンは単調増加する() {
        let mut orchestrator = Orchestrator::new();

        let first = orchestrator.begin("a").unwrap();
        let second = orchestrator.begin("b").unwrap();

        assert!(second.token() > first.token());
    }

    #[test]
    fn test_同じキーでは再発行しない() {
        let mut orchestrator = Orchestrator::new();

        assert!(orchestrator.begin("a").is_some());
        assert!(orchestrator.begin("a").is_none());
    }

    #[test]
    fn test_別のキーを挟めば同じキーでも再発行する() {
        let mut orchestrator = Orchestrator::new();

        orchestrator.begin("a");
        orchestrator.begin("b");

        assert!(orchestrator.begin("a").is_some());
    }

    #[test]
    fn test_古いレスポンスが後から届いても最新の結果を表示する() {
        let mut orchestrator = Orchestrator::new();
        let r1 = orchestrator.begin("status=draft").unwrap();
        let r2 = orchestrator.begin("status=published").unwrap();

        let c2 = orchestrator.complete(r2, Ok::<_, String>(vec!["published"]));
        let c1 = orchestrator.complete(r1, Ok::<_, String>(vec!["draft"]));

        assert_eq!(c2, Completion::Applied);
        assert_eq!(c1, Completion::Stale);
        assert_eq!(orchestrator.data(), &vec!["published"]);
        assert_eq!(orchestrator.state(), LoadState::Loaded);
    }

    #[test]
    fn test_古いレスポンスは最新の要求の読み込み中表示を解除しない() {
        let mut orchestrator = Orchestrator::new();
        let r1 = orchestrator.begin("a").unwrap();
        let _r2 = orchestrator.begin("b").unwrap();

        orchestrator.complete(r1, Ok::<_, String>(vec!["a"]));

        assert!(orchestrator.is_loading());
        assert!(orchestrator.data().is_empty());
    }

    #[test]
    fn test_古い失敗レスポンスもエラー表示にしない() {
        let mut orchestrator = Orchestrator::new();
        let r1 = orchestrator.begin("a").unwrap();
        let r2 = orchestrator.begin("b").unwrap();
        orchestrator.complete(r2, Ok::<_, String>(vec!["b"]));

        let completion = orchestrator.complete(r1, Err("timeout"));

        assert_eq!(completion, Completion::Stale);
        assert_eq!(orchestrator.error(), None);
        assert_eq!(orchestrator.data(), &vec!["b"]);
    }

    #[test]
    fn test_失敗時はデータをデフォルトに戻しエラーを保持する() {
        let mut orchestrator = Orchestrator::new();
        let r1 = orchestrator.begin("a").unwrap();
        orchestrator.complete(r1, Ok::<_, String>(vec!["a"]));

        let r2 = orchestrator.begin("b").unwrap();
        let completion = orchestrator.complete(r2, Err("503 Service Unavailable"));

        assert_eq!(
            completion,
            Completion::Failed("503 Service Unavailable".to_string())
        );
        assert!(orchestrator.data().is_empty());
        assert_eq!(orchestrator.error(), Some("503 Service Unavailable"));
        assert_eq!(orchestrator.state(), LoadState::Errored);
    }

    #[test]
    fn test_成功すると前回のエラーを消す() {
        let mut orchestrator = Orchestrator::new();
        let r1 = orchestrator.begin("a").unwrap();
        orchestrator.complete(r1, Err::<Vec<&str>, _>("boom"));

        let r2 = orchestrator.begin("b").unwrap();
        orchestrator.complete(r2, Ok::<_, String>(vec!["b"]));

        assert_eq!(orchestrator.error(), None);
    }
}
