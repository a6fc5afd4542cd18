//! # メモリ上の履歴
//!
//! ブラウザの History API を模した [`Navigator`] 実装。
//! 戻る・進むで現在位置を移動でき、呼び出し側は移動後に
//! `ListViewController::on_navigation` を呼んで状態を取り込む。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::query_sync::{HistoryMode, Navigator};

#[derive(Debug)]
struct Entries {
    searches: Vec<String>,
    index:    usize,
}

/// メモリ上の履歴
///
/// `Clone` しても同じ履歴を共有する。
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<Entries>>,
}

impl MemoryHistory {
    /// 初期位置（ディープリンク）を指定して作成する
    pub fn new(initial_search: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Entries {
                searches: vec![canonical_search(initial_search)],
                index:    0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 1 つ前の位置へ戻る
    ///
    /// # 戻り値
    ///
    /// 移動できたかどうか
    pub fn back(&self) -> bool {
        let mut entries = self.lock();
        if entries.index == 0 {
            return false;
        }
        entries.index -= 1;
        true
    }

    /// 1 つ先の位置へ進む
    pub fn forward(&self) -> bool {
        let mut entries = self.lock();
        if entries.index + 1 >= entries.searches.len() {
            return false;
        }
        entries.index += 1;
        true
    }

    /// 履歴エントリの一覧（古い順）
    pub fn entries(&self) -> Vec<String> {
        self.lock().searches.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().searches.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn search(&self) -> String {
        let entries = self.lock();
        entries.searches[entries.index].clone()
    }

    fn navigate(&self, search: &str, mode: HistoryMode) {
        let search = canonical_search(search);
        let mut entries = self.lock();
        match mode {
            HistoryMode::Push => {
                let next = entries.index + 1;
                entries.searches.truncate(next);
                entries.searches.push(search);
                entries.index = next;
            }
            HistoryMode::Replace => {
                let index = entries.index;
                entries.searches[index] = search;
            }
        }
    }
}

/// `?` の有無を `window.location.search` の形式に揃える
fn canonical_search(search: &str) -> String {
    let trimmed = search.trim().trim_start_matches('?');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("?{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_pushで前方の履歴が切り捨てられる() {
        let history = MemoryHistory::new("");
        history.navigate("?status=draft", HistoryMode::Push);
        history.navigate("?status=published", HistoryMode::Push);
        history.back();

        history.navigate("?status=archived", HistoryMode::Push);

        assert_eq!(
            history.entries(),
            vec![
                "".to_string(),
                "?status=draft".to_string(),
                "?status=archived".to_string()
            ]
        );
        assert!(!history.forward());
    }

    #[test]
    fn test_戻ると進むで現在位置が移動する() {
        let history = MemoryHistory::new("page=2");
        history.navigate("?page=3", HistoryMode::Push);

        assert!(history.back());
        assert_eq!(history.search(), "?page=2");
        assert!(!history.back());

        assert!(history.forward());
        assert_eq!(history.search(), "?page=3");
    }

    #[test]
    fn test_replaceは履歴を増やさない() {
        let history = MemoryHistory::new("?");
        history.navigate("status=draft", HistoryMode::Replace);

        assert_eq!(history.entries(), vec!["?status=draft".to_string()]);
    }
}
