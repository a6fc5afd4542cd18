//! 対話セッションの統合テスト
//!
//! スタブバックエンドに実際の ApiClient で接続し、コマンド操作から描画までを確認する。

mod common;

use std::sync::Arc;

use common::{Backend, client, sample_pools};
use pretty_assertions::assert_eq;
use shienflow_console::{command::Command, session::Session};
use shienflow_domain::{
    StatusAction,
    budget_pool::BudgetPoolStatus,
    principal::{Permission, Principal},
    user::UserId,
};
use shienflow_listview::{
    MemoryHistory,
    Navigator,
    testing::RecordingNotifier,
    views::BudgetPoolListView,
};

struct Harness {
    session:  Session<BudgetPoolListView>,
    backend:  Backend,
    notifier: Arc<RecordingNotifier>,
}

async fn harness(backend: Backend, initial: &str, permissions: &[&str]) -> Harness {
    let base_url = backend.clone().spawn().await;
    let api = Arc::new(client(&base_url, None));
    let notifier = Arc::new(RecordingNotifier::new());
    let session = Session::new(
        api.clone(),
        api,
        MemoryHistory::new(initial),
        notifier.clone(),
        Principal::new(
            Some(UserId::new()),
            permissions.iter().map(|p| Permission::new(*p)).collect(),
        ),
    );
    Harness {
        session,
        backend,
        notifier,
    }
}

#[tokio::test]
async fn test_起動すると一覧と統計を表示する() {
    let mut h = harness(Backend::with_pools(sample_pools()), "", &[]).await;

    let screen = h.session.start().await;

    assert!(screen.contains("食料配布"), "{screen}");
    assert!(screen.contains("医療費"), "{screen}");
    assert!(screen.contains("ページ 1 / 1（全 4 件）"), "{screen}");
    assert!(screen.contains("予算総額: ¥4,000,000"), "{screen}");
    assert!(!screen.contains("操作"), "変更権限がなければ操作列を出さない: {screen}");
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_変更権限があれば行ごとに実行できる操作を表示する() {
    let mut h = harness(Backend::with_pools(sample_pools()), "", &["budget-pools:write"]).await;

    let screen = h.session.start().await;

    let row = |name: &str| {
        screen
            .lines()
            .find(|line| line.contains(name))
            .map(|line| line.trim_end().to_string())
            .unwrap()
    };
    assert!(row("冬季緊急支援").ends_with("activate delete"), "{screen}");
    assert!(row("食料配布").ends_with("freeze"), "{screen}");
    assert!(row("医療費").ends_with("activate"), "{screen}");
}

#[tokio::test]
async fn test_既定と同じクエリを開いても履歴もリクエストも増えない() {
    let mut h = harness(Backend::with_pools(sample_pools()), "", &[]).await;
    h.session.start().await;

    h.session.execute(Command::Open("?page=1&limit=20".to_string())).await;

    assert_eq!(h.session.history().entries(), vec![String::new()]);
    assert_eq!(h.backend.queries(), vec![String::new()]);
}

#[tokio::test]
async fn test_ディープリンクの既定値は正規化して送る() {
    let mut h = harness(
        Backend::with_pools(sample_pools()),
        "?page=1&limit=20&status=active",
        &[],
    )
    .await;

    h.session.start().await;

    assert_eq!(h.backend.queries(), vec!["status=active".to_string()]);
    assert_eq!(h.session.history().search(), "?status=active");
}

#[tokio::test]
async fn test_統計が取得できなくても一覧は表示する() {
    let backend = Backend::with_pools(sample_pools());
    backend.take_stats_down();
    let mut h = harness(backend, "", &[]).await;

    let screen = h.session.start().await;

    assert!(screen.contains("食料配布"), "{screen}");
    assert!(screen.contains("── 統計（取得できませんでした）"), "{screen}");
    assert!(screen.contains("予算総額: ¥0"), "{screen}");
    assert_eq!(h.notifier.errors().len(), 1);
    assert!(h.notifier.errors()[0].starts_with("予算プールの統計の取得に失敗しました"));
}

#[tokio::test]
async fn test_クイックフィルタで絞り込み戻ると元の一覧に戻る() {
    let mut h = harness(Backend::with_pools(sample_pools()), "", &[]).await;
    h.session.start().await;

    let frozen = h.session.execute(Command::Quick("frozen".to_string())).await;
    let back = h.session.execute(Command::Back).await;

    let frozen = format!("{frozen:?}");
    assert!(frozen.contains("医療費"));
    assert!(!frozen.contains("食料配布"));
    assert!(format!("{back:?}").contains("食料配布"));
    assert_eq!(h.backend.queries(), vec!["", "status=frozen", ""]);
    assert_eq!(h.session.history().entries(), vec!["", "?status=frozen"]);
}

#[tokio::test]
async fn test_操作が成功すると再取得して最新の状態を表示する() {
    let pools = sample_pools();
    let frozen = pools[3].id.clone();
    let mut h = harness(Backend::with_pools(pools), "?status=frozen", &["budget-pools:write"]).await;
    h.session.start().await;

    h.session
        .execute(Command::Action {
            action: StatusAction::Activate,
            id:     frozen.to_string(),
        })
        .await;

    assert_eq!(h.backend.pool(&frozen).unwrap().status, BudgetPoolStatus::Active);
    assert_eq!(h.backend.queries(), vec!["status=frozen", "status=frozen"]);
    assert!(h.session.controller().items().is_empty());
    assert!(h.session.screen().contains("該当する予算プールはありません"));
    assert_eq!(h.notifier.errors(), Vec::<String>::new());
    assert_eq!(h.notifier.notices()[0].message, "予算プールを有効化しました");
}

#[tokio::test]
async fn test_権限がなければ操作は送信しない() {
    let pools = sample_pools();
    let frozen = pools[3].id.clone();
    let mut h = harness(Backend::with_pools(pools), "", &["budget-pools:read"]).await;
    h.session.start().await;

    h.session
        .execute(Command::Action {
            action: StatusAction::Activate,
            id:     frozen.to_string(),
        })
        .await;

    assert_eq!(h.backend.pool(&frozen).unwrap().status, BudgetPoolStatus::Frozen);
    assert_eq!(h.backend.queries().len(), 1);
    assert_eq!(
        h.notifier.errors(),
        vec!["予算プールの有効化に失敗しました: 権限がありません: budget-pools:write".to_string()]
    );
}

#[tokio::test]
async fn test_一括操作の一部失敗を通知する() {
    let pools = sample_pools();
    let active = pools[1].id.to_string();
    let draft = pools[0].id.to_string();
    let mut h = harness(Backend::with_pools(pools), "", &["budget-pools:*"]).await;
    h.session.start().await;

    h.session
        .execute(Command::Bulk {
            action: StatusAction::Freeze,
            ids:    vec![active, draft.clone()],
        })
        .await;

    assert_eq!(
        h.notifier.errors(),
        vec![format!("1件の凍結に失敗しました: {draft}")]
    );
    assert_eq!(h.backend.queries().len(), 2);
}
