//! # ShienFlow コンソール
//!
//! 生活支援ケース管理の一覧画面（お知らせ、予算プール、申請、ユーザー、支払い）を
//! 端末から操作する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_BASE_URL` | **Yes** | REST API のベース URL |
//! | `API_TOKEN` | No | Bearer トークン |
//! | `CONSOLE_VIEW` | No | 表示する一覧（`announcements` / `budget-pools` / `requests` / `users` / `payments`、デフォルト: `requests`） |
//! | `CONSOLE_INITIAL_QUERY` | No | 起動時のクエリ文字列（例: `?status=submitted`） |
//! | `API_TIMEOUT_SECS` | No | リクエストのタイムアウト秒数（デフォルト: `10`） |
//! | `CONSOLE_USER_ID` | No | 操作者のユーザー ID |
//! | `CONSOLE_PERMISSIONS` | No | 操作者の権限（カンマ区切り、例: `requests:write`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログの絞り込み（デフォルト: 警告以上） |
//!
//! ## 起動方法
//!
//! ```bash
//! API_BASE_URL=http://localhost:13000 CONSOLE_VIEW=budget-pools cargo run -p shienflow-console
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use shienflow_console::{
    client::ApiClient,
    config::{ConsoleConfig, ViewKind},
    notifier::ConsoleNotifier,
    session::Session,
    telemetry,
};
use shienflow_domain::principal::Principal;
use shienflow_listview::{
    ListView,
    MemoryHistory,
    views::{
        AnnouncementListView,
        BudgetPoolListView,
        PaymentListView,
        RequestListView,
        UserListView,
    },
};
use tokio::io::BufReader;

/// コンソールのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. アプリケーション設定の読み込み
/// 3. トレーシングの初期化（設定のログ形式と絞り込みを使う）
/// 4. 選択した一覧画面の対話セッションを開始
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let config = ConsoleConfig::from_env().context("設定の読み込みに失敗しました")?;

    telemetry::init_tracing(&config.log).context("トレーシングの初期化に失敗しました")?;
    let _tracing_guard = tracing::info_span!("app", service = "console").entered();

    tracing::info!(
        view = ?config.view,
        api = %config.api_base_url,
        "コンソールを起動します"
    );

    match config.view {
        ViewKind::Announcements => run::<AnnouncementListView>(config).await,
        ViewKind::BudgetPools => run::<BudgetPoolListView>(config).await,
        ViewKind::Requests => run::<RequestListView>(config).await,
        ViewKind::Users => run::<UserListView>(config).await,
        ViewKind::Payments => run::<PaymentListView>(config).await,
    }
}

async fn run<V: ListView>(config: ConsoleConfig) -> anyhow::Result<()> {
    let client = Arc::new(
        ApiClient::new(&config.api_base_url, config.api_token, config.timeout)
            .context("API クライアントの初期化に失敗しました")?,
    );
    let principal = Principal::new(config.user_id, config.permissions);

    let mut session = Session::<V>::new(
        client.clone(),
        client,
        MemoryHistory::new(&config.initial_query),
        Arc::new(ConsoleNotifier),
        principal,
    );

    let stdin = BufReader::new(tokio::io::stdin());
    session
        .run(stdin, &mut std::io::stdout())
        .await
        .context("入出力エラーが発生しました")?;

    tracing::info!("コンソールを終了します");
    Ok(())
}
