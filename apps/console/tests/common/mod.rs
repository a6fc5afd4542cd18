//! 統合テスト用のスタブバックエンド
//!
//! 予算プール（標準のページ情報）とユーザー（別名のページ情報）の一覧 API を
//! メモリ上のデータで提供する。

#![allow(dead_code)]

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        Arc,
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use axum::{
    Json,
    Router,
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use shienflow_console::client::ApiClient;
use shienflow_domain::{
    StatusAction,
    budget_pool::{BudgetCategory, BudgetPool, BudgetPoolId, BudgetPoolStats, BudgetPoolStatus},
    lifecycle::{EntityStatus, Transition},
};
use shienflow_shared::{ApiResponse, ErrorResponse};
use tokio::net::TcpListener;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// スタブバックエンドの状態
#[derive(Clone, Default)]
pub struct Backend {
    pools:         Arc<Mutex<Vec<BudgetPool>>>,
    queries:       Arc<Mutex<Vec<String>>>,
    authorization: Arc<Mutex<Vec<String>>>,
    stats_down:    Arc<AtomicBool>,
}

impl Backend {
    pub fn with_pools(pools: Vec<BudgetPool>) -> Self {
        let backend = Self::default();
        *backend.pools.lock().unwrap() = pools;
        backend
    }

    /// 一覧 API が受け取ったクエリ文字列（呼び出し順）
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// 受け取った Authorization ヘッダ
    pub fn authorization(&self) -> Vec<String> {
        self.authorization.lock().unwrap().clone()
    }

    pub fn pool(&self, id: &BudgetPoolId) -> Option<BudgetPool> {
        self.pools
            .lock()
            .unwrap()
            .iter()
            .find(|pool| &pool.id == id)
            .cloned()
    }

    /// 統計 API を 503 にする
    pub fn take_stats_down(&self) {
        self.stats_down.store(true, Ordering::SeqCst);
    }

    /// 127.0.0.1 の空きポートで起動し、ベース URL を返す
    pub async fn spawn(self) -> String {
        let router = Router::new()
            .route("/api/budget-pools", get(list_pools))
            .route("/api/budget-pools/stats", get(pool_stats))
            .route("/api/budget-pools/bulk", post(bulk_action))
            .route("/api/budget-pools/{id}", axum::routing::delete(delete_pool))
            .route("/api/budget-pools/{id}/{action}", post(pool_action))
            .route("/api/users", get(list_users))
            .with_state(self);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }
}

pub fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    ApiClient::new(base_url, token.map(str::to_string), Duration::from_secs(5)).unwrap()
}

pub fn pool(name: &str, category: BudgetCategory, status: BudgetPoolStatus) -> BudgetPool {
    BudgetPool {
        id: BudgetPoolId::new(),
        name: name.to_string(),
        category,
        status,
        total_amount: 1_000_000,
        allocated_amount: 250_000,
    }
}

/// 準備中・有効 2 件・凍結中の 4 件
pub fn sample_pools() -> Vec<BudgetPool> {
    vec![
        pool("冬季緊急支援", BudgetCategory::Emergency, BudgetPoolStatus::Draft),
        pool("食料配布", BudgetCategory::Food, BudgetPoolStatus::Active),
        pool("家賃補助", BudgetCategory::Housing, BudgetPoolStatus::Active),
        pool("医療費", BudgetCategory::Medical, BudgetPoolStatus::Frozen),
    ]
}

async fn list_pools(
    State(backend): State<Backend>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.queries.lock().unwrap().push(raw.unwrap_or_default());
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        backend.authorization.lock().unwrap().push(value.to_string());
    }

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1).max(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20).max(1);

    let matched: Vec<BudgetPool> = backend
        .pools
        .lock()
        .unwrap()
        .iter()
        .filter(|pool| {
            params
                .get("status")
                .is_none_or(|status| <&str>::from(pool.status) == status)
        })
        .filter(|pool| {
            params
                .get("category")
                .is_none_or(|category| <&str>::from(pool.category) == category)
        })
        .filter(|pool| params.get("search").is_none_or(|s| pool.name.contains(s.as_str())))
        .cloned()
        .collect();

    let total_count = matched.len();
    let total_pages = total_count.div_ceil(limit);
    let items: Vec<BudgetPool> = matched.into_iter().skip((page - 1) * limit).take(limit).collect();

    Json(json!({
        "items": items,
        "pagination": {
            "currentPage": page,
            "totalPages": total_pages,
            "totalCount": total_count,
            "hasNextPage": page < total_pages,
            "hasPrevPage": page > 1,
        }
    }))
}

async fn pool_stats(
    State(backend): State<Backend>,
) -> Result<Json<ApiResponse<BudgetPoolStats>>, ApiError> {
    if backend.stats_down.load(Ordering::SeqCst) {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(
                "unavailable",
                "Service Unavailable",
                503,
                "集計サービスが停止中です",
            )),
        ));
    }

    let pools = backend.pools.lock().unwrap();
    let count = |status: BudgetPoolStatus| pools.iter().filter(|pool| pool.status == status).count() as u64;
    let stats = BudgetPoolStats {
        total_budget:     pools.iter().map(|pool| pool.total_amount).sum(),
        allocated_amount: pools.iter().map(|pool| pool.allocated_amount).sum(),
        remaining_amount: pools.iter().map(BudgetPool::remaining_amount).sum(),
        active_pools:     count(BudgetPoolStatus::Active),
        frozen_pools:     count(BudgetPoolStatus::Frozen),
    };
    Ok(Json(ApiResponse::new(stats)))
}

fn apply(backend: &Backend, id: &str, action: StatusAction) -> Result<(), ApiError> {
    let mut pools = backend.pools.lock().unwrap();
    let index = pools
        .iter()
        .position(|pool| pool.id.to_string() == id)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("予算プールが見つかりません")),
            )
        })?;

    match pools[index].status.transition(action) {
        Ok(Transition::To(status)) => pools[index].status = status,
        Ok(Transition::Removed) => {
            pools.remove(index);
        }
        Err(e) => {
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::conflict(e.to_string())),
            ));
        }
    }
    Ok(())
}

async fn pool_action(
    State(backend): State<Backend>,
    Path((id, action)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let action = StatusAction::from_str(&action).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("不明な操作です: {action}"))),
        )
    })?;
    apply(&backend, &id, action)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_pool(
    State(backend): State<Backend>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    apply(&backend, &id, StatusAction::Delete)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct BulkBody {
    ids:    Vec<String>,
    action: StatusAction,
}

async fn bulk_action(State(backend): State<Backend>, Json(body): Json<BulkBody>) -> Json<Value> {
    let (succeeded, failed): (Vec<String>, Vec<String>) = body
        .ids
        .into_iter()
        .partition(|id| apply(&backend, id, body.action).is_ok());
    Json(json!({ "data": { "succeeded": succeeded, "failed": failed } }))
}

/// 別名のページ情報（`data` / `page` / `pages` / `total`）を返す一覧
async fn list_users() -> Json<Value> {
    Json(json!({
        "data": [{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "name": "山田 花子",
            "email": "hanako@example.com",
            "role": "case_worker",
            "status": "active",
            "lastLoginAt": null
        }],
        "pagination": { "page": 1, "pages": 2, "total": 21 }
    }))
}
