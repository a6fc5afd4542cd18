//! # 一覧画面の定義
//!
//! エンティティごとの絞り込み項目・クイックフィルタ・エンドポイント・表示列。
//! コントローラはこの定義に対してジェネリックに実装されている。
//!
//! | 画面 | エンドポイント | 主な絞り込み |
//! |------|---------------|-------------|
//! | [`AnnouncementListView`] | `announcements` | status, type, targetAudience |
//! | [`BudgetPoolListView`] | `budget-pools` | status, category |
//! | [`RequestListView`] | `requests` | status, type, assignedTo |
//! | [`UserListView`] | `users` | status, role |
//! | [`PaymentListView`] | `payments` | status, method |

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use shienflow_domain::{
    announcement::{Announcement, AnnouncementStatus, AnnouncementType, TargetAudience},
    budget_pool::{BudgetCategory, BudgetPool, BudgetPoolStats, BudgetPoolStatus},
    lifecycle::EntityStatus,
    payment::{Payment, PaymentMethod, PaymentStatus},
    request::{AssistanceRequest, RequestStatus, RequestType},
    stats::StatusSummary,
    user::{User, UserRole, UserStatus},
};
use strum::VariantNames;

use crate::filter::{FilterField, QuickFilter, QuickValue};

/// 一覧の 1 行
pub trait ListRow {
    type Status: EntityStatus;

    /// 操作対象を指す ID（API パスに使う）
    fn row_id(&self) -> String;

    fn status(&self) -> Self::Status;

    /// 表示列の値（[`ListView::COLUMNS`] と同じ順）
    fn cells(&self) -> Vec<String>;
}

/// 統計パネル
pub trait StatsPanel {
    /// 表示する項目と値
    ///
    /// `statuses` は画面のステータス値の一覧。集計に含まれないステータスも 0 として並べる。
    fn lines(&self, statuses: &[&'static str]) -> Vec<(String, String)>;
}

/// 一覧画面の定義
pub trait ListView: Send + Sync + 'static {
    type Item: ListRow + DeserializeOwned + Clone + Send + Sync + 'static;
    type Stats: StatsPanel + DeserializeOwned + Clone + Default + Send + Sync + 'static;

    /// 画面の対象（通知メッセージに使う）
    const NAME: &'static str;
    /// REST エンドポイント（`/api/{ENDPOINT}`）
    const ENDPOINT: &'static str;
    const COLUMNS: &'static [&'static str];
    const SCHEMA: &'static [FilterField];
    const QUICK_FILTERS: &'static [QuickFilter];

    fn quick_filter(name: &str) -> Option<&'static QuickFilter> {
        Self::QUICK_FILTERS.iter().find(|quick| quick.name == name)
    }

    /// ステータス絞り込みの選択肢
    fn status_values() -> &'static [&'static str] {
        <<Self::Item as ListRow>::Status as EntityStatus>::values()
    }

    /// 変更操作に必要な権限
    fn write_permission() -> String {
        format!("{}:write", Self::ENDPOINT)
    }
}

const SORT_ORDER: FilterField = FilterField::choice("sortOrder", &["asc", "desc"]);
const DEFAULT_LIMIT: u64 = 20;

const fn quick(name: &'static str, label: &'static str, key: &'static str, value: &'static str) -> QuickFilter {
    QuickFilter {
        name,
        label,
        key,
        value: QuickValue::Fixed(value),
    }
}

/// 円表示（3 桁区切り）
fn yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}¥{grouped}")
}

fn date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

impl StatsPanel for StatusSummary {
    fn lines(&self, statuses: &[&'static str]) -> Vec<(String, String)> {
        std::iter::once(("合計".to_string(), self.total.to_string()))
            .chain(
                statuses
                    .iter()
                    .map(|status| (status.to_string(), self.count(status).to_string())),
            )
            .collect()
    }
}

impl StatsPanel for BudgetPoolStats {
    fn lines(&self, _statuses: &[&'static str]) -> Vec<(String, String)> {
        vec![
            ("予算総額".to_string(), yen(self.total_budget)),
            ("割り当て済み".to_string(), yen(self.allocated_amount)),
            ("残額".to_string(), yen(self.remaining_amount)),
            ("有効".to_string(), self.active_pools.to_string()),
            ("凍結中".to_string(), self.frozen_pools.to_string()),
        ]
    }
}

// --- お知らせ ---

/// お知らせ管理画面
pub struct AnnouncementListView;

impl ListView for AnnouncementListView {
    type Item = Announcement;
    type Stats = StatusSummary;

    const NAME: &'static str = "お知らせ";
    const ENDPOINT: &'static str = "announcements";
    const COLUMNS: &'static [&'static str] = &["ID", "タイトル", "種別", "対象", "ステータス", "公開日"];
    const SCHEMA: &'static [FilterField] = &[
        FilterField::choice("status", AnnouncementStatus::VARIANTS),
        FilterField::choice("type", AnnouncementType::VARIANTS),
        FilterField::choice("targetAudience", TargetAudience::VARIANTS),
        FilterField::text("search"),
        FilterField::choice("sortBy", &["createdAt", "publishedAt", "title"]),
        SORT_ORDER,
        FilterField::page(),
        FilterField::limit(DEFAULT_LIMIT),
    ];
    const QUICK_FILTERS: &'static [QuickFilter] = &[
        quick("drafts", "下書き", "status", "draft"),
        quick("published", "公開中", "status", "published"),
        quick("urgent", "緊急", "type", "urgent"),
    ];
}

impl ListRow for Announcement {
    type Status = AnnouncementStatus;

    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> AnnouncementStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            <&'static str>::from(self.kind).to_string(),
            <&'static str>::from(self.target_audience).to_string(),
            self.status.to_string(),
            date(self.published_at.as_ref()),
        ]
    }
}

// --- 予算プール ---

/// 予算プール管理画面
pub struct BudgetPoolListView;

impl ListView for BudgetPoolListView {
    type Item = BudgetPool;
    type Stats = BudgetPoolStats;

    const NAME: &'static str = "予算プール";
    const ENDPOINT: &'static str = "budget-pools";
    const COLUMNS: &'static [&'static str] = &["ID", "名称", "区分", "ステータス", "総額", "残額"];
    const SCHEMA: &'static [FilterField] = &[
        FilterField::choice("status", BudgetPoolStatus::VARIANTS),
        FilterField::choice("category", BudgetCategory::VARIANTS),
        FilterField::text("search"),
        FilterField::choice("sortBy", &["name", "totalAmount", "remainingAmount"]),
        SORT_ORDER,
        FilterField::page(),
        FilterField::limit(DEFAULT_LIMIT),
    ];
    const QUICK_FILTERS: &'static [QuickFilter] = &[
        quick("active", "有効", "status", "active"),
        quick("frozen", "凍結中", "status", "frozen"),
        quick("emergency", "緊急支援", "category", "emergency"),
    ];
}

impl ListRow for BudgetPool {
    type Status = BudgetPoolStatus;

    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> BudgetPoolStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            <&'static str>::from(self.category).to_string(),
            self.status.to_string(),
            yen(self.total_amount),
            yen(self.remaining_amount()),
        ]
    }
}

// --- 申請 ---

/// 申請管理画面
pub struct RequestListView;

impl ListView for RequestListView {
    type Item = AssistanceRequest;
    type Stats = StatusSummary;

    const NAME: &'static str = "申請";
    const ENDPOINT: &'static str = "requests";
    const COLUMNS: &'static [&'static str] =
        &["ID", "受付番号", "申請者", "種別", "ステータス", "金額", "提出日"];
    const SCHEMA: &'static [FilterField] = &[
        FilterField::choice("status", RequestStatus::VARIANTS),
        FilterField::choice("type", RequestType::VARIANTS),
        FilterField::text("assignedTo"),
        FilterField::text("search"),
        FilterField::choice("sortBy", &["submittedAt", "amount"]),
        SORT_ORDER,
        FilterField::page(),
        FilterField::limit(DEFAULT_LIMIT),
    ];
    const QUICK_FILTERS: &'static [QuickFilter] = &[
        quick("pending", "未着手", "status", "submitted"),
        quick("review", "審査中", "status", "under_review"),
        QuickFilter {
            name:  "mine",
            label: "自分の担当",
            key:   "assignedTo",
            value: QuickValue::CurrentUser,
        },
    ];
}

impl ListRow for AssistanceRequest {
    type Status = RequestStatus;

    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.reference_number.clone(),
            self.applicant_name.clone(),
            <&'static str>::from(self.kind).to_string(),
            self.status.to_string(),
            yen(self.amount),
            date(Some(&self.submitted_at)),
        ]
    }
}

// --- ユーザー ---

/// ユーザー管理画面
pub struct UserListView;

impl ListView for UserListView {
    type Item = User;
    type Stats = StatusSummary;

    const NAME: &'static str = "ユーザー";
    const ENDPOINT: &'static str = "users";
    const COLUMNS: &'static [&'static str] =
        &["ID", "氏名", "メールアドレス", "ロール", "ステータス", "最終ログイン"];
    const SCHEMA: &'static [FilterField] = &[
        FilterField::choice("status", UserStatus::VARIANTS),
        FilterField::choice("role", UserRole::VARIANTS),
        FilterField::text("search"),
        FilterField::choice("sortBy", &["name", "lastLoginAt"]),
        SORT_ORDER,
        FilterField::page(),
        FilterField::limit(DEFAULT_LIMIT),
    ];
    const QUICK_FILTERS: &'static [QuickFilter] = &[
        quick("invited", "招待中", "status", "invited"),
        quick("frozen", "凍結中", "status", "frozen"),
        quick("caseworkers", "ケースワーカー", "role", "case_worker"),
    ];
}

impl ListRow for User {
    type Status = UserStatus;

    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            <&'static str>::from(self.role).to_string(),
            self.status.to_string(),
            date(self.last_login_at.as_ref()),
        ]
    }
}

// --- 支払い ---

/// 支払い管理画面
pub struct PaymentListView;

impl ListView for PaymentListView {
    type Item = Payment;
    type Stats = StatusSummary;

    const NAME: &'static str = "支払い";
    const ENDPOINT: &'static str = "payments";
    const COLUMNS: &'static [&'static str] =
        &["ID", "受取人", "金額", "方法", "ステータス", "支払予定日"];
    const SCHEMA: &'static [FilterField] = &[
        FilterField::choice("status", PaymentStatus::VARIANTS),
        FilterField::choice("method", PaymentMethod::VARIANTS),
        FilterField::text("search"),
        FilterField::choice("sortBy", &["scheduledAt", "amount"]),
        SORT_ORDER,
        FilterField::page(),
        FilterField::limit(DEFAULT_LIMIT),
    ];
    const QUICK_FILTERS: &'static [QuickFilter] = &[
        quick("pending", "未処理", "status", "pending"),
        quick("failed", "失敗", "status", "failed"),
    ];
}

impl ListRow for Payment {
    type Status = PaymentStatus;

    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> PaymentStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.recipient_name.clone(),
            yen(self.amount),
            <&'static str>::from(self.method).to_string(),
            self.status.to_string(),
            date(Some(&self.scheduled_at)),
        ]
    }
}
