//! API クライアントのリクエスト・レスポンス型

use serde::{Deserialize, Serialize};
use shienflow_domain::StatusAction;
use shienflow_listview::BulkOutcome;

/// 一括操作リクエスト（`POST /api/{endpoint}/bulk`）
#[derive(Debug, Serialize)]
pub struct BulkActionRequest<'a> {
    pub ids:    &'a [String],
    pub action: StatusAction,
}

/// 一括操作レスポンス
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BulkActionResponse {
    pub succeeded: Vec<String>,
    pub failed:    Vec<String>,
}

impl From<BulkActionResponse> for BulkOutcome {
    fn from(res: BulkActionResponse) -> Self {
        Self {
            succeeded: res.succeeded,
            failed:    res.failed,
        }
    }
}
