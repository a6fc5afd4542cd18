//! 一覧画面の REST クライアント
//!
//! すべての一覧画面で同じ URL 規約を使う。
//!
//! | 操作 | リクエスト |
//! |------|-----------|
//! | 一覧 | `GET /api/{endpoint}?{query}` |
//! | 統計 | `GET /api/{endpoint}/stats` |
//! | 状態遷移 | `POST /api/{endpoint}/{id}/{action}` |
//! | 削除 | `DELETE /api/{endpoint}/{id}` |
//! | 一括操作 | `POST /api/{endpoint}/bulk` |

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shienflow_domain::StatusAction;
use shienflow_listview::{ActionSink, BulkOutcome, ListSource, ListView, QueryString, SourceError};
use shienflow_shared::{ApiResponse, ListResponse, PageResult};

use super::{
    error::ApiClientError,
    response::{handle_empty_response, handle_response},
    types::{BulkActionRequest, BulkActionResponse},
};

/// REST API クライアント
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client:   reqwest::Client,
    token:    Option<String>,
}

impl ApiClient {
    /// 新しい API クライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: API のベース URL（例: `http://localhost:13000`）
    /// - `token`: Bearer トークン（省略時は認証ヘッダを付けない）
    /// - `timeout`: 1 リクエストのタイムアウト
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token,
        })
    }

    fn endpoint_url(&self, endpoint: &str, path: &str) -> String {
        format!("{}/api/{}{}", self.base_url, endpoint, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiClientError> {
        let response = self.authorize(self.client.get(url)).send().await?;
        handle_response(response).await
    }

    async fn action<V: ListView>(
        &self,
        id: &str,
        action: StatusAction,
    ) -> Result<(), ApiClientError> {
        let id = urlencoding::encode(id);
        let request = match action.path_segment() {
            Some(segment) => self
                .client
                .post(self.endpoint_url(V::ENDPOINT, &format!("/{id}/{segment}"))),
            None => self
                .client
                .delete(self.endpoint_url(V::ENDPOINT, &format!("/{id}"))),
        };

        let response = self.authorize(request).send().await?;
        handle_empty_response(response).await
    }

    async fn bulk<V: ListView>(
        &self,
        ids: &[String],
        action: StatusAction,
    ) -> Result<BulkActionResponse, ApiClientError> {
        let url = self.endpoint_url(V::ENDPOINT, "/bulk");
        let response = self
            .authorize(self.client.post(&url))
            .json(&BulkActionRequest { ids, action })
            .send()
            .await?;

        let body: ApiResponse<BulkActionResponse> = handle_response(response).await?;
        Ok(body.into_inner())
    }
}

#[async_trait]
impl<V: ListView> ListSource<V> for ApiClient {
    #[tracing::instrument(skip_all, level = "debug", fields(endpoint = V::ENDPOINT, %query))]
    async fn fetch_page(
        &self,
        query: &QueryString,
    ) -> Result<PageResult<V::Item>, SourceError> {
        let url = self.endpoint_url(V::ENDPOINT, &query.to_search());
        let body: ListResponse<V::Item> = self.get_json(&url).await?;
        Ok(body.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(endpoint = V::ENDPOINT))]
    async fn fetch_stats(&self) -> Result<V::Stats, SourceError> {
        let url = self.endpoint_url(V::ENDPOINT, "/stats");
        let body: ApiResponse<V::Stats> = self.get_json(&url).await?;
        Ok(body.into_inner())
    }
}

#[async_trait]
impl<V: ListView> ActionSink<V> for ApiClient {
    #[tracing::instrument(skip_all, level = "debug", fields(endpoint = V::ENDPOINT, %id, %action))]
    async fn perform(&self, id: &str, action: StatusAction) -> Result<(), SourceError> {
        Ok(self.action::<V>(id, action).await?)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(endpoint = V::ENDPOINT, count = ids.len(), %action))]
    async fn perform_bulk(
        &self,
        ids: &[String],
        action: StatusAction,
    ) -> Result<BulkOutcome, SourceError> {
        Ok(self.bulk::<V>(ids, action).await?.into())
    }
}
