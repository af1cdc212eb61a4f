use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderGateway, StatusAck};
use crate::domain::status::AdminStatus;

use super::ack::{interpret_status_ack, message_of};
use super::ingest::{parse_order_list, IngestOptions};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Transport(e.to_string())
    }
}

// ── Gateway ───────────────────────────────────────────────────────────────────

/// Order service client speaking the admin REST endpoints.
pub struct HttpOrderGateway {
    client: Client,
    base_url: Url,
    token: Option<String>,
    ack_marker: String,
    ingest: IngestOptions,
}

impl HttpOrderGateway {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let base_url = Url::parse(&settings.order_api_base_url).map_err(|e| {
            DomainError::InvalidInput(format!(
                "invalid order service url '{}': {}",
                settings.order_api_base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::InvalidInput(format!(
                "order service url '{}' cannot be a base",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(settings.order_api_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: settings.order_api_token.clone(),
            ack_marker: settings.ack_marker.clone(),
            ingest: IngestOptions {
                display_offset: settings.display_offset,
            },
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base urls, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        let url = self.endpoint(&["admin", "orders"]);
        log::debug!("GET {}", url);

        let body: Value = self
            .authorize(self.client.get(url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_order_list(&body, &self.ingest, Utc::now())
    }

    async fn patch_status(&self, order_id: &str, status: AdminStatus) -> Result<StatusAck, DomainError> {
        let url = self.endpoint(&["admin", "orders", order_id, "status"]);
        log::debug!("PATCH {} -> {}", url, status);

        let response = self
            .authorize(self.client.patch(url))
            .json(&json!({ "status": status }))
            .send()
            .await?;

        let http_status = response.status();
        let text = response.text().await?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !http_status.is_success() {
            let reason = body
                .as_ref()
                .and_then(message_of)
                .map(str::to_string)
                .unwrap_or_else(|| http_status.to_string());
            return Ok(StatusAck::Rejected(reason));
        }

        match body {
            Some(body) => Ok(interpret_status_ack(&body, &self.ack_marker)),
            None => Err(DomainError::MalformedResponse(
                "status update response is not JSON".to_string(),
            )),
        }
    }
}

impl OrderGateway for HttpOrderGateway {
    fn fetch_orders(&self) -> BoxFuture<'_, Result<Vec<Order>, DomainError>> {
        self.list().boxed()
    }

    fn update_status<'a>(
        &'a self,
        order_id: &'a str,
        status: AdminStatus,
    ) -> BoxFuture<'a, Result<StatusAck, DomainError>> {
        self.patch_status(order_id, status).boxed()
    }
}
