use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::filter::SearchFilter;
use crate::models::MeetingRecord;
use crate::store::{MeetingStore, StoreError};

/// HTTP-shaped store: a remote meetings API speaking the same record JSON as
/// the local query surface. A non-2xx status or a body that does not parse
/// as JSON is a [`StoreError`], never an empty result.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_owned),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    fn check_status(response: &Response) -> Result<(), StoreError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized(status.as_u16()));
        }
        Ok(())
    }

    async fn parse_records(response: Response) -> Result<Vec<MeetingRecord>, StoreError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }

    async fn error_from(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        StoreError::Backend { status, body }
    }
}

#[async_trait]
impl MeetingStore for RestStore {
    async fn insert(&self, record: MeetingRecord) -> Result<MeetingRecord, StoreError> {
        let url = format!("{}/meetings", self.base_url);
        let response = self
            .authorize(self.client.post(&url).json(&record))
            .send()
            .await?;

        Self::check_status(&response)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<MeetingRecord>, StoreError> {
        let url = format!("{}/meetings/{}", self.base_url, id);
        let response = self.authorize(self.client.get(&url)).send().await?;

        Self::check_status(&response)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }

    async fn list(&self, descending: bool) -> Result<Vec<MeetingRecord>, StoreError> {
        let url = format!("{}/meetings", self.base_url);
        let order = if descending { "desc" } else { "asc" };
        let response = self
            .authorize(self.client.get(&url).query(&[("order", order)]))
            .send()
            .await?;

        Self::check_status(&response)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Self::parse_records(response).await
    }

    async fn list_filtered(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<MeetingRecord>, StoreError> {
        let url = format!("{}/meetings/search", self.base_url);
        let params = filter_params(filter);
        debug!("Remote search with {} filter parameter(s)", params.len());

        let response = self
            .authorize(self.client.get(&url).query(&params))
            .send()
            .await?;

        Self::check_status(&response)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Self::parse_records(response).await
    }
}

/// Translates the filter into the query parameters of the remote search
/// endpoint. Unset dimensions are omitted entirely.
pub fn filter_params(filter: &SearchFilter) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(query) = &filter.query {
        params.push(("query", query.clone()));
    }
    if let Some(organizer) = &filter.organizer {
        params.push(("organizer", organizer.clone()));
    }
    if let Some(from) = filter.date_from {
        params.push(("dateFrom", from.to_string()));
    }
    if let Some(to) = filter.date_to {
        params.push(("dateTo", to.to_string()));
    }
    params
}
