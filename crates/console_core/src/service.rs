//! REST access to the connection-management backend.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shared::{
    domain::ConnectionSetting,
    protocol::{Ack, ConnectionListResponse, ConnectionResponse},
};
use tracing::debug;

use crate::error::ServiceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait ConnectionService: Send + Sync {
    /// `GET /connection/list`
    async fn list(&self) -> ServiceResult<ConnectionListResponse>;
    /// `GET /connection/{id}`
    async fn load(&self, id: &str) -> ServiceResult<ConnectionResponse>;
    /// `POST /connection/test`
    async fn test(&self, setting: &ConnectionSetting) -> ServiceResult<Ack>;
    /// `POST /connection`; creates when `setting.id` is empty, updates otherwise.
    async fn save(&self, setting: &ConnectionSetting) -> ServiceResult<Ack>;
}

pub struct HttpConnectionService {
    http: Client,
    server_url: String,
}

impl HttpConnectionService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Appends `segments` to the server URL, percent-encoding each one so
    /// that `/`, `?` or `#` inside an id stay within its segment.
    fn endpoint(&self, segments: &[&str]) -> ServiceResult<Url> {
        let invalid = |reason: String| ServiceError::InvalidUrl {
            url: self.server_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.server_url).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base url".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        res: reqwest::Response,
    ) -> ServiceResult<T> {
        let body = res.error_for_status()?.text().await?;
        serde_json::from_str(&body).map_err(|source| ServiceError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ConnectionService for HttpConnectionService {
    async fn list(&self) -> ServiceResult<ConnectionListResponse> {
        let url = self.endpoint(&["connection", "list"])?;
        let res = self
            .http
            .get(url)
            .send()
            .await?;
        Self::decode("/connection/list", res).await
    }

    async fn load(&self, id: &str) -> ServiceResult<ConnectionResponse> {
        // Dot segments would be dropped from the path and hit another route.
        if matches!(id.trim(), "" | "." | "..") {
            return Err(ServiceError::InvalidId(id.to_string()));
        }
        let url = self.endpoint(&["connection", id])?;
        let res = self
            .http
            .get(url)
            .send()
            .await?;
        Self::decode("/connection/{id}", res).await
    }

    async fn test(&self, setting: &ConnectionSetting) -> ServiceResult<Ack> {
        let url = self.endpoint(&["connection", "test"])?;
        debug!(host = %setting.host, port = %setting.port, "testing connection");
        let res = self
            .http
            .post(url)
            .json(setting)
            .send()
            .await?;
        Self::decode("/connection/test", res).await
    }

    async fn save(&self, setting: &ConnectionSetting) -> ServiceResult<Ack> {
        let url = self.endpoint(&["connection"])?;
        let res = self
            .http
            .post(url)
            .json(setting)
            .send()
            .await?;
        Self::decode("/connection", res).await
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
