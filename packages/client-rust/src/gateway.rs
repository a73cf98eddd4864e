//! HTTP implementation of [`SyncGateway`] backed by `reqwest`.
//!
//! Every exchange is a single form-encoded POST. The response body is
//! decoded by [`roster_core::messages::decode_response`], so the split
//! between application and transport failures is the same for every
//! gateway:
//!
//! - send failure, timeout, non-2xx status, undecodable body → transport
//! - `success: false` → application

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use roster_core::messages::{
    decode_response, Ack, CreatePayload, CreateRequest, Decoded, DeleteRequest, FetchAllPayload,
    FetchAllRequest, CREATE_PATH, DELETE_PATH, FETCH_ALL_PATH,
};
use roster_core::{StudentKey, StudentRecord, SyncError, SyncGateway, TransportError};

use crate::config::{ClientConfig, ConfigError};

/// Gateway to the remote grade API over HTTP.
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
}

impl HttpGateway {
    /// Builds a gateway after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Posts `body` to `path` and decodes the success payload.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, SyncError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "posting to grade api");

        let response = self
            .client
            .post(&url)
            .form(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;

        match decode_response::<T>(&bytes) {
            Ok(Decoded::Success(payload)) => Ok(payload),
            Ok(Decoded::Rejected(errors)) => Err(SyncError::rejected(errors)),
            Err(e) => Err(TransportError::Malformed(e.to_string()).into()),
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> SyncError {
        if err.is_timeout() {
            let timeout_ms =
                u64::try_from(self.config.request_timeout.as_millis()).unwrap_or(u64::MAX);
            TransportError::Timeout { timeout_ms }.into()
        } else {
            TransportError::Network(err.to_string()).into()
        }
    }
}

#[async_trait]
impl SyncGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<(StudentKey, StudentRecord)>, SyncError> {
        let request = FetchAllRequest {
            api_key: self.config.api_key.clone(),
        };
        let payload: FetchAllPayload = self.post(FETCH_ALL_PATH, &request).await?;
        Ok(payload.into_entries())
    }

    async fn create(&self, record: &StudentRecord) -> Result<StudentKey, SyncError> {
        let request = CreateRequest::new(self.config.api_key.clone(), record);
        let payload: CreatePayload = self.post(CREATE_PATH, &request).await?;
        Ok(StudentKey(payload.new_id))
    }

    async fn remove(&self, key: StudentKey) -> Result<(), SyncError> {
        let request = DeleteRequest {
            api_key: self.config.api_key.clone(),
            student_id: key.get(),
        };
        let _: Ack = self.post(DELETE_PATH, &request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        assert!(matches!(
            HttpGateway::new(ClientConfig::default()),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn new_keeps_config() {
        let config = ClientConfig {
            api_key: "key".to_string(),
            ..ClientConfig::default()
        };
        let gateway = HttpGateway::new(config).unwrap();
        assert_eq!(gateway.config().api_key, "key");
    }
}
