//! Prediction Service Client
//!
//! HTTP client for the remote prediction service.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use crate::constants;
use crate::error::{ConfigError, SubmitError};
use super::features::PredictionRequest;
use super::result::PredictionResult;

/// Anything that turns a validated request into a prediction
pub trait PredictionService {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult, SubmitError>> + Send;
}

/// Prediction service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    /// No timeout when unset
    pub timeout: Option<Duration>,
}

/// Response of `GET /api`
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

/// Error body the service returns on failure
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: serde_json::Value,
}

/// HTTP prediction client
pub struct HttpPredictionClient {
    config: ServiceConfig,
    http_client: reqwest::Client,
}

impl HttpPredictionClient {
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetch service name, version and endpoint listing
    pub async fn service_info(&self) -> Result<ServiceInfo, SubmitError> {
        let url = self.url(constants::INFO_PATH);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(network_error)?;

        if response.status().is_success() {
            response.json().await
                .map_err(|e| SubmitError::ResponseShape(e.to_string()))
        } else {
            Err(server_error(response).await)
        }
    }
}

impl PredictionService for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, SubmitError> {
        let url = self.url(constants::PREDICT_PATH);

        log::info!("Requesting prediction from {}", url);
        log::debug!("Payload: {:?}", request.features());

        let response = self.http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            let err = server_error(response).await;
            log::error!("Prediction failed: {}", err);
            return Err(err);
        }

        let body = response.bytes().await.map_err(network_error)?;
        let result: PredictionResult = serde_json::from_slice(&body)
            .map_err(|e| SubmitError::ResponseShape(e.to_string()))?;
        result.validate().map_err(SubmitError::ResponseShape)?;

        log::info!("Prediction received: win={} probability={:.3}", result.win, result.probability);
        Ok(result)
    }
}

fn network_error(e: reqwest::Error) -> SubmitError {
    if e.is_timeout() {
        SubmitError::Network("request timed out".to_string())
    } else {
        SubmitError::Network(e.to_string())
    }
}

/// Build a server error, using the service's `detail` text when present
async fn server_error(response: reqwest::Response) -> SubmitError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    let detail = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(ErrorResponse { detail: serde_json::Value::String(s) }) => s,
        Ok(ErrorResponse { detail }) => detail.to_string(),
        Err(_) if text.is_empty() => "no details".to_string(),
        Err(_) => text,
    };

    SubmitError::Server { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpPredictionClient::new(ServiceConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout: None,
        })
        .unwrap();

        assert_eq!(client.url(constants::PREDICT_PATH), "http://localhost:8000/api/predict");
        assert_eq!(client.url(constants::INFO_PATH), "http://localhost:8000/api");
    }

    #[test]
    fn test_service_info_parses() {
        let info: ServiceInfo = serde_json::from_str(
            r#"{"name": "League of Legends Match Predictor", "version": "1.0.0",
                "endpoints": {"/predict": "POST - Predict match outcome based on game features"}}"#,
        )
        .unwrap();

        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.endpoints.len(), 1);
    }
}
