use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::TemboConfig;
use crate::error::{classify_error, StatusMapping, TemboError, TemboResult, REQUEST_ID_HEADER};
use crate::models::CallbackKind;
use crate::validation::Schema;

const SECRET_KEY_HEADER: &str = "x-secret-key";
const ACCOUNT_ID_HEADER: &str = "x-account-id";

/// How a request is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `x-secret-key` + `x-account-id`: wallets, collections, payments.
    SecretKey,
    /// `Authorization: Bearer`: eKYC, merchant accounts, remittance.
    BearerToken,
}

#[derive(Clone)]
pub struct TemboClient {
    http_client: Client,
    config: TemboConfig,
}

impl TemboClient {
    pub fn new(config: &TemboConfig) -> TemboResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| TemboError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_http_client(config, http_client)
    }

    /// Uses a caller-built client, e.g. one with a request timeout.
    pub fn with_http_client(config: &TemboConfig, http_client: Client) -> TemboResult<Self> {
        config.ensure_complete().map_err(TemboError::Config)?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &TemboConfig {
        &self.config
    }

    pub fn callback_url(&self, kind: CallbackKind) -> String {
        self.config.callback_url(kind)
    }

    /// Headers for one request, including a fresh `x-request-id`.
    pub fn auth_headers(&self, mode: AuthMode) -> TemboResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        match mode {
            AuthMode::SecretKey => {
                headers.insert(
                    HeaderName::from_static(SECRET_KEY_HEADER),
                    header_value(&self.config.secret_key)?,
                );
                headers.insert(
                    HeaderName::from_static(ACCOUNT_ID_HEADER),
                    header_value(&self.config.account_id)?,
                );
            }
            AuthMode::BearerToken => {
                headers.insert(
                    AUTHORIZATION,
                    header_value(&format!("Bearer {}", self.config.token))?,
                );
            }
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            header_value(&Uuid::new_v4().to_string())?,
        );

        Ok(headers)
    }

    pub async fn get(
        &self,
        mode: AuthMode,
        endpoint: &str,
        mapping: StatusMapping,
    ) -> TemboResult<Value> {
        self.send(Method::GET, mode, endpoint, None, mapping).await
    }

    pub async fn post(
        &self,
        mode: AuthMode,
        endpoint: &str,
        body: &Value,
        mapping: StatusMapping,
    ) -> TemboResult<Value> {
        self.send(Method::POST, mode, endpoint, Some(body), mapping)
            .await
    }

    async fn send(
        &self,
        method: Method,
        mode: AuthMode,
        endpoint: &str,
        body: Option<&Value>,
        mapping: StatusMapping,
    ) -> TemboResult<Value> {
        let url = format!("{}{}", self.config.api_base_url(), endpoint);
        let headers = self.auth_headers(mode)?;
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        tracing::debug!(
            method = %method,
            endpoint = endpoint,
            request_id = %request_id,
            "Sending Tembo request"
        );

        let mut request = self.http_client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        self.handle_response(response, endpoint, mapping).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
        endpoint: &str,
        mapping: StatusMapping,
    ) -> TemboResult<Value> {
        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }

            // A success whose body is not JSON still succeeded
            Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
                tracing::warn!("Non-JSON success body from {}: {}", endpoint, e);
                Value::Null
            }))
        } else {
            tracing::error!(
                status = status.as_u16(),
                endpoint = endpoint,
                request_id = request_id.as_deref().unwrap_or_default(),
                "Tembo API error: {}",
                body
            );

            Err(classify_error(
                status.as_u16(),
                request_id.as_deref(),
                &body,
                mapping,
            ))
        }
    }
}

fn header_value(value: &str) -> TemboResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| TemboError::Config("Credential contains invalid header characters".to_string()))
}

/// Serializes a caller payload and checks it against `schema`.
pub(crate) fn prepare<P>(schema: &Schema, payload: &P) -> TemboResult<Value>
where
    P: Serialize + ?Sized,
{
    let payload = serde_json::to_value(payload)?;
    schema.validate(&payload).map_err(TemboError::Validation)?;
    Ok(payload)
}

/// Adds `callbackUrl` to an object payload, replacing any caller value.
pub(crate) fn with_callback_url(mut payload: Value, callback_url: String) -> Value {
    if let Value::Object(ref mut map) = payload {
        map.insert("callbackUrl".to_string(), Value::String(callback_url));
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use serde_json::json;

    fn client() -> TemboClient {
        let config = TemboConfig::new("acc-9", "secret-9", "token-9", Environment::Sandbox);
        TemboClient::new(&config).unwrap()
    }

    #[test]
    fn test_secret_key_headers() {
        let headers = client().auth_headers(AuthMode::SecretKey).unwrap();

        assert_eq!(headers.get("x-secret-key").unwrap(), "secret-9");
        assert_eq!(headers.get("x-account-id").unwrap(), "acc-9");
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert!(headers.get("authorization").is_none());
        assert!(headers.get("x-request-id").is_some());
    }

    #[test]
    fn test_bearer_headers() {
        let headers = client().auth_headers(AuthMode::BearerToken).unwrap();

        assert_eq!(headers.get("authorization").unwrap(), "Bearer token-9");
        assert!(headers.get("x-secret-key").is_none());
        assert!(headers.get("x-account-id").is_none());
    }

    #[test]
    fn test_request_ids_are_unique_uuids() {
        let client = client();
        let ids: std::collections::HashSet<String> = (0..50)
            .map(|_| {
                let headers = client.auth_headers(AuthMode::SecretKey).unwrap();
                let id = headers.get("x-request-id").unwrap().to_str().unwrap().to_string();
                assert!(Uuid::parse_str(&id).is_ok());
                id
            })
            .collect();

        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_incomplete_config_is_rejected() {
        let config = TemboConfig::new("", "secret", "token", Environment::Sandbox);
        let error = TemboClient::new(&config).err().unwrap();
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required option: \"accountId\""
        );
    }

    #[test]
    fn test_callback_url_is_injected() {
        let payload = with_callback_url(
            json!({"amount": 10, "callbackUrl": "https://attacker.example"}),
            "https://shop.example/api/v1/remittance/callback".to_string(),
        );
        assert_eq!(
            payload["callbackUrl"],
            "https://shop.example/api/v1/remittance/callback"
        );
        assert_eq!(payload["amount"], 10);
    }
}
