use crate::utils::error::{ChatError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Posts JSON payloads and decodes JSON replies.
///
/// The HTTP status is never inspected: a 4xx/5xx reply whose body is valid
/// JSON resolves like any other. Nothing is retried and no timeout is set.
#[derive(Debug, Clone, Default)]
pub struct RequestHelper {
    client: Client,
    base_url: Option<Url>,
}

impl RequestHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Relative URLs passed to [`api_request`](Self::api_request) are joined onto `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ChatError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn resolve(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(url).map_err(|e| ChatError::InvalidUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                }),
                None => Err(ChatError::InvalidUrl {
                    url: url.to_string(),
                    reason: "relative URL without a base".to_string(),
                }),
            },
            Err(e) => Err(ChatError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub async fn api_request<T, R>(&self, url: &str, data: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(data).map_err(ChatError::SerializationError)?;
        let target = self.resolve(url)?;

        tracing::debug!("POST {} ({} bytes)", target, body.len());
        let response = self
            .client
            .post(target)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ChatError::DecodeError)
    }
}

/// One-shot POST with a fresh default client. `url` must be absolute.
pub async fn api_request<T, R>(url: &str, data: &T) -> Result<R>
where
    T: Serialize + ?Sized,
    R: DeserializeOwned,
{
    RequestHelper::new().api_request(url, data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_echo_round_trip() {
        let server = MockServer::start();
        let payload = json!({"msg": "hi"});

        let echo = server.mock(|when, then| {
            when.method(POST)
                .path("/echo")
                .header("content-type", "application/json")
                .json_body(payload.clone());
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(payload.clone());
        });

        let result: Value = api_request(&server.url("/echo"), &payload).await.unwrap();

        echo.assert();
        assert_eq!(result, json!({"msg": "hi"}));
    }

    #[tokio::test]
    async fn test_nested_payload_round_trip() {
        let server = MockServer::start();
        let payload = json!({
            "user": {"name": "Ada", "tags": ["a", "b"]},
            "count": 3,
            "ratio": 0.5,
            "active": true,
            "note": null
        });

        let echo = server.mock(|when, then| {
            when.method(POST).path("/echo").json_body(payload.clone());
            then.status(200).json_body(payload.clone());
        });

        let helper = RequestHelper::new().with_base_url(&server.base_url()).unwrap();
        let result: Value = helper.api_request("/echo", &payload).await.unwrap();

        echo.assert();
        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/broken");
            then.status(500).json_body(json!({"error": "boom"}));
        });

        let result: Value = api_request(&server.url("/broken"), &json!({}))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(result["error"], "boom");
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/html");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<html><body>login</body></html>");
        });

        let result: Result<Value> = api_request(&server.url("/html"), &json!({"a": 1})).await;

        mock.assert();
        assert!(matches!(result, Err(ChatError::DecodeError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 1 is reserved and nothing listens on it.
        let result: Result<Value> = api_request("http://127.0.0.1:1/echo", &json!({})).await;

        assert!(matches!(result, Err(ChatError::TransportError(_))));
    }

    #[tokio::test]
    async fn test_unserializable_payload_fails_before_sending() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/echo");
            then.status(200).json_body(json!({}));
        });

        // JSON object keys must be strings.
        let mut data = BTreeMap::new();
        data.insert((1u8, 2u8), "tuple key");

        let result: Result<Value> = api_request(&server.url("/echo"), &data).await;

        assert!(matches!(result, Err(ChatError::SerializationError(_))));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_typed_response() {
        #[derive(serde::Deserialize)]
        struct Reply {
            response: String,
        }

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).json_body(json!({"response": "hello"}));
        });

        let reply: Reply = api_request(&server.url("/api/chat"), &json!({"message": "hi"}))
            .await
            .unwrap();

        assert_eq!(reply.response, "hello");
    }

    #[test]
    fn test_resolve() {
        let helper = RequestHelper::new();
        assert!(matches!(
            helper.resolve("/echo"),
            Err(ChatError::InvalidUrl { .. })
        ));
        assert_eq!(
            helper.resolve("http://example.com/echo").unwrap().as_str(),
            "http://example.com/echo"
        );

        let helper = RequestHelper::new()
            .with_base_url("http://127.0.0.1:5000")
            .unwrap();
        assert_eq!(
            helper.resolve("/api/chat").unwrap().as_str(),
            "http://127.0.0.1:5000/api/chat"
        );
    }
}
