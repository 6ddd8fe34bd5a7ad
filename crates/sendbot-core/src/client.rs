//! Blocking HTTP client for the tldr-bot comment endpoint.

use crate::error::{Result, SendbotError};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BOT_URL: &str = "https://tldr-bot.starbeamrainbowlabs.com";

/// JSON payload accepted by `POST /comment` and `POST /comment/once`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPayload<'a> {
    pub pr_id: &'a str,
    pub body: &'a str,
}

/// Anything that can deliver a rendered comment to a pull request.
pub trait CommentSink {
    fn post_comment(&self, pr_id: &str, body: &str, once: bool) -> Result<()>;
}

pub struct BotClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BotClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), None)
    }

    /// Like [`BotClient::new`], but abort requests that take longer than `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(base_url.into(), Some(timeout))
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    /// `{base}/comment`, or `{base}/comment/once` for at-most-once delivery.
    pub fn endpoint(&self, once: bool) -> String {
        let mut url = format!("{}/comment", self.base_url.trim_end_matches('/'));
        if once {
            url.push_str("/once");
        }
        url
    }
}

impl CommentSink for BotClient {
    fn post_comment(&self, pr_id: &str, body: &str, once: bool) -> Result<()> {
        let endpoint = self.endpoint(once);
        tracing::debug!(%endpoint, pr_id, body_len = body.len(), "posting comment");

        let resp = self
            .http
            .post(&endpoint)
            .json(&CommentPayload { pr_id, body })
            .send()
            .map_err(|e| {
                tracing::error!(%endpoint, error = %e, "request to tldr-bot failed");
                SendbotError::Http(e)
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().unwrap_or_default();
            tracing::error!(%endpoint, status = status.as_u16(), %body, "tldr-bot rejected comment");
            return Err(SendbotError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(%endpoint, "comment accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn endpoint_appends_once_only_when_asked() {
        let client = BotClient::new("https://bot.example").unwrap();
        assert_eq!(client.endpoint(false), "https://bot.example/comment");
        assert_eq!(client.endpoint(true), "https://bot.example/comment/once");
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = BotClient::new("https://bot.example/").unwrap();
        assert_eq!(client.endpoint(false), "https://bot.example/comment");
    }

    #[test]
    fn posts_json_payload() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/comment")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "pr_id": "1234",
                "body": "hello",
            })))
            .with_status(200)
            .create();

        let client = BotClient::new(server.url()).unwrap();
        client.post_comment("1234", "hello", false).unwrap();
        mock.assert();
    }

    #[test]
    fn once_targets_once_endpoint() {
        let mut server = mockito::Server::new();
        let once = server.mock("POST", "/comment/once").with_status(200).create();
        let plain = server
            .mock("POST", "/comment")
            .with_status(200)
            .expect(0)
            .create();

        let client = BotClient::new(server.url()).unwrap();
        client.post_comment("7", "body", true).unwrap();
        once.assert();
        plain.assert();
    }

    #[test]
    fn non_200_is_reported_with_status_and_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/comment")
            .with_status(500)
            .with_body("boom")
            .create();

        let client = BotClient::new(server.url()).unwrap();
        let err = client.post_comment("1", "x", false).unwrap_err();
        mock.assert();
        match err {
            SendbotError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn other_success_codes_are_still_failures() {
        let mut server = mockito::Server::new();
        server.mock("POST", "/comment").with_status(201).create();

        let client = BotClient::new(server.url()).unwrap();
        let err = client.post_comment("1", "x", false).unwrap_err();
        assert!(matches!(err, SendbotError::UnexpectedStatus { status: 201, .. }));
    }

    #[test]
    fn connection_failure_is_an_http_error() {
        // Bind then drop a listener so nothing is accepting on the port.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = BotClient::new(format!("http://127.0.0.1:{port}")).unwrap();
        let err = client.post_comment("1", "x", false).unwrap_err();
        assert!(matches!(err, SendbotError::Http(_)));
        assert!(err.is_delivery());
    }
}
