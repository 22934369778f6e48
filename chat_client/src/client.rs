use anyhow::{anyhow, Context, Result};
use std::fmt::Debug;

pub const SERVER_ERROR: &str = "(Server error — try again)";
pub const NETWORK_ERROR: &str = "(Network error)";

#[derive(serde::Serialize, Debug)]
struct HttpRequest<'a> {
    message: &'a str,
}

#[derive(serde::Deserialize, Debug)]
struct HttpResponse {
    reply: String,
}

pub struct HttpClient {
    client: reqwest::Client,
    url: String,
}

impl Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("url", &self.url)
            .finish()
    }
}

impl HttpClient {
    /// `address` is `host:port` or a full base URL.
    pub fn new(address: &str) -> Self {
        let base = if address.starts_with("http://") || address.starts_with("https://") {
            address.trim_end_matches('/').to_owned()
        } else {
            format!("http://{}", address.trim_end_matches('/'))
        };
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/api/chat", base),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn send_message(&self, message: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(&HttpRequest { message })
            .send()
            .await
            .with_context(|| format!("Failed to send message to {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Chat request failed with status {}: {}",
                status,
                text
            ));
        }

        let response: HttpResponse = response
            .json()
            .await
            .context("Failed to parse chat response")?;
        Ok(response.reply)
    }
}

/// What to show the user when a message could not be answered.
pub fn failure_notice(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<reqwest::Error>() {
        Some(e) if e.is_connect() || e.is_timeout() || e.is_request() => NETWORK_ERROR,
        _ => SERVER_ERROR,
    }
}
