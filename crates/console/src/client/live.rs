//! Live — reqwest-backed session server client.

use std::pin::Pin;
use std::time::Duration;

use chrono::Utc;
use model::Agent;
use serde_json::Value;
use tracing::debug;

use crate::client::error::TransportError;
use crate::client::server::ServerOps;
use crate::conf::ConsoleConfig;

pub struct LiveServer {
    http: reqwest::Client,
    base_url: String,
}

impl LiveServer {
    pub fn new(config: &ConsoleConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: String) -> Result<Value, TransportError> {
        debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status().as_u16()));
        }
        Ok(resp.json::<Value>().await?)
    }
}

impl ServerOps for LiveServer {
    fn fetch_state(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Value, TransportError>> + Send + '_>> {
        Box::pin(async move {
            // Millisecond token keeps intermediaries from serving a stale snapshot.
            let url = format!("{}/state.json?{}", self.base_url, Utc::now().timestamp_millis());
            self.get_json(url).await
        })
    }

    fn fetch_agents(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Agent>, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/agents", self.base_url);
            let value = self.get_json(url).await?;
            Ok(serde_json::from_value(value)?)
        })
    }

    fn post_view_change(
        &self,
        edit: bool,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<(), TransportError>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/changeview", self.base_url);
            debug!("POST {} edit={}", url, edit);
            let resp = self
                .http
                .post(&url)
                .json(&serde_json::json!({ "edit": edit }))
                .send()
                .await?;
            if !resp.status().is_success() {
                return Err(TransportError::Status(resp.status().as_u16()));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ConsoleConfig {
            server_url: "http://gcs.local:9000/".to_string(),
            ..Default::default()
        };
        let server = LiveServer::new(&config).unwrap();
        assert_eq!(server.base_url, "http://gcs.local:9000");
    }
}
