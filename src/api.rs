//! HTTP transport for the router admin API.
//!
//! Every endpoint wraps its payload in a `{ status, data, message }`
//! envelope. A response is only considered successful when the HTTP status
//! is 2xx AND the envelope status is `"ok"`; anything else surfaces the
//! server's `message` as [`Error::Api`]. Mutating rule endpoints all
//! return the full rule-set detail, which the caller feeds back into the
//! editor so the server copy stays the single source of truth.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::ruleset::{RulePayload, RuleSetDetail, ZoneSnapshot};
use crate::utils::encode_path_segment;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Response envelope shared by all admin API endpoints
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Unwraps an envelope into its payload.
///
/// # Errors
///
/// Returns [`Error::Api`] when the status is not `"ok"` or the payload is
/// missing, carrying the server's message when one was provided.
pub fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T> {
    if envelope.status != "ok" {
        return Err(Error::api(
            envelope
                .message
                .unwrap_or_else(|| "Request failed".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| Error::api("Response was missing its payload"))
}

/// Client for one router's admin API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("zonewall/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rule_set_url(&self, name: &str) -> String {
        format!(
            "{}/firewall/rules/api/names/{}",
            self.base_url,
            encode_path_segment(name)
        )
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let http_status = response.status();
        let envelope: Envelope<T> = match response.json().await {
            Ok(envelope) => envelope,
            // Error bodies are not always JSON; fall back to the HTTP status
            Err(_) if !http_status.is_success() => {
                return Err(Error::api(format!(
                    "Request failed with status {http_status}"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !http_status.is_success() && envelope.message.is_none() {
            return Err(Error::api(format!(
                "Request failed with status {http_status}"
            )));
        }

        unwrap_envelope(envelope)
    }

    /// Fetches the zone overview snapshot: zones, rule-set membership,
    /// metadata, and unassigned interfaces.
    pub async fn fetch_overview(&self) -> Result<ZoneSnapshot> {
        let url = format!("{}/firewall/zones/api/overview", self.base_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.decode(response).await
    }

    /// Fetches one rule-set's metadata and ordered rule list
    pub async fn fetch_rule_set(&self, name: &str) -> Result<RuleSetDetail> {
        let url = self.rule_set_url(name);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.decode(response).await
    }

    /// Creates a rule; returns the refreshed rule-set detail
    pub async fn create_rule(&self, name: &str, payload: &RulePayload) -> Result<RuleSetDetail> {
        let url = format!("{}/rules", self.rule_set_url(name));
        debug!("POST {}", url);
        let response = self.client.post(&url).json(payload).send().await?;
        self.decode(response).await
    }

    /// Updates a rule addressed by its current number; returns the
    /// refreshed rule-set detail
    pub async fn update_rule(
        &self,
        name: &str,
        number: &str,
        payload: &RulePayload,
    ) -> Result<RuleSetDetail> {
        let url = format!(
            "{}/rules/{}",
            self.rule_set_url(name),
            encode_path_segment(number)
        );
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(payload).send().await?;
        self.decode(response).await
    }

    /// Deletes a rule; returns the refreshed rule-set detail
    pub async fn delete_rule(&self, name: &str, number: &str) -> Result<RuleSetDetail> {
        let url = format!(
            "{}/rules/{}",
            self.rule_set_url(name),
            encode_path_segment(number)
        );
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        self.decode(response).await
    }

    /// Enables or disables a rule; returns the refreshed rule-set detail
    pub async fn toggle_rule(
        &self,
        name: &str,
        number: &str,
        disabled: bool,
    ) -> Result<RuleSetDetail> {
        let url = format!(
            "{}/rules/{}/toggle",
            self.rule_set_url(name),
            encode_path_segment(number)
        );
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "disabled": disabled }))
            .send()
            .await?;
        self.decode(response).await
    }

    /// Commits a staged reorder as the full ordered id list; returns the
    /// refreshed rule-set detail
    pub async fn commit_order(&self, name: &str, order: &[String]) -> Result<RuleSetDetail> {
        let url = format!("{}/rules/reorder", self.rule_set_url(name));
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "order": order }))
            .send()
            .await?;
        self.decode(response).await
    }

    /// Creates a zone with one initial interface; returns the refreshed
    /// zone overview snapshot
    pub async fn create_zone(&self, zone: &str, interface: &str) -> Result<ZoneSnapshot> {
        let url = format!("{}/firewall/zones/api/create", self.base_url);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "zoneName": zone, "interface": interface }))
            .send()
            .await?;
        self.decode(response).await
    }

    /// Deletes a zone and its pair rule-sets; returns the refreshed zone
    /// overview snapshot
    pub async fn delete_zone(&self, zone: &str) -> Result<ZoneSnapshot> {
        let url = format!("{}/firewall/zones/api/delete", self.base_url);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "zone": zone }))
            .send()
            .await?;
        self.decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_envelope_ok() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"ok","data":{"rules":[]},"message":null}"#).unwrap();
        let data = unwrap_envelope(envelope).unwrap();
        assert!(data["rules"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unwrap_envelope_error_status_carries_message() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"error","data":null,"message":"Rule not found"}"#)
                .unwrap();
        match unwrap_envelope(envelope) {
            Err(Error::Api { message }) => assert_eq!(message, "Rule not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_envelope_missing_data() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(unwrap_envelope(envelope).is_err());
    }

    #[test]
    fn test_unwrap_envelope_missing_status_is_error() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(unwrap_envelope(envelope).is_err());
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = ApiClient::new("https://router.lan/").unwrap();
        assert_eq!(client.base_url(), "https://router.lan");
        assert_eq!(
            client.rule_set_url("wan to lan"),
            "https://router.lan/firewall/rules/api/names/wan%20to%20lan"
        );
    }
}
