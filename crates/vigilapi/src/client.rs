//! HTTP client for the monitor API.
//!
//! One blocking call per operation, authenticated via the
//! `X-Vigil-Api-Key` header. Status codes other than the documented one
//! for each endpoint are errors.

use crate::error::{Error, Result};
use crate::types::{CreateResponse, ListResponse, Monitor, MonitorPayload};

/// Client for the monitor API.
///
/// # Example
///
/// ```no_run
/// use vigilapi::Client;
///
/// let client = Client::new("https://api.vigil.dev/api/v2", "token", "vigil/0.3.1");
/// let monitor = client.get_monitor(42).unwrap();
/// println!("{}", monitor.name);
/// ```
pub struct Client {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// API base URL, without trailing slash.
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl Client {
    /// Create a client against the given API base.
    ///
    /// `user_agent` should carry the tool version; it is supplied by
    /// the caller rather than read from process-global state.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Get the configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the monitor collection.
    fn monitors_url(&self) -> String {
        format!("{}/monitoring/user_monitors/", self.base_url)
    }

    /// URL of a single monitor.
    fn monitor_url(&self, id: i64) -> String {
        format!("{}/monitoring/user_monitors/{}", self.base_url, id)
    }

    /// Create a monitor; returns the server-assigned identifier.
    pub fn create_monitor(&self, payload: &MonitorPayload) -> Result<i64> {
        let mut response = self
            .agent
            .post(&self.monitors_url())
            .header("X-Vigil-Api-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .send_json(payload)?;

        expect_status(response.status().as_u16(), 201)?;

        let created: CreateResponse = response.body_mut().read_json()?;
        Ok(created.id)
    }

    /// Fetch a monitor by identifier.
    pub fn get_monitor(&self, id: i64) -> Result<Monitor> {
        let mut response = self
            .agent
            .get(&self.monitor_url(id))
            .header("X-Vigil-Api-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .call()?;

        expect_status(response.status().as_u16(), 200)?;

        Ok(response.body_mut().read_json()?)
    }

    /// Replace a monitor in place; the identifier is preserved.
    pub fn update_monitor(&self, id: i64, payload: &MonitorPayload) -> Result<()> {
        let response = self
            .agent
            .put(&self.monitor_url(id))
            .header("X-Vigil-Api-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .send_json(payload)?;

        expect_status(response.status().as_u16(), 200)
    }

    /// Delete a monitor.
    pub fn delete_monitor(&self, id: i64) -> Result<()> {
        let response = self
            .agent
            .delete(&self.monitor_url(id))
            .header("X-Vigil-Api-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .call()?;

        expect_status(response.status().as_u16(), 204)
    }

    /// List all monitors visible to the API key.
    pub fn list_monitors(&self) -> Result<Vec<Monitor>> {
        let mut response = self
            .agent
            .get(&self.monitors_url())
            .header("X-Vigil-Api-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .call()?;

        expect_status(response.status().as_u16(), 200)?;

        let listing: ListResponse = response.body_mut().read_json()?;
        Ok(listing.items)
    }
}

fn expect_status(got: u16, expected: u16) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(Error::UnexpectedStatus { expected, got })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitors_url() {
        let client = Client::new("https://api.vigil.dev/api/v2", "k", "vigil/test");
        assert_eq!(
            client.monitors_url(),
            "https://api.vigil.dev/api/v2/monitoring/user_monitors/"
        );
    }

    #[test]
    fn test_monitor_url() {
        let client = Client::new("https://api.vigil.dev/api/v2", "k", "vigil/test");
        assert_eq!(
            client.monitor_url(42),
            "https://api.vigil.dev/api/v2/monitoring/user_monitors/42"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = Client::new("https://custom.example.com/", "k", "vigil/test");
        assert_eq!(client.base_url(), "https://custom.example.com");
        assert_eq!(
            client.monitor_url(1),
            "https://custom.example.com/monitoring/user_monitors/1"
        );
    }

    #[test]
    fn test_expect_status() {
        assert!(expect_status(200, 200).is_ok());
        let err = expect_status(200, 201).unwrap_err();
        match err {
            Error::UnexpectedStatus { expected, got } => {
                assert_eq!(expected, 201);
                assert_eq!(got, 200);
            }
            _ => panic!("Expected Error::UnexpectedStatus"),
        }
    }
}
