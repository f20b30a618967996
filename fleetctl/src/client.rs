//! HTTP client for the remote fleet API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use fleet_core::api::{ODataResponse, WhoAmIResponse};
use fleet_core::env_vars::{
    application_filter, device_filter, APPLICATION_CONFIG_RESOURCE, APPLICATION_ENV_RESOURCE,
    DEVICE_CONFIG_RESOURCE, DEVICE_ENV_RESOURCE,
};
use fleet_core::{DeviceType, EnvironmentVariable, FleetError};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Normalize an API URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Read operations the commands need from the fleet service.
///
/// [`FleetClient`] implements this over HTTP; tests substitute an in-memory
/// fake so each of the four variable reads can be checked on its own.
#[async_trait]
pub trait FleetApi: Send + Sync {
    /// Fail unless the configured credentials are accepted.
    async fn ensure_logged_in(&self) -> Result<()>;

    /// All device types known to the service.
    async fn list_device_types(&self) -> Result<Vec<DeviceType>>;

    /// Environment variables of an application.
    async fn application_env_vars(&self, application: &str) -> Result<Vec<EnvironmentVariable>>;

    /// Configuration variables of an application.
    async fn application_config_vars(&self, application: &str)
        -> Result<Vec<EnvironmentVariable>>;

    /// Environment variables of a device.
    async fn device_env_vars(&self, device: &str) -> Result<Vec<EnvironmentVariable>>;

    /// Configuration variables of a device.
    async fn device_config_vars(&self, device: &str) -> Result<Vec<EnvironmentVariable>>;
}

/// HTTP client for the fleet service's REST API.
///
/// Requests carry the configured token as a bearer credential. Failed
/// requests are reported as-is; nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use fleetctl::client::{FleetApi, FleetClient};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = FleetClient::with_config(
///     "https://api.balena-cloud.com".to_string(),
///     None, // anonymous
///     30,   // timeout in seconds
/// )?;
///
/// let device_types = client.list_device_types().await?;
/// println!("{} device types", device_types.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FleetClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl FleetClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the fleet API
    /// * `token` - API token or session token, if any
    /// * `timeout_secs` - Request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_url: String, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("fleetctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(&api_url),
            token,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}/{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Process an HTTP response and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The server rejects the credentials (401)
    /// - The HTTP status code indicates any other failure
    /// - The response body cannot be read or decoded
    async fn handle_response<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", endpoint))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(FleetError::NotLoggedIn.into());
        }

        if !status.is_success() {
            let message = match text.trim() {
                "" => status.canonical_reason().unwrap_or("request failed").to_string(),
                body => body.to_string(),
            };
            return Err(FleetError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {}", endpoint))
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T> {
        debug!(endpoint, "sending request");
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach {} at {}", endpoint, self.base_url))?;
        debug!(endpoint, status = %response.status(), "received response");

        Self::handle_response(response, endpoint).await
    }

    /// Identity behind the configured token.
    pub async fn whoami(&self) -> Result<WhoAmIResponse> {
        let endpoint = "user/v1/whoami";
        self.send(endpoint, self.get(endpoint)).await
    }

    /// Query a variable resource with the given `$filter`.
    async fn list_variables(&self, resource: &str, filter: String) -> Result<Vec<EnvironmentVariable>> {
        let path = format!("v6/{}", resource);
        let request = self
            .get(&path)
            .query(&[("$filter", filter.as_str()), ("$orderby", "name asc")]);

        let response: ODataResponse<EnvironmentVariable> = self.send(&path, request).await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl FleetApi for FleetClient {
    async fn ensure_logged_in(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(FleetError::NotLoggedIn.into());
        }

        let user = self.whoami().await?;
        debug!(username = %user.username, "authenticated");
        Ok(())
    }

    async fn list_device_types(&self) -> Result<Vec<DeviceType>> {
        let endpoint = "device-types/v1";
        self.send(endpoint, self.get(endpoint)).await
    }

    async fn application_env_vars(&self, application: &str) -> Result<Vec<EnvironmentVariable>> {
        self.list_variables(APPLICATION_ENV_RESOURCE, application_filter(application))
            .await
    }

    async fn application_config_vars(
        &self,
        application: &str,
    ) -> Result<Vec<EnvironmentVariable>> {
        self.list_variables(APPLICATION_CONFIG_RESOURCE, application_filter(application))
            .await
    }

    async fn device_env_vars(&self, device: &str) -> Result<Vec<EnvironmentVariable>> {
        self.list_variables(DEVICE_ENV_RESOURCE, device_filter(device))
            .await
    }

    async fn device_config_vars(&self, device: &str) -> Result<Vec<EnvironmentVariable>> {
        self.list_variables(DEVICE_CONFIG_RESOURCE, device_filter(device))
            .await
    }
}
