//! Test utilities for CLI testing
//!
//! Provides a mock of the remote fleet API and an in-memory [`FleetApi`]
//! fake for handler tests.

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use fleet_core::api::{ODataResponse, WhoAmIResponse};
use fleet_core::{DeviceType, DeviceTypeState, EnvironmentVariable, FleetError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::client::FleetApi;

/// Token accepted by the mock server
pub const VALID_TOKEN: &str = "test-token";

/// Build a device type record
pub fn device_type(
    slug: &str,
    name: &str,
    aliases: &[&str],
    state: DeviceTypeState,
) -> DeviceType {
    DeviceType {
        slug: slug.to_string(),
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        arch: Some("armv7hf".to_string()),
        state: Some(state),
    }
}

/// Build a variable record
pub fn variable(id: u64, name: &str, value: &str) -> EnvironmentVariable {
    EnvironmentVariable {
        id,
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// A small device type catalog with one discontinued entry
pub fn sample_device_types() -> Vec<DeviceType> {
    vec![
        device_type(
            "raspberrypi3",
            "Raspberry Pi 3",
            &["raspberrypi3", "rpi3"],
            DeviceTypeState::Released,
        ),
        device_type("intel-nuc", "Intel NUC", &[], DeviceTypeState::Released),
        device_type(
            "artik5",
            "Samsung Artik 520",
            &["artik5"],
            DeviceTypeState::Discontinued,
        ),
        device_type("jetson-tx2", "Nvidia Jetson TX2", &["tx2"], DeviceTypeState::Beta),
    ]
}

/// Mock server state
#[derive(Debug, Clone, Default)]
pub struct MockServerState {
    /// Device type catalog
    pub device_types: Arc<Mutex<Vec<DeviceType>>>,
    /// Variables keyed by (resource, $filter)
    pub variables: Arc<Mutex<HashMap<(String, String), Vec<EnvironmentVariable>>>>,
    /// Every request received, as "path?$filter"
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockServerState {
    /// Register the variables returned for a resource query
    pub fn insert_variables(&self, resource: &str, filter: &str, vars: Vec<EnvironmentVariable>) {
        self.variables
            .lock()
            .unwrap()
            .insert((resource.to_string(), filter.to_string()), vars);
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Mock server implementation
#[derive(Debug)]
pub struct MockServer {
    state: MockServerState,
    port: u16,
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServer {
    /// Create a new mock server seeded with [`sample_device_types`]
    pub fn new() -> Self {
        let state = MockServerState::default();
        *state.device_types.lock().unwrap() = sample_device_types();
        Self { state, port: 0 }
    }

    /// Start the mock server and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        self.port = addr.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &MockServerState {
        &self.state
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/device-types/v1", get(device_types_handler))
            .route("/user/v1/whoami", get(whoami_handler))
            .route("/v6/:resource", get(resource_handler))
            .with_state(self.state.clone())
    }
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {}", VALID_TOKEN))
        .unwrap_or(false)
}

async fn device_types_handler(State(state): State<MockServerState>) -> Json<Vec<DeviceType>> {
    state
        .requests
        .lock()
        .unwrap()
        .push("/device-types/v1".to_string());
    Json(state.device_types.lock().unwrap().clone())
}

async fn whoami_handler(
    State(state): State<MockServerState>,
    headers: HeaderMap,
) -> Result<Json<WhoAmIResponse>, (StatusCode, &'static str)> {
    state
        .requests
        .lock()
        .unwrap()
        .push("/user/v1/whoami".to_string());

    if !is_authorized(&headers) {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    Ok(Json(WhoAmIResponse {
        id: 1,
        username: "operator".to_string(),
        email: Some("operator@example.com".to_string()),
    }))
}

async fn resource_handler(
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<MockServerState>,
    headers: HeaderMap,
) -> Result<Json<ODataResponse<EnvironmentVariable>>, (StatusCode, &'static str)> {
    let filter = params.get("$filter").cloned().unwrap_or_default();
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("/v6/{}?{}", resource, filter));

    if !is_authorized(&headers) {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let vars = state
        .variables
        .lock()
        .unwrap()
        .get(&(resource, filter))
        .cloned()
        .unwrap_or_default();
    Ok(Json(ODataResponse::new(vars)))
}

/// In-memory [`FleetApi`] recording every call it receives
#[derive(Debug, Default)]
pub struct FakeFleetApi {
    /// Returned by `list_device_types`
    pub device_types: Vec<DeviceType>,
    /// Returned by whichever variable read is called
    pub variables: Vec<EnvironmentVariable>,
    /// Whether `ensure_logged_in` fails
    pub logged_out: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeFleetApi {
    /// Fake serving the given variables to a logged-in caller
    pub fn with_variables(variables: Vec<EnvironmentVariable>) -> Self {
        Self {
            variables,
            ..Default::default()
        }
    }

    /// Fake serving the given device type catalog
    pub fn with_device_types(device_types: Vec<DeviceType>) -> Self {
        Self {
            device_types,
            ..Default::default()
        }
    }

    /// Calls received so far, e.g. `device_config_vars(7cf02a6)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl FleetApi for FakeFleetApi {
    async fn ensure_logged_in(&self) -> Result<()> {
        self.record("ensure_logged_in".to_string());
        if self.logged_out {
            return Err(FleetError::NotLoggedIn.into());
        }
        Ok(())
    }

    async fn list_device_types(&self) -> Result<Vec<DeviceType>> {
        self.record("list_device_types".to_string());
        Ok(self.device_types.clone())
    }

    async fn application_env_vars(&self, application: &str) -> Result<Vec<EnvironmentVariable>> {
        self.record(format!("application_env_vars({})", application));
        Ok(self.variables.clone())
    }

    async fn application_config_vars(
        &self,
        application: &str,
    ) -> Result<Vec<EnvironmentVariable>> {
        self.record(format!("application_config_vars({})", application));
        Ok(self.variables.clone())
    }

    async fn device_env_vars(&self, device: &str) -> Result<Vec<EnvironmentVariable>> {
        self.record(format!("device_env_vars({})", device));
        Ok(self.variables.clone())
    }

    async fn device_config_vars(&self, device: &str) -> Result<Vec<EnvironmentVariable>> {
        self.record(format!("device_config_vars({})", device));
        Ok(self.variables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let server = MockServer::new();
        let (server, url) = server.start().await.unwrap();

        assert!(server.port() > 0);
        assert!(url.contains(&server.port().to_string()));

        let response = reqwest::Client::new()
            .get(format!("{}/device-types/v1", url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        let types: Vec<DeviceType> = response.json().await.unwrap();
        assert_eq!(types.len(), 4);
    }

    #[tokio::test]
    async fn test_whoami_requires_token() {
        let (_, url) = MockServer::new().start().await.unwrap();
        let client = reqwest::Client::new();

        let response = client
            .get(format!("{}/user/v1/whoami", url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

        let response = client
            .get(format!("{}/user/v1/whoami", url))
            .bearer_auth(VALID_TOKEN)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_resource_lookup_by_filter() {
        let (server, url) = MockServer::new().start().await.unwrap();
        server.state().insert_variables(
            "application_environment_variable",
            "application eq 1",
            vec![variable(1, "A", "x")],
        );

        let response: ODataResponse<EnvironmentVariable> = reqwest::Client::new()
            .get(format!("{}/v6/application_environment_variable", url))
            .query(&[("$filter", "application eq 1")])
            .bearer_auth(VALID_TOKEN)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(response.d, vec![variable(1, "A", "x")]);
    }
}
