//! REST adapter over the backend of record.
//!
//! Implements every core repository port against the backend HTTP API. The
//! session token rides along as a default `Authorization` header; HTTP status
//! codes are folded into the domain error taxonomy in one place
//! ([`error_from_response`]) so callers never see transport details.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitraplan_core::ports::{
    AbsenceRepository, EmployeeRepository, IdentityProvider, InterventionRepository,
};
use vitraplan_core::triage::ports::{ClientDirectory, RawEventRepository};
use vitraplan_domain::{
    Absence, BackendConfig, Client, Employee, EmployeeUpdate, Intervention, RawCalendarEvent,
    RawEventStatus, Result, VitraError,
};

use crate::http::HttpClient;

/// REST client for the backend store.
pub struct BackendApiClient {
    http: HttpClient,
    base_url: String,
}

impl BackendApiClient {
    /// Build a client from the backend configuration.
    ///
    /// # Errors
    /// Returns `VitraError::Config` for an unusable token and propagates
    /// HTTP client construction failures.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                VitraError::Config("Backend token contains invalid header characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = HttpClient::builder()
            .default_headers(headers)
            .user_agent("vitraplan/0.1")
            .build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Build a client around an existing [`HttpClient`].
    pub fn with_http_client(config: &BackendConfig, http: HttpClient) -> Self {
        Self { http, base_url: config.base_url.trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self.http.request(Method::GET, self.url(path)).query(query);
        let response = self.http.send(request).await?;
        expect_json(response).await
    }

    /// GET that treats 404 as absence instead of an error.
    async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let request = self.http.request(Method::GET, self.url(path));
        let response = self.http.send(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        expect_json(response).await.map(Some)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.http.request(Method::POST, self.url(path)).json(body);
        let response = self.http.send(request).await?;
        expect_json(response).await
    }

    async fn post_accepted<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.http.request(Method::POST, self.url(path)).json(body);
        let response = self.http.send(request).await?;
        expect_success(response).await
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http.request(Method::PATCH, self.url(path)).json(body);
        let response = self.http.send(request).await?;
        expect_json(response).await
    }
}

/// Backend error payload (`{"detail": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| VitraError::Internal(format!("Failed to decode backend response: {err}")))
}

async fn expect_success(response: Response) -> Result<()> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    Ok(())
}

/// Fold an HTTP error status into the domain taxonomy.
async fn error_from_response(response: Response) -> VitraError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    match status {
        StatusCode::NOT_FOUND => VitraError::NotFound(message),
        StatusCode::CONFLICT => VitraError::InvalidTransition(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            VitraError::Validation(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VitraError::Auth(message),
        _ => VitraError::Network(format!("HTTP {status}: {message}")),
    }
}

fn status_list(statuses: &[RawEventStatus]) -> String {
    statuses.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

#[async_trait]
impl EmployeeRepository for BackendApiClient {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.get_json("/api/employees", &[]).await
    }

    async fn find_employee(&self, id: Uuid) -> Result<Option<Employee>> {
        self.get_json_opt(&format!("/api/employees/{id}")).await
    }

    async fn create_employee(&self, employee: Employee) -> Result<()> {
        self.post_accepted("/api/employees", &employee).await
    }

    async fn update_employee(&self, id: Uuid, update: EmployeeUpdate) -> Result<Employee> {
        self.patch_json(&format!("/api/employees/{id}"), &update).await
    }
}

#[async_trait]
impl AbsenceRepository for BackendApiClient {
    async fn absences_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Absence>> {
        self.get_json("/api/absences", &[("from", start.to_string()), ("to", end.to_string())])
            .await
    }

    async fn absences_for_employee(&self, employee_id: Uuid) -> Result<Vec<Absence>> {
        self.get_json(&format!("/api/absences/employee/{employee_id}"), &[]).await
    }

    async fn create_absence(&self, absence: Absence) -> Result<()> {
        self.post_accepted("/api/absences", &absence).await
    }
}

#[async_trait]
impl InterventionRepository for BackendApiClient {
    async fn interventions_starting_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Intervention>> {
        self.get_json(
            "/api/interventions",
            &[("from", start.to_rfc3339()), ("to", end.to_rfc3339())],
        )
        .await
    }

    async fn find_intervention(&self, id: Uuid) -> Result<Option<Intervention>> {
        self.get_json_opt(&format!("/api/interventions/{id}")).await
    }

    async fn create_intervention(&self, intervention: Intervention) -> Result<()> {
        self.post_accepted("/api/interventions", &intervention).await
    }

    async fn update_intervention(&self, intervention: Intervention) -> Result<()> {
        let path = format!("/api/interventions/{}", intervention.id);
        let _: Intervention = self.patch_json(&path, &intervention).await?;
        Ok(())
    }
}

/// Body of the conditional assignment update
#[derive(Debug, Serialize)]
struct AssignmentBody<'a> {
    employee_ids: &'a [Uuid],
    expected_status: &'a [RawEventStatus],
    status: RawEventStatus,
}

/// Body of the conditional terminal update
#[derive(Debug, Serialize)]
struct TerminalBody<'a> {
    expected_status: &'a [RawEventStatus],
    status: RawEventStatus,
    linked_intervention_id: Option<Uuid>,
}

#[async_trait]
impl RawEventRepository for BackendApiClient {
    async fn find_event(&self, id: Uuid) -> Result<Option<RawCalendarEvent>> {
        self.get_json_opt(&format!("/api/raw-events/{id}")).await
    }

    async fn events_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        statuses: &[RawEventStatus],
    ) -> Result<Vec<RawCalendarEvent>> {
        self.get_json(
            "/api/raw-events",
            &[
                ("from", start.to_string()),
                ("to", end.to_string()),
                ("status", status_list(statuses)),
            ],
        )
        .await
    }

    async fn set_assignment(
        &self,
        id: Uuid,
        expected: &[RawEventStatus],
        employee_ids: &[Uuid],
        next: RawEventStatus,
    ) -> Result<RawCalendarEvent> {
        let body = AssignmentBody { employee_ids, expected_status: expected, status: next };
        self.post_json(&format!("/api/raw-events/{id}/assign"), &body).await
    }

    async fn mark_terminal(
        &self,
        id: Uuid,
        expected: &[RawEventStatus],
        next: RawEventStatus,
        linked_intervention_id: Option<Uuid>,
    ) -> Result<RawCalendarEvent> {
        let body = TerminalBody { expected_status: expected, status: next, linked_intervention_id };
        self.post_json(&format!("/api/raw-events/{id}/status"), &body).await
    }
}

#[async_trait]
impl ClientDirectory for BackendApiClient {
    async fn find_client_by_name(&self, name: &str) -> Result<Option<Client>> {
        let matches: Vec<Client> =
            self.get_json("/api/clients", &[("name", name.to_string())]).await?;
        Ok(matches.into_iter().next())
    }

    async fn create_client(&self, client: Client) -> Result<()> {
        self.post_accepted("/api/clients", &client).await
    }
}

#[async_trait]
impl IdentityProvider for BackendApiClient {
    async fn caller_profile(&self, token: &str) -> Result<Employee> {
        let request = self
            .http
            .request(Method::GET, self.url("/api/auth/profile"))
            .header(AUTHORIZATION, format!("Bearer {token}"));
        let response = self.http.send(request).await?;
        expect_json(response).await
    }
}
