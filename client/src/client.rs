//! Venue booking API client implementation

use crate::{
    config::ApiConfig,
    error::{ApiError, error_message},
    types::{
        Booking, BookingRequest, CredentialedProfile, Envelope, Paged, ProfileBooking, Venue,
    },
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Venue booking API client
///
/// All methods issue one HTTP request and map the response to a typed value
/// or an [`ApiError`]. Authenticated endpoints take the bearer token
/// explicitly - the client itself holds no session state.
#[derive(Debug, Clone)]
pub struct VenueApiClient {
    http: Client,
    config: ApiConfig,
}

impl VenueApiClient {
    /// Create a new client with explicit configuration
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Create a new client with configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingBaseUrl`] / [`ApiError::MissingApiKey`] if
    /// the configuration environment variables are unset.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    /// Fetch a page of venues
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures.
    pub async fn list_venues(&self, page: u32, limit: u32) -> Result<Paged<Venue>, ApiError> {
        let request = self
            .http
            .get(self.url("/venues"))
            .query(&[("page", page), ("limit", limit)]);

        self.execute_json(request).await
    }

    /// Fetch a single venue, optionally with its embedded booking list
    ///
    /// The embedded list is the sole input to availability checks.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures.
    pub async fn get_venue(&self, id: &str, include_bookings: bool) -> Result<Venue, ApiError> {
        let mut request = self.http.get(self.url(&format!("/venues/{id}")));
        if include_bookings {
            request = request.query(&[("_bookings", "true")]);
        }

        let envelope: Envelope<Venue> = self.execute_json(request).await?;
        Ok(envelope.data)
    }

    /// Search venues by free text and optional date window
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures.
    pub async fn search_venues(
        &self,
        query: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Venue>, ApiError> {
        let mut request = self
            .http
            .get(self.url("/venues/search"))
            .query(&[("q", query)]);
        if let Some(from) = date_from {
            request = request.query(&[("dateFrom", from.to_string())]);
        }
        if let Some(to) = date_to {
            request = request.query(&[("dateTo", to.to_string())]);
        }

        let envelope: Envelope<Vec<Venue>> = self.execute_json(request).await?;
        Ok(envelope.data)
    }

    /// Create a booking
    ///
    /// Requires a bearer credential; the server enforces the no-overlap
    /// invariant authoritatively and rejects conflicting requests.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors (including
    /// server-side booking conflicts), or parsing failures.
    pub async fn create_booking(
        &self,
        access_token: &str,
        booking: &BookingRequest,
    ) -> Result<Booking, ApiError> {
        let request = self
            .http
            .post(self.url("/bookings"))
            .bearer_auth(access_token)
            .json(booking);

        let envelope: Envelope<Booking> = self.execute_json(request).await?;
        Ok(envelope.data)
    }

    /// Fetch the bookings made by a profile
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures.
    pub async fn bookings_by_profile(
        &self,
        access_token: &str,
        profile_name: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Paged<ProfileBooking>, ApiError> {
        let mut request = self
            .http
            .get(self.url(&format!("/profiles/{profile_name}/bookings")))
            .bearer_auth(access_token)
            .query(&[("_venue", "true")]);
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        self.execute_json(request).await
    }

    /// Cancel a booking
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or API errors.
    pub async fn delete_booking(&self, access_token: &str, id: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.url(&format!("/bookings/{id}")))
            .bearer_auth(access_token);

        let response = self.execute(request).await?;
        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            status => Err(Self::status_error(status, response).await),
        }
    }

    /// Log in and obtain a bearer credential plus the cached profile
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for rejected credentials, and the
    /// usual network/parsing errors otherwise.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CredentialedProfile, ApiError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }));

        let envelope: Envelope<CredentialedProfile> = self.execute_json(request).await?;
        Ok(envelope.data)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Send a request with the API key header attached.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request
            .header("X-API-Key", &self.config.api_key)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))
    }

    /// Send a request and decode a 2xx JSON body, mapping error statuses.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(request).await?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
            status => Err(Self::status_error(status, response).await),
        }
    }

    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status = status.as_u16(), "API request failed");
                ApiError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                }
            },
        }
    }
}
