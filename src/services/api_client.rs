//! DocuDash API client.
//!
//! Provides the HTTP client for the DocuDash REST API with bearer
//! authentication taken from the shared [`SessionContext`].

use super::session::SessionContext;
use crate::config::ClientConfig;
use crate::error::{AppError, AppResult};
use crate::models::envelope::ErrorBody;
use crate::models::{ApiEnvelope, ListEnvelope, ListParams, Paginated};
use reqwest::{header, multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Page size used when walking every page of a list.
const ALL_PAGES_LIMIT: u32 = 100;

/// Acknowledgement returned by endpoints without a `data` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

/// DocuDash API client.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    session: SessionContext,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ClientConfig, session: SessionContext) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Get the full URL for an API path.
    fn api_url(&self, path: &str) -> String {
        self.config.api_url(path)
    }

    /// Start a request, attaching the bearer token when a session exists.
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        log::debug!("{} {}", method, endpoint);

        let request = self.client.request(method, self.api_url(endpoint));
        let session = self.session.snapshot();
        match session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and turn non-success statuses into errors.
    ///
    /// A 401 tears the session down before the error is returned.
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let body_message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{} returned 401, clearing session", endpoint);
            if let Err(e) = self.session.logout() {
                log::warn!("Failed to clear persisted session: {}", e);
            }
            let message =
                body_message.unwrap_or_else(|| "Session expired. Please log in again.".to_string());
            return Err(AppError::unauthorized_at(message, endpoint));
        }

        let message = match (status, body_message) {
            (_, Some(msg)) => msg,
            (StatusCode::FORBIDDEN, None) => "Access denied".to_string(),
            (StatusCode::NOT_FOUND, None) => "Resource not found".to_string(),
            _ => format!("Request failed ({}): {}", status_code, body),
        };

        Err(AppError::api_full(message, status_code, endpoint))
    }

    /// Decode a successful response body.
    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::internal(format!("Failed to parse response: {}", e)))
    }

    /// Send and unwrap `envelope.data`.
    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> AppResult<T> {
        let response = self.send(request, endpoint).await?;
        let envelope: ApiEnvelope<T> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    /// GET a single record.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        self.data(self.request(Method::GET, endpoint), endpoint).await
    }

    /// GET a single record with query parameters.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &impl Serialize,
    ) -> AppResult<T> {
        let request = self.request(Method::GET, endpoint).query(query);
        self.data(request, endpoint).await
    }

    /// GET a list, forwarding the filters verbatim.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &ListParams,
    ) -> AppResult<Paginated<T>> {
        let mut request = self.request(Method::GET, endpoint);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = self.send(request, endpoint).await?;
        let envelope: ListEnvelope<T> = Self::decode(response).await?;
        Ok(envelope.into())
    }

    /// Fetch every page of a paginated list.
    ///
    /// `page` and `limit` are driven by the walk and appended after the
    /// caller's filters; any the caller passed are dropped. Lists without
    /// pagination info are returned after the first request.
    pub async fn get_all_pages<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &ListParams,
    ) -> AppResult<Vec<T>> {
        let filters = params.clone().without("page").without("limit");
        if filters.len() != params.len() {
            log::debug!("Ignoring page/limit filters while fetching all of {}", endpoint);
        }

        let mut all_data = Vec::new();
        let mut page = 1u32;

        loop {
            let query = filters
                .clone()
                .with("page", page.to_string())
                .with("limit", ALL_PAGES_LIMIT.to_string());
            let result = self.get_list::<T>(endpoint, &query).await?;
            all_data.extend(result.data);

            match result.pagination {
                Some(pagination) if pagination.has_next() && pagination.page >= page => {
                    page = pagination.page + 1
                }
                _ => break,
            }
        }

        Ok(all_data)
    }

    /// POST a JSON body and unwrap `envelope.data`.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let request = self.request(Method::POST, endpoint).json(body);
        self.data(request, endpoint).await
    }

    /// POST a JSON body with query parameters and unwrap `envelope.data`.
    pub async fn post_with<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &impl Serialize,
        body: &B,
    ) -> AppResult<T> {
        let request = self.request(Method::POST, endpoint).query(query).json(body);
        self.data(request, endpoint).await
    }

    /// POST without a body and unwrap `envelope.data`.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        self.data(self.request(Method::POST, endpoint), endpoint).await
    }

    /// POST a JSON body to an endpoint that only acknowledges.
    pub async fn post_ack<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> AppResult<Ack> {
        let request = self.request(Method::POST, endpoint).json(body);
        let response = self.send(request, endpoint).await?;
        Self::decode(response).await
    }

    /// PUT a JSON body and unwrap `envelope.data`.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let request = self.request(Method::PUT, endpoint).json(body);
        self.data(request, endpoint).await
    }

    /// PATCH a JSON body and unwrap `envelope.data`.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let request = self.request(Method::PATCH, endpoint).json(body);
        self.data(request, endpoint).await
    }

    /// DELETE a resource, expecting only a success status.
    pub async fn delete(&self, endpoint: &str) -> AppResult<()> {
        let response = self
            .send(self.request(Method::DELETE, endpoint), endpoint)
            .await?;

        // Body is `{ success, message }`; only the status matters.
        let _ = response.bytes().await;
        Ok(())
    }

    /// POST a multipart form. The response body is decoded as-is, without
    /// an envelope.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: multipart::Form,
    ) -> AppResult<T> {
        let request = self.request(Method::POST, endpoint).multipart(form);
        let response = self.send(request, endpoint).await?;
        Self::decode(response).await
    }
}
