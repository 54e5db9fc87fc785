use crate::auth::Credentials;
use crate::models::{FieldErrors, Post, PostId, PostPayload};
use reqwest::Method;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub(crate) enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        errors: Option<FieldErrors>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }

    /// Reads the `{message?, errors?}` error body. Anything unparseable is
    /// dropped piecewise, so a malformed `errors` still keeps `message`.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let data: Option<serde_json::Value> = serde_json::from_str(body).ok();

        let message = data
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let errors = data
            .as_ref()
            .and_then(|v| v.get("errors"))
            .and_then(|v| serde_json::from_value::<FieldErrors>(v.clone()).ok())
            .filter(|e| !e.is_empty());

        Self::Status {
            status,
            message,
            errors,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Status { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Post CRUD operations the pages depend on.
pub(crate) trait PostsBackend {
    async fn list_posts(&self) -> ApiResult<Vec<Post>>;
    async fn get_post(&self, id: PostId) -> ApiResult<Post>;
    async fn create_post(&self, payload: &PostPayload) -> ApiResult<Post>;
    async fn update_post(&self, id: PostId, payload: &PostPayload) -> ApiResult<Post>;
    async fn delete_post(&self, id: PostId) -> ApiResult<()>;
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    /// Request builder with the current token attached. The token is read at
    /// call time, never cached on the client.
    pub(crate) fn build_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let client = reqwest::Client::new();
        let req = client.request(method, format!("{}{}", self.base_url, path));
        Self::with_auth_headers(req, self.credentials.token())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&PostPayload>,
    ) -> ApiResult<reqwest::Response> {
        log::debug!("{method} {path}");

        let mut req = self.build_request(method.clone(), path);
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(|e| {
            log::warn!("{method} {path}: {e}");
            ApiError::network(e)
        })?;

        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &text);
        log::warn!("{method} {path}: {err}");
        Err(err)
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&PostPayload>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::decode)
    }
}

impl PostsBackend for ApiClient {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.request(Method::GET, "/posts", None).await
    }

    async fn get_post(&self, id: PostId) -> ApiResult<Post> {
        self.request(Method::GET, &format!("/posts/{id}"), None).await
    }

    async fn create_post(&self, payload: &PostPayload) -> ApiResult<Post> {
        self.request(Method::POST, "/posts", Some(payload)).await
    }

    async fn update_post(&self, id: PostId, payload: &PostPayload) -> ApiResult<Post> {
        self.request(Method::PUT, &format!("/posts/{id}"), Some(payload))
            .await
    }

    /// Success bodies are ignored; some backends answer `204 No Content`.
    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        self.send(Method::DELETE, &format!("/posts/{id}"), None)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentials;

    fn client() -> ApiClient {
        ApiClient::new(
            "http://localhost:8000",
            Credentials::new(MemoryCredentials::default()),
        )
    }

    fn auth_header(c: &ApiClient) -> Option<String> {
        let req = c
            .build_request(Method::GET, "/posts")
            .build()
            .expect("request should build");
        req.headers()
            .get("Authorization")
            .map(|v| v.to_str().expect("ascii header").to_string())
    }

    #[test]
    fn test_api_client_new() {
        let c = client();
        assert_eq!(c.base_url, "http://localhost:8000");
        assert!(c.credentials().token().is_none());
    }

    #[test]
    fn test_request_url_joins_base_and_path() {
        let req = client()
            .build_request(Method::DELETE, "/posts/9")
            .build()
            .expect("request should build");
        assert_eq!(req.url().as_str(), "http://localhost:8000/posts/9");
        assert_eq!(req.method(), &Method::DELETE);
    }

    #[test]
    fn test_no_auth_header_without_token() {
        assert!(auth_header(&client()).is_none());
    }

    #[test]
    fn test_saved_token_is_sent_as_bearer() {
        let c = client();
        c.credentials().save("xyz");
        assert_eq!(auth_header(&c).as_deref(), Some("Bearer xyz"));
    }

    #[test]
    fn test_cleared_token_is_not_sent() {
        let c = client();
        c.credentials().save("xyz");
        c.credentials().clear();
        assert!(auth_header(&c).is_none());
    }

    #[test]
    fn test_token_change_seen_by_existing_clone() {
        let c = client();
        let cloned = c.clone();
        c.credentials().save("fresh");
        assert_eq!(auth_header(&cloned).as_deref(), Some("Bearer fresh"));
    }

    #[test]
    fn test_error_body_with_message_and_field_errors() {
        let e = ApiError::from_status(
            422,
            r#"{"message": "The given data was invalid.", "errors": {"title": ["The title field is required."]}}"#,
        );
        assert_eq!(e.status(), Some(422));
        assert_eq!(e.server_message(), Some("The given data was invalid."));
        let errors = e.field_errors().expect("field errors");
        assert_eq!(errors.title(), ["The title field is required."]);
        assert!(!e.is_not_found());
    }

    #[test]
    fn test_error_body_malformed_errors_keeps_message() {
        let e = ApiError::from_status(400, r#"{"message": "Bad", "errors": "nope"}"#);
        assert_eq!(e.server_message(), Some("Bad"));
        assert!(e.field_errors().is_none());
    }

    #[test]
    fn test_error_body_not_json() {
        let e = ApiError::from_status(404, "<html>Not Found</html>");
        assert!(e.is_not_found());
        assert!(e.server_message().is_none());
        assert_eq!(e.user_message("Failed to load post."), "Failed to load post.");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let e = ApiError::Network("connection refused".to_string());
        assert!(e.status().is_none());
        assert_eq!(e.user_message("Failed to load posts."), "Failed to load posts.");
        assert_eq!(e.to_string(), "network error: connection refused");
    }
}
