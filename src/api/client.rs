use gloo_net::http::{RequestBuilder, Response};
use leptos::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{AbortController, AbortSignal, RequestCredentials};

use crate::config;

use super::error::{classify_failure, ApiError};

/// What a 401 on a request should do to the rest of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnUnauthorized {
    /// Bump the shared signal; the session layer resets and redirects.
    Announce,
    /// The caller resolves it itself. Used by the session probe, which
    /// must settle to "absent" without looping through the login
    /// redirect.
    Silent,
}

/// Cookie-session HTTP client for the backend API. Constructed once at
/// app start and passed down through context; there is no module-level
/// instance.
///
/// Every request carries credentials and, when the cookie is present,
/// the anti-forgery token header. 401 responses are reported through
/// [`ApiClient::unauthorized_signal`] rather than by forcing a page
/// reload, so the session layer owns the reaction.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    unauthorized: Option<RwSignal<u32>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            unauthorized: None,
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::api_base_url())
    }

    /// Attach the signal bumped on credentialed 401s. Only the app root
    /// does this; plain clients (e.g. inside cached query functions)
    /// leave it unset and report 401 as an ordinary error.
    pub fn with_unauthorized_signal(mut self, signal: RwSignal<u32>) -> Self {
        self.unauthorized = Some(signal);
        self
    }

    pub fn unauthorized_signal(&self) -> Option<RwSignal<u32>> {
        self.unauthorized
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Default headers plus the CSRF token read fresh from the cookie
    /// jar before every request.
    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json")
            .header("X-Requested-With", "XMLHttpRequest");
        match csrf_token() {
            Some(token) => builder.header(config::CSRF_HEADER, &token),
            None => builder,
        }
    }

    /// GET against the fixed cookie-issuing endpoint. Must run before
    /// any credentialed mutation; a session change rotates the token.
    pub async fn csrf_preflight(&self) -> Result<(), ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::get(
                &self.url(config::CSRF_COOKIE_ENDPOINT),
            ))
            .send()
            .await?;
        self.check(response, OnUnauthorized::Silent).await.map(|_| ())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        abort: Option<&AbortSignal>,
    ) -> Result<T, ApiError> {
        let mut builder = self.prepare(gloo_net::http::Request::get(&self.url(path)));
        if abort.is_some() {
            builder = builder.abort_signal(abort);
        }
        let response = builder.send().await?;
        self.read_json(response, OnUnauthorized::Announce).await
    }

    /// Probe-mode GET: a 401 is returned to the caller without touching
    /// the unauthorized signal.
    pub async fn get_json_silent<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::get(&self.url(path)))
            .send()
            .await?;
        self.read_json(response, OnUnauthorized::Silent).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::post(&self.url(path)))
            .json(body)?
            .send()
            .await?;
        self.read_json(response, OnUnauthorized::Announce).await
    }

    /// POST where only the status matters to the caller.
    pub async fn post_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::post(&self.url(path)))
            .json(body)?
            .send()
            .await?;
        self.check(response, OnUnauthorized::Announce).await.map(|_| ())
    }

    /// Body-less POST (logout, resend-verification).
    pub async fn post_bare(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::post(&self.url(path)))
            .send()
            .await?;
        self.check(response, OnUnauthorized::Announce).await.map(|_| ())
    }

    pub async fn patch_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::patch(&self.url(path)))
            .json(body)?
            .send()
            .await?;
        self.check(response, OnUnauthorized::Announce).await.map(|_| ())
    }

    pub async fn put_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::put(&self.url(path)))
            .json(body)?
            .send()
            .await?;
        self.check(response, OnUnauthorized::Announce).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .prepare(gloo_net::http::Request::delete(&self.url(path)))
            .send()
            .await?;
        self.check(response, OnUnauthorized::Announce).await.map(|_| ())
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
        on_401: OnUnauthorized,
    ) -> Result<T, ApiError> {
        let response = self.check(response, on_401).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check(
        &self,
        response: Response,
        on_401: OnUnauthorized,
    ) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status, &body);
        if error == ApiError::Unauthorized && on_401 == OnUnauthorized::Announce {
            if let Some(signal) = self.unauthorized {
                signal.update(|n| *n = n.wrapping_add(1));
            }
        }
        Err(error)
    }
}

/// Reads the anti-forgery token from the cookie jar, if the backend has
/// issued one.
pub fn csrf_token() -> Option<String> {
    let cookies = document()
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?
        .cookie()
        .ok()?;
    csrf_token_from(&cookies)
}

/// The cookie value arrives URL-encoded; a value that fails to decode is
/// passed through as-is rather than dropped.
fn csrf_token_from(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != config::CSRF_COOKIE_NAME {
            return None;
        }
        Some(
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}

/// Owns the `AbortController` for the most recent request of one logical
/// resource. Arming a new request aborts the previous one, so a slow
/// stale response can never land after a newer request has started.
#[derive(Debug, Default)]
pub struct AbortGuard {
    controller: Option<AbortController>,
}

impl AbortGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort whatever is in flight and arm a controller for the next
    /// request. Returns `None` only if the environment cannot create
    /// controllers, in which case the request simply runs unguarded.
    pub fn begin(&mut self) -> Option<AbortSignal> {
        self.abort();
        let controller = AbortController::new().ok()?;
        let signal = controller.signal();
        self.controller = Some(controller);
        Some(signal)
    }

    pub fn abort(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_token_parsed_and_decoded() {
        let cookies = "laravel_session=abc123; XSRF-TOKEN=eyJpdiI6%3D%3D; theme=dark";
        assert_eq!(csrf_token_from(cookies), Some("eyJpdiI6==".to_string()));
    }

    #[test]
    fn test_csrf_token_missing_cookie() {
        assert_eq!(csrf_token_from("laravel_session=abc123"), None);
        assert_eq!(csrf_token_from(""), None);
    }

    #[test]
    fn test_csrf_token_ignores_name_suffix_matches() {
        assert_eq!(csrf_token_from("NOT-XSRF-TOKEN=value"), None);
    }
}
