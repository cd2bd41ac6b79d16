//! Client configuration. The backend origin is baked in at build time so
//! the WASM bundle needs no runtime configuration step.

/// Fallback when `PENSTAND_API_URL` is not set at build time. Matches the
/// local development backend.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

pub fn api_base_url() -> String {
    option_env!("PENSTAND_API_URL")
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Cookie-issuing endpoint hit before every credentialed mutation.
pub const CSRF_COOKIE_ENDPOINT: &str = "/sanctum/csrf-cookie";
pub const CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

pub const LOGIN_ROUTE: &str = "/login";
pub const AUTHENTICATED_HOME: &str = "/dashboard";

/// Settle window before a route guard acts on a just-resolved session.
/// Must stay well under a second.
pub const GUARD_STABILIZE_MS: u32 = 250;

/// Bounded retry applies to the session probe only; no other request
/// retries.
pub const SESSION_FETCH_RETRIES: u32 = 2;
pub const SESSION_RETRY_DELAY_MS: u32 = 400;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }

    #[test]
    fn test_guard_delay_stays_under_a_second() {
        assert!(GUARD_STABILIZE_MS < 1000);
    }
}
