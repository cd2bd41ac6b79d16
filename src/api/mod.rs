pub mod client;
pub mod error;

pub use client::{AbortGuard, ApiClient};
pub use error::{ApiError, ValidationErrors};
