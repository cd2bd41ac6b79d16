use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customers have no screens of their own; they are fetched as reference
/// data for the order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
