use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated account as the backend reports it. The same record
/// is mirrored into durable storage, so it must round-trip through serde
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Ada",
                "email": "ada@example.com",
                "email_verified_at": null,
                "created_at": "2024-03-01T09:30:00.000000Z",
                "updated_at": "2024-03-02T10:00:00.000000Z"
            }"#,
        )
        .expect("sample user parses")
    }

    #[test]
    fn test_round_trip() {
        let user = sample();
        let encoded = serde_json::to_string(&user).expect("serializes");
        let decoded: User = serde_json::from_str(&encoded).expect("parses back");
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_verification_flag() {
        let mut user = sample();
        assert!(!user.is_verified());
        user.email_verified_at = Some(user.created_at);
        assert!(user.is_verified());
    }
}
