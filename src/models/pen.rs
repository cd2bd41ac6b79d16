use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pen {
    /// Display formatting only; no other derived state client-side.
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Form payload, field values exactly as entered. The backend owns
/// validation and answers 422 with per-field messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PenDraft {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl From<&Pen> for PenDraft {
    fn from(pen: &Pen) -> Self {
        Self {
            name: pen.name.clone(),
            price: format!("{:.2}", pen.price),
            stock: pen.stock.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_formatting() {
        let pen: Pen = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Safari",
                "price": 24.5,
                "stock": 12,
                "created_at": "2024-03-01T09:30:00.000000Z",
                "updated_at": "2024-03-01T09:30:00.000000Z"
            }"#,
        )
        .expect("pen parses");
        assert_eq!(pen.formatted_price(), "$24.50");
        assert_eq!(PenDraft::from(&pen).price, "24.50");
    }
}
