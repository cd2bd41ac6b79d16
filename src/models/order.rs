use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Serialize};

use super::customer::Customer;
use super::pen::Pen;

/// Shipping state of an order. Two wire forms are in circulation:
/// the canonical `"pending"`/`"shipped"` strings and the older `0`/`1`
/// flags carried by the `shipping` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
}

impl OrderStatus {
    pub fn toggled(self) -> Self {
        match self {
            OrderStatus::Pending => OrderStatus::Shipped,
            OrderStatus::Shipped => OrderStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
        }
    }

    pub fn as_legacy_flag(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Shipped => 1,
        }
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Flag(u8),
            Name(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Flag(0) => Ok(OrderStatus::Pending),
            Wire::Flag(1) => Ok(OrderStatus::Shipped),
            Wire::Flag(other) => Err(de::Error::custom(format!(
                "unknown order status flag: {other}"
            ))),
            Wire::Name(name) => match name.as_str() {
                "pending" => Ok(OrderStatus::Pending),
                "shipped" => Ok(OrderStatus::Shipped),
                other => Err(de::Error::custom(format!("unknown order status: {other}"))),
            },
        }
    }
}

/// Canonical client-side order model. The aliases accept records still
/// written in the older `num`/`shipping` convention; responses are
/// normalized to `quantity`/`status` on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub pen_id: i64,
    pub customer_id: i64,
    #[serde(alias = "num")]
    pub quantity: u32,
    #[serde(alias = "shipping")]
    pub status: OrderStatus,
    pub orderday: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pen: Option<Pen>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl Order {
    pub fn pen_name(&self) -> String {
        self.pen
            .as_ref()
            .map(|pen| pen.name.clone())
            .unwrap_or_else(|| format!("#{}", self.pen_id))
    }

    pub fn customer_name(&self) -> String {
        self.customer
            .as_ref()
            .map(|customer| customer.name.clone())
            .unwrap_or_else(|| format!("#{}", self.customer_id))
    }
}

/// Form payload in the canonical convention, field values as entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub pen_id: String,
    pub customer_id: String,
    pub quantity: String,
    pub status: OrderStatus,
    pub orderday: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            pen_id: String::new(),
            customer_id: String::new(),
            quantity: String::new(),
            status: OrderStatus::Pending,
            orderday: String::new(),
        }
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            pen_id: order.pen_id.to_string(),
            customer_id: order.customer_id.to_string(),
            quantity: order.quantity.to_string(),
            status: order.status,
            orderday: order.orderday.clone(),
        }
    }
}

/// The older field-naming convention, still expected by the PUT
/// endpoint. Kept as an explicit converter so the mapping lives in one
/// place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyOrderPayload {
    pub pen_id: i64,
    pub customer_id: i64,
    pub num: u32,
    pub shipping: u8,
    pub orderday: String,
}

impl From<&Order> for LegacyOrderPayload {
    fn from(order: &Order) -> Self {
        Self {
            pen_id: order.pen_id,
            customer_id: order.customer_id,
            num: order.quantity,
            shipping: order.status.as_legacy_flag(),
            orderday: order.orderday.clone(),
        }
    }
}

impl LegacyOrderPayload {
    /// The status-toggle payload: the order as it stands, with the
    /// shipping flag replaced.
    pub fn with_status(order: &Order, status: OrderStatus) -> Self {
        Self {
            shipping: status.as_legacy_flag(),
            ..Self::from(order)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = r#"{
        "id": 3,
        "pen_id": 1,
        "customer_id": 2,
        "quantity": 4,
        "status": "pending",
        "orderday": "2024-03-05",
        "created_at": "2024-03-05T08:00:00.000000Z",
        "updated_at": "2024-03-05T08:00:00.000000Z"
    }"#;

    const LEGACY: &str = r#"{
        "id": 3,
        "pen_id": 1,
        "customer_id": 2,
        "num": 4,
        "shipping": 1,
        "orderday": "2024-03-05",
        "created_at": "2024-03-05T08:00:00.000000Z",
        "updated_at": "2024-03-05T08:00:00.000000Z"
    }"#;

    #[test]
    fn test_canonical_fields_parse() {
        let order: Order = serde_json::from_str(CANONICAL).expect("canonical parses");
        assert_eq!(order.quantity, 4);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_legacy_fields_parse_to_canonical_model() {
        let order: Order = serde_json::from_str(LEGACY).expect("legacy parses");
        assert_eq!(order.quantity, 4);
        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(order.pen.is_none());
    }

    #[test]
    fn test_status_toggle_round_trip() {
        assert_eq!(OrderStatus::Pending.toggled(), OrderStatus::Shipped);
        assert_eq!(OrderStatus::Pending.toggled().toggled(), OrderStatus::Pending);
    }

    #[test]
    fn test_legacy_payload_converter() {
        let order: Order = serde_json::from_str(CANONICAL).expect("canonical parses");
        let payload = LegacyOrderPayload::with_status(&order, OrderStatus::Shipped);
        assert_eq!(payload.num, order.quantity);
        assert_eq!(payload.shipping, 1);
        let encoded = serde_json::to_value(&payload).expect("payload serializes");
        assert!(encoded.get("num").is_some());
        assert!(encoded.get("quantity").is_none());
    }

    #[test]
    fn test_status_serializes_canonical_name() {
        let encoded = serde_json::to_string(&OrderStatus::Shipped).expect("serializes");
        assert_eq!(encoded, r#""shipped""#);
    }
}
